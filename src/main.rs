//! Flappy headless runner
//!
//! Plays the game on autopilot without a window, which exercises the whole
//! simulation, persistence and audio-cue path from the command line:
//!
//! ```text
//! flappy [settings.json] [frames]
//! ```

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::PathBuf;

    use flappy::consts::{DEFAULT_HEADLESS_FRAMES, FRAME_DT};
    use flappy::sim::{GameEvent, TickInput};
    use flappy::{AssetCatalog, Session, Settings, SpriteMetrics, Tuning};

    env_logger::init();
    log::info!("Flappy (native, headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("flappy_settings.json"));
    let frames = match args.next().map(|s| s.parse::<u32>()) {
        Some(Ok(n)) => n,
        Some(Err(e)) => {
            log::warn!("Bad frame count ({}), using {}", e, DEFAULT_HEADLESS_FRAMES);
            DEFAULT_HEADLESS_FRAMES
        }
        None => DEFAULT_HEADLESS_FRAMES,
    };

    let settings = Settings::load_or_default(&settings_path);

    let tuning = match &settings.tuning_path {
        Some(path) => Tuning::load_from(path).unwrap_or_else(|e| {
            log::warn!("{} ({}); using default tuning", e, e.code());
            Tuning::default()
        }),
        None => Tuning::default(),
    };

    let (metrics, clips) = match &settings.asset_root {
        Some(root) => match AssetCatalog::load(root) {
            Ok(catalog) => (catalog.metrics, catalog.sounds),
            Err(e) => {
                log::warn!("{} ({}); using built-in sprite sizes", e, e.code());
                (SpriteMetrics::default(), Vec::new())
            }
        },
        None => (SpriteMetrics::default(), Vec::new()),
    };

    let seed: u64 = rand::random();
    log::info!("Seed {}", seed);
    let mut session = Session::from_settings(settings, tuning, metrics, seed);
    session.audio.set_clips(clips);

    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };
    let mut runs = 0u32;
    let mut best_run = 0u32;
    for _ in 0..frames {
        for event in session.frame(&input, FRAME_DT) {
            if let GameEvent::Crashed { cause } = event {
                runs += 1;
                best_run = best_run.max(session.state.score);
                log::info!("Run {} ended on {:?} at {}", runs, cause, session.state.score);
            }
        }
    }

    log::info!(
        "Played {} frames: {} finished runs, best {}, high score {}",
        frames,
        runs,
        best_run.max(session.state.score),
        session.state.high_score
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::wasm_start, this is just to satisfy the compiler
}
