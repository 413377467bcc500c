#![cfg(not(target_arch = "wasm32"))]

use std::path::{Path, PathBuf};

use flappy::assets::{AssetCatalog, ImageAsset, SoundAsset};
use flappy::consts::FRAME_DT;
use flappy::sim::{GameEvent, GamePhase, TickInput};
use flappy::{AssetLoadError, HighScoreStore, Session, Settings, SpriteMetrics, Tuning};

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("flappy_it_{}_{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_png(path: &Path, width: u32, height: u32) {
    let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    bytes.extend_from_slice(&13u32.to_be_bytes());
    bytes.extend_from_slice(b"IHDR");
    bytes.extend_from_slice(&width.to_be_bytes());
    bytes.extend_from_slice(&height.to_be_bytes());
    bytes.extend_from_slice(&[8, 6, 0, 0, 0]);
    std::fs::write(path, bytes).unwrap();
}

#[test]
fn test_autopilot_session_persists_high_score() {
    let dir = temp_dir("autopilot");
    let score_path = dir.join("best.txt");
    let settings = Settings {
        high_score_path: score_path.clone(),
        ..Settings::default()
    };
    let mut session = Session::from_settings(settings, Tuning::default(), SpriteMetrics::default(), 2024);
    let idle = TickInput {
        idle_mode: true,
        ..Default::default()
    };

    let mut crashes = 0;
    let mut best_announced = 0;
    for _ in 0..10_000 {
        for event in session.frame(&idle, FRAME_DT) {
            match event {
                GameEvent::Crashed { .. } => crashes += 1,
                GameEvent::NewHighScore { score } => best_announced = score,
                _ => {}
            }
        }
        let bird = &session.state.bird;
        assert!(bird.acceleration >= 0.0 && bird.acceleration <= bird.gravity);
        assert_eq!(session.state.pipes.len(), 5);
        assert!(session.state.high_score >= session.state.score);
    }

    assert_ne!(session.state.phase, GamePhase::Title);
    assert_eq!(best_announced, session.state.high_score);
    if session.state.high_score > 0 {
        let stored = HighScoreStore::new(&score_path).load().unwrap();
        assert_eq!(stored, session.state.high_score);
    } else {
        assert!(!score_path.exists());
    }
    assert!(crashes > 0 || session.state.score > 0);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_restart_starts_new_run_with_high_score() {
    let dir = temp_dir("restart");
    let settings = Settings {
        high_score_path: dir.join("best.txt"),
        ..Settings::default()
    };
    HighScoreStore::new(dir.join("best.txt")).save(42).unwrap();
    let mut session = Session::from_settings(settings, Tuning::default(), SpriteMetrics::default(), 1);
    assert_eq!(session.state.high_score, 42);

    let jump = TickInput {
        jump: true,
        ..Default::default()
    };
    let mut frames = 0;
    while session.state.phase != GamePhase::GameOver && frames < 2000 {
        session.frame(&jump, FRAME_DT);
        frames += 1;
    }
    assert_eq!(session.state.phase, GamePhase::GameOver);

    let restart = TickInput {
        restart: true,
        ..Default::default()
    };
    let events = session.frame(&restart, FRAME_DT);
    assert_eq!(session.state.phase, GamePhase::Running);
    assert!(session.state.bird.airborne);
    assert!(events.contains(&GameEvent::Jumped));
    assert_eq!(session.state.score, 0);
    assert_eq!(session.state.high_score, 42);
    assert!(session.audio.music_playing());

    // No further input: the new run plays out under gravity
    for _ in 0..120 {
        session.frame(&TickInput::default(), FRAME_DT);
    }
    assert_ne!(session.state.phase, GamePhase::Title);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_asset_root_drives_layout() {
    let dir = temp_dir("assets");
    for image in ImageAsset::ALL {
        let (w, h) = match image {
            ImageAsset::Bird => (102, 24),
            ImageAsset::Pipe => (30, 200),
            _ => (100, 50),
        };
        write_png(&AssetCatalog::image_path(&dir, image), w, h);
    }
    for sound in SoundAsset::ALL {
        std::fs::write(AssetCatalog::sound_path(&dir, sound), b"RIFF").unwrap();
    }

    let catalog = AssetCatalog::load(&dir).unwrap();
    assert_eq!(catalog.metrics.bird_frame_width(), 34.0);
    assert_eq!(catalog.sounds.len(), 4);

    let mut session = Session::from_settings(
        Settings {
            high_score_path: dir.join("best.txt"),
            ..Settings::default()
        },
        Tuning::default(),
        catalog.metrics,
        9,
    );
    assert_eq!(session.state.bird.frame_width, 34.0);
    assert_eq!(session.state.pipe_size().y, 500.0);

    session.audio.set_clips(catalog.sounds.clone());
    let music = session.audio.clip(SoundAsset::Music).expect("music clip");
    assert!(music.ends_with("music.wav"));

    std::fs::remove_file(AssetCatalog::sound_path(&dir, SoundAsset::Music)).unwrap();
    match AssetCatalog::load(&dir) {
        Err(AssetLoadError::Missing { path }) => assert!(path.ends_with("music.wav")),
        other => panic!("expected missing music, got {:?}", other),
    }

    let _ = std::fs::remove_dir_all(&dir);
}
