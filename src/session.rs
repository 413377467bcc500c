//! A play session
//!
//! Wraps the pure simulation with the side effects it asks for through
//! `GameEvent`s: sound cues, music, and saving a new high score the moment
//! it happens.

use crate::assets::SpriteMetrics;
use crate::audio::{AudioManager, SoundEffect};
use crate::highscores::HighScoreStore;
use crate::renderer::{SpriteInstance, build_frame};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
use crate::tuning::Tuning;

pub struct Session {
    pub state: GameState,
    pub store: HighScoreStore,
    pub audio: AudioManager,
    pub settings: Settings,
}

impl Session {
    pub fn new(state: GameState, store: HighScoreStore, settings: Settings) -> Self {
        let audio = AudioManager::new(&settings);
        Self {
            state,
            store,
            audio,
            settings,
        }
    }

    /// Start a session whose high score comes from the configured store
    pub fn from_settings(settings: Settings, tuning: Tuning, metrics: SpriteMetrics, seed: u64) -> Self {
        let store = settings.high_score_store();
        let high_score = store.load_or_zero();
        let state = GameState::new(seed, tuning, metrics, high_score);
        Self::new(state, store, settings)
    }

    /// Advance one frame and apply its side effects.
    ///
    /// Returns the events the tick produced.
    pub fn frame(&mut self, input: &TickInput, dt: f32) -> Vec<GameEvent> {
        let phase_before = self.state.phase;
        tick(&mut self.state, input, dt);

        let events = self.state.drain_events();
        for event in &events {
            self.handle_event(event);
        }

        let phase = self.state.phase;
        if phase != phase_before {
            log::debug!("Phase {} -> {}", phase_before.as_str(), phase.as_str());
            match phase {
                GamePhase::Running => self.audio.start_music(),
                GamePhase::GameOver | GamePhase::Title => self.audio.stop_music(),
            }
        }
        events
    }

    fn handle_event(&mut self, event: &GameEvent) {
        if let Some(effect) = SoundEffect::for_event(event) {
            self.audio.play(effect);
        }
        match event {
            GameEvent::NewHighScore { score } => {
                // A failed write must not interrupt play
                if let Err(e) = self.store.save(*score) {
                    log::warn!("Could not save high score {}: {} ({})", score, e, e.code());
                }
            }
            GameEvent::SpeedUp { speed } => log::info!("Speed now {:.1}", speed),
            GameEvent::Jumped | GameEvent::Scored { .. } | GameEvent::Crashed { .. } => {}
        }
    }

    /// Apply new preferences (volumes, hitbox overlay)
    pub fn apply_settings(&mut self, settings: Settings) {
        self.audio.apply_settings(&settings);
        self.settings = settings;
    }

    /// Draw list for the current state
    pub fn sprites(&self) -> Vec<SpriteInstance> {
        build_frame(&self.state, self.settings.show_hitboxes)
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::consts::FRAME_DT;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("flappy_session_{}", std::process::id()))
            .join(name)
    }

    fn session_at(path: &PathBuf) -> Session {
        let settings = Settings {
            high_score_path: path.clone(),
            ..Settings::default()
        };
        Session::from_settings(settings, Tuning::default(), SpriteMetrics::default(), 5)
    }

    fn jump() -> TickInput {
        TickInput {
            jump: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_new_high_score_saved_same_frame() {
        let path = temp_path("same_frame.txt");
        let _ = std::fs::remove_file(&path);
        let mut session = session_at(&path);
        assert_eq!(session.state.high_score, 0);

        session.frame(&jump(), FRAME_DT);
        assert!(session.audio.music_playing());
        assert_eq!(session.audio.take_played(), vec![SoundEffect::Jump]);

        // Right edge lands behind the bird on the next scroll
        session.state.pipes[0].set_x(150.0);
        let events = session.frame(&TickInput::default(), FRAME_DT);
        assert!(events.contains(&GameEvent::NewHighScore { score: 1 }));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "1\n");
        assert_eq!(
            session.audio.take_played(),
            vec![SoundEffect::Point, SoundEffect::HighScore]
        );

        // A fresh session picks the saved value up
        assert_eq!(session_at(&path).state.high_score, 1);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_crash_plays_hit_and_stops_music() {
        let path = temp_path("crash.txt");
        let mut session = session_at(&path);
        for (i, pipe) in session.state.pipes.iter_mut().enumerate() {
            pipe.set_x(10_000.0 + i as f32 * 300.0);
        }
        session.frame(&jump(), FRAME_DT);
        session.audio.take_played();

        let mut frames = 0;
        while session.state.phase == GamePhase::Running && frames < 1000 {
            session.frame(&TickInput::default(), FRAME_DT);
            frames += 1;
        }
        assert_eq!(session.state.phase, GamePhase::GameOver);
        assert_eq!(session.audio.take_played(), vec![SoundEffect::Hit]);
        assert!(!session.audio.music_playing());
        // No points scored, nothing written
        assert!(!path.exists());
    }

    #[test]
    fn test_unwritable_store_keeps_playing() {
        // A directory where the file should be makes the write fail
        let path = temp_path("blocked");
        std::fs::create_dir_all(&path).unwrap();
        let mut session = session_at(&path);

        session.frame(&jump(), FRAME_DT);
        session.state.pipes[0].set_x(150.0);
        session.frame(&TickInput::default(), FRAME_DT);
        assert_eq!(session.state.high_score, 1);
        assert_eq!(session.state.phase, GamePhase::Running);
    }

    #[test]
    fn test_hitbox_setting_changes_draw_list() {
        let path = temp_path("overlay.txt");
        let mut session = session_at(&path);
        let plain = session.sprites().len();
        session.apply_settings(Settings {
            show_hitboxes: true,
            high_score_path: path,
            ..Settings::default()
        });
        assert_eq!(session.sprites().len(), plain + session.state.pipes.len() * 2 + 1);
    }
}
