//! Flappy - a side-scrolling one-button arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, pipes, collisions, game state)
//! - `renderer`: Sprite draw list handed to the host each frame
//! - `session`: Simulation plus audio and high-score side effects
//! - `assets`: Asset paths and texture sizes
//! - `tuning`: Data-driven game balance

pub mod assets;
pub mod audio;
pub mod highscores;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use assets::{AssetCatalog, AssetLoadError, SpriteMetrics};
pub use highscores::{HighScoreStore, PersistentStateError};
pub use session::Session;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Target frame rate
    pub const TARGET_FPS: u32 = 60;
    /// Frame time at the target rate
    pub const FRAME_DT: f32 = 1.0 / TARGET_FPS as f32;
    /// Frames the native driver runs when no count is given (one minute)
    pub const DEFAULT_HEADLESS_FRAMES: u32 = TARGET_FPS * 60;
}
