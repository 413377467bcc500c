//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (pipe slot index)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod pipes;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{find_collision, pipe_hit};
pub use rect::Rect;
pub use state::{Bird, CrashCause, GameEvent, GamePhase, GameState, Pipe, Scroll, wrap_offset};
pub use tick::{TickInput, award_passed_pipes, tick};
