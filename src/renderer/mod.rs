//! Rendering contract
//!
//! The crate does not own a window or GPU. Each frame it produces a flat
//! list of sprite instances that a host (the web page, or a native front
//! end) uploads and draws in order.

pub mod frame;
pub mod instance;

pub use frame::build_frame;
pub use instance::{FLOATS_PER_SPRITE, SOLID, SpriteInstance, colors, texture_slot};
