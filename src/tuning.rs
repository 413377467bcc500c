//! Data-driven game balance
//!
//! Every feel constant lives here so a run can be re-tuned from JSON without
//! touching the simulation. Defaults reproduce the classic layout.

use serde::{Deserialize, Serialize};

/// Insets applied to the bird sprite to get its hitbox
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Insets {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Default for Insets {
    fn default() -> Self {
        Self {
            left: 10.0,
            top: 5.0,
            right: 15.0,
            bottom: 5.0,
        }
    }
}

/// Game balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World ===
    pub screen_width: f32,
    pub screen_height: f32,
    pub ceiling: f32,
    pub ground: f32,
    /// Scale applied to every texture when drawn
    pub texture_scale: f32,

    // === Bird ===
    pub bird_start_x: f32,
    pub bird_start_y: f32,
    pub gravity: f32,
    /// Acceleration the bird snaps to on a jump
    pub launch_acceleration: f32,
    /// Jump velocity is `-gravity / jump_divisor`
    pub jump_divisor: f32,
    pub velocity_scale: f32,
    pub position_scale: f32,
    /// Tilt (degrees) on jump
    pub jump_tilt: f32,
    /// Tilt added per frame while falling
    pub tilt_step: f32,
    pub max_tilt: f32,
    pub hitbox_insets: Insets,
    /// Animation frames per second of the wing cycle
    pub frames_speed: u32,

    // === Scrolling ===
    pub background_scroll: f32,
    /// Starting foreground/pipe speed (units per frame)
    pub start_speed: f32,
    pub speed_increment: f32,
    /// Speed bumps every this many points
    pub speed_up_every: u32,

    // === Pipes ===
    pub pipe_count: usize,
    pub pipe_spacing: f32,
    pub first_pipe_x: f32,
    /// Distance from a pipe's top y to its bottom y
    pub pipe_gap: f32,
    /// Minimum clearance between the gap opening and ceiling/ground
    pub pipe_margin: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: 490.0,
            screen_height: 735.0,
            ceiling: 28.0,
            ground: 625.0,
            texture_scale: 2.5,

            bird_start_x: 220.0,
            bird_start_y: 362.5,
            gravity: 100.0,
            launch_acceleration: 10.0,
            jump_divisor: 1.5,
            velocity_scale: 10.0,
            position_scale: 5.0,
            jump_tilt: -35.0,
            tilt_step: 1.0,
            max_tilt: 30.0,
            hitbox_insets: Insets::default(),
            frames_speed: 8,

            background_scroll: 0.1,
            start_speed: 3.0,
            speed_increment: 0.5,
            speed_up_every: 5,

            pipe_count: 5,
            pipe_spacing: 300.0,
            first_pipe_x: 700.0,
            pipe_gap: 550.0,
            pipe_margin: 40.0,
        }
    }
}

impl Tuning {
    /// Largest pool the simulation accepts
    pub const MAX_PIPES: usize = 100;

    /// Ticks between animation frame advances
    pub fn animation_period(&self) -> u32 {
        (60 / self.frames_speed.max(1)).max(1)
    }

    /// Upward velocity applied on a jump
    pub fn jump_velocity(&self) -> f32 {
        -self.gravity / self.jump_divisor
    }

    /// Pipe pool size clamped to `1..=MAX_PIPES`
    pub fn pool_size(&self) -> usize {
        self.pipe_count.clamp(1, Self::MAX_PIPES)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), String> {
        let positive = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("texture_scale", self.texture_scale),
            ("jump_divisor", self.jump_divisor),
            ("pipe_spacing", self.pipe_spacing),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(format!("{name} must be > 0"));
            }
        }

        let non_negative = [
            ("gravity", self.gravity),
            ("launch_acceleration", self.launch_acceleration),
            ("pipe_gap", self.pipe_gap),
            ("pipe_margin", self.pipe_margin),
            ("start_speed", self.start_speed),
            ("speed_increment", self.speed_increment),
            ("background_scroll", self.background_scroll),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(format!("{name} must be >= 0"));
            }
        }

        if !(self.ceiling < self.ground && self.ground <= self.screen_height) {
            return Err("expected ceiling < ground <= screen_height".to_string());
        }
        Ok(())
    }

    /// Load tuning overrides from a JSON file; missing fields keep defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(
        path: &std::path::Path,
    ) -> Result<Self, crate::highscores::PersistentStateError> {
        use crate::highscores::PersistentStateError;

        let json = std::fs::read_to_string(path)
            .map_err(|e| PersistentStateError::from_io(path, e))?;
        let tuning: Self =
            serde_json::from_str(&json).map_err(|e| PersistentStateError::Parse {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        tuning
            .validate()
            .map_err(|reason| PersistentStateError::Parse {
                path: path.to_path_buf(),
                reason,
            })?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }
}
