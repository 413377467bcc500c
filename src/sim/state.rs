//! Game state and core simulation types
//!
//! Everything one frame of the game needs lives in `GameState`. The renderer
//! and audio only ever read it.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::assets::SpriteMetrics;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Bird flaps in place, waiting for the first jump
    Title,
    /// Active gameplay
    Running,
    /// Run ended; waiting for restart
    GameOver,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Title => "title",
            GamePhase::Running => "running",
            GamePhase::GameOver => "game_over",
        }
    }
}

/// What ended the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrashCause {
    Ceiling,
    Ground,
    /// Index of the pipe slot that was hit
    Pipe(usize),
}

/// Things that happened during a tick, for audio/persistence/logging
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped,
    Scored { score: u32 },
    SpeedUp { speed: f32 },
    NewHighScore { score: u32 },
    Crashed { cause: CrashCause },
}

/// The player's bird
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bird {
    /// Top-left of the current sprite frame
    pub pos: Vec2,
    /// Visual tilt in degrees (negative = nose up)
    pub rotation: f32,
    pub velocity: f32,
    /// Always within `[0, gravity]`
    pub acceleration: f32,
    pub gravity: f32,
    /// Set by the first jump; physics only runs while airborne
    pub airborne: bool,
    pub frame_width: f32,
    /// Animation frame, 0..3
    pub current_frame: u8,
    /// Ticks since the last animation frame change
    pub frames_counter: u32,
}

impl Bird {
    pub fn new(tuning: &Tuning, metrics: &SpriteMetrics) -> Self {
        Self {
            pos: Vec2::new(tuning.bird_start_x, tuning.bird_start_y),
            rotation: 0.0,
            velocity: 0.0,
            acceleration: 0.0,
            gravity: tuning.gravity,
            airborne: false,
            frame_width: metrics.bird_frame_width(),
            current_frame: 0,
            frames_counter: 0,
        }
    }

    /// Launch impulse: acceleration and tilt snap, velocity points up
    pub fn jump(&mut self, tuning: &Tuning) {
        self.airborne = true;
        self.acceleration = tuning.launch_acceleration;
        self.velocity = tuning.jump_velocity();
        self.rotation = tuning.jump_tilt;
    }

    /// Gravity builds up between jumps and the nose tips down
    pub fn fall(&mut self, tuning: &Tuning, dt: f32) {
        self.acceleration += self.gravity * dt;
        self.rotation = (self.rotation + tuning.tilt_step).min(tuning.max_tilt);
    }

    /// Semi-implicit Euler step with the feel multipliers from tuning
    pub fn integrate(&mut self, tuning: &Tuning, dt: f32) {
        self.acceleration = self.acceleration.max(0.0).min(self.gravity.max(0.0));
        self.velocity += self.acceleration * dt * tuning.velocity_scale;
        self.pos.y += self.velocity * dt * tuning.position_scale;
    }

    /// One airborne frame: jump or fall, then integrate
    pub fn step(&mut self, jumped: bool, tuning: &Tuning, dt: f32) {
        if jumped {
            self.jump(tuning);
        } else {
            self.fall(tuning, dt);
        }
        self.integrate(tuning, dt);
    }

    /// Advance the wing cycle every `period` ticks
    pub fn animate(&mut self, period: u32) {
        self.frames_counter += 1;
        if self.frames_counter >= period {
            self.frames_counter = 0;
            self.current_frame = (self.current_frame + 1) % 3;
        }
    }

    /// Full sprite bounds of the current frame
    pub fn sprite_rect(&self, metrics: &SpriteMetrics) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.frame_width, metrics.bird.y)
    }

    /// Forgiving hitbox, smaller than the sprite
    pub fn hitbox(&self, tuning: &Tuning, metrics: &SpriteMetrics) -> Rect {
        let i = tuning.hitbox_insets;
        self.sprite_rect(metrics).inset(i.left, i.top, i.right, i.bottom)
    }
}

/// Parallax offsets for the two looping layers
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Scroll {
    pub background: f32,
    pub foreground: f32,
}

impl Scroll {
    /// Move both layers left, wrapping each once it has travelled two
    /// texture widths
    pub fn advance(&mut self, background_speed: f32, foreground_speed: f32, metrics: &SpriteMetrics) {
        self.background = wrap_offset(self.background - background_speed, metrics.background.x);
        self.foreground = wrap_offset(self.foreground - foreground_speed, metrics.foreground.x);
    }
}

/// Reset an offset to 0 once it reaches `-(2 * texture_width)`
#[inline]
pub fn wrap_offset(offset: f32, texture_width: f32) -> f32 {
    if offset <= -texture_width * 2.0 {
        0.0
    } else {
        offset
    }
}

/// One pipe slot: a top and a bottom obstacle sharing an x
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipe {
    pub x: f32,
    /// Top-left y of the upper obstacle
    pub top_y: f32,
    /// Top-left y of the lower obstacle (`top_y + gap`)
    pub bottom_y: f32,
    pub top_rect: Rect,
    pub bottom_rect: Rect,
    /// Not yet scored
    pub active: bool,
}

impl Pipe {
    /// Place a pipe with its obstacles sized `size` (already scaled)
    pub fn new(x: f32, top_y: f32, gap: f32, size: Vec2) -> Self {
        let mut pipe = Self {
            x,
            top_y,
            bottom_y: top_y + gap,
            top_rect: Rect::default(),
            bottom_rect: Rect::default(),
            active: true,
        };
        pipe.rebuild_hitboxes(size);
        pipe
    }

    pub fn rebuild_hitboxes(&mut self, size: Vec2) {
        self.top_rect = Rect::new(self.x, self.top_y, size.x, size.y);
        self.bottom_rect = Rect::new(self.x, self.bottom_y, size.x, size.y);
    }

    /// Move horizontally, keeping the hitboxes in step
    pub fn set_x(&mut self, x: f32) {
        self.x = x;
        self.top_rect.pos.x = x;
        self.bottom_rect.pos.x = x;
    }

    pub fn width(&self) -> f32 {
        self.top_rect.size.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width()
    }

    /// Centre of the passable opening
    pub fn gap_center(&self) -> f32 {
        (self.top_rect.bottom() + self.bottom_rect.top()) * 0.5
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub metrics: SpriteMetrics,
    pub phase: GamePhase,
    pub bird: Bird,
    pub scroll: Scroll,
    /// Fixed-size pool, recycled in place
    pub pipes: Vec<Pipe>,
    pub score: u32,
    pub high_score: u32,
    /// Foreground and pipe speed (units per frame)
    pub speed: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events produced since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game in the Title phase
    pub fn new(seed: u64, tuning: Tuning, metrics: SpriteMetrics, high_score: u32) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            bird: Bird::new(&tuning, &metrics),
            speed: tuning.start_speed,
            pipes: Vec::with_capacity(tuning.pool_size()),
            tuning,
            metrics,
            phase: GamePhase::Title,
            scroll: Scroll::default(),
            score: 0,
            high_score,
            time_ticks: 0,
            events: Vec::new(),
        };
        state.init_pipes();
        state
    }

    /// Reinitialize everything except the high score and the RNG stream,
    /// straight into a new run
    pub fn restart(&mut self) {
        self.phase = GamePhase::Running;
        self.bird = Bird::new(&self.tuning, &self.metrics);
        self.scroll = Scroll::default();
        self.score = 0;
        self.speed = self.tuning.start_speed;
        self.time_ticks = 0;
        self.init_pipes();
        log::info!("Game restarted (high score {})", self.high_score);
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Scaled size of one pipe obstacle
    pub fn pipe_size(&self) -> Vec2 {
        self.metrics.pipe * self.tuning.texture_scale
    }

    /// Solid band above the play area
    pub fn ceiling_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.tuning.screen_width, self.tuning.ceiling)
    }

    /// Solid band from the ground line to the bottom of the screen
    pub fn ground_rect(&self) -> Rect {
        Rect::new(
            0.0,
            self.tuning.ground,
            self.tuning.screen_width,
            (self.tuning.screen_height - self.tuning.ground).max(0.0),
        )
    }

    pub fn bird_hitbox(&self) -> Rect {
        self.bird.hitbox(&self.tuning, &self.metrics)
    }
}
