//! Browser bindings
//!
//! The page owns the canvas, input and timing. It calls `frame` once per
//! animation frame and draws what `sprites` returns.

use wasm_bindgen::prelude::*;

use crate::assets::SpriteMetrics;
use crate::renderer::FLOATS_PER_SPRITE;
use crate::session::Session;
use crate::settings::Settings;
use crate::sim::TickInput;
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("logger already set: {e}").into());
    }
    log::info!("Flappy starting...");
}

/// Game handle exported to JavaScript
#[wasm_bindgen]
pub struct WebGame {
    session: Session,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> WebGame {
        let settings = Settings::load();
        let session = Session::from_settings(settings, Tuning::default(), SpriteMetrics::default(), seed);
        WebGame { session }
    }

    /// Advance one frame. `jump` and `restart` are key-down edges.
    pub fn frame(&mut self, dt: f32, jump: bool, restart: bool) {
        let input = TickInput {
            jump,
            restart,
            idle_mode: false,
        };
        // Long stalls (tab in background) would launch the bird off screen
        self.session.frame(&input, dt.min(0.1));
    }

    /// Let the autopilot play one frame (attract screen)
    pub fn demo_frame(&mut self, dt: f32) {
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        self.session.frame(&input, dt.min(0.1));
    }

    pub fn score(&self) -> u32 {
        self.session.state.score
    }

    pub fn high_score(&self) -> u32 {
        self.session.state.high_score
    }

    pub fn phase(&self) -> String {
        self.session.state.phase.as_str().to_string()
    }

    pub fn set_show_hitboxes(&mut self, show: bool) {
        let settings = Settings {
            show_hitboxes: show,
            ..self.session.settings.clone()
        };
        if let Err(e) = settings.save() {
            log::warn!("Could not save settings: {}", e);
        }
        self.session.apply_settings(settings);
    }

    /// Floats per sprite in the `sprites` buffer
    pub fn sprite_stride() -> usize {
        FLOATS_PER_SPRITE
    }

    /// Current draw list, flattened
    pub fn sprites(&self) -> js_sys::Float32Array {
        let sprites = self.session.sprites();
        let floats: &[f32] = bytemuck::cast_slice(&sprites);
        js_sys::Float32Array::from(floats)
    }
}
