//! Sound cues
//!
//! On the web, effects are generated procedurally with the Web Audio API.
//! Native builds have no output device; cues are logged and queued so a
//! host (or a test) can inspect them.

use crate::assets::SoundAsset;
use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Bird flapped
    Jump,
    /// Pipe passed
    Point,
    /// Bird hit something
    Hit,
    /// Score beat the stored best
    HighScore,
}

impl SoundEffect {
    /// Clip that backs this cue when sound files are available
    pub fn asset(&self) -> SoundAsset {
        match self {
            SoundEffect::Jump => SoundAsset::Jump,
            SoundEffect::Point | SoundEffect::HighScore => SoundAsset::Point,
            SoundEffect::Hit => SoundAsset::Hit,
        }
    }

    /// The cue that accompanies a simulation event, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Jumped => Some(SoundEffect::Jump),
            GameEvent::Scored { .. } => Some(SoundEffect::Point),
            GameEvent::Crashed { .. } => Some(SoundEffect::Hit),
            GameEvent::NewHighScore { .. } => Some(SoundEffect::HighScore),
            GameEvent::SpeedUp { .. } => None,
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(not(target_arch = "wasm32"))]
pub use native::AudioManager;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::{Path, PathBuf};

    use super::{Settings, SoundAsset, SoundEffect};

    /// Audio manager without an output device
    #[derive(Debug, Default)]
    pub struct AudioManager {
        sfx_volume: f32,
        music_volume: f32,
        music_playing: bool,
        queued: Vec<SoundEffect>,
        /// Validated sound files from the asset catalog
        clips: Vec<(SoundAsset, PathBuf)>,
    }

    impl AudioManager {
        pub fn new(settings: &Settings) -> Self {
            Self {
                sfx_volume: settings.effective_sfx_volume(),
                music_volume: settings.effective_music_volume(),
                music_playing: false,
                queued: Vec::new(),
                clips: Vec::new(),
            }
        }

        /// Attach the sound files found under the asset root
        pub fn set_clips(&mut self, clips: Vec<(SoundAsset, PathBuf)>) {
            log::debug!("{} sound clips attached", clips.len());
            self.clips = clips;
        }

        pub fn clip(&self, asset: SoundAsset) -> Option<&Path> {
            self.clips
                .iter()
                .find(|(a, _)| *a == asset)
                .map(|(_, path)| path.as_path())
        }

        pub fn apply_settings(&mut self, settings: &Settings) {
            self.sfx_volume = settings.effective_sfx_volume();
            self.music_volume = settings.effective_music_volume();
        }

        /// Play a sound effect
        pub fn play(&mut self, effect: SoundEffect) {
            if self.sfx_volume <= 0.0 {
                return;
            }
            match self.clip(effect.asset()) {
                Some(path) => log::debug!(
                    "sfx {:?} ({}) at {:.2}",
                    effect,
                    path.display(),
                    self.sfx_volume
                ),
                None => log::debug!("sfx {:?} at {:.2}", effect, self.sfx_volume),
            }
            self.queued.push(effect);
        }

        pub fn start_music(&mut self) {
            if !self.music_playing && self.music_volume > 0.0 {
                match self.clip(SoundAsset::Music) {
                    Some(path) => log::debug!(
                        "music {} on at {:.2}",
                        path.display(),
                        self.music_volume
                    ),
                    None => log::debug!("music on at {:.2}", self.music_volume),
                }
                self.music_playing = true;
            }
        }

        pub fn stop_music(&mut self) {
            if self.music_playing {
                log::debug!("music off");
                self.music_playing = false;
            }
        }

        pub fn music_playing(&self) -> bool {
            self.music_playing
        }

        /// Cues played since the last call
        pub fn take_played(&mut self) -> Vec<SoundEffect> {
            std::mem::take(&mut self.queued)
        }
    }
}

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{Settings, SoundEffect};

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        sfx_volume: f32,
        music_volume: f32,
        music: Option<(OscillatorNode, GainNode)>,
    }

    impl AudioManager {
        pub fn new(settings: &Settings) -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                sfx_volume: settings.effective_sfx_volume(),
                music_volume: settings.effective_music_volume(),
                music: None,
            }
        }

        pub fn apply_settings(&mut self, settings: &Settings) {
            self.sfx_volume = settings.effective_sfx_volume();
            self.music_volume = settings.effective_music_volume();
            if let Some((_, gain)) = &self.music {
                gain.gain().set_value(self.music_volume * 0.08);
            }
        }

        /// Resume context if suspended (browsers require a user gesture)
        fn resume(&self, ctx: &AudioContext) {
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }
        }

        /// Play a sound effect
        pub fn play(&mut self, effect: SoundEffect) {
            let vol = self.sfx_volume;
            if vol <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };
            self.resume(ctx);

            match effect {
                SoundEffect::Jump => self.play_jump(ctx, vol),
                SoundEffect::Point => self.play_point(ctx, vol),
                SoundEffect::Hit => self.play_hit(ctx, vol),
                SoundEffect::HighScore => self.play_high_score(ctx, vol),
            }
        }

        /// Start the background loop (a soft two-note pulse)
        pub fn start_music(&mut self) {
            if self.music.is_some() || self.music_volume <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };
            self.resume(ctx);
            let Some((osc, gain)) = self.create_osc(ctx, 110.0, OscillatorType::Triangle) else {
                return;
            };
            let t = ctx.current_time();
            gain.gain().set_value(self.music_volume * 0.08);
            // Alternate root and fifth for a minute; restarted each run
            for beat in 0..240 {
                let freq = if beat % 2 == 0 { 110.0 } else { 165.0 };
                osc.frequency()
                    .set_value_at_time(freq, t + beat as f64 * 0.25)
                    .ok();
            }
            osc.start().ok();
            self.music = Some((osc, gain));
        }

        pub fn stop_music(&mut self) {
            if let Some((osc, _)) = self.music.take() {
                osc.stop().ok();
            }
        }

        pub fn music_playing(&self) -> bool {
            self.music.is_some()
        }

        // === Sound generators ===

        /// Create an oscillator with gain envelope
        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Jump - quick upward chirp
        fn play_jump(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 300.0, OscillatorType::Triangle) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.3, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.12)
                .ok();
            osc.frequency().set_value_at_time(300.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(700.0, t + 0.1)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.15).ok();
        }

        /// Point - two-tone ding
        fn play_point(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [880.0, 1320.0].iter().enumerate() {
                let delay = i as f64 * 0.07;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.3, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.2).ok();
                }
            }
        }

        /// Hit - dull thud with a crack on top
        fn play_hit(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();

            if let Some((osc, gain)) = self.create_osc(ctx, 150.0, OscillatorType::Sine) {
                gain.gain().set_value_at_time(vol * 0.6, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                    .ok();
                osc.frequency().set_value_at_time(150.0, t).ok();
                osc.frequency()
                    .exponential_ramp_to_value_at_time(50.0, t + 0.2)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.3).ok();
            }

            if let Some((osc, gain)) = self.create_osc(ctx, 1200.0, OscillatorType::Square) {
                gain.gain().set_value_at_time(vol * 0.15, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.06)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.08).ok();
            }
        }

        /// High score - celebratory
        fn play_high_score(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [500.0, 600.0, 700.0, 800.0, 1000.0].iter().enumerate() {
                let delay = i as f64 * 0.08;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.25, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.3).ok();
                }
            }
        }
    }
}
