//! Sound cues and the engine loop
//!
//! The loop controller only talks to [`AudioPlayer`]; the browser build
//! synthesizes everything with Web Audio oscillators.

#[cfg(target_arch = "wasm32")]
mod web;
#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

/// One-shot sound effects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player hit an obstacle
    Crash,
    /// Score reached a multiple of 100
    Milestone,
}

/// Audio output used by the game loop
pub trait AudioPlayer {
    /// Play a cue from the start, cutting off any earlier instance
    fn play(&mut self, effect: SoundEffect);
    /// Start the continuous engine sound
    fn start_engine(&mut self, volume: f32);
    /// Engine playback rate (1.0 = base pitch)
    fn set_engine_rate(&mut self, rate: f32);
    /// Silence the engine
    fn stop_engine(&mut self);
    /// Unlock audio after a user gesture
    fn resume(&mut self) {}
}

/// Audio that goes nowhere (native builds)
#[derive(Debug, Default)]
pub struct SilentAudio;

impl AudioPlayer for SilentAudio {
    fn play(&mut self, effect: SoundEffect) {
        log::trace!("(silent) {:?}", effect);
    }

    fn start_engine(&mut self, _volume: f32) {}

    fn set_engine_rate(&mut self, _rate: f32) {}

    fn stop_engine(&mut self) {}
}
