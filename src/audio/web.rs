//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use super::{AudioPlayer, SoundEffect};

/// Engine pitch at playback rate 1.0
const ENGINE_BASE_HZ: f32 = 55.0;

/// Output level of the one-shot cues
const MASTER_VOLUME: f32 = 0.8;

/// Web Audio output for the browser build
pub struct WebAudio {
    ctx: Option<AudioContext>,
    /// Oscillator and gain of the running engine loop
    engine: Option<(OscillatorNode, GainNode)>,
    /// Cue nodes still sounding, so a retrigger can cut them off
    crash: Option<OscillatorNode>,
    milestone: Option<OscillatorNode>,
}

impl Default for WebAudio {
    fn default() -> Self {
        Self::new()
    }
}

impl WebAudio {
    pub fn new() -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            engine: None,
            crash: None,
            milestone: None,
        }
    }

    /// Create an oscillator with gain envelope
    fn create_osc(
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

    /// Crash - low boom with a metallic crack on top
    fn play_crash(ctx: &AudioContext, vol: f32) -> Option<OscillatorNode> {
        let (osc, gain) = Self::create_osc(ctx, 100.0, OscillatorType::Sawtooth)?;
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.5, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.4)
            .ok();
        osc.frequency().set_value_at_time(100.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(30.0, t + 0.4)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.5).ok();

        if let Some((crack, crack_gain)) = Self::create_osc(ctx, 1500.0, OscillatorType::Square) {
            crack_gain.gain().set_value_at_time(vol * 0.2, t).ok();
            crack_gain
                .gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.1)
                .ok();
            crack.start().ok();
            crack.stop_with_when(t + 0.15).ok();
        }

        Some(osc)
    }

    /// Milestone - quick rising chime
    fn play_milestone(ctx: &AudioContext, vol: f32) -> Option<OscillatorNode> {
        let (osc, gain) = Self::create_osc(ctx, 600.0, OscillatorType::Triangle)?;
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.3, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.3)
            .ok();
        osc.frequency().set_value_at_time(600.0, t).ok();
        osc.frequency().set_value_at_time(800.0, t + 0.08).ok();
        osc.frequency().set_value_at_time(1000.0, t + 0.16).ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.35).ok();
        Some(osc)
    }
}

impl AudioPlayer for WebAudio {
    fn play(&mut self, effect: SoundEffect) {
        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        // Restart from zero: cut off the previous instance of this cue
        let slot = match effect {
            SoundEffect::Crash => &mut self.crash,
            SoundEffect::Milestone => &mut self.milestone,
        };
        if let Some(previous) = slot.take() {
            previous.stop().ok();
        }
        *slot = match effect {
            SoundEffect::Crash => Self::play_crash(ctx, MASTER_VOLUME),
            SoundEffect::Milestone => Self::play_milestone(ctx, MASTER_VOLUME),
        };
    }

    fn start_engine(&mut self, volume: f32) {
        self.stop_engine();
        let Some(ctx) = &self.ctx else { return };
        let Some((osc, gain)) = Self::create_osc(ctx, ENGINE_BASE_HZ, OscillatorType::Sawtooth)
        else {
            return;
        };
        gain.gain().set_value(volume);
        osc.start().ok();
        self.engine = Some((osc, gain));
    }

    fn set_engine_rate(&mut self, rate: f32) {
        if let Some((osc, _)) = &self.engine {
            osc.frequency().set_value(ENGINE_BASE_HZ * rate);
        }
    }

    fn stop_engine(&mut self) {
        if let Some((osc, gain)) = self.engine.take() {
            gain.gain().set_value(0.0);
            osc.stop().ok();
        }
    }

    fn resume(&mut self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }
}
