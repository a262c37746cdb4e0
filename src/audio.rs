//! Audio cues
//!
//! The game only ever asks for one of four cues. On the web they are
//! synthesized with the Web Audio API - no sound files needed.

/// Sound cue identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Accepted jump input
    Jump,
    /// Gate cleared
    Score,
    /// Collision, played immediately
    Hit,
    /// Follows Hit after a short delay
    Die,
}

/// Fire-and-forget receiver of audio cues
pub trait AudioCueSink {
    fn play_cue(&mut self, cue: Cue);
}

/// Sink for headless runs: logs the cue and plays nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl AudioCueSink for NullAudio {
    fn play_cue(&mut self, cue: Cue) {
        log::debug!("cue {:?}", cue);
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioCueSink, Cue};

    /// Web Audio sink
    pub struct WebAudio {
        ctx: Option<AudioContext>,
        master_volume: f32,
        sfx_volume: f32,
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
                master_volume: 0.8,
                sfx_volume: 1.0,
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        pub fn set_master_volume(&mut self, vol: f32) {
            self.master_volume = vol.clamp(0.0, 1.0);
        }

        pub fn set_sfx_volume(&mut self, vol: f32) {
            self.sfx_volume = vol.clamp(0.0, 1.0);
        }

        fn effective_volume(&self) -> f32 {
            self.master_volume * self.sfx_volume
        }

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

        /// Jump - quick rising chirp
        fn play_flap(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 400.0, OscillatorType::Sine) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.3, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.12)
                .ok();
            osc.frequency().set_value_at_time(400.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(800.0, t + 0.08)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.13).ok();
        }

        /// Score - two bright notes
        fn play_point(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();
            for (i, freq) in [520.0, 680.0].into_iter().enumerate() {
                let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Square) else {
                    continue;
                };
                let start = t + i as f64 * 0.07;
                gain.gain().set_value_at_time(0.0, t).ok();
                gain.gain().set_value_at_time(vol * 0.15, start).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, start + 0.1)
                    .ok();
                osc.start_with_when(start).ok();
                osc.stop_with_when(start + 0.12).ok();
            }
        }

        /// Hit - solid thump
        fn play_hit(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 150.0, OscillatorType::Sine) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.6, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                .ok();
            osc.frequency().set_value_at_time(150.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(60.0, t + 0.15)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.2).ok();
        }

        /// Die - long falling saw
        fn play_die(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 400.0, OscillatorType::Sawtooth) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.2, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.5)
                .ok();
            osc.frequency().set_value_at_time(400.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(80.0, t + 0.4)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.5).ok();
        }
    }

    impl AudioCueSink for WebAudio {
        fn play_cue(&mut self, cue: Cue) {
            let vol = self.effective_volume();
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match cue {
                Cue::Jump => self.play_flap(ctx, vol),
                Cue::Score => self.play_point(ctx, vol),
                Cue::Hit => self.play_hit(ctx, vol),
                Cue::Die => self.play_die(ctx, vol),
            }
        }
    }
}
