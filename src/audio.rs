//! Sound effects
//!
//! Every effect is a single oscillator blip, generated on the fly. The tone
//! table is platform independent; playback uses the Web Audio API.

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player left the ground
    Jump,
    /// Pickup collected
    Score,
    /// Fatal collision
    Crash,
    /// Session start, multiplier step
    Powerup,
}

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
}

/// One blip: constant pitch, exponential fade
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub freq: f32,
    pub waveform: Waveform,
    /// Seconds
    pub duration: f64,
    pub gain: f32,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 4] = [
        SoundEffect::Jump,
        SoundEffect::Score,
        SoundEffect::Crash,
        SoundEffect::Powerup,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SoundEffect::Jump => "jump",
            SoundEffect::Score => "score",
            SoundEffect::Crash => "crash",
            SoundEffect::Powerup => "powerup",
        }
    }

    /// Unknown names are a lookup miss, not an error
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.name() == name)
    }

    pub fn tone(&self) -> Tone {
        match self {
            SoundEffect::Jump => Tone {
                freq: 400.0,
                waveform: Waveform::Sine,
                duration: 0.12,
                gain: 0.15,
            },
            SoundEffect::Score => Tone {
                freq: 800.0,
                waveform: Waveform::Square,
                duration: 0.08,
                gain: 0.12,
            },
            SoundEffect::Crash => Tone {
                freq: 120.0,
                waveform: Waveform::Sawtooth,
                duration: 0.4,
                gain: 0.25,
            },
            SoundEffect::Powerup => Tone {
                freq: 900.0,
                waveform: Waveform::Sine,
                duration: 0.15,
                gain: 0.2,
            },
        }
    }
}

/// Reports only the first playback failure. A broken audio stack fails on
/// every blip while the game keeps running.
#[derive(Debug, Default)]
pub struct FailureLatch {
    tripped: bool,
}

impl FailureLatch {
    /// True on the first call only
    pub fn trip(&mut self) -> bool {
        !std::mem::replace(&mut self.tripped, true)
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{SoundEffect, Tone, Waveform};
    use crate::platform::AudioSink;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        master_volume: f32,
        sfx_volume: f32,
        muted: bool,
        failures: FailureLatch,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        /// The context is created lazily on the first user gesture
        pub fn new() -> Self {
            Self {
                ctx: None,
                master_volume: 0.8,
                sfx_volume: 1.0,
                muted: false,
                failures: FailureLatch::default(),
            }
        }

        /// Create or resume the context (browsers require a user gesture)
        pub fn unlock(&mut self) {
            if self.ctx.is_none() {
                self.ctx = AudioContext::new().ok();
                if self.ctx.is_none() {
                    log::warn!("Failed to create AudioContext - audio disabled");
                }
            }
            if let Some(ctx) = &self.ctx {
                if ctx.state() == web_sys::AudioContextState::Suspended {
                    let _ = ctx.resume();
                }
            }
        }

        pub fn set_master_volume(&mut self, vol: f32) {
            self.master_volume = vol.clamp(0.0, 1.0);
        }

        pub fn set_sfx_volume(&mut self, vol: f32) {
            self.sfx_volume = vol.clamp(0.0, 1.0);
        }

        pub fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
        }

        fn effective_volume(&self) -> f32 {
            if self.muted {
                0.0
            } else {
                self.master_volume * self.sfx_volume
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

        fn play_tone(ctx: &AudioContext, tone: Tone, vol: f32) -> Option<()> {
            let osc_type = match tone.waveform {
                Waveform::Sine => OscillatorType::Sine,
                Waveform::Square => OscillatorType::Square,
                Waveform::Sawtooth => OscillatorType::Sawtooth,
            };
            let (osc, gain) = Self::create_osc(ctx, tone.freq, osc_type)?;
            let t = ctx.current_time();

            gain.gain().set_value_at_time(tone.gain * vol, t).ok()?;
            gain.gain()
                .exponential_ramp_to_value_at_time(0.001, t + tone.duration)
                .ok()?;

            osc.start().ok()?;
            osc.stop_with_when(t + tone.duration).ok()?;
            Some(())
        }
    }

    impl AudioSink for AudioManager {
        fn play(&mut self, effect: SoundEffect) {
            let vol = self.effective_volume();
            if vol <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            if Self::play_tone(ctx, effect.tone(), vol).is_none() {
                if self.failures.trip() {
                    log::warn!("Audio error playing {}, muting further reports", effect.name());
                } else {
                    log::debug!("Audio error playing {}", effect.name());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_resolve() {
        for effect in SoundEffect::ALL {
            assert_eq!(SoundEffect::from_name(effect.name()), Some(effect));
        }
        assert_eq!(SoundEffect::from_name("explode"), None);
    }

    #[test]
    fn test_failure_latch_fires_once() {
        let mut latch = FailureLatch::default();
        assert!(latch.trip());
        assert!(!latch.trip());
        assert!(!latch.trip());
    }

    #[test]
    fn test_crash_is_the_low_long_one() {
        let crash = SoundEffect::Crash.tone();
        assert!(SoundEffect::ALL.iter().all(|e| e.tone().freq >= crash.freq));
        assert_eq!(crash.waveform, Waveform::Sawtooth);
        assert!(crash.duration > SoundEffect::Jump.tone().duration);
    }
}
