//! Sound cues
//!
//! The browser backend synthesizes every cue with the Web Audio API, so no
//! sound files ship with the game. Cues are fire-and-forget: failures are
//! swallowed and the game carries on silently.

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    /// Ship ran into an obstacle
    Hit,
    /// Ship reached the goal
    Goal,
    /// Ship destroyed
    Death,
}

impl Cue {
    const ALL: [Cue; 3] = [Cue::Hit, Cue::Goal, Cue::Death];

    fn index(self) -> usize {
        match self {
            Cue::Hit => 0,
            Cue::Goal => 1,
            Cue::Death => 2,
        }
    }
}

/// Anything that can play cues.
///
/// Playing a cue that is already sounding restarts it from the beginning.
pub trait AudioSink {
    fn play(&mut self, cue: Cue);
}

/// Plays nothing
#[derive(Debug, Default)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play(&mut self, _cue: Cue) {}
}

/// Remembers every cue played (headless runs and tests)
#[derive(Debug, Default)]
pub struct RecordingAudio {
    pub played: Vec<Cue>,
}

impl RecordingAudio {
    pub fn count(&self, cue: Cue) -> usize {
        self.played.iter().filter(|c| **c == cue).count()
    }

    /// Per-cue totals, in `Cue` order
    pub fn totals(&self) -> [usize; 3] {
        let mut totals = [0; 3];
        for cue in Cue::ALL {
            totals[cue.index()] = self.count(cue);
        }
        totals
    }
}

impl AudioSink for RecordingAudio {
    fn play(&mut self, cue: Cue) {
        self.played.push(cue);
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioSink, Cue};
    use crate::settings::Settings;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
        /// Oscillators still sounding, per cue
        voices: [Vec<OscillatorNode>; 3],
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
                volume: settings.effective_volume(),
                voices: Default::default(),
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
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

        /// Hit - short low thud
        fn hit(ctx: &AudioContext, vol: f32) -> Vec<OscillatorNode> {
            let Some((osc, gain)) = Self::create_osc(ctx, 150.0, OscillatorType::Square) else {
                return Vec::new();
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.5, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                .ok();
            osc.frequency().set_value_at_time(150.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(50.0, t + 0.15)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.2).ok();
            vec![osc]
        }

        /// Goal - rising two-note chime
        fn goal(ctx: &AudioContext, vol: f32) -> Vec<OscillatorNode> {
            let mut voices = Vec::new();
            for (i, freq) in [660.0, 990.0].iter().enumerate() {
                let delay = i as f64 * 0.07;
                if let Some((osc, gain)) = Self::create_osc(ctx, *freq, OscillatorType::Sine) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.4, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.2)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.25).ok();
                    voices.push(osc);
                }
            }
            voices
        }

        /// Death - sad descending
        fn death(ctx: &AudioContext, vol: f32) -> Vec<OscillatorNode> {
            let mut voices = Vec::new();
            for (i, freq) in [400.0, 350.0, 300.0, 200.0].iter().enumerate() {
                let delay = i as f64 * 0.2;
                if let Some((osc, gain)) = Self::create_osc(ctx, *freq, OscillatorType::Sine) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.3, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.4).ok();
                    voices.push(osc);
                }
            }
            voices
        }
    }

    impl AudioSink for AudioManager {
        fn play(&mut self, cue: Cue) {
            if self.volume <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            // Restart from the top: cut whatever this cue is still playing
            for osc in self.voices[cue.index()].drain(..) {
                osc.stop_with_when(0.0).ok();
            }

            let voices = match cue {
                Cue::Hit => Self::hit(ctx, self.volume),
                Cue::Goal => Self::goal(ctx, self.volume),
                Cue::Death => Self::death(ctx, self.volume),
            };
            self.voices[cue.index()] = voices;
        }
    }
}
