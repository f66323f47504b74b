//! Audio cues
//!
//! Scenes and screens receive an [`AudioSink`] and fire cues at state
//! transitions. The browser build synthesizes every cue with Web Audio
//! oscillators, so no sound files are fetched.

use crate::settings::Settings;

/// Sound cues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sound {
    /// Main thruster loop (runs until stopped)
    Boost,
    /// Head destroyed
    Crash,
    /// Head touched the real body
    Docking,
    /// Success screen reveal
    Success,
    /// Decoy revealed
    Fog,
    GameOver,
    /// Intro logo
    Logo,
    /// Menu confirmation
    Select,
}

/// Fire-and-forget audio capability
pub trait AudioSink {
    fn play(&mut self, sound: Sound);

    /// Only meaningful for looping cues
    fn stop(&mut self, sound: Sound);

    /// Fade background music to `volume` (0..=1) over `ticks`
    fn fade_bgm(&mut self, volume: f32, ticks: u32);

    fn apply_settings(&mut self, settings: &Settings);
}

/// Discards every cue
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play(&mut self, _sound: Sound) {}

    fn stop(&mut self, _sound: Sound) {}

    fn fade_bgm(&mut self, _volume: f32, _ticks: u32) {}

    fn apply_settings(&mut self, _settings: &Settings) {}
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AudioEvent {
    Play(Sound),
    Stop(Sound),
    FadeBgm { volume: f32, ticks: u32 },
}

/// Records cues in order (headless runs and tests)
#[derive(Debug, Default, Clone)]
pub struct AudioLog {
    pub events: Vec<AudioEvent>,
}

impl AudioLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn played(&self, sound: Sound) -> usize {
        self.events
            .iter()
            .filter(|e| **e == AudioEvent::Play(sound))
            .count()
    }
}

impl AudioSink for AudioLog {
    fn play(&mut self, sound: Sound) {
        self.events.push(AudioEvent::Play(sound));
    }

    fn stop(&mut self, sound: Sound) {
        self.events.push(AudioEvent::Stop(sound));
    }

    fn fade_bgm(&mut self, volume: f32, ticks: u32) {
        self.events.push(AudioEvent::FadeBgm {
            volume: volume.clamp(0.0, 1.0),
            ticks,
        });
    }

    fn apply_settings(&mut self, _settings: &Settings) {}
}

/// Shares one log between a sink handed to a scene and a test that inspects it
impl AudioSink for std::rc::Rc<std::cell::RefCell<AudioLog>> {
    fn play(&mut self, sound: Sound) {
        self.borrow_mut().play(sound);
    }

    fn stop(&mut self, sound: Sound) {
        self.borrow_mut().stop(sound);
    }

    fn fade_bgm(&mut self, volume: f32, ticks: u32) {
        self.borrow_mut().fade_bgm(volume, ticks);
    }

    fn apply_settings(&mut self, settings: &Settings) {
        self.borrow_mut().apply_settings(settings);
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioSink, Sound};
    use crate::consts::FPS;
    use crate::settings::Settings;

    /// Web Audio synthesizer
    pub struct WebAudio {
        ctx: Option<AudioContext>,
        sfx_volume: f32,
        music_volume: f32,
        boost: Option<(OscillatorNode, GainNode)>,
        bgm: Option<(OscillatorNode, GainNode)>,
    }

    impl Default for WebAudio {
        fn default() -> Self {
            Self::new()
        }
    }

    impl WebAudio {
        pub fn new() -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                sfx_volume: 0.8,
                music_volume: 0.56,
                boost: None,
                bgm: None,
            }
        }

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

        /// Sequence of short decaying notes
        fn notes(&self, ctx: &AudioContext, freqs: &[f32], spacing: f64, osc_type: OscillatorType) {
            let vol = self.sfx_volume;
            for (i, freq) in freqs.iter().enumerate() {
                let Some((osc, gain)) = Self::create_osc(ctx, *freq, osc_type) else {
                    continue;
                };
                let t = ctx.current_time() + i as f64 * spacing;
                gain.gain().set_value_at_time(vol * 0.3, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + spacing * 1.5)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + spacing * 2.0).ok();
            }
        }

        /// Low rumble sweeping down
        fn crash(&self, ctx: &AudioContext) {
            let Some((osc, gain)) = Self::create_osc(ctx, 120.0, OscillatorType::Sawtooth) else {
                return;
            };
            let t = ctx.current_time();
            gain.gain().set_value_at_time(self.sfx_volume * 0.5, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.6)
                .ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(30.0, t + 0.5)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.7).ok();
        }

        fn start_boost(&mut self, ctx: &AudioContext) {
            if self.boost.is_some() {
                return;
            }
            if let Some((osc, gain)) = Self::create_osc(ctx, 70.0, OscillatorType::Square) {
                gain.gain().set_value(self.sfx_volume * 0.08);
                osc.start().ok();
                self.boost = Some((osc, gain));
            }
        }

        fn bgm(&mut self) -> Option<&GainNode> {
            if self.bgm.is_none() {
                let ctx = self.ctx.as_ref()?;
                let (osc, gain) = Self::create_osc(ctx, 110.0, OscillatorType::Triangle)?;
                gain.gain().set_value(0.0);
                osc.start().ok();
                self.bgm = Some((osc, gain));
            }
            self.bgm.as_ref().map(|(_, gain)| gain)
        }
    }

    impl AudioSink for WebAudio {
        fn play(&mut self, sound: Sound) {
            if self.sfx_volume <= 0.0 {
                return;
            }
            let Some(ctx) = self.ctx.clone() else { return };
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match sound {
                Sound::Boost => self.start_boost(&ctx),
                Sound::Crash => self.crash(&ctx),
                Sound::Docking => self.notes(&ctx, &[660.0, 880.0], 0.06, OscillatorType::Sine),
                Sound::Success => {
                    self.notes(&ctx, &[500.0, 600.0, 700.0, 800.0, 1000.0], 0.08, OscillatorType::Triangle)
                }
                Sound::Fog => self.notes(&ctx, &[300.0, 240.0], 0.1, OscillatorType::Triangle),
                Sound::GameOver => {
                    self.notes(&ctx, &[400.0, 350.0, 300.0, 200.0], 0.2, OscillatorType::Sine)
                }
                Sound::Logo => self.notes(&ctx, &[523.0, 784.0], 0.15, OscillatorType::Sine),
                Sound::Select => self.notes(&ctx, &[880.0], 0.05, OscillatorType::Square),
            }
        }

        fn stop(&mut self, sound: Sound) {
            if sound == Sound::Boost {
                if let Some((osc, _)) = self.boost.take() {
                    osc.stop().ok();
                }
            }
        }

        fn fade_bgm(&mut self, volume: f32, ticks: u32) {
            let target = volume.clamp(0.0, 1.0) * self.music_volume * 0.1;
            let Some(t) = self.ctx.as_ref().map(|c| c.current_time()) else {
                return;
            };
            if let Some(gain) = self.bgm() {
                let seconds = ticks as f64 / FPS as f64;
                gain.gain().set_value_at_time(gain.gain().value(), t).ok();
                gain.gain()
                    .linear_ramp_to_value_at_time(target, t + seconds)
                    .ok();
            }
        }

        fn apply_settings(&mut self, settings: &Settings) {
            self.sfx_volume = settings.effective_sfx_volume();
            self.music_volume = settings.effective_music_volume();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audio_log_records_in_order() {
        let mut log = AudioLog::new();
        log.play(Sound::Boost);
        log.stop(Sound::Boost);
        log.fade_bgm(2.0, 30);
        log.play(Sound::Crash);
        assert_eq!(
            log.events,
            vec![
                AudioEvent::Play(Sound::Boost),
                AudioEvent::Stop(Sound::Boost),
                AudioEvent::FadeBgm {
                    volume: 1.0,
                    ticks: 30
                },
                AudioEvent::Play(Sound::Crash),
            ]
        );
        assert_eq!(log.played(Sound::Crash), 1);
        assert_eq!(log.played(Sound::GameOver), 0);
    }
}
