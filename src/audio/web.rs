//! Web Audio output
//!
//! Every cue is synthesised from oscillators, so no sound files ship with the
//! web build. Music is a soft two-voice drone held until stopped.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use super::{AudioSink, Music, SoundCue};
use crate::settings::Settings;

/// Oscillator recipe for one cue
struct Voice {
    notes: &'static [f32],
    wave: OscillatorType,
    level: f32,
    /// Seconds between successive notes
    step: f64,
    length: f64,
    /// Pitch the first note glides to, if any
    glide_to: Option<f32>,
}

fn voice(cue: SoundCue) -> Voice {
    match cue {
        SoundCue::ShurikenThrow => Voice {
            notes: &[900.0],
            wave: OscillatorType::Sawtooth,
            level: 0.15,
            step: 0.0,
            length: 0.12,
            glide_to: Some(300.0),
        },
        SoundCue::GemCollected => Voice {
            notes: &[800.0, 1200.0],
            wave: OscillatorType::Sine,
            level: 0.25,
            step: 0.06,
            length: 0.12,
            glide_to: None,
        },
        SoundCue::PlayerFall => Voice {
            notes: &[500.0],
            wave: OscillatorType::Triangle,
            level: 0.35,
            step: 0.0,
            length: 0.8,
            glide_to: Some(60.0),
        },
        SoundCue::GameOver => Voice {
            notes: &[400.0, 350.0, 300.0, 200.0],
            wave: OscillatorType::Sine,
            level: 0.3,
            step: 0.2,
            length: 0.4,
            glide_to: None,
        },
        SoundCue::ShieldOn => Voice {
            notes: &[500.0, 650.0, 800.0, 1000.0],
            wave: OscillatorType::Triangle,
            level: 0.25,
            step: 0.07,
            length: 0.25,
            glide_to: None,
        },
        SoundCue::LiftOff => Voice {
            notes: &[120.0],
            wave: OscillatorType::Sawtooth,
            level: 0.3,
            step: 0.0,
            length: 0.9,
            glide_to: Some(700.0),
        },
        SoundCue::HorizontalEnemyHit => Voice {
            notes: &[180.0],
            wave: OscillatorType::Square,
            level: 0.25,
            step: 0.0,
            length: 0.15,
            glide_to: Some(70.0),
        },
        SoundCue::ShurikenMetalHit => Voice {
            notes: &[1800.0, 2400.0],
            wave: OscillatorType::Square,
            level: 0.12,
            step: 0.02,
            length: 0.1,
            glide_to: None,
        },
        SoundCue::Swoosh => Voice {
            notes: &[300.0],
            wave: OscillatorType::Triangle,
            level: 0.2,
            step: 0.0,
            length: 0.2,
            glide_to: Some(900.0),
        },
        SoundCue::PlayerJump => Voice {
            notes: &[200.0],
            wave: OscillatorType::Triangle,
            level: 0.3,
            step: 0.0,
            length: 0.2,
            glide_to: Some(600.0),
        },
    }
}

/// Browser audio sink
pub struct WebAudio {
    ctx: Option<AudioContext>,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    drone: Vec<(OscillatorNode, GainNode)>,
}

impl Default for WebAudio {
    fn default() -> Self {
        Self::new()
    }
}

impl WebAudio {
    pub fn new() -> Self {
        // Fails outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        let defaults = Settings::default();
        Self {
            ctx,
            sfx_volume: defaults.sfx_volume,
            music_volume: defaults.music_volume,
            muted: !defaults.sound_on,
            drone: Vec::new(),
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    fn context(&self) -> Option<&AudioContext> {
        let ctx = self.ctx.as_ref()?;
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }
        Some(ctx)
    }

    fn create_osc(
        ctx: &AudioContext,
        freq: f32,
        wave: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(wave);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    fn play_voice(ctx: &AudioContext, voice: &Voice, vol: f32) {
        for (i, freq) in voice.notes.iter().enumerate() {
            let Some((osc, gain)) = Self::create_osc(ctx, *freq, voice.wave) else {
                continue;
            };
            let t = ctx.current_time() + i as f64 * voice.step;
            gain.gain().set_value_at_time(vol * voice.level, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + voice.length)
                .ok();
            if let Some(target) = voice.glide_to {
                osc.frequency().set_value_at_time(*freq, t).ok();
                osc.frequency()
                    .exponential_ramp_to_value_at_time(target, t + voice.length)
                    .ok();
            }
            osc.start_with_when(t).ok();
            osc.stop_with_when(t + voice.length + 0.05).ok();
        }
    }
}

impl AudioSink for WebAudio {
    fn play_sound(&mut self, cue: SoundCue) {
        if self.muted || self.sfx_volume <= 0.0 {
            return;
        }
        let Some(ctx) = self.context() else { return };
        Self::play_voice(ctx, &voice(cue), self.sfx_volume);
    }

    fn play_music(&mut self, music: Music) {
        if self.muted || !self.drone.is_empty() {
            return;
        }
        let Some(ctx) = self.context() else { return };
        let level = self.music_volume * 0.08;
        let mut drone = Vec::new();
        for freq in [110.0, 164.8] {
            if let Some((osc, gain)) = Self::create_osc(ctx, freq, OscillatorType::Triangle) {
                gain.gain().set_value(level);
                osc.start().ok();
                drone.push((osc, gain));
            }
        }
        log::debug!("Playing {}", music.as_str());
        self.drone = drone;
    }

    fn stop_music(&mut self) {
        for (osc, _) in self.drone.drain(..) {
            osc.stop().ok();
        }
    }

    fn apply_settings(&mut self, settings: &Settings) {
        self.sfx_volume = settings.sfx_volume.clamp(0.0, 1.0);
        self.music_volume = settings.music_volume.clamp(0.0, 1.0);
        self.muted = !settings.sound_on;
        if self.muted {
            self.stop_music();
        }
    }
}
