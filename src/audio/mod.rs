//! Sound cue dispatch
//!
//! The simulation never plays audio. It queues [`GameEvent::Sound`] values and
//! the host forwards them to whatever [`AudioSink`] the platform provides.
//! Playback is fire-and-forget: sinks report nothing back.

use serde::{Deserialize, Serialize};

use crate::settings::Settings;
use crate::sim::GameEvent;

#[cfg(target_arch = "wasm32")]
mod web;
#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

/// Sound effect cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    /// An enemy lets a star or kunai fly
    ShurikenThrow,
    GemCollected,
    /// Player hit, starting to fall
    PlayerFall,
    GameOver,
    ShieldOn,
    /// Rocket ride passes its lift-off point
    LiftOff,
    HorizontalEnemyHit,
    /// A thrown object knocked aside mid-jump
    ShurikenMetalHit,
    /// Bounce during the horizontal enemy power-up
    Swoosh,
    PlayerJump,
}

impl SoundCue {
    pub const ALL: [SoundCue; 10] = [
        SoundCue::ShurikenThrow,
        SoundCue::GemCollected,
        SoundCue::PlayerFall,
        SoundCue::GameOver,
        SoundCue::ShieldOn,
        SoundCue::LiftOff,
        SoundCue::HorizontalEnemyHit,
        SoundCue::ShurikenMetalHit,
        SoundCue::Swoosh,
        SoundCue::PlayerJump,
    ];

    /// Asset name of the cue
    pub fn as_str(self) -> &'static str {
        match self {
            SoundCue::ShurikenThrow => "Shuriken_Throw",
            SoundCue::GemCollected => "GemCollected",
            SoundCue::PlayerFall => "PlayerFall",
            SoundCue::GameOver => "Game_Over",
            SoundCue::ShieldOn => "ShieldOn",
            SoundCue::LiftOff => "LiftOff",
            SoundCue::HorizontalEnemyHit => "HorizontalEnemyHit",
            SoundCue::ShurikenMetalHit => "Shuriken_Metal_Hit",
            SoundCue::Swoosh => "Swoosh",
            SoundCue::PlayerJump => "PlayerJump",
        }
    }
}

/// Background music tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Music {
    Gameplay,
}

impl Music {
    pub fn as_str(self) -> &'static str {
        match self {
            Music::Gameplay => "GameplayMusic",
        }
    }
}

/// Platform audio output
pub trait AudioSink {
    fn play_sound(&mut self, cue: SoundCue);
    fn play_music(&mut self, music: Music);
    fn stop_music(&mut self);

    /// Take on the player's mute and volume choices. Call before starting
    /// music so an unmute is in effect when the track begins.
    fn apply_settings(&mut self, _settings: &Settings) {}
}

/// Sink that only logs; used by the headless runner
#[derive(Debug, Default)]
pub struct LogAudio;

impl AudioSink for LogAudio {
    fn play_sound(&mut self, cue: SoundCue) {
        log::trace!("sound {}", cue.as_str());
    }

    fn play_music(&mut self, music: Music) {
        log::debug!("music {}", music.as_str());
    }

    fn stop_music(&mut self) {
        log::debug!("music stopped");
    }
}

/// Sink that remembers what it was asked to play
///
/// Like a real sink it ignores music requests while muted, and `calls`
/// keeps the order of music and settings requests.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RecordingAudio {
    pub sounds: Vec<SoundCue>,
    pub music: Option<Music>,
    pub muted: bool,
    pub calls: Vec<&'static str>,
}

impl AudioSink for RecordingAudio {
    fn play_sound(&mut self, cue: SoundCue) {
        self.sounds.push(cue);
    }

    fn play_music(&mut self, music: Music) {
        self.calls.push("play_music");
        if !self.muted {
            self.music = Some(music);
        }
    }

    fn stop_music(&mut self) {
        self.calls.push("stop_music");
        self.music = None;
    }

    fn apply_settings(&mut self, settings: &Settings) {
        self.calls.push(if settings.sound_on { "unmute" } else { "mute" });
        self.muted = !settings.sound_on;
    }
}

/// Forward every sound event to `sink`. Returns how many were played.
pub fn dispatch<S: AudioSink + ?Sized>(events: &[GameEvent], sink: &mut S) -> usize {
    let mut played = 0;
    for event in events {
        if let GameEvent::Sound(cue) = event {
            sink.play_sound(*cue);
            played += 1;
        }
    }
    played
}
