//! Game settings and preferences
//!
//! Persisted as JSON next to the high scores.

use serde::{Deserialize, Serialize};

use crate::error::PersistError;
use crate::platform::TextStore;

/// Storage key of the settings document
pub const SETTINGS_KEY: &str = "settings.json";

/// Sound preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Master switch for effects and music
    pub sound_on: bool,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_on: true,
            music_volume: 0.7,
            sfx_volume: 1.0,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, PersistError> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.music_volume = settings.music_volume.clamp(0.0, 1.0);
        settings.sfx_volume = settings.sfx_volume.clamp(0.0, 1.0);
        Ok(settings)
    }

    /// Load settings, falling back to defaults
    pub fn load(store: &impl TextStore) -> Self {
        let loaded = store
            .read(SETTINGS_KEY)
            .and_then(|json| json.map(|j| Self::from_json(&j)).transpose());
        match loaded {
            Ok(Some(settings)) => {
                log::info!("Loaded settings");
                settings
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Settings unreadable, using defaults: {e}");
                Self::default()
            }
        }
    }

    pub fn save(&self, store: &mut impl TextStore) -> Result<(), PersistError> {
        let json = serde_json::to_string_pretty(self)?;
        store.write(SETTINGS_KEY, &json)?;
        log::info!("Settings saved");
        Ok(())
    }

    /// Flip the sound switch and return the new value
    pub fn toggle_sound(&mut self) -> bool {
        self.sound_on = !self.sound_on;
        self.sound_on
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStore;

    #[test]
    fn test_missing_and_corrupt_fall_back() {
        let mut store = MemoryStore::new();
        assert_eq!(Settings::load(&store), Settings::default());
        store.write(SETTINGS_KEY, "{not json").unwrap();
        assert_eq!(Settings::load(&store), Settings::default());
    }

    #[test]
    fn test_partial_json_and_clamping() {
        let s = Settings::from_json(r#"{"sound_on": false, "sfx_volume": 3.0}"#).unwrap();
        assert!(!s.sound_on);
        assert_eq!(s.sfx_volume, 1.0);
        assert_eq!(s.music_volume, Settings::default().music_volume);
    }

    #[test]
    fn test_toggle_persists() {
        let mut store = MemoryStore::new();
        let mut s = Settings::default();
        assert!(!s.toggle_sound());
        s.save(&mut store).unwrap();
        assert!(!Settings::load(&store).sound_on);
    }
}
