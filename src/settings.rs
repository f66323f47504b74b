//! Player preferences
//!
//! Persisted separately from the score table.

use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::persistence::Storage;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,

    // === Visual ===
    /// Exhaust particles behind the head
    pub particles: bool,
    /// Outline every collision circle
    pub debug_circles: bool,

    // === Accessibility ===
    /// No camera shake
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
            particles: true,
            debug_circles: false,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Storage key
    const STORAGE_KEY: &'static str = "sea_docking_settings";

    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let settings: Settings = serde_json::from_str(json).map_err(GameError::Settings)?;
        Ok(settings.clamped())
    }

    /// Volumes forced into 0..=1
    pub fn clamped(mut self) -> Self {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self.music_volume = self.music_volume.clamp(0.0, 1.0);
        self
    }

    pub fn effective_sfx_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    pub fn effective_music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.music_volume
        }
    }

    /// Camera shake on crash
    pub fn screen_shake(&self) -> bool {
        !self.reduced_motion
    }

    pub fn load(storage: &dyn Storage) -> Self {
        let Some(json) = storage.get_item(Self::STORAGE_KEY) else {
            log::info!("Using default settings");
            return Self::default();
        };
        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings");
                settings
            }
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    pub fn save(&self, storage: &mut dyn Storage) {
        match serde_json::to_string(self) {
            Ok(json) => {
                storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
            Err(e) => log::warn!("Failed to serialize settings: {e}"),
        }
    }
}
