//! Game settings and preferences
//!
//! Persisted separately from high scores as a small JSON file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::MAX_NAME_LENGTH;
use crate::persistence::{StorageError, load_json, save_json};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Visual Effects ===
    /// Player light trail
    pub trails: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Background music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,

    // === Gameplay ===
    /// Start new sessions with the path-finding bot steering
    pub bot_mode: bool,
    /// Last name entered for the leaderboard
    pub player_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            trails: true,

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.1,
            muted: false,

            bot_mode: false,
            player_name: String::new(),
        }
    }
}

impl Settings {
    /// Effective sound effect volume (respects mute)
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    /// Effective music volume (respects mute)
    pub fn effective_music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.music_volume).clamp(0.0, 1.0)
        }
    }

    /// Remember a leaderboard name, keeping at most the allowed length
    pub fn set_player_name(&mut self, name: &str) {
        self.player_name = name.chars().take(MAX_NAME_LENGTH).collect();
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, StorageError> {
        let settings = load_json(path)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any failure
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            log::info!("Using default settings ({})", e);
            Self::default()
        })
    }

    /// Save settings to a JSON file
    pub fn save(&self, path: &Path) -> Result<(), StorageError> {
        save_json(path, self)?;
        log::info!("Settings saved");
        Ok(())
    }
}
