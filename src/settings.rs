//! Game settings and preferences
//!
//! Persisted separately from the high score: a JSON file on native builds,
//! LocalStorage on the web.

use std::path::PathBuf;
#[cfg(not(target_arch = "wasm32"))]
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::highscores::{HighScoreStore, PersistentStateError};

/// Game settings/preferences
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

    // === Debug ===
    /// Draw hitbox outlines over sprites
    pub show_hitboxes: bool,

    // === Paths (native) ===
    /// Directory holding images and sounds; built-in sizes are used if unset
    pub asset_root: Option<PathBuf>,
    /// High score file (native) or LocalStorage key (web)
    pub high_score_path: PathBuf,
    /// Optional balance overrides
    pub tuning_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,

            show_hitboxes: false,

            asset_root: None,
            high_score_path: PathBuf::from(HighScoreStore::DEFAULT_NAME),
            tuning_path: None,
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "flappy_settings";

    /// Effective effects volume (respects mute)
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

    pub fn high_score_store(&self) -> HighScoreStore {
        HighScoreStore::new(self.high_score_path.clone())
    }

    /// Read settings from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &Path) -> Result<Self, PersistentStateError> {
        let json =
            std::fs::read_to_string(path).map_err(|e| PersistentStateError::from_io(path, e))?;
        let settings = serde_json::from_str(&json).map_err(|e| PersistentStateError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Write settings as pretty JSON
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to(&self, path: &Path) -> Result<(), PersistentStateError> {
        let json = serde_json::to_string_pretty(self).map_err(|e| PersistentStateError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        std::fs::write(path, json).map_err(|e| PersistentStateError::from_io(path, e))?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Load settings, using defaults when the file is absent or unreadable
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load_from(path) {
            Ok(settings) => settings,
            Err(PersistentStateError::Missing { .. }) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("{}; using default settings", e);
                Self::default()
            }
        }
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Stored settings unreadable: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) -> Result<(), PersistentStateError> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(PersistentStateError::StorageUnavailable)?;
        let json = serde_json::to_string(self).map_err(|e| PersistentStateError::Parse {
            path: PathBuf::from(Self::STORAGE_KEY),
            reason: e.to_string(),
        })?;
        storage
            .set_item(Self::STORAGE_KEY, &json)
            .map_err(|_| PersistentStateError::StorageUnavailable)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_volumes() {
        let mut settings = Settings::default();
        assert!((settings.effective_sfx_volume() - 0.8).abs() < 1e-6);
        assert!((settings.effective_music_volume() - 0.56).abs() < 1e-6);
        settings.muted = true;
        assert_eq!(settings.effective_sfx_volume(), 0.0);
        assert_eq!(settings.effective_music_volume(), 0.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{ "muted": true, "asset_root": "/opt/flappy/assets" }"#)
                .expect("partial settings should parse");
        assert!(settings.muted);
        assert_eq!(settings.asset_root, Some(PathBuf::from("/opt/flappy/assets")));
        assert_eq!(settings.high_score_path, PathBuf::from("flappy_highscore.txt"));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_round_trip() {
        let path = std::env::temp_dir().join(format!("flappy_settings_{}.json", std::process::id()));
        let settings = Settings {
            show_hitboxes: true,
            music_volume: 0.25,
            ..Settings::default()
        };
        settings.save_to(&path).expect("save should succeed");
        assert_eq!(Settings::load_from(&path).expect("load should succeed"), settings);

        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(Settings::load_or_default(&path), Settings::default());
        let _ = std::fs::remove_file(&path);
    }
}
