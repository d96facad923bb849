use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{CatalogError, Result};

/// Application settings
///
/// Read from `settings.json` in the user config directory:
/// - Linux: ~/.config/mussel-catalog/settings.json
/// - macOS: ~/Library/Application Support/mussel-catalog/settings.json
/// - Windows: %APPDATA%\mussel-catalog\settings.json
///
/// Every key is optional; missing keys keep their defaults.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Path to the JSON dataset
    pub data_file: PathBuf,
    /// Directory that image filenames resolve against
    pub images_dir: PathBuf,
    /// Idle time before a search runs, in milliseconds
    pub search_debounce_ms: u64,
    /// Longest side of generated card thumbnails, in pixels
    pub thumbnail_size: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("mussels_clean.json"),
            images_dir: PathBuf::from("images"),
            search_debounce_ms: 300,
            thumbnail_size: 256,
        }
    }
}

impl Settings {
    /// Load settings from the user config directory, falling back to defaults
    pub fn load() -> Self {
        let path = match Self::settings_path() {
            Ok(path) => path,
            Err(e) => {
                log::warn!("{}; using default settings", e);
                return Self::default();
            }
        };

        if !path.exists() {
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring settings file: {}", e);
                Self::default()
            }
        }
    }

    /// Parse settings from a JSON file
    pub fn load_from(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Get the path where the settings file is expected
    fn settings_path() -> Result<PathBuf> {
        let mut path = dirs::config_dir().ok_or(CatalogError::MissingUserDir("config"))?;
        path.push("mussel-catalog");
        path.push("settings.json");
        Ok(path)
    }

    pub fn search_delay(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    /// Resolve an image filename against the images directory
    pub fn image_path(&self, filename: &str) -> PathBuf {
        self.images_dir.join(filename)
    }
}
