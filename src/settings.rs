//! Player preferences
//!
//! Persisted as JSON in the platform config directory, separate from the
//! player store. The tuning override file lives next to it.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::consts::{APP_NAME, APP_ORGANIZATION, APP_QUALIFIER};
use crate::error::SettingsError;

const SETTINGS_FILE: &str = "settings.json";
const TUNING_FILE: &str = "tuning.json";

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Sound switch state at startup
    pub sound_on: bool,

    // === Session ===
    /// Name the launcher plays under
    pub last_player: Option<String>,
    /// Frames before the attract-mode session is switched off
    pub demo_frame_limit: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_on: true,
            last_player: None,
            // One minute at the base frame rate
            demo_frame_limit: 3_000,
        }
    }
}

impl Settings {
    /// Load settings from the platform config directory, falling back to
    /// defaults if there is no directory or no file yet
    pub fn load() -> Self {
        match config_dir() {
            Ok(dir) => match Self::load_from(&dir.join(SETTINGS_FILE)) {
                Ok(settings) => settings,
                Err(e) => {
                    log::warn!("Ignoring unreadable settings: {e}");
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("{e}, using default settings");
                Self::default()
            }
        }
    }

    /// Save settings to the platform config directory
    pub fn save(&self) -> Result<(), SettingsError> {
        self.save_to(&config_dir()?.join(SETTINGS_FILE))
    }

    /// Load settings from a specific file; a missing file gives defaults
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            log::info!("Using default settings");
            return Ok(Self::default());
        }
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = serde_json::from_str(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings to a specific file, creating its directory
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| SettingsError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Settings saved");
        Ok(())
    }
}

fn project_dirs() -> Result<ProjectDirs, SettingsError> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME).ok_or(SettingsError::NoConfigDir)
}

/// Directory holding settings and tuning overrides
pub fn config_dir() -> Result<PathBuf, SettingsError> {
    Ok(project_dirs()?.config_dir().to_path_buf())
}

/// Directory holding the player database
pub fn data_dir() -> Result<PathBuf, SettingsError> {
    Ok(project_dirs()?.data_dir().to_path_buf())
}

/// Optional tuning override file
pub fn tuning_path() -> Result<PathBuf, SettingsError> {
    Ok(config_dir()?.join(TUNING_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join(SETTINGS_FILE)).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(SETTINGS_FILE);

        let settings = Settings {
            sound_on: false,
            last_player: Some("wolf".to_string()),
            ..Default::default()
        };
        settings.save_to(&path).unwrap();

        assert_eq!(Settings::load_from(&path).unwrap(), settings);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        fs::write(&path, r#"{ "sound_on": false }"#).unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert!(!settings.sound_on);
        assert!(settings.last_player.is_none());
        assert_eq!(settings.demo_frame_limit, Settings::default().demo_frame_limit);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        fs::write(&path, "{").unwrap();
        assert!(matches!(Settings::load_from(&path), Err(SettingsError::Json(_))));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        fs::write(&path, r#"{ "music_volume": 0.9, "last_player": "ann" }"#).unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.last_player.as_deref(), Some("ann"));
    }
}
