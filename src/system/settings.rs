// src/system/settings.rs

use crate::constants::DEFAULT_PROMPT;
use crate::core::paths::{self, PathError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::num::NonZeroUsize;
use std::path::Path;
use thiserror::Error;

/// Why settings could not be loaded.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// The config directory could not be resolved.
    #[error(transparent)]
    Path(#[from] PathError),
    /// Reading or writing the file failed.
    #[error("Could not access settings file '{path}': {source}")]
    Io {
        /// The settings file.
        path: String,
        /// The underlying failure.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid TOML for [`Settings`].
    #[error("Invalid settings file '{path}': {source}")]
    Parse {
        /// The settings file.
        path: String,
        /// The parser's complaint.
        #[source]
        source: toml::de::Error,
    },
    /// The defaults could not be written out.
    #[error("Could not serialize default settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// User preferences read from `settings.toml`. Missing keys fall back to defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// The `[review]` table.
    pub review: ReviewSettings,
    /// The `[display]` table.
    pub display: DisplaySettings,
}

/// `[review]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewSettings {
    /// Cards per review when `review` is given no count. Unset means no limit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cards_per_session: Option<NonZeroUsize>,
}

/// `[display]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Text shown before each input line.
    pub prompt: String,
    /// Colored output. `--no-color` turns it off.
    pub color: bool,
    /// Ask before `clear` wipes every deck.
    pub confirm_clear: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            color: true,
            confirm_clear: true,
        }
    }
}

/// Loads settings from the default location, writing a default file on first run.
pub fn load_settings() -> Result<Settings, SettingsError> {
    let path = paths::get_settings_path()?;
    load_settings_from(&path)
}

/// Loads settings from `path`. A missing file is created with the defaults.
pub fn load_settings_from(path: &Path) -> Result<Settings, SettingsError> {
    let io_error = |source| SettingsError::Io {
        path: path.display().to_string(),
        source,
    };

    if !path.exists() {
        log::info!("No settings file at '{}', writing defaults.", path.display());
        let defaults = Settings::default();
        let toml_string = toml::to_string_pretty(&defaults)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        fs::write(path, toml_string).map_err(io_error)?;
        return Ok(defaults);
    }

    let content = fs::read_to_string(path).map_err(io_error)?;
    let settings: Settings = toml::from_str(&content).map_err(|source| SettingsError::Parse {
        path: path.display().to_string(),
        source,
    })?;
    log::debug!("Loaded settings from '{}': {:?}", path.display(), settings);
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_created_with_defaults() {
        // --- Setup ---
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.toml");

        // --- Execute ---
        let settings = load_settings_from(&path).unwrap();

        // --- Assert ---
        assert_eq!(settings, Settings::default());
        assert!(path.exists());
        let reloaded = load_settings_from(&path).unwrap();
        assert_eq!(reloaded, settings);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "[review]\ncards_per_session = 5\n").unwrap();

        let settings = load_settings_from(&path).unwrap();

        assert_eq!(settings.review.cards_per_session, NonZeroUsize::new(5));
        assert_eq!(settings.display, DisplaySettings::default());
    }

    #[test]
    fn test_zero_cards_per_session_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "[review]\ncards_per_session = 0\n").unwrap();

        let err = load_settings_from(&path).unwrap_err();

        assert!(matches!(err, SettingsError::Parse { .. }));
    }

    #[test]
    fn test_display_section() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(
            &path,
            "[display]\nprompt = \"cards> \"\ncolor = false\nconfirm_clear = false\n",
        )
        .unwrap();

        let settings = load_settings_from(&path).unwrap();

        assert_eq!(settings.display.prompt, "cards> ");
        assert!(!settings.display.color);
        assert!(!settings.display.confirm_clear);
    }
}
