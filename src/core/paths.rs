// src/core/paths.rs

use crate::constants::{CONFIG_DIR_NAME, SETTINGS_FILENAME};
use lazy_static::lazy_static;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use thiserror::Error;

lazy_static! {
    static ref FLASHDECK_CONFIG_DIR: Mutex<Option<PathBuf>> = Mutex::new(None);
}

/// Why a config path could not be produced.
#[derive(Error, Debug)]
pub enum PathError {
    /// The platform reports no config directory.
    #[error("Could not find system config directory.")]
    ConfigDirNotFound,
    /// `~/.config/flashdeck` could not be created.
    #[error("Could not create config directory at '{path}': {source}")]
    ConfigDirCreation {
        /// The directory that was being created.
        path: String,
        /// The underlying failure.
        #[source]
        source: std::io::Error,
    },
    /// A `--config` value named an unset variable or an unknown home.
    #[error("Could not expand path '{path}': {reason}")]
    Expansion {
        /// The path as given.
        path: String,
        /// What `shellexpand` reported.
        reason: String,
    },
}

/// Returns the directory that holds flashdeck's `settings.toml`
/// (`~/.config/flashdeck` on Linux), creating it if needed.
///
/// Memoized: only the first call touches the filesystem.
pub fn get_config_dir() -> Result<PathBuf, PathError> {
    // A poisoned lock still holds a valid cached path.
    let mut cached_path_guard = FLASHDECK_CONFIG_DIR
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());

    if let Some(path) = &*cached_path_guard {
        return Ok(path.clone());
    }

    let config_path = dirs::config_dir()
        .ok_or(PathError::ConfigDirNotFound)?
        .join(CONFIG_DIR_NAME);

    if !config_path.exists() {
        fs::create_dir_all(&config_path).map_err(|e| PathError::ConfigDirCreation {
            path: config_path.display().to_string(),
            source: e,
        })?;
    }

    *cached_path_guard = Some(config_path.clone());
    Ok(config_path)
}

/// Returns the path of the default `settings.toml`.
pub fn get_settings_path() -> Result<PathBuf, PathError> {
    get_config_dir().map(|dir| dir.join(SETTINGS_FILENAME))
}

/// Expands `~` and environment variables (`$VAR`, `${VAR}`) in a user-supplied path.
pub fn expand_user_path(raw: &str) -> Result<PathBuf, PathError> {
    let expanded = shellexpand::full(raw).map_err(|e| PathError::Expansion {
        path: raw.to_string(),
        reason: e.to_string(),
    })?;
    Ok(PathBuf::from(expanded.into_owned()))
}
