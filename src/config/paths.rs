use std::{env, path::PathBuf};

use super::ConfigError;

const APP_DIR: &str = "vlcdeck";

/// Utility struct for managing configuration file paths
///
/// Provides methods to locate configuration directories and files following
/// the XDG Base Directory specification
pub struct ConfigPaths;

impl ConfigPaths {
    /// Returns the configuration directory path for the application
    ///
    /// Follows the XDG Base Directory specification:
    /// - First checks `XDG_CONFIG_HOME`
    /// - Falls back to `$HOME/.config`
    /// - Appends "vlcdeck" to the base config directory
    ///
    /// # Errors
    /// Returns an error if neither `XDG_CONFIG_HOME` nor `HOME` environment variables are set
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        let config_home = env::var("XDG_CONFIG_HOME")
            .or_else(|_| env::var("HOME").map(|home| format!("{home}/.config")))
            .map_err(|_| ConfigError::NoConfigDir)?;

        Ok(PathBuf::from(config_home).join(APP_DIR))
    }

    /// Returns the path to the main configuration file
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined
    pub fn main_config() -> Result<PathBuf, ConfigError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Get the application log directory, creating it if needed
    ///
    /// Uses `XDG_STATE_HOME` when set, `$HOME/.local/state` otherwise.
    ///
    /// # Errors
    /// Returns error if no base directory is known or it cannot be created
    pub fn log_dir() -> Result<PathBuf, ConfigError> {
        let state_home = env::var("XDG_STATE_HOME")
            .or_else(|_| env::var("HOME").map(|home| format!("{home}/.local/state")))
            .map_err(|_| ConfigError::NoConfigDir)?;

        let log_dir = PathBuf::from(state_home).join(APP_DIR).join("logs");

        if !log_dir.exists() {
            std::fs::create_dir_all(&log_dir).map_err(|e| ConfigError::Io {
                path: log_dir.clone(),
                details: e.to_string(),
            })?;
        }

        Ok(log_dir)
    }
}
