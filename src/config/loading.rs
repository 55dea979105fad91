use std::{fs, io::ErrorKind, path::Path};

use tracing::{debug, info};

use super::{Config, ConfigError, ConfigPaths};

impl Config {
    /// Loads the configuration from the default XDG location.
    ///
    /// # Errors
    /// See [`Config::load`].
    pub fn load_default() -> Result<Config, ConfigError> {
        let path = ConfigPaths::main_config()?;
        Self::load(&path)
    }

    /// Loads and validates a configuration file.
    ///
    /// A missing file is not an error: defaults are returned so a fresh
    /// install talks to `127.0.0.1:8080` straight away.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read, is not valid
    /// TOML, or fails validation.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No config file at {}, using defaults", path.display());
                return Ok(Config::default());
            }
            Err(e) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    details: e.to_string(),
                });
            }
        };

        let config: Config =
            toml::from_str(&content).map_err(|e| ConfigError::toml_parse(e, Some(path)))?;
        config.validate()?;

        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parses and validates configuration from a TOML string.
    ///
    /// # Errors
    /// Returns an error if the TOML is invalid or fails validation.
    pub fn from_toml_str(content: &str) -> Result<Config, ConfigError> {
        let config: Config =
            toml::from_str(content).map_err(|e| ConfigError::toml_parse(e, None))?;
        config.validate()?;
        Ok(config)
    }
}
