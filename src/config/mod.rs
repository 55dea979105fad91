//! Configuration schema definitions and validation.
//!
//! Defines the complete configuration structure for vlcdeck: where the
//! player lives, how often it is polled, and how values are displayed.
//! All configurations are serializable to/from TOML format.

mod display;
mod error;
mod general;
mod loading;
mod paths;
mod player;
mod polling;
mod watcher;

#[cfg(test)]
mod tests;

pub use display::DisplayConfig;
pub use error::ConfigError;
pub use general::{GeneralConfig, LogLevel};
pub use paths::ConfigPaths;
pub use player::PlayerConfig;
pub use polling::{ChangeDetection, PollingConfig};
pub use watcher::ConfigWatcher;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Main configuration structure for vlcdeck.
///
/// Represents the complete configuration schema that can be loaded
/// from TOML files. All fields have sensible defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// General application settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Where to reach the player and how to authenticate.
    #[serde(default)]
    pub player: PlayerConfig,

    /// Polling cadences and request limits.
    #[serde(default)]
    pub polling: PollingConfig,

    /// Presentation settings for published variables.
    #[serde(default)]
    pub display: DisplayConfig,
}

impl Config {
    /// Checks the values serde cannot check on its own.
    ///
    /// An empty host is not an error: it means "not configured" and the
    /// service stays idle with a warning status.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidField` for zero intervals or divisor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.polling.validate()
    }
}
