use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while locating, reading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration field has an unusable value
    #[error("invalid config field '{field}' in {component}: {reason}")]
    InvalidField {
        /// The field that is invalid
        field: String,
        /// Component containing the field
        component: String,
        /// Reason why the field is invalid
        reason: String,
    },

    /// I/O operation error
    #[error("I/O error on '{path}': {details}")]
    Io {
        /// Path where I/O error occurred
        path: PathBuf,
        /// I/O error details
        details: String,
    },

    /// TOML parsing error with location context
    #[error("failed to parse TOML at '{location}': {details}")]
    TomlParse {
        /// Location of TOML being parsed (file path or "string")
        location: String,
        /// Parse error details
        details: String,
    },

    /// No config directory could be derived from the environment
    #[error("Neither XDG_CONFIG_HOME nor HOME environment variable found")]
    NoConfigDir,
}

impl ConfigError {
    /// Creates a TOML parsing error with optional file path context.
    pub fn toml_parse(error: impl std::fmt::Display, path: Option<&std::path::Path>) -> Self {
        let location = match path {
            Some(p) => {
                let clean_path = p.canonicalize().unwrap_or_else(|_| p.to_path_buf());
                clean_path.to_string_lossy().to_string()
            }
            None => "string".to_string(),
        };

        ConfigError::TomlParse {
            location,
            details: error.to_string(),
        }
    }

    /// Creates an invalid field error.
    pub fn invalid_field(component: &str, field: &str, reason: impl Into<String>) -> Self {
        ConfigError::InvalidField {
            field: field.to_string(),
            component: component.to_string(),
            reason: reason.into(),
        }
    }
}
