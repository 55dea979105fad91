use thiserror::Error;

use crate::config::ConfigError;

/// Top-level error for setting up the bridge.
///
/// Poll and command failures never reach this type; they are absorbed by
/// the synchronizers and surface only as a health status.
#[derive(Error, Debug)]
pub enum VlcDeckError {
    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Client(String),
}

/// Result alias used by setup code.
pub type Result<T> = std::result::Result<T, VlcDeckError>;
