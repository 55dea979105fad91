use thiserror::Error;

use crate::{VlcDeckError, config::ConfigError};

/// Errors that can occur during CLI command execution.
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid arguments were provided to a command.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The configuration could not be loaded.
    ///
    /// Wraps parse and validation failures so the user sees which field or
    /// line to fix.
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ConfigError),

    /// The bridge could not be set up or the player could not be reached.
    #[error("Service error: {0}")]
    ServiceError(String),

    /// An I/O operation failed.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<VlcDeckError> for CliError {
    fn from(error: VlcDeckError) -> Self {
        match error {
            VlcDeckError::Config(e) => CliError::ConfigError(e),
            VlcDeckError::Client(details) => CliError::ServiceError(details),
        }
    }
}

/// Type alias for command execution results.
///
/// Commands return the text to print on success.
pub type CommandResult = Result<String, CliError>;
