use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// General configuration settings for vlcdeck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Default)]
#[serde(deny_unknown_fields)]
pub struct GeneralConfig {
    /// Default log verbosity when RUST_LOG is not set.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Also write a daily rolling log file in the data directory when running the bridge.
    #[serde(default)]
    pub log_to_file: bool,
}

/// Verbosity of log output.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only.
    Error,
    /// Warnings and errors, including auth failures.
    Warn,
    /// Connection transitions and lifecycle events.
    #[default]
    Info,
    /// Per-tick synchronizer decisions.
    Debug,
    /// Raw request and snapshot traffic.
    Trace,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let directive = match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        };
        f.write_str(directive)
    }
}
