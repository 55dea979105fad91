use std::env;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LogLevel;

const FORMAT_VAR: &str = "VLCDECK_LOG_FORMAT";

fn filter(default_level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level.to_string()))
}

fn json_output() -> bool {
    env::var(FORMAT_VAR).is_ok_and(|format| format == "json")
}

/// Initialize tracing for the application
///
/// Uses RUST_LOG if set, otherwise `default_level` from the config.
/// Output is pretty by default, JSON when VLCDECK_LOG_FORMAT=json.
///
/// # Errors
/// Returns error if a global subscriber is already installed
pub fn init(default_level: LogLevel) -> Result<(), Box<dyn std::error::Error>> {
    let registry = tracing_subscriber::registry().with(filter(default_level));

    if json_output() {
        registry
            .with(fmt::layer().json().with_target(true).with_level(true))
            .try_init()?;
    } else {
        registry
            .with(
                fmt::layer()
                    .pretty()
                    .with_target(true)
                    .with_level(true)
                    .with_thread_ids(true)
                    .with_thread_names(true),
            )
            .try_init()?;
    }

    Ok(())
}

/// Initialize tracing with file output
///
/// Like [`init`], and also writes to a daily rolling file in the vlcdeck
/// log directory. Keep the returned guard alive until shutdown so buffered
/// lines are flushed.
///
/// # Errors
/// Returns error if the log directory or file cannot be created, or a
/// global subscriber is already installed
pub fn init_with_file(default_level: LogLevel) -> Result<WorkerGuard, Box<dyn std::error::Error>> {
    const DAYS_TO_KEEP: usize = 7;

    let log_dir = crate::config::ConfigPaths::log_dir()?;

    let file_appender = tracing_appender::rolling::Builder::new()
        .rotation(tracing_appender::rolling::Rotation::DAILY)
        .max_log_files(DAYS_TO_KEEP)
        .filename_prefix("vlcdeck")
        .filename_suffix("log")
        .build(&log_dir)?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let registry = tracing_subscriber::registry().with(filter(default_level));

    if json_output() {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(std::io::stdout),
            )
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(non_blocking)
                    .with_ansi(false),
            )
            .try_init()?;
    } else {
        registry
            .with(
                fmt::layer()
                    .pretty()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(std::io::stdout),
            )
            .with(
                fmt::layer()
                    .compact()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(non_blocking)
                    .with_ansi(false),
            )
            .try_init()?;
    }

    Ok(guard)
}
