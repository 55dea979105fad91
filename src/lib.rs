//! vlcdeck - control-surface bridge for the VLC HTTP interface.
//!
//! Polls a VLC instance over its `/requests/*.json` API, mirrors playback
//! and playlist state, and publishes display variables and button feedback
//! to a host only when they change. Host actions are sent back as player
//! commands.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use vlcdeck::{config::Config, services::vlc::{ReactiveHost, VlcService}};
//!
//! # async fn demo() -> vlcdeck::Result<()> {
//! let config = Config::load_default()?;
//! let host = Arc::new(ReactiveHost::new());
//! let service = VlcService::start(&config, host.clone())?;
//!
//! println!("{:?}", host.variable("r_left"));
//! # drop(service);
//! # Ok(())
//! # }
//! ```

/// Configuration schema, loading and watching.
pub mod config;

/// Core error types and result aliases.
pub mod core;

/// Command-line interface.
pub mod cli;

/// Reactive services for player integration.
pub mod services;

/// Logging setup.
pub mod tracing_config;

/// Re-exported core types for convenience.
pub use core::{Result, VlcDeckError};
