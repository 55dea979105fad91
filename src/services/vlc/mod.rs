//! VLC HTTP interface bridge.
//!
//! Two polling loops mirror the player's playlist and playback status into
//! a [`BridgeState`](state::BridgeState), publishing variables and feedback
//! checks to a [`HostSink`] only when something changed. Commands go out
//! through the same transport and pull the next status poll forward.

mod dispatch;
mod error;
/// Display formatting of titles and remaining time
pub mod format;
/// Connectivity status reporting
pub mod health;
/// Host surface: variables, feedbacks, status
pub mod host;
mod playback;
mod playlist;
mod service;
/// Status and playlist wire models
pub mod snapshot;
/// Mirrored player state and poll scheduling
pub mod state;
/// HTTP access to the player
pub mod transport;
mod types;

pub use dispatch::{Action, ActionParseError};
pub use error::TransportError;
pub use health::{Health, HealthLevel, StatusReporter};
pub use host::{Feedback, HostSink, ReactiveHost, Rgb};
pub use playback::StatusOutcome;
pub use playlist::playlist_changed;
pub use service::VlcService;
pub use state::{BridgeState, SyncOptions};
pub use transport::{Connection, HttpTransport, ReportingTransport, Transport};
pub use types::{PlayState, PlaybackState, Playlist, PlaylistEntry, TrackId, TrackStatus};
