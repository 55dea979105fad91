/// Shared building blocks for services
pub mod common;
/// VLC HTTP bridge service
pub mod vlc;

pub use vlc::{Action, VlcService};
