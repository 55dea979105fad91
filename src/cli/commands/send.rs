use std::sync::Arc;

use super::status::connected;
use crate::{
    cli::{CliError, CommandResult},
    config::Config,
    services::vlc::{Action, Health, ReactiveHost},
};

/// Sends one command. Slot actions fetch the playlist first so the slot
/// resolves to the item currently shown there.
pub(crate) async fn execute(config: &Config, action: Action) -> CommandResult {
    let host = Arc::new(ReactiveHost::new());
    let service = connected(config, &host)?;

    if matches!(action, Action::PlaySlot(_)) {
        service.playlist_tick().await;
    }
    service.dispatch(action).await;

    match host.health.get() {
        Health::Ok => Ok(format!("Sent {action}")),
        Health::Warning(msg) | Health::Error(msg) => Err(CliError::ServiceError(msg)),
    }
}
