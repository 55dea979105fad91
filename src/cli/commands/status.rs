use std::sync::Arc;

use crate::{
    cli::{
        CliError, CommandResult,
        formatting::{format_feedbacks, format_header, format_health, format_variables},
    },
    config::Config,
    services::vlc::{Health, ReactiveHost, VlcService},
};

/// Polls playlist and status once and prints what the bridge would publish.
pub(crate) async fn execute(config: &Config) -> CommandResult {
    let host = Arc::new(ReactiveHost::new());
    let service = connected(config, &host)?;

    service.playlist_tick().await;
    service.playback_tick().await;

    let health = host.health.get();
    if let Health::Error(msg) | Health::Warning(msg) = &health {
        return Err(CliError::ServiceError(msg.clone()));
    }

    Ok(format!(
        "{} {}\n{}\n  feedbacks  {}",
        format_header(&format!("VLC at {}", config.player.endpoint())),
        format_health(&health),
        format_variables(&host.variables.get()),
        format_feedbacks(&host.active_feedbacks.get())
    ))
}

/// Builds an idle service, failing early when no player is configured.
pub(super) fn connected(config: &Config, host: &Arc<ReactiveHost>) -> Result<VlcService, CliError> {
    let service = VlcService::connect(config, host.clone())?;
    if !service.is_configured() {
        return Err(CliError::InvalidArguments(
            "no player configured, set [player] host and port".into(),
        ));
    }
    Ok(service)
}
