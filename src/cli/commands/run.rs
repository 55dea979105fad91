use std::{collections::BTreeMap, path::Path, sync::Arc};

use futures::StreamExt;
use tracing::{info, warn};

use crate::{
    cli::{CommandResult, formatting::format_feedbacks},
    config::{Config, ConfigWatcher},
    services::vlc::{Feedback, Health, ReactiveHost, VlcService},
};

/// What the log has already shown, so only differences are printed.
#[derive(Default)]
struct Shown {
    variables: BTreeMap<String, String>,
    feedbacks: Vec<Feedback>,
    health: Option<Health>,
}

impl Shown {
    fn log_changes(&mut self, host: &ReactiveHost) {
        let health = host.health.get();
        if self.health.as_ref() != Some(&health) {
            info!(status = %health, "Status changed");
            self.health = Some(health);
        }

        let variables = host.variables.get();
        for (name, value) in &variables {
            if self.variables.get(name) != Some(value) {
                info!(variable = %name, %value, "Variable set");
            }
        }
        for name in self.variables.keys() {
            if !variables.contains_key(name) {
                info!(variable = %name, "Variable cleared");
            }
        }
        self.variables = variables;

        let feedbacks = host.active_feedbacks.get();
        if feedbacks != self.feedbacks {
            info!(active = %format_feedbacks(&feedbacks), "Feedbacks changed");
            self.feedbacks = feedbacks;
        }
    }
}

/// Runs the bridge until Ctrl-C, restarting it whenever the config file
/// changes to a different valid configuration.
pub(crate) async fn execute(config_path: &Path, config: Config) -> CommandResult {
    let host = Arc::new(ReactiveHost::new());
    let mut service = VlcService::start(&config, host.clone())?;

    let mut watcher = match ConfigWatcher::new(config_path, config) {
        Ok(watcher) => Some(watcher),
        Err(e) => {
            warn!("Not watching {}: {e}", config_path.display());
            None
        }
    };

    let mut updates = Box::pin(host.watch());
    let mut shown = Shown::default();

    loop {
        tokio::select! {
            signal = tokio::signal::ctrl_c() => {
                signal?;
                info!("Interrupted");
                break;
            }
            new_config = next_change(&mut watcher) => {
                info!("Config file changed, reconnecting");
                service.reconfigure(&new_config).await?;
            }
            Some(snapshot) = updates.next() => shown.log_changes(&snapshot),
        }
    }

    service.shutdown().await;
    Ok(String::new())
}

/// Next valid config, or never once watching is impossible.
async fn next_change(watcher: &mut Option<ConfigWatcher>) -> Config {
    if let Some(active) = watcher {
        if let Some(config) = active.next_change().await {
            return config;
        }
        warn!("Config watcher stopped");
        *watcher = None;
    }
    std::future::pending().await
}
