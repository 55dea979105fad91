use std::{
    ffi::OsString,
    path::{Path, PathBuf},
    time::Duration,
};

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher, recommended_watcher};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::Config;

/// Editors tend to emit several events per save.
const DEBOUNCE: Duration = Duration::from_millis(150);

/// Watches the config file and yields each new valid configuration.
///
/// The parent directory is watched rather than the file itself so that
/// atomic-rename saves and a file created after startup are both seen.
pub struct ConfigWatcher {
    _watcher: RecommendedWatcher,
    events: mpsc::UnboundedReceiver<()>,
    path: PathBuf,
    current: Config,
}

impl ConfigWatcher {
    /// Starts watching `path`, treating `current` as the active config.
    ///
    /// # Errors
    /// Returns error if the parent directory cannot be watched.
    pub fn new(path: &Path, current: Config) -> Result<Self, notify::Error> {
        let (event_tx, events) = mpsc::unbounded_channel();
        let file_name: Option<OsString> = path.file_name().map(|name| name.to_os_string());

        let mut watcher = recommended_watcher(move |res: notify::Result<Event>| {
            let Ok(event) = res else {
                return;
            };

            if !matches!(
                event.kind,
                EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
            ) {
                return;
            }

            let touches_config = event
                .paths
                .iter()
                .any(|changed| changed.file_name().map(|n| n.to_os_string()) == file_name);

            if touches_config {
                let _ = event_tx.send(());
            }
        })?;

        let directory = path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        watcher.watch(directory, RecursiveMode::NonRecursive)?;

        Ok(Self {
            _watcher: watcher,
            events,
            path: path.to_path_buf(),
            current,
        })
    }

    /// Waits until the file changes into a valid config that differs from the active one.
    ///
    /// Invalid edits are logged and skipped; the previous config stays active.
    /// Returns `None` once the watcher has shut down.
    pub async fn next_change(&mut self) -> Option<Config> {
        while self.events.recv().await.is_some() {
            tokio::time::sleep(DEBOUNCE).await;
            while self.events.try_recv().is_ok() {}

            match Config::load(&self.path) {
                Ok(config) if config != self.current => {
                    self.current = config.clone();
                    return Some(config);
                }
                Ok(_) => debug!("Config file touched without effective changes"),
                Err(e) => warn!("Ignoring invalid config change: {e}"),
            }
        }

        None
    }
}
