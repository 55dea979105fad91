use std::{fmt, str::FromStr};

use tokio::sync::Mutex;
use tracing::{debug, info};

use super::{
    state::{BridgeState, SyncOptions},
    transport::{ReportingTransport, STATUS_PATH},
    types::Playlist,
};

/// Discrete user actions a button can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Start or resume playback
    Play,
    /// Play the item at a 1-based playlist slot
    PlaySlot(usize),
    /// Stop playback
    Stop,
    /// Toggle pause
    Pause,
    /// Skip to the next item
    Next,
    /// Go back to the previous item
    Previous,
    /// Toggle fullscreen video
    ToggleFullscreen,
    /// Toggle playlist loop
    ToggleLoop,
    /// Toggle random order
    ToggleShuffle,
    /// Toggle repeat of the current item
    ToggleRepeat,
}

/// A host action name that does not map to any [`Action`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionParseError {
    /// Name not recognised
    #[error("unknown action '{0}'")]
    Unknown(String),

    /// Slot action without a usable slot number
    #[error("action '{0}' needs a slot number, e.g. '{0}:3'")]
    MissingSlot(String),
}

impl Action {
    /// Resolves a host action name with its optional slot option.
    ///
    /// # Errors
    /// Returns error for unknown names or a slot action without a slot.
    pub fn from_host(name: &str, slot: Option<usize>) -> Result<Self, ActionParseError> {
        let action = match name {
            "play" => Action::Play,
            "playID" | "play-slot" => Action::PlaySlot(
                slot.ok_or_else(|| ActionParseError::MissingSlot(name.to_string()))?,
            ),
            "stop" => Action::Stop,
            "pause" => Action::Pause,
            "next" => Action::Next,
            "prev" | "previous" => Action::Previous,
            "full" | "fullscreen" => Action::ToggleFullscreen,
            "loop" => Action::ToggleLoop,
            "shuffle" => Action::ToggleShuffle,
            "repeat" => Action::ToggleRepeat,
            other => return Err(ActionParseError::Unknown(other.to_string())),
        };
        Ok(action)
    }

    /// Query string of the command, resolving slots through `playlist`.
    ///
    /// A slot outside the playlist yields an empty id and is left for the
    /// player to reject.
    pub fn command_query(&self, playlist: &Playlist) -> String {
        let command = match self {
            Action::Play => "pl_play",
            Action::PlaySlot(slot) => {
                let id = playlist
                    .id_at_slot(*slot)
                    .map(|id| id.as_str())
                    .unwrap_or_default();
                return format!("?command=pl_play&id={id}");
            }
            Action::Stop => "pl_stop",
            Action::Pause => "pl_pause",
            Action::Next => "pl_next",
            Action::Previous => "pl_previous",
            Action::ToggleFullscreen => "fullscreen",
            Action::ToggleLoop => "pl_loop",
            Action::ToggleShuffle => "pl_random",
            Action::ToggleRepeat => "pl_repeat",
        };
        format!("?command={command}")
    }
}

/// Parses `name` or `name:slot`.
impl FromStr for Action {
    type Err = ActionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((name, slot)) => {
                let slot = slot
                    .trim()
                    .parse()
                    .map_err(|_| ActionParseError::MissingSlot(name.to_string()))?;
                Action::from_host(name, Some(slot))
            }
            None => Action::from_host(s, None),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Play => f.write_str("play"),
            Action::PlaySlot(slot) => write!(f, "play-slot:{slot}"),
            Action::Stop => f.write_str("stop"),
            Action::Pause => f.write_str("pause"),
            Action::Next => f.write_str("next"),
            Action::Previous => f.write_str("previous"),
            Action::ToggleFullscreen => f.write_str("fullscreen"),
            Action::ToggleLoop => f.write_str("loop"),
            Action::ToggleShuffle => f.write_str("shuffle"),
            Action::ToggleRepeat => f.write_str("repeat"),
        }
    }
}

/// Sends one command and nudges the playback schedule.
///
/// Failures are only reported through the link's status reporter.
pub(crate) async fn dispatch(
    action: Action,
    state: &Mutex<BridgeState>,
    link: &ReportingTransport,
    options: &SyncOptions,
) {
    let query = action.command_query(&state.lock().await.playlist);
    let path = format!("{STATUS_PATH}{query}");

    match link.get(&path).await {
        Ok(_) => debug!("Sent {action}"),
        Err(err) => info!("Command {action} failed: {err}"),
    }

    state.lock().await.nudge(options);
}
