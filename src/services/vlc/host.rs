//! The host-facing surface: published variables, feedback predicates and
//! connectivity status.

use std::{collections::BTreeMap, fmt};

use futures::Stream;

use super::{
    health::Health,
    types::{PlayState, PlaybackState},
};
use crate::{services::common::Property, watch_all};

/// Player version string.
pub const VAR_VERSION: &str = "v_ver";
/// Status glyph.
pub const VAR_STATUS: &str = "r_stat";
/// Current item identifier.
pub const VAR_TRACK_ID: &str = "r_id";
/// Current item display title.
pub const VAR_TRACK_NAME: &str = "r_name";
/// 1-based slot of the current item.
pub const VAR_TRACK_NUMBER: &str = "r_num";
/// Remaining time, variable size.
pub const VAR_LEFT: &str = "r_left";
/// Remaining time, always `hh:mm:ss`.
pub const VAR_HHMMSS: &str = "r_hhmmss";
/// Remaining hours.
pub const VAR_HH: &str = "r_hh";
/// Remaining minutes.
pub const VAR_MM: &str = "r_mm";
/// Remaining seconds.
pub const VAR_SS: &str = "r_ss";

/// Variable name holding the display name of playlist slot `slot` (1-based).
pub fn slot_variable(slot: usize) -> String {
    format!("pname_{slot}")
}

/// Receives everything the bridge publishes.
///
/// Implementations must be cheap and non-blocking; they are called while
/// the bridge state lock is held.
pub trait HostSink: Send + Sync {
    /// Sets a named variable, `None` clears it.
    fn set_variable(&self, name: &str, value: Option<String>);

    /// Asks the host to re-evaluate its feedback predicates.
    fn check_feedbacks(&self, state: &PlaybackState);

    /// Reports a connectivity status change.
    fn set_status(&self, health: &Health);
}

/// 24-bit colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// White, the default foreground of every feedback.
    pub const WHITE: Rgb = Rgb(255, 255, 255);
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Button colouring predicates over discrete player state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feedback {
    /// Player is in the given transport state
    PlayerState(PlayState),
    /// Playlist loop is on
    Loop,
    /// Repeat current item is on
    Repeat,
    /// Random order is on
    Shuffle,
    /// Video is fullscreen
    Fullscreen,
}

impl Feedback {
    /// Every feedback a host can bind to a button.
    pub const ALL: [Feedback; 7] = [
        Feedback::PlayerState(PlayState::Stopped),
        Feedback::PlayerState(PlayState::Paused),
        Feedback::PlayerState(PlayState::Playing),
        Feedback::Loop,
        Feedback::Repeat,
        Feedback::Shuffle,
        Feedback::Fullscreen,
    ];

    /// Whether the predicate holds for `state`.
    pub fn is_active(&self, state: &PlaybackState) -> bool {
        match self {
            Feedback::PlayerState(play_state) => state.play_state == *play_state,
            Feedback::Loop => state.loop_enabled,
            Feedback::Repeat => state.repeat,
            Feedback::Shuffle => state.shuffle,
            Feedback::Fullscreen => state.fullscreen,
        }
    }

    /// Default `(foreground, background)` applied while active.
    pub fn colors(&self) -> (Rgb, Rgb) {
        let background = match self {
            Feedback::PlayerState(PlayState::Playing) => Rgb(0, 128, 0),
            Feedback::PlayerState(PlayState::Paused) => Rgb(128, 128, 0),
            Feedback::PlayerState(_) => Rgb(128, 0, 0),
            Feedback::Loop => Rgb(0, 128, 128),
            Feedback::Repeat => Rgb(128, 0, 128),
            Feedback::Shuffle => Rgb(0, 0, 128),
            Feedback::Fullscreen => Rgb(204, 0, 128),
        };
        (Rgb::WHITE, background)
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feedback::PlayerState(state) => write!(f, "state:{state}"),
            Feedback::Loop => f.write_str("loop"),
            Feedback::Repeat => f.write_str("repeat"),
            Feedback::Shuffle => f.write_str("shuffle"),
            Feedback::Fullscreen => f.write_str("fullscreen"),
        }
    }
}

/// Host implementation backed by watchable properties.
///
/// Each property only notifies watchers when its value actually changes.
#[derive(Clone, Debug)]
pub struct ReactiveHost {
    /// Published variables by name
    pub variables: Property<BTreeMap<String, String>>,
    /// Feedbacks whose predicate currently holds
    pub active_feedbacks: Property<Vec<Feedback>>,
    /// Last reported connectivity status
    pub health: Property<Health>,
}

impl Default for ReactiveHost {
    fn default() -> Self {
        Self::new()
    }
}

impl ReactiveHost {
    /// Creates a host with no variables and an initializing status.
    pub fn new() -> Self {
        Self {
            variables: Property::new(BTreeMap::new()),
            active_feedbacks: Property::new(Vec::new()),
            health: Property::new(Health::Warning("Initializing".into())),
        }
    }

    /// Current value of a variable.
    pub fn variable(&self, name: &str) -> Option<String> {
        self.variables.get().get(name).cloned()
    }

    /// Emits the whole host whenever any of its properties change.
    pub fn watch(&self) -> impl Stream<Item = Self> + Send {
        watch_all!(self, variables, active_feedbacks, health)
    }
}

impl HostSink for ReactiveHost {
    fn set_variable(&self, name: &str, value: Option<String>) {
        self.variables.update(|vars| match value {
            Some(value) => {
                if vars.get(name) == Some(&value) {
                    return false;
                }
                vars.insert(name.to_string(), value);
                true
            }
            None => vars.remove(name).is_some(),
        });
    }

    fn check_feedbacks(&self, state: &PlaybackState) {
        let active = Feedback::ALL
            .into_iter()
            .filter(|feedback| feedback.is_active(state))
            .collect();
        self.active_feedbacks.set(active);
    }

    fn set_status(&self, health: &Health) {
        self.health.set(health.clone());
    }
}
