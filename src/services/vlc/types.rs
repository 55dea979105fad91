use std::fmt;

/// Opaque identifier the player assigns to a playlist item.
///
/// The playlist endpoint reports ids as strings and the status endpoint as
/// numbers; both are kept in their decimal string form so they compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct TrackId(String);

impl TrackId {
    /// Wraps a raw identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as sent on the wire.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<i64> for TrackId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Transport state of the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlayState {
    /// Nothing is playing
    #[default]
    Stopped,

    /// A track is loaded and paused
    Paused,

    /// A track is playing
    Playing,

    /// The player is winding down playback
    Stopping,
}

impl PlayState {
    /// Parses the `state` field of a status snapshot.
    ///
    /// Returns `None` for anything else so the caller can reject the snapshot
    /// instead of guessing.
    pub fn parse(state: &str) -> Option<Self> {
        match state {
            "stopped" => Some(Self::Stopped),
            "paused" => Some(Self::Paused),
            "playing" => Some(Self::Playing),
            "stopping" => Some(Self::Stopping),
            _ => None,
        }
    }
}

impl fmt::Display for PlayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Stopped => "stopped",
            Self::Paused => "paused",
            Self::Playing => "playing",
            Self::Stopping => "stopping",
        };
        f.write_str(name)
    }
}

/// Discrete player state mirrored from the status endpoint.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlaybackState {
    /// Current transport state
    pub play_state: PlayState,
    /// Playlist loops at the end
    pub loop_enabled: bool,
    /// Current item repeats
    pub repeat: bool,
    /// Random order
    pub shuffle: bool,
    /// Video output is fullscreen
    pub fullscreen: bool,
    /// Item the player reports as current
    pub current_track_id: TrackId,
    /// Player version, kept once known
    pub version: String,
}

/// Progress of the current track.
///
/// Remaining time and clock strings are derived from these fields on every
/// publish and never stored.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrackStatus {
    /// Display title, already truncated
    pub title: String,
    /// Track length in seconds
    pub length_seconds: f64,
    /// Position as a fraction of the length, 0 to 1
    pub position: f64,
    /// Elapsed seconds
    pub elapsed_seconds: f64,
    /// 1-based slot in the cached playlist, 0 when not found
    pub playlist_index: usize,
}

/// One item of the user-visible playlist.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlaylistEntry {
    /// Player-assigned identifier
    pub id: TrackId,
    /// Display name as reported by the player
    pub name: String,
    /// Duration in seconds, negative when unknown
    pub duration_seconds: i64,
    /// Media location
    pub uri: String,
}

/// Cached copy of the user-visible playlist.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Playlist {
    entries: Vec<PlaylistEntry>,
}

impl Playlist {
    /// Builds a playlist from entries in player order.
    pub fn new(entries: Vec<PlaylistEntry>) -> Self {
        Self { entries }
    }

    /// Entries in player order.
    pub fn entries(&self) -> &[PlaylistEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Identifiers in player order.
    pub fn ids(&self) -> impl Iterator<Item = &TrackId> {
        self.entries.iter().map(|entry| &entry.id)
    }

    /// Looks up an entry by identifier.
    pub fn get(&self, id: &TrackId) -> Option<&PlaylistEntry> {
        self.entries.iter().find(|entry| entry.id == *id)
    }

    /// 1-based position of `id`, 0 when absent.
    pub fn slot_of(&self, id: &TrackId) -> usize {
        self.entries
            .iter()
            .position(|entry| entry.id == *id)
            .map_or(0, |index| index + 1)
    }

    /// Identifier at a 1-based slot.
    pub fn id_at_slot(&self, slot: usize) -> Option<&TrackId> {
        slot.checked_sub(1)
            .and_then(|index| self.entries.get(index))
            .map(|entry| &entry.id)
    }
}
