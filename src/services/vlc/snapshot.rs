//! Wire models for `/requests/status.json` and `/requests/playlist.json`.
//!
//! Parsing is all-or-nothing: a snapshot either converts completely into
//! typed values or is rejected as `MalformedResponse`, so a bad body can
//! never leave half-applied state behind.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::{
    TransportError,
    types::{PlayState, PlaylistEntry, TrackId},
};

/// Name of the top-level playlist node holding the user-visible items.
const PLAYLIST_CONTAINER: &str = "Playlist";

/// One parsed status poll.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusSnapshot {
    /// Player version, if reported
    pub version: Option<String>,
    /// Transport state
    pub play_state: PlayState,
    /// Repeat current item
    pub repeat: bool,
    /// Loop playlist
    pub loop_enabled: bool,
    /// Random order
    pub shuffle: bool,
    /// Fullscreen video
    pub fullscreen: bool,
    /// Current playlist item id, negative or below 2 when nothing is selected
    pub current_plid: i64,
    /// Track length in seconds
    pub length_seconds: f64,
    /// Position fraction, clamped to 0..=1
    pub position: f64,
    /// Elapsed seconds
    pub elapsed_seconds: f64,
}

#[derive(Deserialize)]
struct RawStatus {
    #[serde(default)]
    version: Option<String>,
    state: String,
    #[serde(default, deserialize_with = "truthy")]
    repeat: bool,
    #[serde(default, rename = "loop", deserialize_with = "truthy")]
    loop_enabled: bool,
    #[serde(default, deserialize_with = "truthy")]
    random: bool,
    #[serde(default, deserialize_with = "truthy")]
    fullscreen: bool,
    currentplid: Value,
    #[serde(default)]
    length: Option<f64>,
    #[serde(default)]
    position: Option<f64>,
    #[serde(default)]
    time: Option<f64>,
}

impl StatusSnapshot {
    /// Parses a status body.
    ///
    /// # Errors
    /// Returns `MalformedResponse` for invalid JSON, an unknown `state`, or a
    /// missing or non-numeric `currentplid`.
    pub fn parse(body: &[u8]) -> Result<Self, TransportError> {
        let raw: RawStatus = serde_json::from_slice(body).map_err(TransportError::malformed)?;

        let play_state = PlayState::parse(&raw.state).ok_or_else(|| {
            TransportError::MalformedResponse(format!("unknown player state '{}'", raw.state))
        })?;

        let current_plid = integer_id(&raw.currentplid).ok_or_else(|| {
            TransportError::MalformedResponse(format!("invalid currentplid {}", raw.currentplid))
        })?;

        Ok(Self {
            version: raw.version,
            play_state,
            repeat: raw.repeat,
            loop_enabled: raw.loop_enabled,
            shuffle: raw.random,
            fullscreen: raw.fullscreen,
            current_plid,
            length_seconds: raw.length.unwrap_or(0.0).max(0.0),
            position: raw.position.unwrap_or(0.0).clamp(0.0, 1.0),
            elapsed_seconds: raw.time.unwrap_or(0.0).max(0.0),
        })
    }
}

/// One parsed playlist poll.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaylistSnapshot {
    /// Entries of the user-visible playlist, or `None` when the player did
    /// not expose a playlist container at all.
    pub entries: Option<Vec<PlaylistEntry>>,
}

#[derive(Deserialize)]
struct RawNode {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    duration: Option<f64>,
    #[serde(default)]
    uri: Option<String>,
    #[serde(default)]
    children: Option<Vec<RawNode>>,
}

impl PlaylistSnapshot {
    /// Parses a playlist tree and extracts the "Playlist" container.
    ///
    /// Media library items and any other top-level nodes are ignored.
    ///
    /// # Errors
    /// Returns `MalformedResponse` for invalid JSON or an entry without a usable id.
    pub fn parse(body: &[u8]) -> Result<Self, TransportError> {
        let root: RawNode = serde_json::from_slice(body).map_err(TransportError::malformed)?;

        let container = root
            .children
            .unwrap_or_default()
            .into_iter()
            .find(|node| node.name.as_deref() == Some(PLAYLIST_CONTAINER));

        let Some(container) = container else {
            return Ok(Self { entries: None });
        };

        let entries = container
            .children
            .unwrap_or_default()
            .into_iter()
            .map(PlaylistEntry::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            entries: Some(entries),
        })
    }
}

impl TryFrom<RawNode> for PlaylistEntry {
    type Error = TransportError;

    fn try_from(node: RawNode) -> Result<Self, Self::Error> {
        let id = node
            .id
            .as_ref()
            .and_then(string_id)
            .ok_or_else(|| TransportError::MalformedResponse("playlist entry without id".into()))?;

        Ok(PlaylistEntry {
            id,
            name: node.name.unwrap_or_default(),
            duration_seconds: node.duration.map_or(-1, |d| d as i64),
            uri: node.uri.unwrap_or_default(),
        })
    }
}

fn string_id(value: &Value) -> Option<TrackId> {
    match value {
        Value::String(id) if !id.is_empty() => Some(TrackId::new(id.clone())),
        Value::Number(_) => integer_id(value).map(TrackId::from),
        _ => None,
    }
}

fn integer_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Accepts booleans the way the player emits them across versions:
/// JSON booleans, 0/1 numbers, or strings.
fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !matches!(s.as_str(), "" | "0" | "false"),
        Value::Null => false,
        Value::Array(_) | Value::Object(_) => true,
    })
}
