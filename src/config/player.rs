use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Where the VLC HTTP interface listens and how to authenticate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct PlayerConfig {
    /// Host name or IP address of the machine running VLC. Empty disables the bridge.
    pub host: String,

    /// Port of the VLC HTTP interface.
    pub port: u16,

    /// HTTP password set in VLC's Lua HTTP preferences. Sent with an empty user name.
    pub password: String,

    /// Poll playback every tick while the player is not stopped, instead of every Nth tick.
    pub high_resolution: bool,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            password: String::new(),
            high_resolution: false,
        }
    }
}

impl PlayerConfig {
    /// Whether a host has been set at all.
    pub fn is_configured(&self) -> bool {
        !self.host.trim().is_empty() && self.port != 0
    }

    /// Base URL of the HTTP interface, e.g. `http://127.0.0.1:8080`.
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host.trim(), self.port)
    }

    /// Human-readable `host:port` used in log lines.
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.host.trim(), self.port)
    }
}
