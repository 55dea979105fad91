use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Polling cadences and request limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct PollingConfig {
    /// Interval between playlist fetches, in milliseconds.
    pub playlist_interval_ms: u64,

    /// Interval between playback ticks, in milliseconds.
    pub playback_interval_ms: u64,

    /// Outside high-resolution playback, only every Nth playback tick hits the network.
    pub throttle_divisor: u64,

    /// Upper bound for a single HTTP request, in milliseconds.
    pub request_timeout_ms: u64,

    /// How a new playlist snapshot is compared against the cached one.
    pub playlist_change_detection: ChangeDetection,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            playlist_interval_ms: 500,
            playback_interval_ms: 100,
            throttle_divisor: 5,
            request_timeout_ms: 5000,
            playlist_change_detection: ChangeDetection::Heuristic,
        }
    }
}

/// Playlist change detection policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChangeDetection {
    /// Length, emptiness and first identifier only. Misses reorders behind the first entry.
    #[default]
    Heuristic,
    /// Full identifier sequence equality.
    Strict,
}

impl PollingConfig {
    /// Playlist tick period.
    pub fn playlist_interval(&self) -> Duration {
        Duration::from_millis(self.playlist_interval_ms)
    }

    /// Playback tick period.
    pub fn playback_interval(&self) -> Duration {
        Duration::from_millis(self.playback_interval_ms)
    }

    /// Per-request timeout handed to the HTTP client.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub(super) fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("playlist_interval_ms", self.playlist_interval_ms),
            ("playback_interval_ms", self.playback_interval_ms),
            ("throttle_divisor", self.throttle_divisor),
            ("request_timeout_ms", self.request_timeout_ms),
        ];

        for (field, value) in fields {
            if value == 0 {
                return Err(ConfigError::invalid_field(
                    "polling",
                    field,
                    "must be greater than zero",
                ));
            }
        }

        Ok(())
    }
}
