use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Presentation settings for published variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Default)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    /// Show the last five seconds of a track as `S.D` instead of rounding up to whole seconds.
    pub use_tenths: bool,
}
