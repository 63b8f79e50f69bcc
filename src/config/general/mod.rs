mod log_level;

pub use log_level::LogLevel;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Settings that are not specific to BlueZ.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
pub struct GeneralConfig {
    /// Logging level, overridden by `RUST_LOG` when set.
    #[serde(default)]
    pub log_level: LogLevel,
}
