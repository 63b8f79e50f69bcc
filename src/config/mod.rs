//! Configuration schema, file locations and loading.
//!
//! Everything has a default, so a missing or partial `config.toml` is valid.

mod bluez;
mod general;
mod loading;
mod paths;

#[cfg(test)]
mod tests;

pub use bluez::{BluezConfig, WaitStrategyKind};
pub use general::{GeneralConfig, LogLevel};
pub use paths::ConfigPaths;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// BlueZ timing settings.
    #[serde(default)]
    pub bluez: BluezConfig,
}
