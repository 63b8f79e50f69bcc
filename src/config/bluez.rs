use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};

/// How property waits observe changes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum WaitStrategyKind {
    /// Re-read the property at `poll_interval_ms`.
    #[default]
    Poll,

    /// Wait for `PropertiesChanged` notifications.
    Signal,
}

/// Timing settings for BlueZ operations.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct BluezConfig {
    /// Milliseconds between reads when polling a property.
    pub poll_interval_ms: u64,

    /// Default timeout for characteristic reads, in milliseconds.
    pub read_timeout_ms: u64,

    /// Default timeout for property waits, in milliseconds.
    pub property_timeout_ms: u64,

    /// Strategy used for property waits.
    pub wait_strategy: WaitStrategyKind,
}

impl Default for BluezConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 50,
            read_timeout_ms: 5_000,
            property_timeout_ms: 10_000,
            wait_strategy: WaitStrategyKind::Poll,
        }
    }
}

impl BluezConfig {
    /// Interval between property reads.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Default characteristic read timeout.
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    /// Default property wait timeout.
    pub fn property_timeout(&self) -> Duration {
        Duration::from_millis(self.property_timeout_ms)
    }

    /// Rejects settings that would make waits spin.
    ///
    /// # Errors
    /// Returns [`Error::ConfigValidation`] if `poll_interval_ms` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.poll_interval_ms == 0 {
            return Err(Error::ConfigValidation {
                component: "bluez".to_string(),
                details: "poll_interval_ms must be greater than zero".to_string(),
            });
        }

        Ok(())
    }
}
