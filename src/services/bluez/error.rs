use std::time::Duration;

/// Errors raised by the BlueZ helpers.
///
/// Timeouts are reported by this layer; every other failure is the
/// collaborator's error passed through untouched.
#[derive(thiserror::Error, Debug)]
pub enum BluezError {
    /// A read did not complete within the allotted time
    #[error("Timed out after {timeout:?} waiting to read characteristic value")]
    ReadTimeout {
        /// Time allowed for the read
        timeout: Duration,
    },

    /// A property never reached the expected value
    #[error(
        "Timed out waiting for {interface} ({path}) \"{property}\" property to equal '{expected}'"
    )]
    PropertyTimeout {
        /// Interface owning the property
        interface: String,
        /// Object path of the watched object
        path: String,
        /// Property being waited on
        property: String,
        /// Expected value, rendered with `Debug`
        expected: String,
    },

    /// D-Bus communication error
    #[error("D-Bus operation failed: {0}")]
    DbusError(#[from] zbus::Error),

    /// Event subscription ended without an error of its own
    #[error("Subscription to {0} closed")]
    SubscriptionClosed(String),
}

impl BluezError {
    /// Whether this error is one of the timeouts raised by this layer.
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            BluezError::ReadTimeout { .. } | BluezError::PropertyTimeout { .. }
        )
    }
}
