/// Well-known bus and interface names
pub mod constants;
/// Managed object enumeration
mod discovery;
/// BlueZ helper errors
mod error;
/// Extension traits on the BlueZ proxies
mod extensions;
/// Root scope and interface matching
pub mod filter;
/// Added/removed event delivery
mod monitoring;
/// Proxy materialization
mod object;
/// D-Bus proxy implementations for BlueZ interfaces.
mod proxy;
/// High-level entry point
mod service;
/// Bounded reads and property waits
pub mod wait;

pub use error::BluezError;
pub use extensions::{
    AdapterExt, BluezObjectExt, DeviceExt, GattCharacteristicExt, GattServiceExt,
};
pub use filter::{InterfaceSet, is_match, matching_paths};
pub use monitoring::Subscription;
pub use object::{BluezObject, Identified};
pub use proxy::*;
pub use service::Bluez;
pub use wait::{
    ConfiguredWait, PollingWait, SignalWait, WaitStrategy, WatchedProperty, read_with_timeout,
};

/// First of `candidates` whose UUID equals `uuid` exactly.
///
/// Candidates are read one at a time and the search stops at the first match.
/// Absence is `Ok(None)`, not an error.
///
/// # Errors
/// Returns the first UUID read failure.
pub async fn find_by_uuid<P: Identified>(
    candidates: Vec<P>,
    uuid: &str,
) -> Result<Option<P>, BluezError> {
    discovery::BluezDiscovery::find_by_uuid(candidates, uuid).await
}
