//! BlueZ Adapter1 interface.

use zbus::{proxy, zvariant::ObjectPath};

/// Bluetooth controller.
///
/// Lives at `/org/bluez/hciN` and parents every device it has seen.
#[proxy(interface = "org.bluez.Adapter1", default_service = "org.bluez")]
pub trait Adapter1 {
    /// Start device discovery.
    fn start_discovery(&self) -> zbus::Result<()>;

    /// Stop device discovery started by this client.
    fn stop_discovery(&self) -> zbus::Result<()>;

    /// Remove a remote device and its pairing information.
    fn remove_device(&self, device: &ObjectPath<'_>) -> zbus::Result<()>;

    /// Controller Bluetooth address.
    #[zbus(property)]
    fn address(&self) -> zbus::Result<String>;

    /// System name of the controller.
    #[zbus(property)]
    fn name(&self) -> zbus::Result<String>;

    /// User-friendly name of the controller.
    #[zbus(property)]
    fn alias(&self) -> zbus::Result<String>;

    /// Whether the controller is powered.
    #[zbus(property)]
    fn powered(&self) -> zbus::Result<bool>;

    #[zbus(property)]
    fn set_powered(&self, powered: bool) -> zbus::Result<()>;

    /// Whether a discovery session is active.
    #[zbus(property)]
    fn discovering(&self) -> zbus::Result<bool>;

    /// Service UUIDs available on the controller.
    #[zbus(property, name = "UUIDs")]
    fn uuids(&self) -> zbus::Result<Vec<String>>;
}
