//! BlueZ Device1 interface.

use zbus::{proxy, zvariant::OwnedObjectPath};

/// Remote Bluetooth device known to an adapter.
#[proxy(interface = "org.bluez.Device1", default_service = "org.bluez")]
pub trait Device1 {
    /// Connect all auto-connectable profiles.
    fn connect(&self) -> zbus::Result<()>;

    /// Disconnect all profiles and the link.
    fn disconnect(&self) -> zbus::Result<()>;

    /// Initiate pairing.
    fn pair(&self) -> zbus::Result<()>;

    /// Cancel an in-progress pairing.
    fn cancel_pairing(&self) -> zbus::Result<()>;

    /// Device Bluetooth address.
    #[zbus(property)]
    fn address(&self) -> zbus::Result<String>;

    /// Remote name, absent for devices that never advertised one.
    #[zbus(property)]
    fn name(&self) -> zbus::Result<String>;

    /// User-friendly name, falls back to the address.
    #[zbus(property)]
    fn alias(&self) -> zbus::Result<String>;

    /// Whether the device is connected.
    #[zbus(property)]
    fn connected(&self) -> zbus::Result<bool>;

    /// Whether the device is paired.
    #[zbus(property)]
    fn paired(&self) -> zbus::Result<bool>;

    /// Whether the device is trusted.
    #[zbus(property)]
    fn trusted(&self) -> zbus::Result<bool>;

    #[zbus(property)]
    fn set_trusted(&self, trusted: bool) -> zbus::Result<()>;

    /// Whether GATT service discovery has completed.
    #[zbus(property)]
    fn services_resolved(&self) -> zbus::Result<bool>;

    /// Advertised or resolved service UUIDs.
    #[zbus(property, name = "UUIDs")]
    fn uuids(&self) -> zbus::Result<Vec<String>>;

    /// Signal strength from the last inquiry or advertisement.
    #[zbus(property, name = "RSSI")]
    fn rssi(&self) -> zbus::Result<i16>;

    /// Adapter the device belongs to.
    #[zbus(property)]
    fn adapter(&self) -> zbus::Result<OwnedObjectPath>;
}
