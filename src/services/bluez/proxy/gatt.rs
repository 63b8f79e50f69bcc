//! BlueZ GATT interfaces.

use std::collections::HashMap;

use zbus::{
    proxy,
    zvariant::{OwnedObjectPath, Value},
};

/// GATT service exported by a remote device.
#[proxy(interface = "org.bluez.GattService1", default_service = "org.bluez")]
pub trait GattService1 {
    /// 128-bit service UUID.
    #[zbus(property, name = "UUID")]
    fn uuid(&self) -> zbus::Result<String>;

    /// Whether this is a primary service.
    #[zbus(property)]
    fn primary(&self) -> zbus::Result<bool>;

    /// Device the service belongs to.
    #[zbus(property)]
    fn device(&self) -> zbus::Result<OwnedObjectPath>;
}

/// GATT characteristic of a service.
#[proxy(
    interface = "org.bluez.GattCharacteristic1",
    default_service = "org.bluez"
)]
pub trait GattCharacteristic1 {
    /// Issue a read request and return the value.
    fn read_value(&self, options: HashMap<&str, Value<'_>>) -> zbus::Result<Vec<u8>>;

    /// Issue a write request.
    fn write_value(&self, value: &[u8], options: HashMap<&str, Value<'_>>) -> zbus::Result<()>;

    /// Start emitting `Value` change notifications.
    fn start_notify(&self) -> zbus::Result<()>;

    /// Stop emitting `Value` change notifications.
    fn stop_notify(&self) -> zbus::Result<()>;

    /// 128-bit characteristic UUID.
    #[zbus(property, name = "UUID")]
    fn uuid(&self) -> zbus::Result<String>;

    /// Service the characteristic belongs to.
    #[zbus(property)]
    fn service(&self) -> zbus::Result<OwnedObjectPath>;

    /// Cached value, updated on reads and notifications.
    #[zbus(property)]
    fn value(&self) -> zbus::Result<Vec<u8>>;

    /// Whether notifications are enabled.
    #[zbus(property)]
    fn notifying(&self) -> zbus::Result<bool>;

    /// Characteristic properties such as `read`, `write`, `notify`.
    #[zbus(property)]
    fn flags(&self) -> zbus::Result<Vec<String>>;
}

/// GATT descriptor of a characteristic.
#[proxy(interface = "org.bluez.GattDescriptor1", default_service = "org.bluez")]
pub trait GattDescriptor1 {
    /// Issue a read request and return the value.
    fn read_value(&self, options: HashMap<&str, Value<'_>>) -> zbus::Result<Vec<u8>>;

    /// 128-bit descriptor UUID.
    #[zbus(property, name = "UUID")]
    fn uuid(&self) -> zbus::Result<String>;

    /// Characteristic the descriptor belongs to.
    #[zbus(property)]
    fn characteristic(&self) -> zbus::Result<OwnedObjectPath>;
}
