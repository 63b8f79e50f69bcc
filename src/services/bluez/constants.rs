//! Well-known BlueZ bus name, object paths and interface names.

/// Bus name owned by the BlueZ daemon on the system bus.
pub const BLUEZ_SERVICE: &str = "org.bluez";

/// Object path where BlueZ exposes `org.freedesktop.DBus.ObjectManager`.
pub const OBJECT_MANAGER_PATH: &str = "/";

/// Bluetooth controller interface (`/org/bluez/hciN`).
pub const ADAPTER_INTERFACE: &str = "org.bluez.Adapter1";

/// Remote device interface (`/org/bluez/hciN/dev_XX_XX_XX_XX_XX_XX`).
pub const DEVICE_INTERFACE: &str = "org.bluez.Device1";

/// GATT service interface, children of a device.
pub const GATT_SERVICE_INTERFACE: &str = "org.bluez.GattService1";

/// GATT characteristic interface, children of a service.
pub const GATT_CHARACTERISTIC_INTERFACE: &str = "org.bluez.GattCharacteristic1";

/// GATT descriptor interface, children of a characteristic.
pub const GATT_DESCRIPTOR_INTERFACE: &str = "org.bluez.GattDescriptor1";
