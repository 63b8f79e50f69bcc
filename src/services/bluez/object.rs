//! Proxy materialization for BlueZ objects.

use async_trait::async_trait;
use zbus::{
    Connection,
    proxy::CacheProperties,
    zvariant::{ObjectPath, OwnedObjectPath},
};

use super::{
    constants::{
        ADAPTER_INTERFACE, DEVICE_INTERFACE, GATT_CHARACTERISTIC_INTERFACE,
        GATT_DESCRIPTOR_INTERFACE, GATT_SERVICE_INTERFACE,
    },
    proxy::{
        Adapter1Proxy, Device1Proxy, GattCharacteristic1Proxy, GattDescriptor1Proxy,
        GattService1Proxy,
    },
};

/// A typed handle to a BlueZ object implementing one known interface.
///
/// Materializing a handle is a local operation: properties are never cached,
/// so no call is made to the bus until a method or property is used.
#[async_trait]
pub trait BluezObject: Sized + Send + Sync + 'static {
    /// D-Bus interface the handle speaks.
    const INTERFACE: &'static str;

    /// Build a handle for the object at `path`.
    ///
    /// # Errors
    /// Returns error if `path` cannot be used as a proxy path.
    async fn materialize(connection: &Connection, path: OwnedObjectPath) -> zbus::Result<Self>;

    /// Path of the object this handle is bound to.
    fn object_path(&self) -> &ObjectPath<'_>;

    /// Connection the handle issues calls on.
    fn connection(&self) -> &Connection;
}

/// An object carrying a `UUID` property.
#[async_trait]
pub trait Identified: Send + Sync {
    /// Reads the object's UUID.
    ///
    /// # Errors
    /// Returns error if the property read fails.
    async fn identifier(&self) -> zbus::Result<String>;
}

macro_rules! impl_bluez_object {
    ($proxy:ident, $interface:expr) => {
        #[async_trait]
        impl BluezObject for $proxy<'static> {
            const INTERFACE: &'static str = $interface;

            async fn materialize(
                connection: &Connection,
                path: OwnedObjectPath,
            ) -> zbus::Result<Self> {
                $proxy::builder(connection)
                    .path(path)?
                    .cache_properties(CacheProperties::No)
                    .build()
                    .await
            }

            fn object_path(&self) -> &ObjectPath<'_> {
                self.inner().path()
            }

            fn connection(&self) -> &Connection {
                self.inner().connection()
            }
        }
    };
    ($proxy:ident, $interface:expr, identified) => {
        impl_bluez_object!($proxy, $interface);

        #[async_trait]
        impl Identified for $proxy<'static> {
            async fn identifier(&self) -> zbus::Result<String> {
                self.uuid().await
            }
        }
    };
}

impl_bluez_object!(Adapter1Proxy, ADAPTER_INTERFACE);
impl_bluez_object!(Device1Proxy, DEVICE_INTERFACE);
impl_bluez_object!(GattService1Proxy, GATT_SERVICE_INTERFACE, identified);
impl_bluez_object!(GattCharacteristic1Proxy, GATT_CHARACTERISTIC_INTERFACE, identified);
impl_bluez_object!(GattDescriptor1Proxy, GATT_DESCRIPTOR_INTERFACE, identified);
