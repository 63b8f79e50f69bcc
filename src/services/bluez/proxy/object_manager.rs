//! Object manager exported by BlueZ.

use std::collections::HashMap;

use zbus::{
    proxy,
    zvariant::{OwnedObjectPath, OwnedValue},
};

/// Snapshot of every object BlueZ manages.
///
/// Object path → interface name → property name → value.
pub type ManagedObjects = HashMap<OwnedObjectPath, HashMap<String, HashMap<String, OwnedValue>>>;

/// `org.freedesktop.DBus.ObjectManager` on the BlueZ service.
#[proxy(
    interface = "org.freedesktop.DBus.ObjectManager",
    default_service = "org.bluez"
)]
pub trait ObjectManager {
    /// All managed objects with their interfaces and properties.
    fn get_managed_objects(&self) -> zbus::Result<ManagedObjects>;

    /// Interfaces appeared on an object, with their properties.
    #[zbus(signal)]
    fn interfaces_added(
        &self,
        object_path: OwnedObjectPath,
        interfaces: HashMap<String, HashMap<String, OwnedValue>>,
    ) -> zbus::Result<()>;

    /// Interfaces were removed from an object, names only.
    #[zbus(signal)]
    fn interfaces_removed(
        &self,
        object_path: OwnedObjectPath,
        interfaces: Vec<String>,
    ) -> zbus::Result<()>;
}
