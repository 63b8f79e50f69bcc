//! BlueZ D-Bus proxy definitions.
//!
//! Type-safe proxies for the BlueZ interfaces the helpers operate on, plus the
//! object manager used for discovery.

#![allow(missing_docs)]
pub mod adapter;
pub mod device;
pub mod gatt;
pub mod object_manager;

pub use adapter::{Adapter1Proxy, Adapter1ProxyBlocking};
pub use device::{Device1Proxy, Device1ProxyBlocking};
pub use gatt::{
    GattCharacteristic1Proxy, GattCharacteristic1ProxyBlocking, GattDescriptor1Proxy,
    GattDescriptor1ProxyBlocking, GattService1Proxy, GattService1ProxyBlocking,
};
pub use object_manager::{
    InterfacesAdded, InterfacesAddedArgs, InterfacesAddedStream, InterfacesRemoved,
    InterfacesRemovedArgs, InterfacesRemovedStream, ManagedObjects, ObjectManagerProxy,
    ObjectManagerProxyBlocking,
};
