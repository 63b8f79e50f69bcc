//! Discovery and wait helpers as methods on the BlueZ proxies.

use std::{collections::HashMap, fmt::Debug, future::Future, time::Duration};

use async_trait::async_trait;
use zbus::zvariant::{OwnedObjectPath, OwnedValue};

use super::{
    BluezError, BluezObject, Subscription,
    discovery::BluezDiscovery,
    monitoring,
    proxy::{
        Adapter1Proxy, Device1Proxy, GattCharacteristic1Proxy, GattDescriptor1Proxy,
        GattService1Proxy,
    },
    wait::{PollingWait, WaitStrategy, WatchedProperty, read_with_timeout},
};

/// Device enumeration and device events for an adapter.
#[async_trait]
pub trait AdapterExt {
    /// Devices known to this adapter.
    ///
    /// # Errors
    /// Returns error if the managed objects cannot be fetched.
    async fn devices(&self) -> Result<Vec<Device1Proxy<'static>>, BluezError>;

    /// Calls `handler` for each device added under this adapter.
    ///
    /// # Errors
    /// Returns error if the signal subscription fails.
    async fn watch_devices_added<F>(&self, handler: F) -> Result<Subscription, BluezError>
    where
        F: FnMut(Device1Proxy<'static>) + Send + 'static;

    /// Calls `handler` for each device removed from this adapter.
    ///
    /// # Errors
    /// Returns error if the signal subscription fails.
    async fn watch_devices_removed<F>(&self, handler: F) -> Result<Subscription, BluezError>
    where
        F: FnMut(Device1Proxy<'static>) + Send + 'static;
}

#[async_trait]
impl AdapterExt for Adapter1Proxy<'static> {
    async fn devices(&self) -> Result<Vec<Device1Proxy<'static>>, BluezError> {
        BluezDiscovery::proxies(self.connection(), Some(self.object_path())).await
    }

    async fn watch_devices_added<F>(&self, handler: F) -> Result<Subscription, BluezError>
    where
        F: FnMut(Device1Proxy<'static>) + Send + 'static,
    {
        monitoring::watch_added(self.connection(), Some(owned_path(self)), handler).await
    }

    async fn watch_devices_removed<F>(&self, handler: F) -> Result<Subscription, BluezError>
    where
        F: FnMut(Device1Proxy<'static>) + Send + 'static,
    {
        monitoring::watch_removed(self.connection(), Some(owned_path(self)), handler).await
    }
}

/// GATT service lookup on a device.
#[async_trait]
pub trait DeviceExt {
    /// GATT services resolved for this device.
    ///
    /// # Errors
    /// Returns error if the managed objects cannot be fetched.
    async fn services(&self) -> Result<Vec<GattService1Proxy<'static>>, BluezError>;

    /// The service with UUID `uuid`, or `None` if the device has none.
    ///
    /// # Errors
    /// Returns error if enumeration or a UUID read fails.
    async fn service(&self, uuid: &str) -> Result<Option<GattService1Proxy<'static>>, BluezError>;
}

#[async_trait]
impl DeviceExt for Device1Proxy<'static> {
    async fn services(&self) -> Result<Vec<GattService1Proxy<'static>>, BluezError> {
        BluezDiscovery::proxies(self.connection(), Some(self.object_path())).await
    }

    async fn service(&self, uuid: &str) -> Result<Option<GattService1Proxy<'static>>, BluezError> {
        BluezDiscovery::find_by_uuid(self.services().await?, uuid).await
    }
}

/// Characteristic lookup on a GATT service.
#[async_trait]
pub trait GattServiceExt {
    /// Characteristics of this service.
    ///
    /// # Errors
    /// Returns error if the managed objects cannot be fetched.
    async fn characteristics(&self)
    -> Result<Vec<GattCharacteristic1Proxy<'static>>, BluezError>;

    /// The characteristic with UUID `uuid`, or `None` if absent.
    ///
    /// # Errors
    /// Returns error if enumeration or a UUID read fails.
    async fn characteristic(
        &self,
        uuid: &str,
    ) -> Result<Option<GattCharacteristic1Proxy<'static>>, BluezError>;
}

#[async_trait]
impl GattServiceExt for GattService1Proxy<'static> {
    async fn characteristics(
        &self,
    ) -> Result<Vec<GattCharacteristic1Proxy<'static>>, BluezError> {
        BluezDiscovery::proxies(self.connection(), Some(self.object_path())).await
    }

    async fn characteristic(
        &self,
        uuid: &str,
    ) -> Result<Option<GattCharacteristic1Proxy<'static>>, BluezError> {
        BluezDiscovery::find_by_uuid(self.characteristics().await?, uuid).await
    }
}

/// Bounded reads and descriptor lookup on a characteristic.
#[async_trait]
pub trait GattCharacteristicExt {
    /// Reads the value, failing with [`BluezError::ReadTimeout`] after `timeout`.
    ///
    /// # Errors
    /// Returns [`BluezError::ReadTimeout`] when the read is slower than
    /// `timeout`, or the read's own error.
    async fn read_value_with_timeout(&self, timeout: Duration) -> Result<Vec<u8>, BluezError>;

    /// Descriptors of this characteristic.
    ///
    /// # Errors
    /// Returns error if the managed objects cannot be fetched.
    async fn descriptors(&self) -> Result<Vec<GattDescriptor1Proxy<'static>>, BluezError>;

    /// The descriptor with UUID `uuid`, or `None` if absent.
    ///
    /// # Errors
    /// Returns error if enumeration or a UUID read fails.
    async fn descriptor(
        &self,
        uuid: &str,
    ) -> Result<Option<GattDescriptor1Proxy<'static>>, BluezError>;
}

#[async_trait]
impl GattCharacteristicExt for GattCharacteristic1Proxy<'static> {
    async fn read_value_with_timeout(&self, timeout: Duration) -> Result<Vec<u8>, BluezError> {
        read_with_timeout(self.read_value(HashMap::new()), timeout).await
    }

    async fn descriptors(&self) -> Result<Vec<GattDescriptor1Proxy<'static>>, BluezError> {
        BluezDiscovery::proxies(self.connection(), Some(self.object_path())).await
    }

    async fn descriptor(
        &self,
        uuid: &str,
    ) -> Result<Option<GattDescriptor1Proxy<'static>>, BluezError> {
        BluezDiscovery::find_by_uuid(self.descriptors().await?, uuid).await
    }
}

/// Property waits on any BlueZ object.
#[async_trait]
pub trait BluezObjectExt: BluezObject {
    /// Waits until `read` returns `expected`, polling every 50 ms.
    ///
    /// `property` is the D-Bus property name and only labels the timeout error.
    ///
    /// # Errors
    /// Returns [`BluezError::PropertyTimeout`] once `timeout` has passed
    /// without a match, or any error from `read`.
    async fn wait_for_property_value<T, F, Fut>(
        &self,
        property: &str,
        read: F,
        expected: T,
        timeout: Duration,
    ) -> Result<(), BluezError>
    where
        T: PartialEq + Debug + TryFrom<OwnedValue> + Send + Sync,
        F: FnMut() -> Fut + Send,
        Fut: Future<Output = zbus::Result<T>> + Send,
    {
        let strategy = PollingWait::default();
        self.wait_for_property_value_with(&strategy, property, read, expected, timeout)
            .await
    }

    /// Like [`BluezObjectExt::wait_for_property_value`] with a chosen strategy.
    ///
    /// # Errors
    /// Returns [`BluezError::PropertyTimeout`] once `timeout` has passed
    /// without a match, or any error from `read`.
    async fn wait_for_property_value_with<S, T, F, Fut>(
        &self,
        strategy: &S,
        property: &str,
        read: F,
        expected: T,
        timeout: Duration,
    ) -> Result<(), BluezError>
    where
        S: WaitStrategy,
        T: PartialEq + Debug + TryFrom<OwnedValue> + Send + Sync,
        F: FnMut() -> Fut + Send,
        Fut: Future<Output = zbus::Result<T>> + Send,
    {
        let target = WatchedProperty {
            path: self.object_path(),
            interface: Self::INTERFACE,
            property,
        };

        strategy.wait_for(&target, read, &expected, timeout).await
    }
}

impl<O: BluezObject> BluezObjectExt for O {}

fn owned_path<O: BluezObject>(object: &O) -> OwnedObjectPath {
    OwnedObjectPath::from(object.object_path().clone())
}
