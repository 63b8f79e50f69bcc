use std::time::Duration;

use tracing::{info, instrument};
use zbus::{Connection, zvariant::OwnedObjectPath};

use super::{
    BluezError, BluezObject, Subscription, discovery::BluezDiscovery, monitoring,
    proxy::Adapter1Proxy, wait::ConfiguredWait,
};
use crate::config::BluezConfig;

/// Entry point to the BlueZ helpers.
///
/// Holds the bus connection every proxy it hands out is bound to, so the whole
/// program can share a single connection without a global.
#[derive(Debug, Clone)]
pub struct Bluez {
    connection: Connection,
    config: BluezConfig,
}

impl Bluez {
    /// Connect to the system bus with default settings.
    ///
    /// # Errors
    /// Returns error if the system bus is unreachable.
    #[instrument]
    pub async fn system() -> Result<Self, BluezError> {
        let connection = Connection::system().await?;
        info!("Connected to system bus");
        Ok(Self::new(connection))
    }

    /// Use an existing connection.
    pub fn new(connection: Connection) -> Self {
        Self {
            connection,
            config: BluezConfig::default(),
        }
    }

    /// Replace the timing settings.
    pub fn with_config(mut self, config: BluezConfig) -> Self {
        self.config = config;
        self
    }

    /// The shared bus connection.
    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Timing settings in use.
    pub fn config(&self) -> &BluezConfig {
        &self.config
    }

    /// Default timeout for characteristic reads.
    pub fn read_timeout(&self) -> Duration {
        self.config.read_timeout()
    }

    /// Default timeout for property waits.
    pub fn property_timeout(&self) -> Duration {
        self.config.property_timeout()
    }

    /// Property wait strategy selected by the configuration.
    pub fn wait_strategy(&self) -> ConfiguredWait {
        ConfiguredWait::new(&self.config, &self.connection)
    }

    /// Every Bluetooth controller BlueZ manages.
    ///
    /// # Errors
    /// Returns error if the managed objects cannot be fetched.
    pub async fn adapters(&self) -> Result<Vec<Adapter1Proxy<'static>>, BluezError> {
        BluezDiscovery::proxies(&self.connection, None).await
    }

    /// The controller named `name` (`hci0`) or at path `name`.
    ///
    /// # Errors
    /// Returns error if the managed objects cannot be fetched.
    pub async fn adapter(&self, name: &str) -> Result<Option<Adapter1Proxy<'static>>, BluezError> {
        let adapters = self.adapters().await?;

        Ok(adapters.into_iter().find(|adapter| {
            let path = adapter.object_path().as_str();
            path == name || path.rsplit('/').next() == Some(name)
        }))
    }

    /// Handle for the `P` object at `path`, without checking it exists.
    ///
    /// # Errors
    /// Returns error if `path` is not a valid object path.
    pub async fn object<P: BluezObject>(&self, path: &str) -> Result<P, BluezError> {
        let path = OwnedObjectPath::try_from(path).map_err(zbus::Error::from)?;
        Ok(P::materialize(&self.connection, path).await?)
    }

    /// Calls `handler` for every `P` added anywhere on the bus.
    ///
    /// # Errors
    /// Returns error if the signal subscription fails.
    pub async fn watch_added<P, F>(&self, handler: F) -> Result<Subscription, BluezError>
    where
        P: BluezObject,
        F: FnMut(P) + Send + 'static,
    {
        monitoring::watch_added(&self.connection, None, handler).await
    }

    /// Calls `handler` for every `P` removed anywhere on the bus.
    ///
    /// # Errors
    /// Returns error if the signal subscription fails.
    pub async fn watch_removed<P, F>(&self, handler: F) -> Result<Subscription, BluezError>
    where
        P: BluezObject,
        F: FnMut(P) + Send + 'static,
    {
        monitoring::watch_removed(&self.connection, None, handler).await
    }
}
