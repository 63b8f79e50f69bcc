//! Bounded reads and property waits.

use std::{collections::HashMap, fmt::Debug, future::Future, time::Duration};

use async_trait::async_trait;
use tokio::time::{Instant, sleep};
use tokio_stream::{Stream, StreamExt};
use tracing::{debug, instrument, warn};
use zbus::{
    Connection, fdo,
    proxy::CacheProperties,
    zvariant::{ObjectPath, OwnedValue},
};

use super::{BluezError, constants::BLUEZ_SERVICE};
use crate::config::{BluezConfig, WaitStrategyKind};

/// Default interval between reads of [`PollingWait`].
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Race `read` against a timer of `timeout`.
///
/// The read is polled before the timer, so a read that is already complete
/// wins even with a zero timeout. When the timer wins the read future is
/// dropped and its eventual reply discarded; the remote call itself is not
/// cancelled.
///
/// # Errors
/// Returns [`BluezError::ReadTimeout`] if the timer fires first, or the read's
/// own error if it fails first.
pub async fn read_with_timeout<T, F>(read: F, timeout: Duration) -> Result<T, BluezError>
where
    F: Future<Output = zbus::Result<T>>,
{
    match tokio::time::timeout(timeout, read).await {
        Ok(result) => result.map_err(BluezError::from),
        Err(_) => {
            debug!(?timeout, "read timed out");
            Err(BluezError::ReadTimeout { timeout })
        }
    }
}

/// Identifies the property a wait is observing.
#[derive(Debug, Clone, Copy)]
pub struct WatchedProperty<'a> {
    /// Object path of the owner
    pub path: &'a ObjectPath<'a>,
    /// Interface declaring the property
    pub interface: &'a str,
    /// D-Bus property name, e.g. `Connected`
    pub property: &'a str,
}

impl WatchedProperty<'_> {
    fn timeout_error<T: Debug>(&self, expected: &T) -> BluezError {
        BluezError::PropertyTimeout {
            interface: self.interface.to_string(),
            path: self.path.to_string(),
            property: self.property.to_string(),
            expected: format!("{expected:?}"),
        }
    }

    /// Runs `wait` under a single deadline of `timeout`.
    async fn bounded<T, W>(
        &self,
        expected: &T,
        timeout: Duration,
        wait: W,
    ) -> Result<(), BluezError>
    where
        T: Debug,
        W: Future<Output = Result<(), BluezError>>,
    {
        match tokio::time::timeout(timeout, wait).await {
            Ok(result) => result,
            Err(_) => {
                debug!(?timeout, "property wait timed out");
                Err(self.timeout_error(expected))
            }
        }
    }
}

/// How a property wait observes convergence.
///
/// Callers hand over a read function and the expected value; strategies decide
/// when to call it. Read failures are returned unchanged.
#[async_trait]
pub trait WaitStrategy: Send + Sync {
    /// Resolves once `read` yields `expected`, or fails after `timeout`.
    ///
    /// # Errors
    /// Returns [`BluezError::PropertyTimeout`] naming the object, property and
    /// expected value when the deadline passes, or any error from `read`.
    async fn wait_for<T, F, Fut>(
        &self,
        target: &WatchedProperty<'_>,
        read: F,
        expected: &T,
        timeout: Duration,
    ) -> Result<(), BluezError>
    where
        T: PartialEq + Debug + TryFrom<OwnedValue> + Send + Sync,
        F: FnMut() -> Fut + Send,
        Fut: Future<Output = zbus::Result<T>> + Send;
}

/// Reads the property at a fixed interval until it matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollingWait {
    interval: Duration,
}

impl PollingWait {
    /// Poll every `interval`.
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// Time slept before each read.
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Default for PollingWait {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_INTERVAL)
    }
}

#[async_trait]
impl WaitStrategy for PollingWait {
    #[instrument(skip_all, fields(path = %target.path, property = target.property))]
    async fn wait_for<T, F, Fut>(
        &self,
        target: &WatchedProperty<'_>,
        mut read: F,
        expected: &T,
        timeout: Duration,
    ) -> Result<(), BluezError>
    where
        T: PartialEq + Debug + TryFrom<OwnedValue> + Send + Sync,
        F: FnMut() -> Fut + Send,
        Fut: Future<Output = zbus::Result<T>> + Send,
    {
        let started = Instant::now();

        while started.elapsed() <= timeout {
            sleep(self.interval).await;

            if read().await? == *expected {
                debug!(elapsed = ?started.elapsed(), "property reached expected value");
                return Ok(());
            }
        }

        Err(target.timeout_error(expected))
    }
}

/// Waits on `PropertiesChanged` notifications instead of polling.
///
/// Subscribes before taking one initial read so no change between the read and
/// the subscription is missed. Invalidated properties are re-read through
/// `read`. Subscription setup and the initial read count against the timeout.
#[derive(Debug, Clone)]
pub struct SignalWait {
    connection: Connection,
}

impl SignalWait {
    /// Listen for notifications on `connection`.
    pub fn new(connection: Connection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl WaitStrategy for SignalWait {
    #[instrument(skip_all, fields(path = %target.path, property = target.property))]
    async fn wait_for<T, F, Fut>(
        &self,
        target: &WatchedProperty<'_>,
        read: F,
        expected: &T,
        timeout: Duration,
    ) -> Result<(), BluezError>
    where
        T: PartialEq + Debug + TryFrom<OwnedValue> + Send + Sync,
        F: FnMut() -> Fut + Send,
        Fut: Future<Output = zbus::Result<T>> + Send,
    {
        let wait = async {
            let properties = fdo::PropertiesProxy::builder(&self.connection)
                .destination(BLUEZ_SERVICE)?
                .path(target.path.clone())?
                .cache_properties(CacheProperties::No)
                .build()
                .await?;
            let signals = properties.receive_properties_changed().await?;

            let changes = signals.filter_map(|signal| match signal.args() {
                Ok(args) => Some(PropertyChange::from_args(&args)),
                Err(err) => {
                    warn!("Failed to parse PropertiesChanged: {err}");
                    None
                }
            });

            converge(target, changes, read, expected).await
        };

        target.bounded(expected, timeout, wait).await
    }
}

/// One `PropertiesChanged` notification, detached from the signal message.
#[derive(Debug)]
struct PropertyChange {
    interface: String,
    changed: HashMap<String, OwnedValue>,
    invalidated: Vec<String>,
}

impl PropertyChange {
    fn from_args(args: &fdo::PropertiesChangedArgs<'_>) -> Self {
        let changed = args
            .changed_properties()
            .iter()
            .filter_map(|(name, value)| Some((name.to_string(), value.try_to_owned().ok()?)))
            .collect();

        Self {
            interface: args.interface_name().to_string(),
            changed,
            invalidated: args
                .invalidated_properties()
                .iter()
                .map(|name| name.to_string())
                .collect(),
        }
    }
}

/// Reads once, then follows `changes` until the property equals `expected`.
///
/// Changed values are decoded directly; an invalidation triggers a fresh
/// `read`. Notifications for other interfaces are ignored.
async fn converge<T, F, Fut, S>(
    target: &WatchedProperty<'_>,
    changes: S,
    mut read: F,
    expected: &T,
) -> Result<(), BluezError>
where
    T: PartialEq + Debug + TryFrom<OwnedValue>,
    F: FnMut() -> Fut,
    Fut: Future<Output = zbus::Result<T>>,
    S: Stream<Item = PropertyChange>,
{
    tokio::pin!(changes);

    if read().await? == *expected {
        return Ok(());
    }

    while let Some(mut change) = changes.next().await {
        if change.interface != target.interface {
            continue;
        }

        if let Some(value) = change.changed.remove(target.property) {
            let observed = T::try_from(value).ok();

            if observed.as_ref() == Some(expected) {
                return Ok(());
            }
            debug!(?observed, "property changed");
            continue;
        }

        let invalidated = change
            .invalidated
            .iter()
            .any(|name| name == target.property);

        if invalidated && read().await? == *expected {
            return Ok(());
        }
    }

    Err(BluezError::SubscriptionClosed(format!(
        "PropertiesChanged on {}",
        target.path
    )))
}

/// Strategy chosen by [`BluezConfig::wait_strategy`].
#[derive(Debug, Clone)]
pub enum ConfiguredWait {
    /// Fixed-interval polling
    Poll(PollingWait),
    /// `PropertiesChanged` notifications
    Signal(SignalWait),
}

impl Default for ConfiguredWait {
    fn default() -> Self {
        ConfiguredWait::Poll(PollingWait::default())
    }
}

impl ConfiguredWait {
    /// Build the strategy `config` asks for; notifications arrive on `connection`.
    pub fn new(config: &BluezConfig, connection: &Connection) -> Self {
        match config.wait_strategy {
            WaitStrategyKind::Poll => ConfiguredWait::Poll(PollingWait::new(config.poll_interval())),
            WaitStrategyKind::Signal => {
                ConfiguredWait::Signal(SignalWait::new(connection.clone()))
            }
        }
    }
}

#[async_trait]
impl WaitStrategy for ConfiguredWait {
    async fn wait_for<T, F, Fut>(
        &self,
        target: &WatchedProperty<'_>,
        read: F,
        expected: &T,
        timeout: Duration,
    ) -> Result<(), BluezError>
    where
        T: PartialEq + Debug + TryFrom<OwnedValue> + Send + Sync,
        F: FnMut() -> Fut + Send,
        Fut: Future<Output = zbus::Result<T>> + Send,
    {
        match self {
            ConfiguredWait::Poll(strategy) => {
                strategy.wait_for(target, read, expected, timeout).await
            }
            ConfiguredWait::Signal(strategy) => {
                strategy.wait_for(target, read, expected, timeout).await
            }
        }
    }
}
