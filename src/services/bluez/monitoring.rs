//! Delivery of object-manager `InterfacesAdded`/`InterfacesRemoved` events.

use std::future::Future;

use futures::{FutureExt, future::BoxFuture};
use tokio::task::JoinHandle;
use tokio_stream::{Stream, StreamExt};
use tracing::{debug, warn};
use zbus::{Connection, zvariant::OwnedObjectPath};

use super::{
    BluezError, BluezObject,
    discovery::BluezDiscovery,
    filter::{InterfaceSet, is_match},
};

type Materialized<P> = BoxFuture<'static, zbus::Result<P>>;

/// Handle to a running event subscription.
///
/// Dropping the handle or calling [`Subscription::dispose`] stops delivery and
/// releases the underlying signal stream. No callback runs after the dispatch
/// task observes the cancellation; an invocation already in progress finishes.
#[derive(Debug)]
pub struct Subscription {
    name: String,
    task: Option<JoinHandle<Result<(), BluezError>>>,
}

impl Subscription {
    /// Stop delivering events.
    pub fn dispose(mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        debug!(subscription = %self.name, "subscription disposed");
    }

    /// Whether events are still being delivered.
    pub fn is_active(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Waits for delivery to end and returns why it ended.
    ///
    /// # Errors
    /// Returns the error that stopped delivery, such as a failure to build a
    /// proxy for an event, or [`BluezError::SubscriptionClosed`] if the
    /// dispatch task was cancelled.
    pub async fn closed(mut self) -> Result<(), BluezError> {
        let Some(task) = self.task.take() else {
            return Err(BluezError::SubscriptionClosed(self.name.clone()));
        };

        match task.await {
            Ok(result) => result,
            Err(_) => Err(BluezError::SubscriptionClosed(self.name.clone())),
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Forward matching events from `events` to `callback`, in arrival order.
///
/// Each event is filtered through [`is_match`] against `root` and
/// `interface`, turned into a handle by `materialize`, then passed on. A
/// materialization failure ends the subscription with that error.
pub(crate) fn dispatch_matching<S, I, P, M, Fut, C>(
    name: String,
    events: S,
    root: Option<OwnedObjectPath>,
    interface: &'static str,
    mut materialize: M,
    mut callback: C,
) -> Subscription
where
    S: Stream<Item = (OwnedObjectPath, I)> + Send + 'static,
    I: InterfaceSet + Send + 'static,
    P: Send + 'static,
    M: FnMut(OwnedObjectPath) -> Fut + Send + 'static,
    Fut: Future<Output = zbus::Result<P>> + Send + 'static,
    C: FnMut(P) + Send + 'static,
{
    let task_name = name.clone();
    let task = tokio::spawn(async move {
        tokio::pin!(events);

        while let Some((path, interfaces)) = events.next().await {
            if !is_match(root.as_deref(), interface, &path, &interfaces) {
                continue;
            }

            let object = materialize(path.clone()).await.inspect_err(|err| {
                warn!(
                    subscription = %task_name,
                    "Failed to create proxy for {}: {err}",
                    path.as_str()
                );
            })?;

            debug!(subscription = %task_name, path = %path.as_str(), "delivering event");
            callback(object);
        }

        debug!(subscription = %task_name, "event stream ended");
        Ok(())
    });

    Subscription {
        name,
        task: Some(task),
    }
}

/// Calls `callback` with a handle to every `P` added below `root`.
///
/// # Errors
/// Returns error if the object manager cannot be reached or the signal
/// subscription fails.
pub(crate) async fn watch_added<P, C>(
    connection: &Connection,
    root: Option<OwnedObjectPath>,
    callback: C,
) -> Result<Subscription, BluezError>
where
    P: BluezObject,
    C: FnMut(P) + Send + 'static,
{
    let object_manager = BluezDiscovery::object_manager(connection).await?;
    let signals = object_manager.receive_interfaces_added().await?;

    let events = signals.filter_map(|signal| match signal.args() {
        Ok(args) => Some((args.object_path, args.interfaces)),
        Err(err) => {
            warn!("Failed to parse InterfacesAdded: {err}");
            None
        }
    });

    Ok(dispatch_matching(
        format!("{} added", P::INTERFACE),
        events,
        root,
        P::INTERFACE,
        materializer::<P>(connection),
        callback,
    ))
}

/// Calls `callback` with a handle to every `P` removed below `root`.
///
/// The handle refers to an object that no longer exists; only its path is
/// meaningful.
///
/// # Errors
/// Returns error if the object manager cannot be reached or the signal
/// subscription fails.
pub(crate) async fn watch_removed<P, C>(
    connection: &Connection,
    root: Option<OwnedObjectPath>,
    callback: C,
) -> Result<Subscription, BluezError>
where
    P: BluezObject,
    C: FnMut(P) + Send + 'static,
{
    let object_manager = BluezDiscovery::object_manager(connection).await?;
    let signals = object_manager.receive_interfaces_removed().await?;

    let events = signals.filter_map(|signal| match signal.args() {
        Ok(args) => Some((args.object_path, args.interfaces)),
        Err(err) => {
            warn!("Failed to parse InterfacesRemoved: {err}");
            None
        }
    });

    Ok(dispatch_matching(
        format!("{} removed", P::INTERFACE),
        events,
        root,
        P::INTERFACE,
        materializer::<P>(connection),
        callback,
    ))
}

fn materializer<P: BluezObject>(
    connection: &Connection,
) -> impl FnMut(OwnedObjectPath) -> Materialized<P> + Send + 'static {
    let connection = connection.clone();
    move |path| -> Materialized<P> {
        let connection = connection.clone();
        async move { P::materialize(&connection, path).await }.boxed()
    }
}
