use tracing::{debug, instrument};
use zbus::{Connection, proxy::CacheProperties, zvariant::ObjectPath};

use super::{
    BluezError, BluezObject, Identified, ObjectManagerProxy, constants::OBJECT_MANAGER_PATH,
    filter::matching_paths,
};

pub(crate) struct BluezDiscovery;

impl BluezDiscovery {
    pub(crate) async fn object_manager(
        connection: &Connection,
    ) -> Result<ObjectManagerProxy<'static>, BluezError> {
        ObjectManagerProxy::builder(connection)
            .path(OBJECT_MANAGER_PATH)?
            .cache_properties(CacheProperties::No)
            .build()
            .await
            .map_err(BluezError::DbusError)
    }

    /// Handles for every `P` below `root`, or anywhere when `root` is `None`.
    #[instrument(skip(connection), fields(interface = P::INTERFACE))]
    pub(crate) async fn proxies<P: BluezObject>(
        connection: &Connection,
        root: Option<&ObjectPath<'_>>,
    ) -> Result<Vec<P>, BluezError> {
        let object_manager = Self::object_manager(connection).await?;
        let objects = object_manager
            .get_managed_objects()
            .await
            .map_err(BluezError::DbusError)?;

        let paths = matching_paths(&objects, root, P::INTERFACE);
        debug!("{} of {} managed objects matched", paths.len(), objects.len());

        let mut proxies = Vec::with_capacity(paths.len());
        for path in paths {
            proxies.push(P::materialize(connection, path).await?);
        }

        Ok(proxies)
    }

    /// First candidate whose UUID equals `uuid`, read one at a time.
    pub(crate) async fn find_by_uuid<P: Identified>(
        candidates: Vec<P>,
        uuid: &str,
    ) -> Result<Option<P>, BluezError> {
        for candidate in candidates {
            if candidate.identifier().await? == uuid {
                return Ok(Some(candidate));
            }
        }

        debug!(uuid, "no child with matching UUID");
        Ok(None)
    }
}
