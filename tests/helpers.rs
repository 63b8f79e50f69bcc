//! Integration tests for the bus-independent BlueZ helpers.

#![cfg_attr(test, allow(clippy::unwrap_used))]

use std::{
    collections::HashMap,
    future,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use bluez_helpers::services::bluez::{
    BluezError, Identified, ManagedObjects, PollingWait, WaitStrategy, WatchedProperty,
    constants::{DEVICE_INTERFACE, GATT_SERVICE_INTERFACE},
    find_by_uuid, matching_paths, read_with_timeout,
};
use zbus::zvariant::{ObjectPath, OwnedObjectPath};

struct Service {
    uuid: &'static str,
}

#[async_trait]
impl Identified for Service {
    async fn identifier(&self) -> zbus::Result<String> {
        Ok(self.uuid.to_string())
    }
}

fn snapshot(entries: &[(&str, &str)]) -> ManagedObjects {
    entries
        .iter()
        .map(|(path, interface)| {
            (
                OwnedObjectPath::try_from(*path).unwrap(),
                HashMap::from([(interface.to_string(), HashMap::new())]),
            )
        })
        .collect()
}

#[test]
fn device_scope_finds_only_its_services() {
    let objects = snapshot(&[
        ("/org/bluez/hci0/dev_01", DEVICE_INTERFACE),
        ("/org/bluez/hci0/dev_01/service000a", GATT_SERVICE_INTERFACE),
        ("/org/bluez/hci0/dev_01/service0010", GATT_SERVICE_INTERFACE),
        ("/org/bluez/hci0/dev_02/service000a", GATT_SERVICE_INTERFACE),
    ]);
    let device = ObjectPath::from_static_str_unchecked("/org/bluez/hci0/dev_01");

    let matches = matching_paths(&objects, Some(&device), GATT_SERVICE_INTERFACE);
    let mut services: Vec<String> = matches
        .iter()
        .map(|path| path.as_str().to_string())
        .collect();
    services.sort();

    assert_eq!(
        services,
        vec![
            "/org/bluez/hci0/dev_01/service000a",
            "/org/bluez/hci0/dev_01/service0010"
        ]
    );
}

#[tokio::test]
async fn lookup_by_uuid_returns_second_of_three() {
    let children = vec![
        Service { uuid: "A" },
        Service { uuid: "B" },
        Service { uuid: "C" },
    ];

    let found = find_by_uuid(children, "B").await.unwrap();

    assert_eq!(found.map(|service| service.uuid), Some("B"));
}

#[tokio::test]
async fn lookup_by_uuid_absent_is_none() {
    let children = vec![
        Service { uuid: "A" },
        Service { uuid: "B" },
        Service { uuid: "C" },
    ];

    assert!(find_by_uuid(children, "Z").await.unwrap().is_none());
}

#[tokio::test(start_paused = true)]
async fn slow_read_is_reported_as_timeout() {
    let read = async {
        tokio::time::sleep(Duration::from_millis(200)).await;
        Ok(vec![0xAB])
    };

    let error = read_with_timeout(read, Duration::from_millis(50))
        .await
        .unwrap_err();

    assert!(error.is_timeout());
    assert!(matches!(error, BluezError::ReadTimeout { .. }));
}

#[tokio::test(start_paused = true)]
async fn poll_wait_sees_value_after_a_few_samples() {
    let path = ObjectPath::from_static_str_unchecked("/org/bluez/hci0/dev_01");
    let target = WatchedProperty {
        path: &path,
        interface: DEVICE_INTERFACE,
        property: "Connected",
    };
    let reads = Arc::new(AtomicUsize::new(0));
    let counter = reads.clone();

    PollingWait::new(Duration::from_millis(10))
        .wait_for(
            &target,
            move || future::ready(Ok(counter.fetch_add(1, Ordering::SeqCst) >= 3)),
            &true,
            Duration::from_secs(1),
        )
        .await
        .unwrap();

    assert_eq!(reads.load(Ordering::SeqCst), 4);
}
