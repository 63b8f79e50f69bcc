//! Matching of managed objects against a root scope and an interface.

use std::collections::HashMap;

use zbus::zvariant::{ObjectPath, OwnedObjectPath};

use super::proxy::ManagedObjects;

/// A collection of interface names an object declares.
///
/// Object manager payloads carry interfaces either as an interface → properties
/// map (snapshots, `InterfacesAdded`) or as a bare list of names
/// (`InterfacesRemoved`). Both answer the same membership question.
pub trait InterfaceSet {
    /// Whether `interface` is among the declared interfaces.
    fn declares(&self, interface: &str) -> bool;
}

impl<V> InterfaceSet for HashMap<String, V> {
    fn declares(&self, interface: &str) -> bool {
        self.contains_key(interface)
    }
}

impl InterfaceSet for [String] {
    fn declares(&self, interface: &str) -> bool {
        self.iter().any(|name| name == interface)
    }
}

impl InterfaceSet for Vec<String> {
    fn declares(&self, interface: &str) -> bool {
        self.as_slice().declares(interface)
    }
}

impl InterfaceSet for [&str] {
    fn declares(&self, interface: &str) -> bool {
        self.contains(&interface)
    }
}

/// Whether `path` lies strictly below `root` and declares `interface`.
///
/// Without a root every path is in scope. A path equal to the root never
/// matches, and `/org/bluez/hci0` does not scope `/org/bluez/hci01/...`.
pub fn is_match<I>(
    root: Option<&ObjectPath<'_>>,
    interface: &str,
    path: &ObjectPath<'_>,
    interfaces: &I,
) -> bool
where
    I: InterfaceSet + ?Sized,
{
    if let Some(root) = root {
        let in_scope = path
            .as_str()
            .strip_prefix(root.as_str())
            .is_some_and(|rest| rest.starts_with('/'));

        if !in_scope {
            return false;
        }
    }

    interfaces.declares(interface)
}

/// Paths in `objects` matching `root` and `interface`, in snapshot order.
pub fn matching_paths(
    objects: &ManagedObjects,
    root: Option<&ObjectPath<'_>>,
    interface: &str,
) -> Vec<OwnedObjectPath> {
    objects
        .iter()
        .filter(|(path, interfaces)| is_match(root, interface, path, *interfaces))
        .map(|(path, _)| path.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use zbus::zvariant::OwnedValue;

    use super::*;
    use crate::services::bluez::constants::{
        ADAPTER_INTERFACE, DEVICE_INTERFACE, GATT_CHARACTERISTIC_INTERFACE, GATT_SERVICE_INTERFACE,
    };

    fn path(value: &str) -> OwnedObjectPath {
        OwnedObjectPath::try_from(value).unwrap()
    }

    fn interfaces(names: &[&str]) -> HashMap<String, HashMap<String, OwnedValue>> {
        names
            .iter()
            .map(|name| (name.to_string(), HashMap::new()))
            .collect()
    }

    fn snapshot() -> ManagedObjects {
        let mut objects = ManagedObjects::new();
        objects.insert(path("/org/bluez"), interfaces(&["org.bluez.AgentManager1"]));
        objects.insert(path("/org/bluez/hci0"), interfaces(&[ADAPTER_INTERFACE]));
        objects.insert(path("/org/bluez/hci1"), interfaces(&[ADAPTER_INTERFACE]));
        objects.insert(
            path("/org/bluez/hci0/dev_AA_BB"),
            interfaces(&[DEVICE_INTERFACE, "org.freedesktop.DBus.Properties"]),
        );
        objects.insert(
            path("/org/bluez/hci0/dev_AA_BB/service0001"),
            interfaces(&[GATT_SERVICE_INTERFACE]),
        );
        objects.insert(
            path("/org/bluez/hci0/dev_AA_BB/service0001/char0002"),
            interfaces(&[GATT_CHARACTERISTIC_INTERFACE]),
        );
        objects.insert(path("/org/bluez/hci1/dev_CC_DD"), interfaces(&[DEVICE_INTERFACE]));
        objects.insert(path("/org/bluez/hci01/dev_EE_FF"), interfaces(&[DEVICE_INTERFACE]));
        objects
    }

    fn sorted(mut paths: Vec<OwnedObjectPath>) -> Vec<String> {
        paths.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        paths.into_iter().map(|p| p.as_str().to_string()).collect()
    }

    #[test]
    fn scoped_match_returns_descendants_declaring_interface() {
        let objects = snapshot();
        let root = path("/org/bluez/hci0");

        let devices = matching_paths(&objects, Some(&*root), DEVICE_INTERFACE);

        assert_eq!(sorted(devices), vec!["/org/bluez/hci0/dev_AA_BB"]);
    }

    #[test]
    fn root_itself_never_matches() {
        let objects = snapshot();
        let root = path("/org/bluez/hci0");

        let adapters = matching_paths(&objects, Some(&*root), ADAPTER_INTERFACE);

        assert!(adapters.is_empty());
    }

    #[test]
    fn sibling_with_shared_prefix_is_out_of_scope() {
        let root = path("/org/bluez/hci0");
        let sibling = path("/org/bluez/hci01/dev_EE_FF");

        assert!(!is_match(
            Some(&*root),
            DEVICE_INTERFACE,
            &sibling,
            &interfaces(&[DEVICE_INTERFACE])
        ));
    }

    #[test]
    fn unscoped_match_considers_every_path() {
        let objects = snapshot();

        let adapters = matching_paths(&objects, None, ADAPTER_INTERFACE);
        let devices = matching_paths(&objects, None, DEVICE_INTERFACE);

        assert_eq!(sorted(adapters), vec!["/org/bluez/hci0", "/org/bluez/hci1"]);
        assert_eq!(devices.len(), 3);
    }

    #[test]
    fn nested_descendants_are_in_scope() {
        let objects = snapshot();
        let device = path("/org/bluez/hci0/dev_AA_BB");

        let characteristics =
            matching_paths(&objects, Some(&*device), GATT_CHARACTERISTIC_INTERFACE);

        assert_eq!(
            sorted(characteristics),
            vec!["/org/bluez/hci0/dev_AA_BB/service0001/char0002"]
        );
    }

    #[test]
    fn map_and_name_list_forms_agree() {
        let objects = snapshot();
        let roots = [
            None,
            Some(path("/org/bluez")),
            Some(path("/org/bluez/hci0")),
            Some(path("/org/bluez/hci0/dev_AA_BB")),
        ];
        let targets = [
            ADAPTER_INTERFACE,
            DEVICE_INTERFACE,
            GATT_SERVICE_INTERFACE,
            GATT_CHARACTERISTIC_INTERFACE,
            "org.bluez.Missing1",
        ];

        for root in &roots {
            for target in targets {
                for (object_path, declared) in &objects {
                    let names: Vec<String> = declared.keys().cloned().collect();
                    let borrowed: Vec<&str> = names.iter().map(String::as_str).collect();

                    let from_map = is_match(root.as_deref(), target, object_path, declared);
                    let from_names = is_match(root.as_deref(), target, object_path, &names);
                    let from_strs =
                        is_match(root.as_deref(), target, object_path, borrowed.as_slice());

                    assert_eq!(from_map, from_names, "{} / {target}", object_path.as_str());
                    assert_eq!(from_map, from_strs, "{} / {target}", object_path.as_str());
                }
            }
        }
    }
}
