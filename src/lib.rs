//! Discovery, GATT lookup and wait helpers for BlueZ over D-Bus.
//!
//! A thin layer over [`zbus`] proxies for the BlueZ daemon:
//!
//! - Enumerate adapters, devices, GATT services, characteristics and descriptors
//! - Look up a service or characteristic by UUID
//! - Watch devices being added to or removed from an adapter
//! - Read a characteristic with a timeout
//! - Wait for a property to reach a value
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::time::Duration;
//!
//! use bluez_helpers::services::bluez::{AdapterExt, Bluez, DeviceExt, GattCharacteristicExt, GattServiceExt};
//!
//! # async fn run() -> Result<(), bluez_helpers::services::bluez::BluezError> {
//! let bluez = Bluez::system().await?;
//!
//! for adapter in bluez.adapters().await? {
//!     for device in adapter.devices().await? {
//!         let Some(battery) = device.service("0000180f-0000-1000-8000-00805f9b34fb").await? else {
//!             continue;
//!         };
//!         if let Some(level) = battery
//!             .characteristic("00002a19-0000-1000-8000-00805f9b34fb")
//!             .await?
//!         {
//!             let value = level.read_value_with_timeout(Duration::from_secs(2)).await?;
//!             println!("battery: {value:?}");
//!         }
//!     }
//! }
//! # Ok(())
//! # }
//! ```

/// Configuration schema definitions and loading.
pub mod config;

/// Core error types and result aliases.
pub mod core;

/// D-Bus service helpers.
pub mod services;

/// Logging setup.
pub mod tracing_config;

/// Re-exported core types for convenience.
pub use crate::core::{Error, Result};
