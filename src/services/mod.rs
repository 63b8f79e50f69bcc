/// BlueZ discovery and wait helpers
pub mod bluez;

pub use bluez::{Bluez, BluezError};
