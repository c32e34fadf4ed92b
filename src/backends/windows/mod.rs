#![cfg(target_os = "windows")]

//! Windows input backends.
//!
//! - **XInput** controller slots as [`SnapshotSource`](crate::device::SnapshotSource)s.
//!
//! Most users should not interact with this module directly. Select the
//! `xinput` backend in the config and let
//! [`Manager::discover`](crate::manager::Manager::discover) build the sources.

#[cfg(feature = "xinput")]
pub mod xinput_devices;

#[cfg(feature = "xinput")]
pub use xinput_devices::XInputSource;
