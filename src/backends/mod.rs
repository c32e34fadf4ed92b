//! Input backends for `padwatch`.
//!
//! Implementations of [`SnapshotSource`](crate::device::SnapshotSource) for
//! platform-specific input sources, plus HID enumeration.
//!
//! # Feature flags
//! - **`hid`**: HID game-control enumeration for `--list-all` (default).
//! - **`xinput`**: Windows XInput slot sources (default; no-op elsewhere).
//!
//! The native gamepad backend and the scripted virtual device are always available.

pub mod native;
pub mod virtual_input;

#[cfg(feature = "hid")]
#[cfg_attr(docsrs, doc(cfg(feature = "hid")))]
pub mod hid;

#[cfg(target_os = "windows")]
#[cfg_attr(docsrs, doc(cfg(target_os = "windows")))]
pub mod windows;
