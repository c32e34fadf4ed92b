//! Device metadata.
//!
//! [`DeviceMeta`] is a lightweight, cloneable description of a device suitable
//! for `--list-all` output and logging. Backends populate what they know;
//! unknown fields remain `None`.
//!
//! # Conventions
//! - `bus` is a short hint like `"native"`, `"xinput"`, `"usb"` or `"virtual"`.
//! - `path` is an OS/topology path (opaque string), useful for diagnostics only.
//! - HID-specific fields (`usage_page`, `usage`, `interface_number`) are filled
//!   by the HID listing.

use serde::{Deserialize, Serialize};

/// Snapshot of metadata describing a single device.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceMeta {
    /// High-level bus classification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bus: Option<String>,

    /// USB Vendor ID (VID), if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vid: Option<u16>,

    /// USB Product ID (PID), if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pid: Option<u16>,

    /// Human-readable product name from the driver/firmware.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_string: Option<String>,

    /// Device serial number supplied by firmware/OS, if present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,

    /// HID interface index. Some stacks report `-1` for "not applicable";
    /// that is stored as `None`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interface_number: Option<i32>,

    /// HID Usage Page (e.g., `0x01` for Generic Desktop), if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_page: Option<u16>,

    /// HID Usage within the page (e.g., `0x04` Joystick, `0x05` Gamepad), if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<u16>,

    /// OS/topological path to the device.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Number of axes and buttons, once the layout is known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channels: Option<ChannelCounts>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelCounts {
    pub axes: usize,
    pub buttons: usize,
}
