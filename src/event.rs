//! Change events.
//!
//! The differ reports every channel that moved between two snapshots as a
//! [`ChangeEvent`]. The [`Manager`](crate::manager::Manager) wraps those into
//! [`DeviceChange`]s (device id + capture time) before handing them to listeners.
//!
//! ## Value conventions
//! - **Axes:** normalized to `[-1.0, 1.0]` by the backends.
//! - **Buttons:** `0.0` released, `1.0` pressed.

use crate::snapshot::ChannelKind;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// One channel that changed since the previous snapshot.
///
/// `index` is valid for the snapshot the event was taken from and `value`
/// equals that snapshot's reading at `index`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChangeEvent<T = f32> {
    /// Position of the channel in the snapshot.
    pub index: usize,
    /// New reading.
    pub value: T,
    /// Analog/digital tag, when the snapshot carries a layout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ChannelKind>,
}

impl<T> ChangeEvent<T> {
    pub fn new(index: usize, value: T) -> Self {
        Self {
            index,
            value,
            kind: None,
        }
    }

    pub fn with_kind(mut self, kind: Option<ChannelKind>) -> Self {
        self.kind = kind;
        self
    }

    #[inline]
    pub fn is_analog(&self) -> bool {
        self.kind == Some(ChannelKind::Analog)
    }

    #[inline]
    pub fn is_digital(&self) -> bool {
        self.kind == Some(ChannelKind::Digital)
    }
}

impl<T> From<(usize, T)> for ChangeEvent<T> {
    fn from((index, value): (usize, T)) -> Self {
        Self::new(index, value)
    }
}

/// Timestamped change captured by the Manager for a specific device.
#[derive(Clone, Debug)]
pub struct DeviceChange {
    /// Id of the device that produced the change (see [`SnapshotSource::id`](crate::device::SnapshotSource::id)).
    pub device_id: String,
    /// Capture time (monotonic).
    pub at: Instant,
    /// The actual change.
    pub event: ChangeEvent,
}

impl DeviceChange {
    pub fn new(device_id: impl Into<String>, event: ChangeEvent) -> Self {
        Self {
            device_id: device_id.into(),
            at: Instant::now(),
            event,
        }
    }
}
