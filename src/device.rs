//! Snapshot sources.
//!
//! A [`SnapshotSource`] is anything that can be polled for the current state of
//! one device. Backends implement it; the [`Manager`](crate::manager::Manager)
//! keeps one [`ChangeTracker`](crate::tracker::ChangeTracker) per source.

use crate::error::Result;
use crate::metadata::DeviceMeta;
use crate::snapshot::Snapshot;
use serde::Serialize;
use std::fmt;

pub trait SnapshotSource {
    /// Read the device's current state.
    ///
    /// A device that is not connected yields an empty snapshot, not an error.
    fn poll(&mut self) -> Result<Snapshot>;
    fn name(&self) -> &str;
    /// Stable id used to tag [`DeviceChange`](crate::event::DeviceChange)s.
    fn id(&self) -> &str;
    fn metadata(&self) -> DeviceMeta {
        DeviceMeta::default()
    }
}

/// Owned description of a registered source.
#[derive(Clone, Debug, Serialize)]
pub struct DeviceInfo {
    pub id: String,
    pub name: String,
    pub meta: DeviceMeta,
}

impl DeviceInfo {
    pub fn of(source: &dyn SnapshotSource) -> Self {
        Self {
            id: source.id().to_string(),
            name: source.name().to_string(),
            meta: source.metadata(),
        }
    }
}

impl fmt::Display for DeviceInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)?;
        if let (Some(vid), Some(pid)) = (self.meta.vid, self.meta.pid) {
            write!(f, " [{vid:04x}:{pid:04x}]")?;
        }
        Ok(())
    }
}
