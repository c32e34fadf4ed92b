//! Multi-device polling.
//!
//! [`Manager`] owns a set of [`SnapshotSource`]s, each paired with its own
//! [`ChangeTracker`]. One call to [`Manager::poll_events`] is one poll tick:
//! every source is sampled once and diffed against its own baseline.
//!
//! A source whose snapshot shrinks (typically a disconnect) makes the differ
//! fail with [`Error::OutOfRange`]. The manager logs it, drops that source's
//! baseline and diffs again, so the tick reports the new state in full.

use crate::config::{BackendKind, Config};
use crate::device::{DeviceInfo, SnapshotSource};
use crate::error::{Error, Result};
use crate::event::{ChangeEvent, DeviceChange};
use crate::eventbus::ChangeBus;
use crate::tracker::ChangeTracker;
use tracing::{debug, warn};

struct Tracked {
    source: Box<dyn SnapshotSource>,
    tracker: ChangeTracker,
}

impl Tracked {
    fn poll(&mut self) -> Result<Vec<ChangeEvent>> {
        let snapshot = self.source.poll()?;
        match self.tracker.advance(snapshot.clone()) {
            Err(Error::OutOfRange {
                previous, current, ..
            }) => {
                warn!(
                    device = self.source.id(),
                    previous, current, "channel count shrank; resetting baseline"
                );
                self.tracker.reset();
                self.tracker.advance(snapshot)
            }
            other => other,
        }
    }
}

#[derive(Default)]
pub struct Manager {
    sources: Vec<Tracked>,
}

impl std::fmt::Debug for Manager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.sources.iter().map(|t| t.source.id()))
            .finish()
    }
}

impl Manager {
    /// Manager with no sources.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the sources `config` asks for.
    pub fn discover(config: &Config) -> Result<Self> {
        config.validate()?;
        let mut manager = Self::new();
        match config.backend {
            BackendKind::Native => {
                use crate::backends::native::{InputContext, NativeSource};
                let ctx = InputContext::init()?;
                manager.add_source(NativeSource::new(ctx, config.gamepad));
            }
            BackendKind::XInput => {
                #[cfg(all(windows, feature = "xinput"))]
                for source in crate::backends::windows::XInputSource::all_slots() {
                    manager.add_source(source);
                }
            }
        }
        debug!(sources = manager.len(), "manager ready");
        Ok(manager)
    }

    pub fn add_source<S: SnapshotSource + 'static>(&mut self, source: S) {
        self.sources.push(Tracked {
            source: Box::new(source),
            tracker: ChangeTracker::new(),
        });
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn devices(&self) -> Vec<DeviceInfo> {
        self.sources
            .iter()
            .map(|t| DeviceInfo::of(t.source.as_ref()))
            .collect()
    }

    /// Poll every source once. Changes are grouped by source, in registration
    /// order, and each source's changes are in ascending channel order.
    pub fn poll_events(&mut self) -> Result<Vec<(String, ChangeEvent)>> {
        let mut events = Vec::new();
        for tracked in &mut self.sources {
            let changes = tracked.poll()?;
            let id = tracked.source.id();
            events.extend(changes.into_iter().map(|c| (id.to_string(), c)));
        }
        Ok(events)
    }

    /// One poll tick: poll, timestamp and emit on `bus`. Returns the number of changes.
    pub fn tick(&mut self, bus: &mut ChangeBus) -> Result<usize> {
        let changes: Vec<DeviceChange> = self
            .poll_events()?
            .into_iter()
            .map(|(id, event)| DeviceChange::new(id, event))
            .collect();
        bus.emit_all(&changes);
        Ok(changes.len())
    }
}
