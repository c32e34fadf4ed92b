//! Scripted device.
//!
//! [`VirtualDevice`] replays snapshots fed to it, one per poll. When the queue
//! runs dry it keeps reporting the last snapshot, the way a real device holds
//! its state between moves.

use crate::device::SnapshotSource;
use crate::error::Result;
use crate::metadata::{ChannelCounts, DeviceMeta};
use crate::snapshot::Snapshot;
use std::collections::VecDeque;

#[derive(Debug, Default)]
pub struct VirtualDevice {
    id: String,
    name: String,
    queue: VecDeque<Snapshot>,
    current: Snapshot,
}

impl VirtualDevice {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            queue: VecDeque::new(),
            current: Snapshot::empty(),
        }
    }

    /// Queue a snapshot to be returned by a later poll.
    pub fn feed(&mut self, snapshot: Snapshot) {
        self.queue.push_back(snapshot);
    }

    /// Queue a laid-out snapshot (`axes` then `buttons`).
    pub fn feed_state(&mut self, axes: &[f32], buttons: &[bool]) {
        let buttons = buttons.iter().map(|&b| if b { 1.0 } else { 0.0 }).collect();
        self.feed(Snapshot::with_layout(axes.to_vec(), buttons));
    }

    /// Queue a disconnect (empty snapshot).
    pub fn unplug(&mut self) {
        self.feed(Snapshot::empty());
    }

    /// Number of snapshots still queued.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

impl SnapshotSource for VirtualDevice {
    fn poll(&mut self) -> Result<Snapshot> {
        if let Some(next) = self.queue.pop_front() {
            self.current = next;
        }
        Ok(self.current.clone())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn metadata(&self) -> DeviceMeta {
        DeviceMeta {
            bus: Some("virtual".into()),
            product_string: Some(self.name.clone()),
            channels: self.current.axes().map(|axes| ChannelCounts {
                axes: axes.len(),
                buttons: self.current.len() - axes.len(),
            }),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_replays_then_holds() {
        let mut d = VirtualDevice::new("virtual:0", "Virtual Input 0");
        assert!(d.poll().unwrap().is_empty());
        d.feed_state(&[0.5], &[true, false]);
        d.feed(Snapshot::new(vec![1.0]));
        assert_eq!(d.pending(), 2);
        assert_eq!(d.poll().unwrap().values(), &[0.5, 1.0, 0.0]);
        assert_eq!(d.metadata().channels, Some(ChannelCounts { axes: 1, buttons: 2 }));
        assert_eq!(d.poll().unwrap().values(), &[1.0]);
        assert_eq!(d.poll().unwrap().values(), &[1.0]);
        assert_eq!(d.metadata().channels, None);
        d.unplug();
        assert!(d.poll().unwrap().is_empty());
    }
}
