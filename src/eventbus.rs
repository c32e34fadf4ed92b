use crate::event::DeviceChange;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Trait for reacting to change events from any device.
pub trait InputListener: Send {
    fn on_change(&mut self, change: &DeviceChange);
}

/// Determines which changes a listener wants to receive.
#[derive(Debug, Clone, Copy)]
pub enum EventFilter {
    All,
    AnalogOnly,
    DigitalOnly,
    Custom(fn(&DeviceChange) -> bool),
}

impl EventFilter {
    pub fn accepts(&self, change: &DeviceChange) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::AnalogOnly => change.event.is_analog(),
            EventFilter::DigitalOnly => change.event.is_digital(),
            EventFilter::Custom(f) => f(change),
        }
    }
}

/// Config-friendly subset of [`EventFilter`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelFilter {
    #[default]
    All,
    Analog,
    Digital,
}

impl From<ChannelFilter> for EventFilter {
    fn from(f: ChannelFilter) -> Self {
        match f {
            ChannelFilter::All => EventFilter::All,
            ChannelFilter::Analog => EventFilter::AnalogOnly,
            ChannelFilter::Digital => EventFilter::DigitalOnly,
        }
    }
}

/// Metadata-wrapped listener with filters and control flags.
struct ListenerEntry {
    listener: Box<dyn InputListener>,
    enabled: bool,
    filter: EventFilter,
    tag: Option<String>, // Optional device id
}

/// Fans change events out to registered listeners, in registration order.
pub struct ChangeBus {
    next_id: u64,
    listeners: BTreeMap<u64, ListenerEntry>,
}

impl std::fmt::Debug for ChangeBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeBus")
            .field("next_id", &self.next_id)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl ChangeBus {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            listeners: BTreeMap::new(),
        }
    }

    /// Registers a listener with optional filtering and device tag.
    pub fn add_listener(
        &mut self,
        listener: impl InputListener + 'static,
        filter: EventFilter,
        tag: Option<String>,
    ) -> u64 {
        let id = self.next_id;
        self.listeners.insert(
            id,
            ListenerEntry {
                listener: Box::new(listener),
                enabled: true,
                filter,
                tag,
            },
        );
        self.next_id += 1;
        id
    }

    /// Enables a previously registered listener.
    pub fn enable(&mut self, id: u64) {
        if let Some(entry) = self.listeners.get_mut(&id) {
            entry.enabled = true;
        }
    }

    /// Disables (mutes) a listener without removing it.
    pub fn disable(&mut self, id: u64) {
        if let Some(entry) = self.listeners.get_mut(&id) {
            entry.enabled = false;
        }
    }

    /// Unregisters a listener entirely.
    pub fn remove_listener(&mut self, id: u64) {
        self.listeners.remove(&id);
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Emits one change to all active and matching listeners.
    fn emit(&mut self, change: &DeviceChange) {
        for entry in self.listeners.values_mut() {
            if !entry.enabled {
                continue;
            }

            if let Some(ref wanted_id) = entry.tag {
                if change.device_id != *wanted_id {
                    continue;
                }
            }

            if entry.filter.accepts(change) {
                entry.listener.on_change(change);
            }
        }
    }

    /// Emits a batch of changes to matching listeners.
    pub fn emit_all(&mut self, changes: &[DeviceChange]) {
        for change in changes {
            self.emit(change);
        }
    }
}

impl Default for ChangeBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::event::ChangeEvent;
    use crate::snapshot::ChannelKind;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Collect(Arc<Mutex<Vec<(String, usize)>>>);

    impl InputListener for Collect {
        fn on_change(&mut self, change: &DeviceChange) {
            self.0
                .lock()
                .unwrap()
                .push((change.device_id.clone(), change.event.index));
        }
    }

    impl Collect {
        fn take(&self) -> Vec<(String, usize)> {
            std::mem::take(&mut *self.0.lock().unwrap())
        }
    }

    fn change(dev: &str, index: usize, kind: ChannelKind) -> DeviceChange {
        DeviceChange::new(dev, ChangeEvent::new(index, 1.0).with_kind(Some(kind)))
    }

    fn batch() -> Vec<DeviceChange> {
        vec![
            change("a", 0, ChannelKind::Analog),
            change("a", 3, ChannelKind::Digital),
            change("b", 1, ChannelKind::Digital),
        ]
    }

    #[test]
    fn test_filters() {
        let mut bus = ChangeBus::new();
        let all = Collect::default();
        let analog = Collect::default();
        let digital = Collect::default();
        bus.add_listener(all.clone(), EventFilter::All, None);
        bus.add_listener(analog.clone(), ChannelFilter::Analog.into(), None);
        bus.add_listener(digital.clone(), EventFilter::DigitalOnly, None);
        bus.emit_all(&batch());
        assert_eq!(all.take().len(), 3);
        assert_eq!(analog.take(), vec![("a".to_string(), 0)]);
        assert_eq!(
            digital.take(),
            vec![("a".to_string(), 3), ("b".to_string(), 1)]
        );
    }

    #[test]
    fn test_custom_filter_and_tag() {
        let mut bus = ChangeBus::new();
        let tagged = Collect::default();
        let custom = Collect::default();
        bus.add_listener(tagged.clone(), EventFilter::All, Some("b".into()));
        bus.add_listener(
            custom.clone(),
            EventFilter::Custom(|c| c.event.index > 0),
            None,
        );
        bus.emit_all(&batch());
        assert_eq!(tagged.take(), vec![("b".to_string(), 1)]);
        assert_eq!(custom.take().len(), 2);
    }

    #[test]
    fn test_enable_disable_remove() {
        let mut bus = ChangeBus::new();
        let l = Collect::default();
        let id = bus.add_listener(l.clone(), EventFilter::All, None);
        bus.disable(id);
        bus.emit_all(&batch());
        assert!(l.take().is_empty());
        bus.enable(id);
        bus.emit_all(&batch());
        assert_eq!(l.take().len(), 3);
        bus.remove_listener(id);
        assert!(bus.is_empty());
        bus.emit_all(&batch());
        assert!(l.take().is_empty());
    }
}
