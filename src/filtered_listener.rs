use crate::event::DeviceChange;
use crate::eventbus::InputListener;

/// Wraps a listener and filters changes based on a user-supplied predicate.
pub struct FilteredListener {
    predicate: Box<dyn Fn(&DeviceChange) -> bool + Send + Sync>,
    inner: Box<dyn InputListener>,
}

impl FilteredListener {
    pub fn new(
        predicate: impl Fn(&DeviceChange) -> bool + Send + Sync + 'static,
        inner: impl InputListener + 'static,
    ) -> Self {
        Self {
            predicate: Box::new(predicate),
            inner: Box::new(inner),
        }
    }
}

impl InputListener for FilteredListener {
    fn on_change(&mut self, change: &DeviceChange) {
        if (self.predicate)(change) {
            self.inner.on_change(change);
        }
    }
}
