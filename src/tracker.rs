//! One-slot rolling baseline.
//!
//! [`diff`](crate::diff::diff) is pure. Something has to keep the previous
//! snapshot between ticks, and that is the caller's [`ChangeTracker`]: one per
//! device, no shared state.
//!
//! ```
//! use padwatch::{ChangeTracker, Snapshot};
//!
//! let mut tracker = ChangeTracker::new();
//! // First poll: everything is new.
//! assert_eq!(tracker.advance(Snapshot::new(vec![0, 0])).unwrap().len(), 2);
//! // Nothing moved.
//! assert!(tracker.advance(Snapshot::new(vec![0, 0])).unwrap().is_empty());
//! ```

use crate::diff::{diff, Reading};
use crate::error::Result;
use crate::event::ChangeEvent;
use crate::snapshot::Snapshot;

#[derive(Clone, Debug)]
pub struct ChangeTracker<T = f32> {
    previous: Snapshot<T>,
}

impl<T: Reading + Clone> ChangeTracker<T> {
    /// Tracker with an empty baseline.
    pub fn new() -> Self {
        Self {
            previous: Snapshot::empty(),
        }
    }

    /// Tracker seeded with a known baseline.
    pub fn with_baseline(previous: Snapshot<T>) -> Self {
        Self { previous }
    }

    /// Diff `current` against the baseline.
    ///
    /// On success `current` becomes the new baseline. On error the baseline is
    /// left as it was and the error is returned unchanged.
    pub fn advance(&mut self, current: Snapshot<T>) -> Result<Vec<ChangeEvent<T>>> {
        let changes = diff(&self.previous, &current)?;
        self.previous = current;
        Ok(changes)
    }

    /// Drop the baseline. The next [`advance`](Self::advance) reports every channel.
    pub fn reset(&mut self) {
        self.previous = Snapshot::empty();
    }

    #[inline]
    pub fn baseline(&self) -> &Snapshot<T> {
        &self.previous
    }
}

impl<T: Reading + Clone> Default for ChangeTracker<T> {
    fn default() -> Self {
        Self::new()
    }
}
