//! Per-poll snapshot of one device's channels.
//!
//! A [`Snapshot`] is an **owned**, read-only list of channel readings captured
//! at one poll tick. Positions are fixed for a given device layout: all axes
//! come first, then all buttons, each in the order the device reports them.
//!
//! # Semantics
//! - Index `i` always names the same channel for as long as the device layout
//!   does not change.
//! - A snapshot built with [`Snapshot::with_layout`] knows how many leading
//!   channels are analog, so [`Snapshot::kind_of`] can tag every index.
//!   A snapshot built from bare values is untagged.
//! - A snapshot is **immutable**. Polling produces a fresh one every tick.
//!
//! # Examples
//! ```
//! use padwatch::{ChannelKind, Snapshot};
//!
//! let snap = Snapshot::with_layout(vec![0.25, -1.0], vec![1.0]);
//! assert_eq!(snap.len(), 3);
//! assert_eq!(snap.kind_of(0), Some(ChannelKind::Analog));
//! assert_eq!(snap.kind_of(2), Some(ChannelKind::Digital));
//! assert_eq!(snap.buttons(), Some(&[1.0][..]));
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Category of a channel inside a snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelKind {
    /// A continuous channel (stick, trigger axis).
    Analog,
    /// An on/off channel (button).
    Digital,
}

/// Ordered channel readings of a single device at one poll.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot<T = f32> {
    values: Vec<T>,
    /// Number of leading analog channels, if the layout is known.
    analog: Option<usize>,
}

impl<T> Snapshot<T> {
    /// Untagged snapshot from bare values.
    pub fn new(values: Vec<T>) -> Self {
        Self {
            values,
            analog: None,
        }
    }

    /// An empty snapshot (no device, or nothing polled yet).
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Snapshot laid out as `axes` followed by `buttons`.
    pub fn with_layout(axes: Vec<T>, buttons: Vec<T>) -> Self {
        let analog = axes.len();
        let mut values = axes;
        values.extend(buttons);
        Self {
            values,
            analog: Some(analog),
        }
    }

    /// Snapshot whose first `analog` values are axes.
    ///
    /// Fails with [`Error::InvalidInput`] if `analog` exceeds the number of values.
    pub fn try_from_parts(values: Vec<T>, analog: usize) -> Result<Self> {
        if analog > values.len() {
            return Err(Error::InvalidInput(format!(
                "{} analog channels declared but the snapshot only has {}",
                analog,
                values.len()
            )));
        }
        Ok(Self {
            values,
            analog: Some(analog),
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.values.get(index)
    }

    #[inline]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Channel kind at `index`, or `None` for untagged snapshots and
    /// out-of-range indices.
    pub fn kind_of(&self, index: usize) -> Option<ChannelKind> {
        let analog = self.analog?;
        if index >= self.values.len() {
            None
        } else if index < analog {
            Some(ChannelKind::Analog)
        } else {
            Some(ChannelKind::Digital)
        }
    }

    /// The axis readings, if the layout is known.
    pub fn axes(&self) -> Option<&[T]> {
        self.analog.map(|n| &self.values[..n])
    }

    /// The button readings, if the layout is known.
    pub fn buttons(&self) -> Option<&[T]> {
        self.analog.map(|n| &self.values[n..])
    }

    /// Consume the snapshot and return the raw values.
    #[inline]
    pub fn into_values(self) -> Vec<T> {
        self.values
    }
}

impl<T> Default for Snapshot<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> From<Vec<T>> for Snapshot<T> {
    fn from(values: Vec<T>) -> Self {
        Self::new(values)
    }
}

impl<T> FromIterator<T> for Snapshot<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
