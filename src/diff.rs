//! Snapshot differ.
//!
//! [`diff`] compares the previous and the current snapshot of one device and
//! returns the channels that changed, in ascending index order.
//!
//! # Policy
//! - **Growth** (`current` longer than `previous`, e.g. the first poll against an
//!   empty baseline, or a reconnect): every channel of `current` is reported.
//! - **Same length**: only channels whose reading or kind differs are reported.
//!   Readings are compared with [`Reading::same`], which is reflexive, so
//!   `diff(s, s)` is always empty (a NaN axis included).
//! - **Shrink** (`current` shorter than `previous`): [`Error::OutOfRange`].
//!   There is no comparable baseline, and the caller decides how to recover
//!   (see [`ChangeTracker::reset`](crate::tracker::ChangeTracker::reset)).
//!
//! ```
//! use padwatch::{diff, ChangeEvent, Snapshot};
//!
//! let changes = diff(&Snapshot::new(vec![1, 2, 3]), &Snapshot::new(vec![1, 9, 3])).unwrap();
//! assert_eq!(changes, vec![ChangeEvent::new(1, 9)]);
//! ```

use crate::error::{Error, Result};
use crate::event::ChangeEvent;
use crate::snapshot::Snapshot;

/// A channel value that can be compared across snapshots.
///
/// Unlike `PartialEq`, [`same`](Reading::same) must be reflexive: a reading is
/// always the same as itself. For floats every NaN counts as the same reading.
pub trait Reading {
    fn same(&self, other: &Self) -> bool;
}

macro_rules! impl_reading_eq {
    ($($t:ty),*) => {
        $(
            impl Reading for $t {
                #[inline]
                fn same(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

macro_rules! impl_reading_float {
    ($($t:ty),*) => {
        $(
            impl Reading for $t {
                #[inline]
                fn same(&self, other: &Self) -> bool {
                    self == other || (self.is_nan() && other.is_nan())
                }
            }
        )*
    };
}

impl_reading_eq!(bool, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_reading_float!(f32, f64);

/// Channels of `current` that differ from `previous`.
pub fn diff<T>(previous: &Snapshot<T>, current: &Snapshot<T>) -> Result<Vec<ChangeEvent<T>>>
where
    T: Reading + Clone,
{
    if current.len() < previous.len() {
        return Err(Error::OutOfRange {
            index: current.len(),
            previous: previous.len(),
            current: current.len(),
        });
    }

    if previous.len() != current.len() {
        return Ok(current
            .values()
            .iter()
            .enumerate()
            .map(|(i, v)| event_at(current, i, v))
            .collect());
    }

    Ok(previous
        .values()
        .iter()
        .zip(current.values())
        .enumerate()
        .filter(|&(i, (old, new))| {
            !old.same(new) || previous.kind_of(i) != current.kind_of(i)
        })
        .map(|(i, (_, new))| event_at(current, i, new))
        .collect())
}

#[inline]
fn event_at<T: Clone>(snapshot: &Snapshot<T>, index: usize, value: &T) -> ChangeEvent<T> {
    ChangeEvent::new(index, value.clone()).with_kind(snapshot.kind_of(index))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::snapshot::ChannelKind;

    fn events(pairs: &[(usize, i32)]) -> Vec<ChangeEvent<i32>> {
        pairs.iter().map(|&p| ChangeEvent::from(p)).collect()
    }

    #[test]
    fn test_growth_reports_every_channel() {
        let d = diff(&Snapshot::new(vec![1, 2]), &Snapshot::new(vec![3, 4, 5])).unwrap();
        assert_eq!(d, events(&[(0, 3), (1, 4), (2, 5)]));

        // Values that happen to match are still reported.
        let d = diff(&Snapshot::new(vec![1, 2]), &Snapshot::new(vec![1, 2, 3])).unwrap();
        assert_eq!(d, events(&[(0, 1), (1, 2), (2, 3)]));
    }

    #[test]
    fn test_first_poll_against_empty_baseline() {
        let d = diff(&Snapshot::empty(), &Snapshot::new(vec![0, 0])).unwrap();
        assert_eq!(d, events(&[(0, 0), (1, 0)]));
    }

    #[test]
    fn test_equal_length() {
        let d = diff(&Snapshot::new(vec![1, 2, 3]), &Snapshot::new(vec![1, 9, 3])).unwrap();
        assert_eq!(d, events(&[(1, 9)]));
        let d = diff(&Snapshot::new(vec![0, 0]), &Snapshot::new(vec![0, 0])).unwrap();
        assert!(d.is_empty());
        let d = diff(&Snapshot::<i32>::empty(), &Snapshot::empty()).unwrap();
        assert!(d.is_empty());
    }

    #[test]
    fn test_shrink_is_out_of_range() {
        let err = diff(&Snapshot::new(vec![1, 2, 3]), &Snapshot::new(vec![1, 2])).unwrap_err();
        assert!(matches!(
            err,
            Error::OutOfRange {
                index: 2,
                previous: 3,
                current: 2
            }
        ));
        let err = diff(&Snapshot::new(vec![1, 2, 3]), &Snapshot::empty()).unwrap_err();
        assert!(matches!(
            err,
            Error::OutOfRange {
                index: 0,
                previous: 3,
                current: 0
            }
        ));
    }

    #[test]
    fn test_events_carry_kinds() {
        let prev = Snapshot::with_layout(vec![0.0f32, 0.0], vec![0.0]);
        let cur = Snapshot::with_layout(vec![0.5, 0.0], vec![1.0]);
        let d = diff(&prev, &cur).unwrap();
        assert_eq!(d.len(), 2);
        assert_eq!(d[0].kind, Some(ChannelKind::Analog));
        assert!(d[1].is_digital());
        assert_eq!(d[1].index, 2);
        assert_eq!(d[1].value, 1.0);
    }

    #[test]
    fn test_kind_change_counts_as_change() {
        let prev = Snapshot::try_from_parts(vec![0, 0, 0], 2).unwrap();
        let cur = Snapshot::try_from_parts(vec![0, 0, 0], 1).unwrap();
        let d = diff(&prev, &cur).unwrap();
        assert_eq!(
            d,
            vec![ChangeEvent::new(1, 0).with_kind(Some(ChannelKind::Digital))]
        );
    }

    #[test]
    fn test_nan_reading_is_stable() {
        let s = Snapshot::with_layout(vec![f32::NAN, 0.0], vec![1.0]);
        assert!(diff(&s, &s).unwrap().is_empty());
        assert!(diff(&s, &s.clone()).unwrap().is_empty());

        // Moving into or out of NaN is still a change.
        let d = diff(&s, &Snapshot::with_layout(vec![0.5, 0.0], vec![1.0])).unwrap();
        assert_eq!(d.len(), 1);
        assert_eq!(d[0].index, 0);
        assert_eq!(d[0].value, 0.5);
        let d = diff(&Snapshot::new(vec![1.0f64]), &Snapshot::new(vec![f64::NAN])).unwrap();
        assert_eq!(d.len(), 1);
        assert!(d[0].value.is_nan());
    }

    #[test]
    fn test_reading_is_reflexive() {
        assert!(f32::NAN.same(&f32::NAN));
        assert!(0.0f32.same(&-0.0));
        assert!(!1.0f32.same(&f32::NAN));
        assert!(7u8.same(&7));
        assert!(!true.same(&false));
    }
}
