//! Time range model.
//!
//! A half-open interval `[start, end)` of absolute UTC instants. Used as the
//! key for track-diversity bookkeeping: two slots share a range when their
//! boundaries are identical, and overlap when they intersect at all.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A time interval [start, end).
///
/// Half-open interval: includes start, excludes end.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct TimeRange {
    /// Interval start (inclusive).
    pub start: DateTime<Utc>,
    /// Interval end (exclusive).
    pub end: DateTime<Utc>,
}

impl TimeRange {
    /// Creates a new time range.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Length of this range in whole minutes.
    ///
    /// Negative for an inverted range.
    #[inline]
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Exact length of this range in seconds.
    #[inline]
    pub fn duration_seconds(&self) -> i64 {
        (self.end - self.start).num_seconds()
    }

    /// Whether an instant falls within this range.
    #[inline]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant < self.end
    }

    /// Whether two ranges overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Whether `end` lies strictly after `start`.
    #[inline]
    pub fn is_well_formed(&self) -> bool {
        self.end > self.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, hour, min, 0).unwrap()
    }

    #[test]
    fn test_time_range() {
        let r = TimeRange::new(at(9, 0), at(10, 0));
        assert_eq!(r.duration_minutes(), 60);
        assert!(r.contains(at(9, 0)));
        assert!(r.contains(at(9, 59)));
        assert!(!r.contains(at(10, 0))); // exclusive end
        assert!(!r.contains(at(8, 30)));
        assert!(r.is_well_formed());
    }

    #[test]
    fn test_sub_minute_length() {
        let start = at(9, 0);
        let r = TimeRange::new(start, start + chrono::Duration::seconds(3630));
        assert_eq!(r.duration_minutes(), 60);
        assert_eq!(r.duration_seconds(), 3630);
    }

    #[test]
    fn test_time_range_overlap() {
        let a = TimeRange::new(at(9, 0), at(10, 0));
        let b = TimeRange::new(at(9, 30), at(10, 15));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));

        let c = TimeRange::new(at(10, 0), at(11, 0)); // touching but not overlapping
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_inverted_range() {
        let r = TimeRange::new(at(10, 0), at(9, 15));
        assert_eq!(r.duration_minutes(), -45);
        assert!(!r.is_well_formed());
    }
}
