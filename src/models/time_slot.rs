//! Time slot model.
//!
//! A time slot is a candidate placement: an interval in one venue. Break
//! slots (lunch, coffee) and slots without a venue never receive sessions.
//!
//! # Day label
//! `day_date` is a calendar label kept separately from `start_time`. Weekday
//! preference matching reads the label; the AM/PM split reads the UTC hour of
//! `start_time`. The two can disagree for events far from UTC.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::TimeRange;

/// A candidate placement for one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    /// Unique slot identifier.
    pub id: String,
    /// Slot start (UTC).
    pub start_time: DateTime<Utc>,
    /// Slot end (UTC).
    pub end_time: DateTime<Utc>,
    /// Break slots never host sessions.
    #[serde(default)]
    pub is_break: bool,
    /// Venue hosting this slot.
    #[serde(default)]
    pub venue_id: Option<String>,
    /// Calendar day label used for weekday preferences.
    #[serde(default)]
    pub day_date: Option<NaiveDate>,
    /// Free-form slot kind (e.g. "talk", "workshop"). Informational.
    #[serde(default)]
    pub slot_type: Option<String>,
}

impl TimeSlot {
    /// Creates a non-break slot without venue or day label.
    pub fn new(id: impl Into<String>, start_time: DateTime<Utc>, end_time: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            start_time,
            end_time,
            is_break: false,
            venue_id: None,
            day_date: None,
            slot_type: None,
        }
    }

    /// Sets the hosting venue.
    pub fn with_venue(mut self, venue_id: impl Into<String>) -> Self {
        self.venue_id = Some(venue_id.into());
        self
    }

    /// Sets the day label.
    pub fn with_day(mut self, day_date: NaiveDate) -> Self {
        self.day_date = Some(day_date);
        self
    }

    /// Marks the slot as a break.
    pub fn as_break(mut self) -> Self {
        self.is_break = true;
        self
    }

    /// Sets the slot kind.
    pub fn with_slot_type(mut self, slot_type: impl Into<String>) -> Self {
        self.slot_type = Some(slot_type.into());
        self
    }

    /// The slot's `[start, end)` interval.
    #[inline]
    pub fn range(&self) -> TimeRange {
        TimeRange::new(self.start_time, self.end_time)
    }

    /// Slot length in whole minutes.
    #[inline]
    pub fn duration_minutes(&self) -> i64 {
        self.range().duration_minutes()
    }

    /// Exact slot length in seconds.
    pub fn duration_seconds(&self) -> i64 {
        self.range().duration_seconds()
    }
}
