//! Auto-scheduling for community events.
//!
//! Places vote-ranked, approved sessions into venue time slots with a
//! deterministic greedy heuristic, scoring every candidate placement on
//! duration fit, host time preferences, venue capacity, track diversity and a
//! flagship-venue bonus.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Session`, `TimeSlot`, `Venue`,
//!   `TimePreference`, `AutoScheduleResult`, `ScheduleAssignment`
//! - **`scheduler`**: The greedy `AutoScheduler`, placement scoring and KPIs
//! - **`store`**: Preview and apply operations over a `ScheduleStore`
//! - **`validation`**: Input integrity checks (duplicate IDs, venue refs, time ranges)
//! - **`config`**: Scoring weights and tie-break/clash policies
//!
//! # Example
//!
//! ```
//! use chrono::{NaiveDate, TimeZone, Utc};
//! use event_schedule::models::{Session, TimeSlot, Venue};
//! use event_schedule::scheduler::auto_schedule;
//!
//! let monday = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
//! let start = Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap();
//! let end = Utc.with_ymd_and_hms(2025, 3, 10, 10, 0, 0).unwrap();
//!
//! let sessions = vec![Session::approved("S1")
//!     .with_duration(60)
//!     .with_votes(5)
//!     .with_preference("monday_am")];
//! let slots = vec![TimeSlot::new("T1", start, end).with_venue("V1").with_day(monday)];
//! let venues = vec![Venue::new("V1")];
//!
//! let result = auto_schedule(&sessions, &slots, &venues);
//! assert_eq!(result.assignments[0].score, 21);
//! assert_eq!(result.stats.assigned, 1);
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod store;
pub mod validation;
