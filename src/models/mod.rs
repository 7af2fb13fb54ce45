//! Event scheduling domain models.
//!
//! Provides the input collections the auto-scheduler reads and the result
//! it produces. All inputs are read-only snapshots; nothing here is mutated
//! by scheduling.
//!
//! # Domain Mappings
//!
//! | event-schedule | Conference | Meetup | Festival |
//! |----------------|-----------|--------|----------|
//! | Session | Talk/Workshop | Lightning talk | Set/Performance |
//! | TimeSlot | Program slot | Agenda item | Stage slot |
//! | Venue | Room/Hall | Space | Stage |
//! | Track | Topic track | Theme | Genre |

mod preference;
mod schedule;
mod session;
mod time_range;
mod time_slot;
mod venue;

pub use preference::{
    weekday_name, weekday_of, DayHalf, ParsePreferenceError, PreferenceMatch, TimePreference,
};
pub use schedule::{
    AutoScheduleResult, ScheduleAssignment, ScheduleStats, ScheduleWarning, ScoreBreakdown,
    UnassignedSession, NO_MATCHING_SLOT,
};
pub use session::{Session, SessionStatus};
pub use time_range::TimeRange;
pub use time_slot::TimeSlot;
pub use venue::Venue;
