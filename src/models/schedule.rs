//! Auto-schedule result model.
//!
//! The scheduler produces an [`AutoScheduleResult`]: the placements it
//! committed, the eligible sessions it could not place, and summary stats.
//! The result is advisory; persisting it is the caller's job.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Reason recorded for every eligible session that found no slot.
pub const NO_MATCHING_SLOT: &str = "No available slots match session requirements";

/// Outcome of one auto-scheduling run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoScheduleResult {
    /// Committed placements, in priority order.
    pub assignments: Vec<ScheduleAssignment>,
    /// Eligible sessions left without a slot, in priority order.
    pub unassigned: Vec<UnassignedSession>,
    /// Summary counters.
    pub stats: ScheduleStats,
}

/// A session placed into a (slot, venue) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleAssignment {
    pub session_id: String,
    pub session_title: String,
    pub slot_id: String,
    pub venue_id: String,
    /// Total placement score.
    pub score: u32,
    /// Per-term contributions to `score`.
    pub breakdown: ScoreBreakdown,
    /// Soft constraint violations that did not block the placement.
    pub warnings: Vec<String>,
}

/// An eligible session the scheduler could not place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnassignedSession {
    pub session_id: String,
    pub session_title: String,
    pub reason: String,
}

/// Summary counters of a run.
///
/// `total_sessions` counts eligible sessions only, so
/// `assigned + unassigned == total_sessions` always holds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleStats {
    pub total_sessions: usize,
    pub assigned: usize,
    pub unassigned: usize,
    /// Mean assignment score, rounded to 2 decimals. 0 when nothing was placed.
    pub average_score: f64,
}

/// Score contributions of one (session, slot, venue) triple.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub duration: u32,
    pub preference: u32,
    pub capacity: u32,
    pub track: u32,
    pub primary_venue: u32,
}

/// A soft constraint violation on a committed placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleWarning {
    /// Slot length differs from the requested duration.
    DurationMismatch { session_minutes: u32, slot_minutes: i64 },
    /// Expected attendance exceeds the venue's seats.
    CapacityExceeded { expected: u32, capacity: u32 },
    /// Another session of the same track already runs in this time range.
    TrackClash { track_id: String },
}

impl ScoreBreakdown {
    /// Sum of all terms, saturating at `u32::MAX`.
    pub fn total(&self) -> u32 {
        [self.preference, self.capacity, self.track, self.primary_venue]
            .into_iter()
            .fold(self.duration, u32::saturating_add)
    }
}

impl fmt::Display for ScheduleWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DurationMismatch {
                session_minutes,
                slot_minutes,
            } => write!(
                f,
                "Duration mismatch: session is {session_minutes} min, slot is {slot_minutes} min"
            ),
            Self::CapacityExceeded { expected, capacity } => write!(
                f,
                "Capacity exceeded: {expected} expected attendees, venue holds {capacity}"
            ),
            Self::TrackClash { track_id } => write!(
                f,
                "Track clash: another '{track_id}' session is already scheduled at this time"
            ),
        }
    }
}

impl ScheduleStats {
    /// Computes stats from a run's assignments and unassigned count.
    pub fn from_outcome(assignments: &[ScheduleAssignment], unassigned: usize) -> Self {
        let assigned = assignments.len();
        let average_score = if assigned == 0 {
            0.0
        } else {
            let sum: u64 = assignments.iter().map(|a| u64::from(a.score)).sum();
            round2(sum as f64 / assigned as f64)
        };

        Self {
            total_sessions: assigned + unassigned,
            assigned,
            unassigned,
            average_score,
        }
    }
}

impl AutoScheduleResult {
    /// Assembles a result, computing its stats.
    pub fn new(assignments: Vec<ScheduleAssignment>, unassigned: Vec<UnassignedSession>) -> Self {
        let stats = ScheduleStats::from_outcome(&assignments, unassigned.len());
        Self {
            assignments,
            unassigned,
            stats,
        }
    }

    /// Finds the assignment for a session.
    pub fn assignment_for_session(&self, session_id: &str) -> Option<&ScheduleAssignment> {
        self.assignments.iter().find(|a| a.session_id == session_id)
    }

    /// Finds the assignment occupying a slot.
    pub fn assignment_for_slot(&self, slot_id: &str) -> Option<&ScheduleAssignment> {
        self.assignments.iter().find(|a| a.slot_id == slot_id)
    }

    /// Whether a session ended up unassigned.
    pub fn is_unassigned(&self, session_id: &str) -> bool {
        self.unassigned.iter().any(|u| u.session_id == session_id)
    }

    /// Total number of warnings across all assignments.
    pub fn warning_count(&self) -> usize {
        self.assignments.iter().map(|a| a.warnings.len()).sum()
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assignment(session_id: &str, slot_id: &str, score: u32) -> ScheduleAssignment {
        ScheduleAssignment {
            session_id: session_id.into(),
            session_title: session_id.into(),
            slot_id: slot_id.into(),
            venue_id: "V1".into(),
            score,
            breakdown: ScoreBreakdown::default(),
            warnings: Vec::new(),
        }
    }

    #[test]
    fn test_stats_average_rounded() {
        let assignments = vec![
            assignment("S1", "T1", 10),
            assignment("S2", "T2", 11),
            assignment("S3", "T3", 11),
        ];
        let stats = ScheduleStats::from_outcome(&assignments, 2);
        assert_eq!(stats.total_sessions, 5);
        assert_eq!(stats.assigned, 3);
        assert_eq!(stats.unassigned, 2);
        assert!((stats.average_score - 10.67).abs() < 1e-10);
    }

    #[test]
    fn test_stats_empty() {
        let stats = ScheduleStats::from_outcome(&[], 0);
        assert_eq!(stats, ScheduleStats::default());
        assert!((stats.average_score - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_breakdown_total() {
        let b = ScoreBreakdown {
            duration: 8,
            preference: 10,
            capacity: 2,
            track: 1,
            primary_venue: 0,
        };
        assert_eq!(b.total(), 21);

        let huge = ScoreBreakdown {
            duration: u32::MAX,
            track: 3,
            ..ScoreBreakdown::default()
        };
        assert_eq!(huge.total(), u32::MAX);
    }

    #[test]
    fn test_result_lookups() {
        let result = AutoScheduleResult::new(
            vec![assignment("S1", "T1", 20)],
            vec![UnassignedSession {
                session_id: "S2".into(),
                session_title: "S2".into(),
                reason: NO_MATCHING_SLOT.into(),
            }],
        );
        assert_eq!(result.assignment_for_session("S1").unwrap().slot_id, "T1");
        assert_eq!(result.assignment_for_slot("T1").unwrap().session_id, "S1");
        assert!(result.is_unassigned("S2"));
        assert!(!result.is_unassigned("S1"));
        assert_eq!(result.warning_count(), 0);
    }

    #[test]
    fn test_warning_messages() {
        let w = ScheduleWarning::CapacityExceeded {
            expected: 100,
            capacity: 50,
        };
        let msg = w.to_string();
        assert!(msg.contains("100"));
        assert!(msg.contains("50"));

        let w = ScheduleWarning::DurationMismatch {
            session_minutes: 60,
            slot_minutes: 45,
        };
        assert!(w.to_string().contains("60 min"));
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let result = AutoScheduleResult::new(vec![assignment("S1", "T1", 21)], Vec::new());
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["assignments"][0]["sessionId"], "S1");
        assert_eq!(json["stats"]["totalSessions"], 1);
        assert_eq!(json["stats"]["averageScore"], 21.0);
    }
}
