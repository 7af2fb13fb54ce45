//! Schedule quality metrics (KPIs).
//!
//! Summarizes how well an auto-schedule result honours the soft
//! constraints, beyond the bare counters in
//! [`ScheduleStats`](crate::models::ScheduleStats).
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Assignment Rate | assigned / eligible sessions |
//! | Preference Hit Rate | exact weekday and half matches, among sessions with preferences |
//! | Warning Count | soft violations across all placements |
//! | Slot Utilization | occupied / eligible slots, per venue |

use std::collections::HashMap;

use crate::models::{
    weekday_of, AutoScheduleResult, DayHalf, PreferenceMatch, Session, TimePreference, TimeSlot,
    Venue,
};

/// Auto-schedule quality indicators.
#[derive(Debug, Clone)]
pub struct ScheduleKpi {
    /// Fraction of eligible sessions placed (0.0..1.0). 1.0 when none were eligible.
    pub assignment_rate: f64,
    /// Fraction of placed sessions with preferences whose slot matched exactly.
    /// 1.0 when no placed session stated preferences.
    pub preference_hit_rate: f64,
    /// Total soft constraint warnings.
    pub warning_count: usize,
    /// Placements that triggered at least one warning.
    pub assignments_with_warnings: usize,
    /// Per-venue fraction of eligible slots that received a session.
    pub slot_utilization_by_venue: HashMap<String, f64>,
    /// Mean assignment score.
    pub average_score: f64,
}

impl ScheduleKpi {
    /// Computes KPIs from a result and the inputs that produced it.
    pub fn calculate(
        result: &AutoScheduleResult,
        sessions: &[Session],
        slots: &[TimeSlot],
        venues: &[Venue],
    ) -> Self {
        let stats = &result.stats;
        let assignment_rate = if stats.total_sessions == 0 {
            1.0
        } else {
            stats.assigned as f64 / stats.total_sessions as f64
        };

        let sessions_by_id: HashMap<&str, &Session> =
            sessions.iter().map(|s| (s.id.as_str(), s)).collect();
        let slots_by_id: HashMap<&str, &TimeSlot> =
            slots.iter().map(|t| (t.id.as_str(), t)).collect();

        let mut with_preferences = 0usize;
        let mut hits = 0usize;
        for assignment in &result.assignments {
            let (Some(session), Some(slot)) = (
                sessions_by_id.get(assignment.session_id.as_str()),
                slots_by_id.get(assignment.slot_id.as_str()),
            ) else {
                continue;
            };
            let preferences = session.preferences();
            if preferences.is_empty() {
                continue;
            }
            with_preferences += 1;
            if preference_match(&preferences, slot) == PreferenceMatch::Exact {
                hits += 1;
            }
        }
        let preference_hit_rate = if with_preferences == 0 {
            1.0
        } else {
            hits as f64 / with_preferences as f64
        };

        let warning_count = result.warning_count();
        let assignments_with_warnings = result
            .assignments
            .iter()
            .filter(|a| !a.warnings.is_empty())
            .count();

        Self {
            assignment_rate,
            preference_hit_rate,
            warning_count,
            assignments_with_warnings,
            slot_utilization_by_venue: slot_utilization(result, slots, venues),
            average_score: stats.average_score,
        }
    }

    /// Whether the result meets the given quality thresholds.
    pub fn meets_thresholds(&self, min_assignment_rate: f64, max_warnings: usize) -> bool {
        self.assignment_rate >= min_assignment_rate && self.warning_count <= max_warnings
    }
}

fn preference_match(preferences: &[TimePreference], slot: &TimeSlot) -> PreferenceMatch {
    match slot.day_date {
        Some(day) => {
            TimePreference::best_match(preferences, weekday_of(day), DayHalf::of(slot.start_time))
        }
        None => PreferenceMatch::None,
    }
}

/// Only venues with at least one eligible slot are reported.
fn slot_utilization(
    result: &AutoScheduleResult,
    slots: &[TimeSlot],
    venues: &[Venue],
) -> HashMap<String, f64> {
    let mut available: HashMap<&str, usize> = HashMap::new();
    for slot in slots.iter().filter(|t| !t.is_break) {
        if let Some(venue_id) = slot.venue_id.as_deref() {
            if venues.iter().any(|v| v.id == venue_id) {
                *available.entry(venue_id).or_insert(0) += 1;
            }
        }
    }

    let mut used: HashMap<&str, usize> = HashMap::new();
    for assignment in &result.assignments {
        *used.entry(assignment.venue_id.as_str()).or_insert(0) += 1;
    }

    available
        .into_iter()
        .map(|(venue_id, total)| {
            let busy = used.get(venue_id).copied().unwrap_or(0);
            (venue_id.to_string(), busy as f64 / total as f64)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::auto_schedule;
    use chrono::{Duration, NaiveDate, TimeZone, Utc};

    fn make_slot(id: &str, venue_id: &str, hour: u32) -> TimeSlot {
        let start = Utc.with_ymd_and_hms(2025, 3, 10, hour, 0, 0).unwrap();
        TimeSlot::new(id, start, start + Duration::minutes(60))
            .with_venue(venue_id)
            .with_day(NaiveDate::from_ymd_opt(2025, 3, 10).unwrap())
    }

    #[test]
    fn test_kpi_basic() {
        let sessions = vec![
            Session::approved("S1").with_votes(30).with_preference("monday_am"),
            Session::approved("S2").with_votes(20).with_preference("monday_pm"),
            Session::approved("S3").with_votes(10),
        ];
        let slots = vec![
            make_slot("T1", "V1", 9),
            make_slot("T2", "V1", 10),
            make_slot("T3", "V2", 9),
            make_slot("T4", "V2", 10),
        ];
        let venues = vec![Venue::new("V1"), Venue::new("V2")];

        let result = auto_schedule(&sessions, &slots, &venues);
        let kpi = ScheduleKpi::calculate(&result, &sessions, &slots, &venues);

        assert!((kpi.assignment_rate - 1.0).abs() < 1e-10);
        // S2 wants the afternoon but only mornings exist.
        assert!((kpi.preference_hit_rate - 0.5).abs() < 1e-10);
        assert_eq!(kpi.warning_count, 0);
        assert_eq!(kpi.assignments_with_warnings, 0);

        let total_util: f64 = kpi.slot_utilization_by_venue.values().sum();
        assert!((total_util - 1.5).abs() < 1e-10); // 3 of 4 slots across 2 venues
    }

    #[test]
    fn test_kpi_warnings_and_shortfall() {
        let sessions = vec![
            Session::approved("S1").with_votes(80),
            Session::approved("S2").with_votes(5),
        ];
        let slots = vec![make_slot("T1", "V1", 9)];
        let venues = vec![Venue::new("V1").with_capacity(40)];

        let result = auto_schedule(&sessions, &slots, &venues);
        let kpi = ScheduleKpi::calculate(&result, &sessions, &slots, &venues);

        assert!((kpi.assignment_rate - 0.5).abs() < 1e-10);
        assert_eq!(kpi.warning_count, 1); // capacity overrun
        assert_eq!(kpi.assignments_with_warnings, 1);
        assert!((kpi.slot_utilization_by_venue["V1"] - 1.0).abs() < 1e-10);
        assert!(!kpi.meets_thresholds(0.9, 0));
        assert!(kpi.meets_thresholds(0.5, 1));
    }

    #[test]
    fn test_kpi_empty() {
        let result = auto_schedule(&[], &[], &[]);
        let kpi = ScheduleKpi::calculate(&result, &[], &[], &[]);
        assert!((kpi.assignment_rate - 1.0).abs() < 1e-10);
        assert!((kpi.preference_hit_rate - 1.0).abs() < 1e-10);
        assert!(kpi.slot_utilization_by_venue.is_empty());
        assert!((kpi.average_score - 0.0).abs() < 1e-10);
    }
}
