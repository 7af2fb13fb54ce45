//! Placement scoring.
//!
//! Scores one (session, slot, venue) triple as the unweighted sum of five
//! terms. With the default weights:
//!
//! | Term | Condition | Points |
//! |------|-----------|--------|
//! | Duration | exact / within 15 min / otherwise | 8 / 4 / 1 |
//! | Preference | weekday and half / weekday only / none | 10 / 3 / 0 |
//! | Capacity | unknown / ≤70% / ≤100% / over | 2 / 5 / 3 / 0 |
//! | Track | distinct in range / no track / clash | 3 / 1 / 0 |
//! | Primary venue | flagship and more than 20 votes | 2 |
//!
//! Occupied and break slots are ineligible and yield `None`.

use std::collections::{HashMap, HashSet};

use crate::config::{ScoringWeights, TrackClashMode};
use crate::models::{
    weekday_of, DayHalf, PreferenceMatch, ScheduleWarning, ScoreBreakdown, Session, TimePreference,
    TimeRange, TimeSlot, Venue,
};

/// Score of a viable placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotScore {
    /// Sum of all terms.
    pub score: u32,
    pub breakdown: ScoreBreakdown,
    /// Soft violations, in term order.
    pub warnings: Vec<ScheduleWarning>,
}

/// Bookkeeping of one scheduling run: occupied slots and the tracks placed
/// per time range.
///
/// Later sessions are scored against the placements of earlier ones.
#[derive(Debug, Clone, Default)]
pub struct PlacementState {
    occupied_slots: HashSet<String>,
    tracks_by_range: HashMap<TimeRange, HashSet<String>>,
    clash_mode: TrackClashMode,
}

impl PlacementState {
    /// Creates empty bookkeeping.
    pub fn new(clash_mode: TrackClashMode) -> Self {
        Self {
            clash_mode,
            ..Default::default()
        }
    }

    /// Whether a slot was taken earlier in this run.
    pub fn is_occupied(&self, slot_id: &str) -> bool {
        self.occupied_slots.contains(slot_id)
    }

    /// Whether `track_id` already runs in (or, in overlap mode, during) `range`.
    pub fn has_track_clash(&self, track_id: &str, range: &TimeRange) -> bool {
        match self.clash_mode {
            TrackClashMode::ExactRange => self
                .tracks_by_range
                .get(range)
                .is_some_and(|tracks| tracks.contains(track_id)),
            TrackClashMode::Overlap => self
                .tracks_by_range
                .iter()
                .any(|(placed, tracks)| placed.overlaps(range) && tracks.contains(track_id)),
        }
    }

    /// Records a committed placement.
    pub fn occupy(&mut self, slot: &TimeSlot, track_id: Option<&str>) {
        self.occupied_slots.insert(slot.id.clone());
        if let Some(track_id) = track_id {
            self.tracks_by_range
                .entry(slot.range())
                .or_default()
                .insert(track_id.to_string());
        }
    }

    /// Number of slots taken so far.
    pub fn occupied_count(&self) -> usize {
        self.occupied_slots.len()
    }
}

/// Scores placing `session` into `slot` hosted by `venue`.
///
/// Returns `None` when the slot is a break or already occupied in this run.
pub fn score_slot(
    session: &Session,
    slot: &TimeSlot,
    venue: &Venue,
    state: &PlacementState,
    weights: &ScoringWeights,
) -> Option<SlotScore> {
    if slot.is_break || state.is_occupied(&slot.id) {
        return None;
    }

    let mut warnings = Vec::new();
    let mut push = |(points, warning): (u32, Option<ScheduleWarning>)| {
        warnings.extend(warning);
        points
    };

    let breakdown = ScoreBreakdown {
        duration: push(duration_term(session, slot, weights)),
        preference: preference_term(session, slot, weights),
        capacity: push(capacity_term(session, venue, weights)),
        track: push(track_term(session, slot, state, weights)),
        primary_venue: primary_venue_term(session, venue, weights),
    };

    Some(SlotScore {
        score: breakdown.total(),
        breakdown,
        warnings,
    })
}

fn duration_term(
    session: &Session,
    slot: &TimeSlot,
    weights: &ScoringWeights,
) -> (u32, Option<ScheduleWarning>) {
    // Exact fit is judged to the second.
    let diff_secs = (slot.duration_seconds() - i64::from(session.duration) * 60).abs();
    if diff_secs == 0 {
        return (weights.duration_exact, None);
    }

    let warning = ScheduleWarning::DurationMismatch {
        session_minutes: session.duration,
        slot_minutes: slot.duration_minutes(),
    };
    if diff_secs <= i64::from(weights.duration_tolerance_minutes) * 60 {
        (weights.duration_near, Some(warning))
    } else {
        (weights.duration_far, Some(warning))
    }
}

/// Weekday comes from the slot's day label, the half of day from the UTC
/// hour of its start.
fn preference_term(session: &Session, slot: &TimeSlot, weights: &ScoringWeights) -> u32 {
    let Some(day_date) = slot.day_date else {
        return 0;
    };
    if session.time_preferences.is_empty() {
        return 0;
    }

    let preferences = session.preferences();
    let half = DayHalf::of(slot.start_time);
    match TimePreference::best_match(&preferences, weekday_of(day_date), half) {
        PreferenceMatch::Exact => weights.preference_exact,
        PreferenceMatch::Weekday => weights.preference_weekday,
        PreferenceMatch::None => 0,
    }
}

/// Vote count stands in for expected attendance.
fn capacity_term(
    session: &Session,
    venue: &Venue,
    weights: &ScoringWeights,
) -> (u32, Option<ScheduleWarning>) {
    let Some(capacity) = venue.capacity else {
        return (weights.capacity_unknown, None);
    };

    let expected = session.total_votes;
    if f64::from(expected) <= weights.comfortable_ratio * f64::from(capacity) {
        (weights.capacity_comfortable, None)
    } else if expected <= capacity {
        (weights.capacity_tight, None)
    } else {
        (
            0,
            Some(ScheduleWarning::CapacityExceeded { expected, capacity }),
        )
    }
}

fn track_term(
    session: &Session,
    slot: &TimeSlot,
    state: &PlacementState,
    weights: &ScoringWeights,
) -> (u32, Option<ScheduleWarning>) {
    let Some(track_id) = session.track_id.as_deref() else {
        return (weights.track_none, None);
    };

    if state.has_track_clash(track_id, &slot.range()) {
        (
            0,
            Some(ScheduleWarning::TrackClash {
                track_id: track_id.to_string(),
            }),
        )
    } else {
        (weights.track_distinct, None)
    }
}

fn primary_venue_term(session: &Session, venue: &Venue, weights: &ScoringWeights) -> u32 {
    if venue.is_primary && session.total_votes > weights.primary_venue_min_votes {
        weights.primary_venue_bonus
    } else {
        0
    }
}
