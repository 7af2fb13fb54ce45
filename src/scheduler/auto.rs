//! Vote-priority greedy auto-scheduler.
//!
//! # Algorithm
//!
//! 1. Keep approved sessions without a slot; sort by votes (descending, stable).
//! 2. Keep non-break slots whose venue is known.
//! 3. For each session, score every free slot and take the strictly best one
//!    (first encountered wins ties).
//! 4. Commit the placement: the slot becomes occupied and the session's track
//!    is registered under the slot's time range, so later sessions see it.
//! 5. Sessions with no viable slot are reported as unassigned.
//!
//! # Complexity
//! O(s * t) where s=eligible sessions, t=eligible slots.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use super::scoring::{score_slot, PlacementState, SlotScore};
use crate::config::{SchedulerConfig, SlotTieBreak};
use crate::error::ConfigError;
use crate::models::{
    AutoScheduleResult, ScheduleAssignment, Session, TimeSlot, UnassignedSession, Venue,
    NO_MATCHING_SLOT,
};

/// Places sessions with the default configuration.
///
/// Shorthand for `AutoScheduler::new().schedule(sessions, slots, venues)`.
pub fn auto_schedule(
    sessions: &[Session],
    slots: &[TimeSlot],
    venues: &[Venue],
) -> AutoScheduleResult {
    AutoScheduler::new().schedule(sessions, slots, venues)
}

/// Vote-priority greedy scheduler.
///
/// Stateless between runs: all bookkeeping lives in one call to
/// [`schedule`](Self::schedule), so a scheduler can be shared freely.
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use event_schedule::models::{Session, TimeSlot, Venue};
/// use event_schedule::scheduler::AutoScheduler;
///
/// let start = Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap();
/// let end = Utc.with_ymd_and_hms(2025, 3, 10, 10, 0, 0).unwrap();
///
/// let sessions = vec![
///     Session::approved("S1").with_title("Popular").with_votes(50),
///     Session::approved("S2").with_title("Niche").with_votes(10),
/// ];
/// let slots = vec![TimeSlot::new("T1", start, end).with_venue("V1")];
/// let venues = vec![Venue::new("V1")];
///
/// let result = AutoScheduler::new().schedule(&sessions, &slots, &venues);
/// assert_eq!(result.assignments[0].session_id, "S1");
/// assert_eq!(result.unassigned[0].session_id, "S2");
/// ```
#[derive(Debug, Clone, Default)]
pub struct AutoScheduler {
    config: SchedulerConfig,
}

/// A slot paired with its hosting venue.
type Candidate<'a> = (&'a TimeSlot, &'a Venue);

impl AutoScheduler {
    /// Creates a scheduler with default weights and policies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the configuration without validating it.
    ///
    /// An out-of-range `comfortable_ratio` simply shifts the capacity bands.
    /// Use [`try_with_config`](Self::try_with_config) to reject it instead.
    pub fn with_config(mut self, config: SchedulerConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the configuration after [`SchedulerConfig::validate`] accepts it.
    pub fn try_with_config(self, config: SchedulerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(self.with_config(config))
    }

    /// Current configuration.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Places sessions into slots.
    ///
    /// Never fails: ineligible sessions and slots are skipped, and sessions
    /// without a viable slot end up in `unassigned`.
    pub fn schedule(
        &self,
        sessions: &[Session],
        slots: &[TimeSlot],
        venues: &[Venue],
    ) -> AutoScheduleResult {
        let queue = prioritize(sessions);
        let candidates = self.eligible_slots(slots, venues);
        let mut state = PlacementState::new(self.config.track_clash);

        let mut assignments = Vec::new();
        let mut unassigned = Vec::new();

        for session in queue {
            match self.best_slot(session, &candidates, &state) {
                Some((slot, venue, scored)) => {
                    state.occupy(slot, session.track_id.as_deref());
                    debug!(
                        session = %session.id,
                        slot = %slot.id,
                        venue = %venue.id,
                        score = scored.score,
                        warnings = scored.warnings.len(),
                        "placed session"
                    );
                    assignments.push(ScheduleAssignment {
                        session_id: session.id.clone(),
                        session_title: session.title.clone(),
                        slot_id: slot.id.clone(),
                        venue_id: venue.id.clone(),
                        score: scored.score,
                        breakdown: scored.breakdown,
                        warnings: scored.warnings.iter().map(ToString::to_string).collect(),
                    });
                }
                None => {
                    warn!(
                        session = %session.id,
                        votes = session.total_votes,
                        "no viable slot for session"
                    );
                    unassigned.push(UnassignedSession {
                        session_id: session.id.clone(),
                        session_title: session.title.clone(),
                        reason: NO_MATCHING_SLOT.to_string(),
                    });
                }
            }
        }

        let result = AutoScheduleResult::new(assignments, unassigned);
        info!(
            total = result.stats.total_sessions,
            assigned = result.stats.assigned,
            unassigned = result.stats.unassigned,
            average_score = result.stats.average_score,
            "auto-schedule complete"
        );
        result
    }

    /// Slots that may host a session, paired with their venue, in scoring order.
    fn eligible_slots<'a>(
        &self,
        slots: &'a [TimeSlot],
        venues: &'a [Venue],
    ) -> Vec<Candidate<'a>> {
        let mut by_id: HashMap<&str, &Venue> = HashMap::with_capacity(venues.len());
        for venue in venues {
            // First occurrence wins on duplicate IDs.
            by_id.entry(venue.id.as_str()).or_insert(venue);
        }

        let mut candidates: Vec<Candidate<'a>> = slots
            .iter()
            .filter(|slot| !slot.is_break)
            .filter_map(|slot| {
                let venue = by_id.get(slot.venue_id.as_deref()?)?;
                Some((slot, *venue))
            })
            .collect();

        if self.config.slot_tie_break == SlotTieBreak::EarliestStart {
            candidates.sort_by(|(a, _), (b, _)| {
                a.start_time.cmp(&b.start_time).then_with(|| a.id.cmp(&b.id))
            });
        }
        candidates
    }

    /// Highest-scoring free slot for `session`. Ties go to the earlier candidate.
    fn best_slot<'a>(
        &self,
        session: &Session,
        candidates: &[Candidate<'a>],
        state: &PlacementState,
    ) -> Option<(&'a TimeSlot, &'a Venue, SlotScore)> {
        let mut best: Option<(&'a TimeSlot, &'a Venue, SlotScore)> = None;

        for &(slot, venue) in candidates {
            let Some(scored) = score_slot(session, slot, venue, state, &self.config.weights) else {
                continue;
            };
            let better = best
                .as_ref()
                .map_or(true, |(_, _, current)| scored.score > current.score);
            if better {
                best = Some((slot, venue, scored));
            }
        }

        best
    }
}

/// Eligible sessions, highest votes first. Equal votes keep input order.
fn prioritize(sessions: &[Session]) -> Vec<&Session> {
    let mut queue: Vec<&Session> = sessions.iter().filter(|s| s.is_schedulable()).collect();
    queue.sort_by(|a, b| b.total_votes.cmp(&a.total_votes));
    queue
}
