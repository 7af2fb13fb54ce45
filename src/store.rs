//! Preview and apply operations over a schedule store.
//!
//! The scheduler is a pure function; this module is the caller side that
//! reads an event's sessions, slots and venues from storage and writes
//! accepted placements back. Storage itself is abstracted behind
//! [`ScheduleStore`]; [`InMemoryStore`] is a map-backed implementation.
//!
//! # Apply semantics
//!
//! 1. Every referenced session and slot must belong to the event. A single
//!    foreign reference rejects the whole batch.
//! 2. Each placement is then checked and persisted on its own. A failing
//!    placement is itemized in the [`ApplyReport`] and does not stop the rest.
//! 3. Sessions that are no longer eligible (already scheduled, not approved)
//!    and slots already taken are refused, so applying twice is harmless.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{ApplyError, ApplyResult, StoreError, StoreResult};
use crate::models::{
    AutoScheduleResult, ScheduleAssignment, Session, SessionStatus, TimeSlot, Venue,
};
use crate::scheduler::AutoScheduler;

/// Scheduling inputs of one event (tenant scope).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSnapshot {
    pub sessions: Vec<Session>,
    pub time_slots: Vec<TimeSlot>,
    pub venues: Vec<Venue>,
}

/// One placement to persist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentRequest {
    pub session_id: String,
    pub slot_id: String,
    pub venue_id: String,
}

/// Outcome of an apply batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyReport {
    /// Placements persisted.
    pub applied: usize,
    /// Placements refused or failed in storage.
    pub failed: usize,
    /// One entry per failed placement, in request order.
    pub failures: Vec<AssignmentFailure>,
}

/// Why one placement was not applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentFailure {
    pub session_id: String,
    pub slot_id: String,
    pub message: String,
}

/// Storage backend holding events, sessions, slots and venues.
pub trait ScheduleStore {
    /// Loads the scheduling inputs of an event.
    fn load_event(&self, event_id: &str) -> StoreResult<EventSnapshot>;

    /// Marks a session as scheduled into the requested slot and venue.
    ///
    /// [`apply`] checks placements against a snapshot loaded beforehand, so
    /// a backend shared with other writers must write conditionally and
    /// refuse a session that is no longer unscheduled.
    fn persist_assignment(
        &mut self,
        event_id: &str,
        request: &AssignmentRequest,
    ) -> StoreResult<()>;
}

impl AssignmentRequest {
    /// Creates a request.
    pub fn new(
        session_id: impl Into<String>,
        slot_id: impl Into<String>,
        venue_id: impl Into<String>,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            slot_id: slot_id.into(),
            venue_id: venue_id.into(),
        }
    }
}

impl From<&ScheduleAssignment> for AssignmentRequest {
    fn from(assignment: &ScheduleAssignment) -> Self {
        Self::new(
            assignment.session_id.clone(),
            assignment.slot_id.clone(),
            assignment.venue_id.clone(),
        )
    }
}

impl ApplyReport {
    /// Whether every placement was applied.
    pub fn is_complete(&self) -> bool {
        self.failed == 0
    }
}

/// Runs the scheduler over an event's current data without writing anything.
pub fn preview<S>(
    store: &S,
    scheduler: &AutoScheduler,
    event_id: &str,
) -> StoreResult<AutoScheduleResult>
where
    S: ScheduleStore + ?Sized,
{
    let snapshot = store.load_event(event_id)?;
    debug!(
        event = event_id,
        sessions = snapshot.sessions.len(),
        slots = snapshot.time_slots.len(),
        venues = snapshot.venues.len(),
        "loaded event for schedule preview"
    );
    Ok(scheduler.schedule(&snapshot.sessions, &snapshot.time_slots, &snapshot.venues))
}

/// Persists placements for an event.
///
/// Fails as a whole only when the event cannot be loaded or a request
/// references a session or slot outside the event. Everything else is
/// reported per placement.
pub fn apply<S>(
    store: &mut S,
    event_id: &str,
    requests: &[AssignmentRequest],
) -> ApplyResult<ApplyReport>
where
    S: ScheduleStore + ?Sized,
{
    let snapshot = store.load_event(event_id)?;
    let sessions: HashMap<&str, &Session> = snapshot
        .sessions
        .iter()
        .map(|s| (s.id.as_str(), s))
        .collect();
    let slots: HashMap<&str, &TimeSlot> = snapshot
        .time_slots
        .iter()
        .map(|t| (t.id.as_str(), t))
        .collect();

    let foreign = foreign_references(requests, &sessions, &slots);
    if !foreign.is_empty() {
        warn!(
            event = event_id,
            count = foreign.len(),
            "rejecting schedule batch with foreign references"
        );
        return Err(ApplyError::OutOfScope {
            event_id: event_id.to_string(),
            references: foreign,
        });
    }

    let mut claimed_slots: HashSet<String> = snapshot
        .sessions
        .iter()
        .filter_map(|s| s.time_slot_id.clone())
        .collect();
    let mut placed_sessions: HashSet<String> = HashSet::new();
    let mut report = ApplyReport::default();

    for request in requests {
        // Both lookups succeed: foreign references were rejected above.
        let (Some(session), Some(slot)) = (
            sessions.get(request.session_id.as_str()),
            slots.get(request.slot_id.as_str()),
        ) else {
            continue;
        };

        let outcome = check_placement(request, session, slot, &claimed_slots, &placed_sessions)
            .and_then(|()| {
                store
                    .persist_assignment(event_id, request)
                    .map_err(|err| err.to_string())
            });

        match outcome {
            Ok(()) => {
                debug!(
                    event = event_id,
                    session = %request.session_id,
                    slot = %request.slot_id,
                    "applied placement"
                );
                claimed_slots.insert(request.slot_id.clone());
                placed_sessions.insert(request.session_id.clone());
                report.applied += 1;
            }
            Err(message) => {
                warn!(
                    event = event_id,
                    session = %request.session_id,
                    slot = %request.slot_id,
                    %message,
                    "placement not applied"
                );
                report.failed += 1;
                report.failures.push(AssignmentFailure {
                    session_id: request.session_id.clone(),
                    slot_id: request.slot_id.clone(),
                    message,
                });
            }
        }
    }

    info!(
        event = event_id,
        applied = report.applied,
        failed = report.failed,
        "schedule batch applied"
    );
    Ok(report)
}

fn foreign_references(
    requests: &[AssignmentRequest],
    sessions: &HashMap<&str, &Session>,
    slots: &HashMap<&str, &TimeSlot>,
) -> Vec<String> {
    let mut foreign = Vec::new();
    for request in requests {
        if !sessions.contains_key(request.session_id.as_str()) {
            foreign.push(format!("session '{}'", request.session_id));
        }
        if !slots.contains_key(request.slot_id.as_str()) {
            foreign.push(format!("slot '{}'", request.slot_id));
        }
    }
    foreign
}

fn check_placement(
    request: &AssignmentRequest,
    session: &Session,
    slot: &TimeSlot,
    claimed_slots: &HashSet<String>,
    placed_sessions: &HashSet<String>,
) -> Result<(), String> {
    if placed_sessions.contains(&session.id) {
        return Err(format!("session '{}' appears twice in this batch", session.id));
    }
    if session.time_slot_id.is_some() || session.status == SessionStatus::Scheduled {
        return Err(format!("session '{}' is already scheduled", session.id));
    }
    if session.status != SessionStatus::Approved {
        return Err(format!(
            "session '{}' is not approved (status: {})",
            session.id,
            session.status.as_str()
        ));
    }
    if slot.is_break {
        return Err(format!("slot '{}' is a break", slot.id));
    }
    if slot.venue_id.as_deref() != Some(request.venue_id.as_str()) {
        return Err(format!(
            "venue '{}' does not host slot '{}'",
            request.venue_id, slot.id
        ));
    }
    if claimed_slots.contains(&slot.id) {
        return Err(format!("slot '{}' is already taken", slot.id));
    }
    Ok(())
}

/// Map-backed [`ScheduleStore`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    events: HashMap<String, EventSnapshot>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an event.
    pub fn with_event(mut self, event_id: impl Into<String>, snapshot: EventSnapshot) -> Self {
        self.events.insert(event_id.into(), snapshot);
        self
    }

    /// Current data of an event.
    pub fn event(&self, event_id: &str) -> Option<&EventSnapshot> {
        self.events.get(event_id)
    }

    /// Looks up a session within an event.
    pub fn session(&self, event_id: &str, session_id: &str) -> Option<&Session> {
        self.event(event_id)?
            .sessions
            .iter()
            .find(|s| s.id == session_id)
    }
}

impl ScheduleStore for InMemoryStore {
    fn load_event(&self, event_id: &str) -> StoreResult<EventSnapshot> {
        self.events
            .get(event_id)
            .cloned()
            .ok_or_else(|| StoreError::EventNotFound(event_id.to_string()))
    }

    fn persist_assignment(
        &mut self,
        event_id: &str,
        request: &AssignmentRequest,
    ) -> StoreResult<()> {
        let event = self
            .events
            .get_mut(event_id)
            .ok_or_else(|| StoreError::EventNotFound(event_id.to_string()))?;

        if !event.time_slots.iter().any(|t| t.id == request.slot_id) {
            return Err(StoreError::SlotNotFound(request.slot_id.clone()));
        }
        let session = event
            .sessions
            .iter_mut()
            .find(|s| s.id == request.session_id)
            .ok_or_else(|| StoreError::SessionNotFound(request.session_id.clone()))?;
        if session.time_slot_id.is_some() {
            return Err(StoreError::AlreadyScheduled(request.session_id.clone()));
        }

        session.status = SessionStatus::Scheduled;
        session.time_slot_id = Some(request.slot_id.clone());
        session.venue_id = Some(request.venue_id.clone());
        Ok(())
    }
}
