//! Input validation for auto-scheduling.
//!
//! The scheduler tolerates messy input by skipping what it cannot use. Callers
//! that want to surface data problems instead run [`validate_input`] first.
//! Detects:
//! - Duplicate IDs
//! - Slots whose end is not after their start
//! - Slots referencing unknown venues
//! - Sessions requesting zero minutes
//! - Malformed time preference tags

use std::collections::HashSet;

use crate::models::{Session, TimePreference, TimeSlot, Venue};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities of one kind share the same ID.
    DuplicateId,
    /// A slot references a venue that doesn't exist.
    InvalidVenueReference,
    /// A slot ends at or before its start.
    InvalidTimeRange,
    /// A session requests a zero-length slot.
    ZeroDuration,
    /// A preference tag is not `<weekday>_am` / `<weekday>_pm`.
    MalformedPreference,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the inputs of an auto-scheduling run.
///
/// Checks:
/// 1. No duplicate session, slot or venue IDs
/// 2. Every slot ends after it starts
/// 3. Every slot venue reference points to an existing venue
/// 4. Every session requests a positive duration
/// 5. Every preference tag parses
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(
    sessions: &[Session],
    slots: &[TimeSlot],
    venues: &[Venue],
) -> ValidationResult {
    let mut errors = Vec::new();

    let mut venue_ids = HashSet::new();
    for v in venues {
        if !venue_ids.insert(v.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate venue ID: {}", v.id),
            ));
        }
    }

    let mut slot_ids = HashSet::new();
    for slot in slots {
        if !slot_ids.insert(slot.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate slot ID: {}", slot.id),
            ));
        }

        if !slot.range().is_well_formed() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidTimeRange,
                format!(
                    "Slot '{}' ends at {} which is not after its start {}",
                    slot.id, slot.end_time, slot.start_time
                ),
            ));
        }

        if let Some(venue_id) = slot.venue_id.as_deref() {
            if !venue_ids.contains(venue_id) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidVenueReference,
                    format!("Slot '{}' references unknown venue '{}'", slot.id, venue_id),
                ));
            }
        }
    }

    let mut session_ids = HashSet::new();
    for session in sessions {
        if !session_ids.insert(session.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate session ID: {}", session.id),
            ));
        }

        if session.duration == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroDuration,
                format!("Session '{}' has no duration", session.id),
            ));
        }

        for tag in &session.time_preferences {
            if let Err(err) = tag.parse::<TimePreference>() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::MalformedPreference,
                    format!("Session '{}': {err}", session.id),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, hour, 0, 0).unwrap()
    }

    fn sample_venues() -> Vec<Venue> {
        vec![
            Venue::primary("V1").with_name("Main Hall"),
            Venue::new("V2").with_name("Room B"),
        ]
    }

    fn sample_slots() -> Vec<TimeSlot> {
        vec![
            TimeSlot::new("T1", at(9), at(10)).with_venue("V1"),
            TimeSlot::new("T2", at(9), at(10)).with_venue("V2"),
            TimeSlot::new("lunch", at(12), at(13)).as_break(),
        ]
    }

    fn sample_sessions() -> Vec<Session> {
        vec![
            Session::approved("S1").with_preference("monday_am"),
            Session::approved("S2").with_duration(30),
        ]
    }

    #[test]
    fn test_valid_input() {
        assert!(validate_input(&sample_sessions(), &sample_slots(), &sample_venues()).is_ok());
    }

    #[test]
    fn test_duplicate_session_id() {
        let sessions = vec![Session::approved("S1"), Session::approved("S1")];
        let errors = validate_input(&sessions, &sample_slots(), &sample_venues()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("session")));
    }

    #[test]
    fn test_duplicate_venue_id() {
        let venues = vec![Venue::new("V1"), Venue::new("V1"), Venue::new("V2")];
        let errors = validate_input(&sample_sessions(), &sample_slots(), &venues).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("venue")));
    }

    #[test]
    fn test_inverted_slot() {
        let slots = vec![TimeSlot::new("T1", at(10), at(10)).with_venue("V1")];
        let errors = validate_input(&[], &slots, &sample_venues()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::InvalidTimeRange));
    }

    #[test]
    fn test_unknown_venue() {
        let slots = vec![TimeSlot::new("T1", at(9), at(10)).with_venue("NONEXISTENT")];
        let errors = validate_input(&[], &slots, &sample_venues()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::InvalidVenueReference));
    }

    #[test]
    fn test_zero_duration_and_bad_tag() {
        let sessions = vec![Session::approved("S1")
            .with_duration(0)
            .with_preference("someday_maybe")];
        let errors = validate_input(&sessions, &[], &[]).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::ZeroDuration));
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::MalformedPreference
                && e.message.contains("someday_maybe")));
    }

    #[test]
    fn test_multiple_errors() {
        let sessions = vec![Session::approved("S1").with_duration(0)];
        let slots = vec![TimeSlot::new("T1", at(11), at(10)).with_venue("V9")];
        let errors = validate_input(&sessions, &slots, &[]).unwrap_err();
        assert!(errors.len() >= 3);
    }
}
