//! Session (talk, workshop, panel) model.
//!
//! A session is a community-submitted proposal that has been voted on.
//! Only approved sessions without a slot are candidates for auto-scheduling.

use serde::{Deserialize, Serialize};

use super::TimePreference;

/// Review state of a session proposal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// Submitted, awaiting review.
    #[default]
    Pending,
    /// Accepted; may be placed on the schedule.
    Approved,
    /// Declined.
    Rejected,
    /// Placed in a time slot.
    Scheduled,
}

impl SessionStatus {
    /// Wire name of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Scheduled => "scheduled",
        }
    }
}

/// A session awaiting (or holding) a place on the schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Unique session identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Requested length in minutes.
    pub duration: u32,
    /// Community vote count. Doubles as expected attendance.
    #[serde(default)]
    pub total_votes: u32,
    /// Review state.
    #[serde(default)]
    pub status: SessionStatus,
    /// Slot the session is already placed in, if any.
    #[serde(default)]
    pub time_slot_id: Option<String>,
    /// Venue the session is already placed in, if any.
    #[serde(default)]
    pub venue_id: Option<String>,
    /// Thematic track.
    #[serde(default)]
    pub track_id: Option<String>,
    /// Host preference tags such as `"tuesday_am"`.
    #[serde(default)]
    pub time_preferences: Vec<String>,
}

impl Session {
    /// Creates a pending session with the given ID and a 60 minute duration.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            duration: 60,
            total_votes: 0,
            status: SessionStatus::Pending,
            time_slot_id: None,
            venue_id: None,
            track_id: None,
            time_preferences: Vec::new(),
        }
    }

    /// Creates an approved, unscheduled session.
    pub fn approved(id: impl Into<String>) -> Self {
        Self::new(id).with_status(SessionStatus::Approved)
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the requested duration in minutes.
    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.duration = minutes;
        self
    }

    /// Sets the vote count.
    pub fn with_votes(mut self, votes: u32) -> Self {
        self.total_votes = votes;
        self
    }

    /// Sets the review state.
    pub fn with_status(mut self, status: SessionStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the track.
    pub fn with_track(mut self, track_id: impl Into<String>) -> Self {
        self.track_id = Some(track_id.into());
        self
    }

    /// Adds a time preference tag.
    pub fn with_preference(mut self, tag: impl Into<String>) -> Self {
        self.time_preferences.push(tag.into());
        self
    }

    /// Marks the session as already placed.
    pub fn with_placement(
        mut self,
        slot_id: impl Into<String>,
        venue_id: impl Into<String>,
    ) -> Self {
        self.time_slot_id = Some(slot_id.into());
        self.venue_id = Some(venue_id.into());
        self
    }

    /// Whether the auto-scheduler may place this session.
    ///
    /// Requires `Approved` status and no existing slot.
    pub fn is_schedulable(&self) -> bool {
        self.status == SessionStatus::Approved && self.time_slot_id.is_none()
    }

    /// Display label: the title, or the ID when untitled.
    pub fn label(&self) -> &str {
        if self.title.is_empty() {
            &self.id
        } else {
            &self.title
        }
    }

    /// Parsed time preferences. Malformed tags are skipped.
    pub fn preferences(&self) -> Vec<TimePreference> {
        TimePreference::parse_all(&self.time_preferences)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_builder() {
        let s = Session::approved("S1")
            .with_title("Rust in Production")
            .with_duration(45)
            .with_votes(32)
            .with_track("systems")
            .with_preference("monday_am");

        assert_eq!(s.id, "S1");
        assert_eq!(s.title, "Rust in Production");
        assert_eq!(s.duration, 45);
        assert_eq!(s.total_votes, 32);
        assert_eq!(s.status, SessionStatus::Approved);
        assert_eq!(s.track_id.as_deref(), Some("systems"));
        assert_eq!(s.preferences().len(), 1);
    }

    #[test]
    fn test_schedulable() {
        assert!(Session::approved("S1").is_schedulable());
        assert!(!Session::new("S2").is_schedulable());
        assert!(!Session::approved("S3")
            .with_status(SessionStatus::Rejected)
            .is_schedulable());
        assert!(!Session::approved("S4")
            .with_placement("T1", "V1")
            .is_schedulable());
    }

    #[test]
    fn test_label_falls_back_to_id() {
        assert_eq!(Session::new("S1").label(), "S1");
        assert_eq!(Session::new("S1").with_title("Keynote").label(), "Keynote");
    }

    #[test]
    fn test_deserialize_camel_case() {
        let json = r#"{
            "id": "S1",
            "title": "Intro",
            "duration": 30,
            "totalVotes": 12,
            "status": "approved",
            "timeSlotId": null,
            "trackId": "web",
            "timePreferences": ["friday_pm"]
        }"#;
        let s: Session = serde_json::from_str(json).unwrap();
        assert_eq!(s.total_votes, 12);
        assert_eq!(s.status, SessionStatus::Approved);
        assert_eq!(s.track_id.as_deref(), Some("web"));
        assert!(s.venue_id.is_none());
        assert!(s.is_schedulable());
    }
}
