//! Scheduler configuration.
//!
//! [`SchedulerConfig::default`] reproduces the standard scoring table and
//! policies. Deployments that want different weights can load a TOML
//! document; every key is optional and falls back to its default.
//!
//! ```
//! use event_schedule::config::{SchedulerConfig, TrackClashMode};
//!
//! let config = SchedulerConfig::from_toml_str(r#"
//!     track_clash = "overlap"
//!
//!     [weights]
//!     primary_venue_bonus = 4
//! "#).unwrap();
//!
//! assert_eq!(config.track_clash, TrackClashMode::Overlap);
//! assert_eq!(config.weights.primary_venue_bonus, 4);
//! assert_eq!(config.weights.duration_exact, 8);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level scheduler settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Points awarded per scoring term.
    pub weights: ScoringWeights,
    /// Which slot wins when two score equally.
    pub slot_tie_break: SlotTieBreak,
    /// What counts as two sessions of one track running at the same time.
    pub track_clash: TrackClashMode,
}

/// Points and thresholds for each scoring term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Slot length equals the requested duration.
    pub duration_exact: u32,
    /// Slot length within `duration_tolerance_minutes`.
    pub duration_near: u32,
    /// Any other slot length.
    pub duration_far: u32,
    pub duration_tolerance_minutes: u32,
    /// A preference names the slot's weekday and half of the day.
    pub preference_exact: u32,
    /// A preference names the slot's weekday only.
    pub preference_weekday: u32,
    /// Venue capacity unknown.
    pub capacity_unknown: u32,
    /// Attendance at or below `comfortable_ratio` of capacity.
    pub capacity_comfortable: u32,
    /// Attendance above the comfortable ratio but within capacity.
    pub capacity_tight: u32,
    pub comfortable_ratio: f64,
    /// Session's track not yet present in the slot's time range.
    pub track_distinct: u32,
    /// Session has no track.
    pub track_none: u32,
    /// Bonus for the flagship venue.
    pub primary_venue_bonus: u32,
    /// Votes a session needs (strictly more than) to earn the flagship bonus.
    pub primary_venue_min_votes: u32,
}

/// Tie-break between equally scored slots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotTieBreak {
    /// First slot in input order wins.
    #[default]
    InputOrder,
    /// Earliest start wins, then lowest slot ID.
    EarliestStart,
}

/// Track-diversity clash detection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackClashMode {
    /// Clash only when the `[start, end)` boundaries are identical.
    #[default]
    ExactRange,
    /// Clash whenever the ranges intersect.
    Overlap,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            duration_exact: 8,
            duration_near: 4,
            duration_far: 1,
            duration_tolerance_minutes: 15,
            preference_exact: 10,
            preference_weekday: 3,
            capacity_unknown: 2,
            capacity_comfortable: 5,
            capacity_tight: 3,
            comfortable_ratio: 0.7,
            track_distinct: 3,
            track_none: 1,
            primary_venue_bonus: 2,
            primary_venue_min_votes: 20,
        }
    }
}

impl SchedulerConfig {
    /// Parses a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings the scoring function cannot honour.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ratio = self.weights.comfortable_ratio;
        if !(ratio > 0.0 && ratio <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "comfortable_ratio must be in (0, 1], got {ratio}"
            )));
        }
        Ok(())
    }

    /// Sets the slot tie-break policy.
    pub fn with_slot_tie_break(mut self, tie_break: SlotTieBreak) -> Self {
        self.slot_tie_break = tie_break;
        self
    }

    /// Sets the track clash detection mode.
    pub fn with_track_clash(mut self, mode: TrackClashMode) -> Self {
        self.track_clash = mode;
        self
    }

    /// Sets the scoring weights.
    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.weights = weights;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        let config = SchedulerConfig::from_toml_str("").unwrap();
        assert_eq!(config, SchedulerConfig::default());
    }

    #[test]
    fn test_partial_weights() {
        let config = SchedulerConfig::from_toml_str(
            r#"
            slot_tie_break = "earliest_start"

            [weights]
            duration_exact = 12
            comfortable_ratio = 0.8
            "#,
        )
        .unwrap();

        assert_eq!(config.slot_tie_break, SlotTieBreak::EarliestStart);
        assert_eq!(config.track_clash, TrackClashMode::ExactRange);
        assert_eq!(config.weights.duration_exact, 12);
        assert_eq!(config.weights.duration_near, 4);
        assert!((config.weights.comfortable_ratio - 0.8).abs() < 1e-10);
    }

    #[test]
    fn test_invalid_ratio_rejected() {
        let err = SchedulerConfig::from_toml_str("[weights]\ncomfortable_ratio = 1.5").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_malformed_toml_rejected() {
        let err = SchedulerConfig::from_toml_str("track_clash = \"sometimes\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
