//! Error types.
//!
//! The scheduler itself never fails: ineligible input is filtered and
//! unplaceable sessions are reported in the result. Errors exist only at the
//! edges, for configuration loading and for the store-backed preview/apply
//! operations.

use thiserror::Error;

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse scheduler config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid scheduler config: {0}")]
    Invalid(String),
}

/// Errors reported by a [`ScheduleStore`](crate::store::ScheduleStore).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("event not found: {0}")]
    EventNotFound(String),

    #[error("session not found: {0}")]
    SessionNotFound(String),

    #[error("time slot not found: {0}")]
    SlotNotFound(String),

    #[error("session already scheduled: {0}")]
    AlreadyScheduled(String),

    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Errors that reject a whole apply batch.
///
/// Per-assignment problems do not surface here; they are itemized in the
/// [`ApplyReport`](crate::store::ApplyReport).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplyError {
    #[error("references outside event '{event_id}': {}", .references.join(", "))]
    OutOfScope {
        event_id: String,
        references: Vec<String>,
    },

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

pub type StoreResult<T> = Result<T, StoreError>;
pub type ApplyResult<T> = Result<T, ApplyError>;
