//! Venue model.
//!
//! A venue is a room or stage that hosts time slots. Its capacity feeds the
//! capacity-fit term of slot scoring.

use serde::{Deserialize, Serialize};

/// A room or stage hosting time slots.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    /// Unique venue identifier.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Seats available. `None` = unknown or unlimited.
    #[serde(default)]
    pub capacity: Option<u32>,
    /// Flagship venue of the event.
    #[serde(default)]
    pub is_primary: bool,
}

impl Venue {
    /// Creates a secondary venue with unknown capacity.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            capacity: None,
            is_primary: false,
        }
    }

    /// Creates the flagship venue.
    pub fn primary(id: impl Into<String>) -> Self {
        Self::new(id).with_primary(true)
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the capacity.
    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Sets the flagship flag.
    pub fn with_primary(mut self, is_primary: bool) -> Self {
        self.is_primary = is_primary;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_venue_builder() {
        let v = Venue::primary("V1").with_name("Main Hall").with_capacity(400);
        assert_eq!(v.id, "V1");
        assert_eq!(v.name, "Main Hall");
        assert_eq!(v.capacity, Some(400));
        assert!(v.is_primary);

        let side = Venue::new("V2");
        assert!(!side.is_primary);
        assert!(side.capacity.is_none());
    }

    #[test]
    fn test_deserialize_null_capacity() {
        let v: Venue =
            serde_json::from_str(r#"{"id":"V1","name":"Room B","capacity":null,"isPrimary":false}"#)
                .unwrap();
        assert!(v.capacity.is_none());
    }
}
