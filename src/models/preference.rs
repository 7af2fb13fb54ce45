//! Host time preferences.
//!
//! A preference tag names a weekday and a half of the day, written
//! `"<weekday>_am"` or `"<weekday>_pm"` (e.g. `"tuesday_am"`). Weekday names
//! are the full English names; parsing is case-insensitive.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc, Weekday};
use serde::{Deserialize, Serialize};

/// Half of a day, split at noon UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayHalf {
    /// Before 12:00.
    Am,
    /// 12:00 and later.
    Pm,
}

impl DayHalf {
    /// Half of the day an instant falls in, judged by its UTC hour.
    pub fn of(instant: DateTime<Utc>) -> Self {
        if instant.hour() < 12 {
            Self::Am
        } else {
            Self::Pm
        }
    }

    /// Tag suffix (`"am"` / `"pm"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Am => "am",
            Self::Pm => "pm",
        }
    }
}

/// A parsed `"<weekday>_<am|pm>"` preference tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimePreference {
    pub weekday: Weekday,
    pub half: DayHalf,
}

/// How well a slot's (weekday, half) satisfies a set of preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PreferenceMatch {
    /// No tag names the slot's weekday.
    None,
    /// A tag names the weekday but the other half of the day.
    Weekday,
    /// A tag names both the weekday and the half of the day.
    Exact,
}

/// Error returned for a malformed preference tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time preference tag '{0}'")]
pub struct ParsePreferenceError(pub String);

impl TimePreference {
    /// Creates a preference.
    pub fn new(weekday: Weekday, half: DayHalf) -> Self {
        Self { weekday, half }
    }

    /// Parses every tag, silently skipping malformed ones.
    pub fn parse_all<S: AsRef<str>>(tags: &[S]) -> Vec<Self> {
        tags.iter()
            .filter_map(|tag| tag.as_ref().parse().ok())
            .collect()
    }

    /// Best match of `preferences` against a slot on `weekday` in `half`.
    pub fn best_match(preferences: &[Self], weekday: Weekday, half: DayHalf) -> PreferenceMatch {
        if preferences
            .iter()
            .any(|p| p.weekday == weekday && p.half == half)
        {
            PreferenceMatch::Exact
        } else if preferences.iter().any(|p| p.weekday == weekday) {
            PreferenceMatch::Weekday
        } else {
            PreferenceMatch::None
        }
    }
}

impl FromStr for TimePreference {
    type Err = ParsePreferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParsePreferenceError(s.to_string());
        let lower = s.trim().to_ascii_lowercase();
        let (day, half) = lower.rsplit_once('_').ok_or_else(err)?;
        let weekday = parse_weekday_name(day).ok_or_else(err)?;
        let half = match half {
            "am" => DayHalf::Am,
            "pm" => DayHalf::Pm,
            _ => return Err(err()),
        };
        Ok(Self { weekday, half })
    }
}

impl fmt::Display for TimePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", weekday_name(self.weekday), self.half.as_str())
    }
}

/// Lowercase English weekday name, as used in preference tags.
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

/// Weekday of a calendar date label.
pub fn weekday_of(date: NaiveDate) -> Weekday {
    date.weekday()
}

fn parse_weekday_name(name: &str) -> Option<Weekday> {
    let weekday = match name {
        "monday" => Weekday::Mon,
        "tuesday" => Weekday::Tue,
        "wednesday" => Weekday::Wed,
        "thursday" => Weekday::Thu,
        "friday" => Weekday::Fri,
        "saturday" => Weekday::Sat,
        "sunday" => Weekday::Sun,
        _ => return None,
    };
    Some(weekday)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_tags() {
        let p: TimePreference = "tuesday_am".parse().unwrap();
        assert_eq!(p, TimePreference::new(Weekday::Tue, DayHalf::Am));

        let p: TimePreference = "Friday_PM".parse().unwrap();
        assert_eq!(p, TimePreference::new(Weekday::Fri, DayHalf::Pm));
        assert_eq!(p.to_string(), "friday_pm");
    }

    #[test]
    fn test_parse_malformed() {
        assert!("tuesday".parse::<TimePreference>().is_err());
        assert!("tue_am".parse::<TimePreference>().is_err());
        assert!("monday_evening".parse::<TimePreference>().is_err());
        assert!("".parse::<TimePreference>().is_err());
    }

    #[test]
    fn test_parse_all_skips_malformed() {
        let prefs = TimePreference::parse_all(&["monday_am", "bogus", "sunday_pm"]);
        assert_eq!(prefs.len(), 2);
    }

    #[test]
    fn test_day_half_split_at_noon() {
        let morning = Utc.with_ymd_and_hms(2025, 3, 10, 11, 59, 0).unwrap();
        let noon = Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap();
        assert_eq!(DayHalf::of(morning), DayHalf::Am);
        assert_eq!(DayHalf::of(noon), DayHalf::Pm);
    }

    #[test]
    fn test_best_match() {
        let prefs = TimePreference::parse_all(&["monday_am", "wednesday_pm"]);
        assert_eq!(
            TimePreference::best_match(&prefs, Weekday::Mon, DayHalf::Am),
            PreferenceMatch::Exact
        );
        assert_eq!(
            TimePreference::best_match(&prefs, Weekday::Wed, DayHalf::Am),
            PreferenceMatch::Weekday
        );
        assert_eq!(
            TimePreference::best_match(&prefs, Weekday::Fri, DayHalf::Am),
            PreferenceMatch::None
        );
    }

    #[test]
    fn test_weekday_of_date() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(); // a Monday
        assert_eq!(weekday_name(weekday_of(date)), "monday");
    }
}
