/// Core types used throughout the domain layer
///
/// This module defines the identifier and date-key types that Habit, DailyRecord
/// and HabitStore are built on, plus the small enums used by calendar summaries.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::DomainError;

/// Unique identifier for a habit
///
/// Opaque and stable for the lifetime of the store. New habits get a UUID v4;
/// ids imported from older captures (timestamps, random strings) are kept as text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HabitId(String);

impl HabitId {
    /// Generate a new random habit ID
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for HabitId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for HabitId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for HabitId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for HabitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Calendar day used as the history key
///
/// Always derived from local calendar fields, so a day never shifts near
/// midnight the way a UTC-truncated timestamp would.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayKey(NaiveDate);

impl DayKey {
    pub const FORMAT: &'static str = "%Y-%m-%d";

    /// The current day in the local timezone
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Parse a strict `YYYY-MM-DD` key
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let bytes = value.as_bytes();
        let well_formed = bytes.len() == 10
            && bytes[4] == b'-'
            && bytes[7] == b'-'
            && bytes
                .iter()
                .enumerate()
                .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());

        if !well_formed {
            return Err(DomainError::validation(format!(
                "Invalid date key '{}', expected YYYY-MM-DD",
                value
            )));
        }

        NaiveDate::parse_from_str(value, Self::FORMAT)
            .map(Self)
            .map_err(|_| DomainError::validation(format!("Invalid calendar date '{}'", value)))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// The previous calendar day
    pub fn pred(&self) -> Option<Self> {
        self.0.pred_opt().map(Self)
    }

    /// The next calendar day
    pub fn succ(&self) -> Option<Self> {
        self.0.succ_opt().map(Self)
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

impl FromStr for DayKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Which habits count toward a day's denominator
///
/// Past days and the current day were counted differently across the habit
/// trackers this model unifies, so the choice is explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompletionPolicy {
    /// Every non-archived habit counts, whether or not it existed that day
    ActiveHabits,
    /// Only habits with an entry recorded for that day count
    RecordedHabits,
    /// Recorded habits for days before today, active habits from today on
    #[default]
    Hybrid,
}

impl CompletionPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompletionPolicy::ActiveHabits => "active",
            CompletionPolicy::RecordedHabits => "recorded",
            CompletionPolicy::Hybrid => "hybrid",
        }
    }
}

impl fmt::Display for CompletionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompletionPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(CompletionPolicy::ActiveHabits),
            "recorded" => Ok(CompletionPolicy::RecordedHabits),
            "hybrid" => Ok(CompletionPolicy::Hybrid),
            other => Err(DomainError::validation(format!(
                "Invalid completion policy '{}'. Valid options: active, recorded, hybrid",
                other
            ))),
        }
    }
}

/// Classification of a calendar cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayState {
    /// No habits in scope for the day
    Empty,
    /// Habits in scope but none done
    Pending,
    /// Some but not all habits done
    Partial,
    /// Every habit in scope done
    Complete,
}

impl DayState {
    pub fn classify(done: usize, total: usize) -> Self {
        if total == 0 {
            DayState::Empty
        } else if done == 0 {
            DayState::Pending
        } else if done >= total {
            DayState::Complete
        } else {
            DayState::Partial
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DayState::Empty => "empty",
            DayState::Pending => "pending",
            DayState::Partial => "partial",
            DayState::Complete => "complete",
        }
    }
}
