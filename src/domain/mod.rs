/// Domain module containing the habit store and its data types
///
/// This module defines the core entities (Habit, DailyRecord, Snapshot) and the
/// HabitStore that mutates them and derives points, streaks and calendar data.
/// Nothing in here performs I/O.

pub mod habit;
pub mod record;
pub mod store;
pub mod streak;
pub mod calendar;
pub mod snapshot;
pub mod types;

// Re-export public types for easy access
pub use habit::*;
pub use record::*;
pub use store::*;
pub use calendar::*;
pub use snapshot::*;
pub use types::*;

use thiserror::Error;

/// Errors that can occur during domain operations
#[derive(Error, Debug)]
pub enum DomainError {
    /// Malformed snapshot, date key or argument
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Habit not found: {habit_id}")]
    HabitNotFound { habit_id: String },

    #[error("Points mismatch: stored {stored}, recomputed from history {recomputed}")]
    PointsMismatch { stored: u64, recomputed: u64 },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DomainError {
    /// Build a validation error from any message
    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation { message: message.into() }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, DomainError::Validation { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DomainError::HabitNotFound { .. })
    }
}
