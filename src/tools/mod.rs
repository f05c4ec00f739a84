/// MCP tools for habit management
///
/// Each tool takes deserialized parameters, calls the habit tracker, and
/// returns a response with a human-readable message for the client.

pub mod create;
pub mod log;
pub mod status;
pub mod list;
pub mod calendar;
pub mod history;
pub mod update;
pub mod transfer;

// Re-export tool functions for easy access
pub use create::*;
pub use log::*;
pub use status::*;
pub use list::*;
pub use calendar::*;
pub use history::*;
pub use update::*;
pub use transfer::*;

use crate::domain::{DayKey, DomainError, HabitId};
use crate::ServerError;

/// Parse a habit id argument
pub(crate) fn parse_habit_id(raw: &str) -> Result<HabitId, ServerError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation("Habit ID cannot be empty").into());
    }
    Ok(HabitId::from(trimmed))
}

/// Parse an optional `YYYY-MM-DD` argument, defaulting to the local day
pub(crate) fn parse_day(raw: Option<&str>) -> Result<DayKey, ServerError> {
    match raw {
        Some(date) => Ok(DayKey::parse(date.trim())?),
        None => Ok(DayKey::today()),
    }
}

/// Destructive tools only run when the client explicitly confirms
pub(crate) fn require_confirmation(confirm: Option<bool>, action: &str) -> Result<(), ServerError> {
    if confirm == Some(true) {
        Ok(())
    } else {
        Err(DomainError::validation(format!(
            "{} is destructive; call again with \"confirm\": true",
            action
        ))
        .into())
    }
}
