/// Habit entity and name handling
///
/// This module defines the Habit struct that represents something the user
/// wants to do every day, along with the name normalization rules shared by
/// add, rename and snapshot loading.

use serde::{Deserialize, Serialize};
use crate::domain::HabitId;

/// A habit represents something the user wants to do regularly
///
/// History refers to habits only by `id`, so the name can change freely.
/// Once `archived` is set it is never cleared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    /// Unique identifier for this habit
    pub id: HabitId,
    /// Display name (e.g., "Morning Run", "Read for 30min")
    pub name: String,
    /// Hidden from the active list, still resolvable for history
    #[serde(default)]
    pub archived: bool,
}

impl Habit {
    /// Create a new active habit with a fresh id
    ///
    /// Returns `None` when the name is empty after trimming.
    pub fn new(name: &str) -> Option<Self> {
        let name = Self::normalize_name(name)?;

        Some(Self {
            id: HabitId::new(),
            name,
            archived: false,
        })
    }

    /// Create a habit from existing data (used when loading snapshots)
    pub fn from_existing(id: HabitId, name: String, archived: bool) -> Self {
        Self { id, name, archived }
    }

    pub fn is_active(&self) -> bool {
        !self.archived
    }

    /// Trim a candidate name, rejecting blank input
    pub fn normalize_name(name: &str) -> Option<String> {
        let trimmed = name.trim();

        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}
