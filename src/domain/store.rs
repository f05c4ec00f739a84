/// The in-memory habit store
///
/// HabitStore owns the habit list, the day-keyed completion history and the
/// running points total. It performs no I/O: callers load it from a snapshot,
/// call its commands, and persist `snapshot()` afterwards.

use serde::Serialize;
use tracing::debug;

use crate::domain::{
    CompletionPolicy, DailyRecord, DayKey, DomainError, Habit, HabitId, History, Snapshot,
};

/// Points awarded for each completed (habit, day) pair
pub const POINTS_PER_COMPLETION: u64 = 10;

/// Display name used for history entries whose habit no longer exists
pub const DELETED_HABIT_NAME: &str = "(deleted habit)";

/// A completed habit as shown in the history view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryItem {
    pub habit_id: HabitId,
    pub name: String,
}

/// One day of the history view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryDay {
    pub date: DayKey,
    pub completed: Vec<HistoryItem>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HabitStore {
    pub(crate) habits: Vec<Habit>,
    pub(crate) history: History,
    pub(crate) points: u64,
    pub(crate) policy: CompletionPolicy,
}

impl HabitStore {
    /// An empty store using the default completion policy
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(mut self, policy: CompletionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> CompletionPolicy {
        self.policy
    }

    // Queries

    /// Non-archived habits in insertion order
    pub fn list_active_habits(&self) -> Vec<&Habit> {
        self.habits.iter().filter(|h| h.is_active()).collect()
    }

    /// Every habit, archived ones included
    pub fn list_all_habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn habit(&self, habit_id: &HabitId) -> Option<&Habit> {
        self.habits.iter().find(|h| &h.id == habit_id)
    }

    /// Current name for a habit id, resolved at call time
    pub fn habit_name(&self, habit_id: &HabitId) -> &str {
        self.habit(habit_id)
            .map(|h| h.name.as_str())
            .unwrap_or(DELETED_HABIT_NAME)
    }

    pub fn get_day_record(&self, day: DayKey) -> Option<&DailyRecord> {
        self.history.get(&day)
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn is_completed(&self, habit_id: &HabitId, day: DayKey) -> bool {
        self.history
            .get(&day)
            .map(|record| record.is_completed(habit_id))
            .unwrap_or(false)
    }

    /// Stored running total of points
    pub fn total_points(&self) -> u64 {
        self.points
    }

    /// Points derived from history: ten per completed flag
    pub fn recompute_points(&self) -> u64 {
        Self::points_for(&self.history)
    }

    /// Check the stored total against the history
    pub fn verify_points(&self) -> Result<(), DomainError> {
        let recomputed = self.recompute_points();

        if recomputed != self.points {
            return Err(DomainError::PointsMismatch {
                stored: self.points,
                recomputed,
            });
        }

        Ok(())
    }

    pub(crate) fn points_for(history: &History) -> u64 {
        history
            .values()
            .map(|record| record.completed_count() as u64)
            .sum::<u64>()
            * POINTS_PER_COMPLETION
    }

    /// Completed habits per day, newest first, names resolved by id
    ///
    /// Days with nothing completed are left out. `exclude` drops one day,
    /// typically the day currently shown in the checklist.
    pub fn history_days(&self, exclude: Option<DayKey>) -> Vec<HistoryDay> {
        self.history
            .iter()
            .rev()
            .filter(|(day, _)| Some(**day) != exclude)
            .filter_map(|(day, record)| {
                let completed: Vec<HistoryItem> = record
                    .completed_ids()
                    .map(|id| HistoryItem {
                        habit_id: id.clone(),
                        name: self.habit_name(id).to_string(),
                    })
                    .collect();

                if completed.is_empty() {
                    None
                } else {
                    Some(HistoryDay {
                        date: *day,
                        completed,
                    })
                }
            })
            .collect()
    }

    // Commands

    /// Append a new active habit
    ///
    /// A name that is empty after trimming is ignored and `None` is returned.
    pub fn add_habit(&mut self, name: &str) -> Option<Habit> {
        let mut habit = Habit::new(name)?;

        // Ids are random, but the store is the authority on uniqueness
        while self.habit(&habit.id).is_some() {
            habit.id = HabitId::new();
        }

        debug!("Added habit: {} ({})", habit.name, habit.id);
        self.habits.push(habit.clone());
        Some(habit)
    }

    /// Rename a habit in place
    ///
    /// Returns `Ok(false)` when the new name is blank and nothing changed.
    pub fn rename_habit(&mut self, habit_id: &HabitId, new_name: &str) -> Result<bool, DomainError> {
        let habit = self.habit_mut(habit_id)?;

        let Some(name) = Habit::normalize_name(new_name) else {
            return Ok(false);
        };

        debug!("Renamed habit {}: '{}' -> '{}'", habit_id, habit.name, name);
        habit.name = name;
        Ok(true)
    }

    /// Archive a habit, leaving history and points untouched
    ///
    /// Returns `Ok(false)` when the habit was already archived.
    pub fn archive_habit(&mut self, habit_id: &HabitId) -> Result<bool, DomainError> {
        let habit = self.habit_mut(habit_id)?;

        if habit.archived {
            return Ok(false);
        }

        habit.archived = true;
        debug!("Archived habit: {} ({})", habit.name, habit_id);
        Ok(true)
    }

    /// Flip a habit's completion for a day and return the new state
    ///
    /// Archived habits may still be toggled to correct past records.
    pub fn toggle_completion(&mut self, habit_id: &HabitId, day: DayKey) -> Result<bool, DomainError> {
        self.require_habit(habit_id)?;

        let completed = self.history.entry(day).or_default().toggle(habit_id);

        if completed {
            self.points += POINTS_PER_COMPLETION;
        } else {
            self.points = self.points.saturating_sub(POINTS_PER_COMPLETION);
        }

        debug!(
            "Toggled habit {} on {} -> {} (points: {})",
            habit_id, day, completed, self.points
        );
        Ok(completed)
    }

    /// Clear every habit, record and point
    pub fn reset_all(&mut self) {
        self.habits.clear();
        self.history.clear();
        self.points = 0;
        debug!("Reset habit store");
    }

    // Snapshots

    /// The persisted unit for this store
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            habits: self.habits.clone(),
            history: self.history.clone(),
            points: self.points,
        }
    }

    /// Build a store from an already validated snapshot
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            habits: snapshot.habits,
            history: snapshot.history,
            points: snapshot.points,
            policy: CompletionPolicy::default(),
        }
    }

    /// Validate a raw JSON snapshot and build a store from it
    pub fn load_snapshot(raw: &serde_json::Value) -> Result<Self, DomainError> {
        Snapshot::from_value(raw).map(Self::from_snapshot)
    }

    /// Pretty JSON with keys in the order habits, history, points
    pub fn export_snapshot(&self) -> Result<String, DomainError> {
        Ok(serde_json::to_string_pretty(&self.snapshot())?)
    }

    /// Replace the whole store with an imported snapshot
    ///
    /// On failure the current state is left exactly as it was.
    pub fn import_snapshot(&mut self, json: &str) -> Result<(), DomainError> {
        let raw: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| DomainError::validation(format!("Snapshot is not valid JSON: {}", e)))?;

        let loaded = Self::load_snapshot(&raw)?;
        let policy = self.policy;
        *self = loaded.with_policy(policy);

        debug!(
            "Imported snapshot: {} habits, {} days, {} points",
            self.habits.len(),
            self.history.len(),
            self.points
        );
        Ok(())
    }

    // Helpers

    pub(crate) fn require_habit(&self, habit_id: &HabitId) -> Result<&Habit, DomainError> {
        self.habit(habit_id).ok_or_else(|| DomainError::HabitNotFound {
            habit_id: habit_id.to_string(),
        })
    }

    fn habit_mut(&mut self, habit_id: &HabitId) -> Result<&mut Habit, DomainError> {
        self.habits
            .iter_mut()
            .find(|h| &h.id == habit_id)
            .ok_or_else(|| DomainError::HabitNotFound {
                habit_id: habit_id.to_string(),
            })
    }
}
