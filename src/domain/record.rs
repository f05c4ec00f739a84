/// Per-day completion records
///
/// A DailyRecord maps habit ids to a completed flag for one calendar day.
/// Entries are created lazily on the first toggle and flipped afterwards,
/// so a `false` flag means "recorded, not done" rather than "absent".

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use crate::domain::{DayKey, HabitId};

/// Completion history keyed by calendar day, oldest first
pub type History = BTreeMap<DayKey, DailyRecord>;

/// Completion flags for every habit recorded on one day
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DailyRecord {
    flags: BTreeMap<HabitId, bool>,
}

impl DailyRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the habit was marked done (absent counts as not done)
    pub fn is_completed(&self, habit_id: &HabitId) -> bool {
        self.flags.get(habit_id).copied().unwrap_or(false)
    }

    /// The recorded flag, or `None` if the habit was never toggled that day
    pub fn get(&self, habit_id: &HabitId) -> Option<bool> {
        self.flags.get(habit_id).copied()
    }

    /// Flip the flag for a habit and return the new value
    pub fn toggle(&mut self, habit_id: &HabitId) -> bool {
        let flag = self.flags.entry(habit_id.clone()).or_insert(false);
        *flag = !*flag;
        *flag
    }

    pub fn set(&mut self, habit_id: HabitId, completed: bool) {
        self.flags.insert(habit_id, completed);
    }

    /// Number of habits marked done
    pub fn completed_count(&self) -> usize {
        self.flags.values().filter(|done| **done).count()
    }

    /// Number of habits with any entry
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&HabitId, bool)> {
        self.flags.iter().map(|(id, done)| (id, *done))
    }

    /// Ids of the habits marked done
    pub fn completed_ids(&self) -> impl Iterator<Item = &HabitId> {
        self.flags.iter().filter(|(_, done)| **done).map(|(id, _)| id)
    }
}

impl FromIterator<(HabitId, bool)> for DailyRecord {
    fn from_iter<T: IntoIterator<Item = (HabitId, bool)>>(iter: T) -> Self {
        Self {
            flags: iter.into_iter().collect(),
        }
    }
}
