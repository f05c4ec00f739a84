/// Analytics engine for per-habit statistics and store summaries
///
/// This module turns the store's streak and history queries into the
/// render-ready figures shown next to each habit and in the points header.

use serde::Serialize;

use crate::domain::{DayKey, DomainError, Habit, HabitId, HabitStore};

/// Statistics for one habit relative to a reference day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HabitStats {
    pub habit_id: HabitId,
    pub name: String,
    pub archived: bool,
    /// Consecutive completed days ending at the reference day
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_completions: u32,
}

/// Store-wide totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreSummary {
    pub active_habits: usize,
    pub archived_habits: usize,
    /// Days with at least one completion
    pub tracked_days: usize,
    pub points: u64,
}

/// Analytics engine for processing habit data
#[derive(Debug, Default, Clone, Copy)]
pub struct AnalyticsEngine;

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self
    }

    /// Statistics for a single habit
    pub fn habit_stats(
        &self,
        store: &HabitStore,
        habit_id: &HabitId,
        day: DayKey,
    ) -> Result<HabitStats, DomainError> {
        let habit = store.habit(habit_id).ok_or_else(|| DomainError::HabitNotFound {
            habit_id: habit_id.to_string(),
        })?;

        self.stats_for(store, habit, day)
    }

    /// Statistics for every habit, optionally including archived ones
    pub fn all_habit_stats(
        &self,
        store: &HabitStore,
        day: DayKey,
        include_archived: bool,
    ) -> Result<Vec<HabitStats>, DomainError> {
        store
            .list_all_habits()
            .iter()
            .filter(|h| include_archived || h.is_active())
            .map(|h| self.stats_for(store, h, day))
            .collect()
    }

    pub fn summary(&self, store: &HabitStore) -> StoreSummary {
        let all = store.list_all_habits();
        let active_habits = all.iter().filter(|h| h.is_active()).count();

        StoreSummary {
            active_habits,
            archived_habits: all.len() - active_habits,
            tracked_days: store
                .history()
                .values()
                .filter(|record| record.completed_count() > 0)
                .count(),
            points: store.total_points(),
        }
    }

    fn stats_for(&self, store: &HabitStore, habit: &Habit, day: DayKey) -> Result<HabitStats, DomainError> {
        Ok(HabitStats {
            habit_id: habit.id.clone(),
            name: habit.name.clone(),
            archived: habit.archived,
            current_streak: store.compute_streak(&habit.id, day)?,
            longest_streak: store.longest_streak(&habit.id)?,
            total_completions: store.total_completions(&habit.id)?,
        })
    }
}
