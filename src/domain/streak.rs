/// Streak calculation over the completion history
///
/// A streak is the number of consecutive days, ending at a reference day,
/// on which a habit was marked done. Days are walked backwards one at a time
/// and the walk stops at the first day without a `true` flag.

use crate::domain::{DayKey, DomainError, HabitId, HabitStore};

impl HabitStore {
    /// Consecutive completed days ending at `day` (inclusive)
    ///
    /// The walk only continues across days with a recorded `true` flag, so it
    /// is bounded by the number of completions in the history.
    pub fn compute_streak(&self, habit_id: &HabitId, day: DayKey) -> Result<u32, DomainError> {
        self.require_habit(habit_id)?;

        let mut streak = 0;
        let mut checking = Some(day);

        while let Some(current) = checking {
            if !self.is_completed(habit_id, current) {
                break;
            }
            streak += 1;
            checking = current.pred();
        }

        Ok(streak)
    }

    /// Best run of consecutive completed days anywhere in the history
    pub fn longest_streak(&self, habit_id: &HabitId) -> Result<u32, DomainError> {
        self.require_habit(habit_id)?;

        let mut longest = 0;
        let mut current = 0;
        let mut last_day: Option<DayKey> = None;

        // History iterates oldest first
        for (day, record) in &self.history {
            if !record.is_completed(habit_id) {
                continue;
            }

            let consecutive = last_day.and_then(|d| d.succ()) == Some(*day);
            current = if consecutive { current + 1 } else { 1 };
            longest = longest.max(current);
            last_day = Some(*day);
        }

        Ok(longest)
    }

    /// Number of days the habit was marked done
    pub fn total_completions(&self, habit_id: &HabitId) -> Result<u32, DomainError> {
        self.require_habit(habit_id)?;

        Ok(self
            .history
            .values()
            .filter(|record| record.is_completed(habit_id))
            .count() as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> DayKey {
        DayKey::parse(s).unwrap()
    }

    #[test]
    fn test_three_day_streak() {
        let mut store = HabitStore::new();
        let habit = store.add_habit("Exercise").unwrap();
        for d in ["2025-03-01", "2025-03-02", "2025-03-03"] {
            store.toggle_completion(&habit.id, day(d)).unwrap();
        }

        assert_eq!(store.compute_streak(&habit.id, day("2025-03-03")).unwrap(), 3);
        assert_eq!(store.compute_streak(&habit.id, day("2025-03-02")).unwrap(), 2);
        assert_eq!(store.compute_streak(&habit.id, day("2025-03-04")).unwrap(), 0);
    }

    #[test]
    fn test_false_flag_breaks_streak() {
        let mut store = HabitStore::new();
        let habit = store.add_habit("Exercise").unwrap();
        store.toggle_completion(&habit.id, day("2025-03-01")).unwrap();
        // Toggled on then off: recorded as false
        store.toggle_completion(&habit.id, day("2025-03-02")).unwrap();
        store.toggle_completion(&habit.id, day("2025-03-02")).unwrap();
        store.toggle_completion(&habit.id, day("2025-03-03")).unwrap();

        assert_eq!(store.compute_streak(&habit.id, day("2025-03-03")).unwrap(), 1);
    }

    #[test]
    fn test_streak_crosses_month_and_year_boundaries() {
        let mut store = HabitStore::new();
        let habit = store.add_habit("Read").unwrap();
        for d in ["2024-12-30", "2024-12-31", "2025-01-01"] {
            store.toggle_completion(&habit.id, day(d)).unwrap();
        }

        assert_eq!(store.compute_streak(&habit.id, day("2025-01-01")).unwrap(), 3);
    }

    #[test]
    fn test_longest_streak_and_totals() {
        let mut store = HabitStore::new();
        let habit = store.add_habit("Read").unwrap();
        let other = store.add_habit("Walk").unwrap();
        for d in ["2025-01-01", "2025-01-02", "2025-01-05", "2025-01-06", "2025-01-07"] {
            store.toggle_completion(&habit.id, day(d)).unwrap();
        }
        store.toggle_completion(&other.id, day("2025-01-03")).unwrap();

        assert_eq!(store.longest_streak(&habit.id).unwrap(), 3);
        assert_eq!(store.total_completions(&habit.id).unwrap(), 5);
        assert_eq!(store.longest_streak(&other.id).unwrap(), 1);
    }

    #[test]
    fn test_streak_for_unknown_habit() {
        let store = HabitStore::new();
        let err = store.compute_streak(&HabitId::from("nope"), day("2025-01-01")).unwrap_err();
        assert!(err.is_not_found());
    }
}
