/// Behavioural tests for the HabitStore command and query surface
use habit_store::*;

fn day(s: &str) -> DayKey {
    DayKey::parse(s).expect("valid day key")
}

fn true_flags(store: &HabitStore) -> u64 {
    store
        .history()
        .values()
        .map(|record| record.completed_count() as u64)
        .sum()
}

#[cfg(test)]
mod store_property_tests {
    use super::*;

    #[test]
    fn test_points_follow_every_toggle() {
        let mut store = HabitStore::new();
        let a = store.add_habit("Exercise").unwrap();
        let b = store.add_habit("Read").unwrap();

        let steps = [
            (&a, "2025-01-01"),
            (&b, "2025-01-01"),
            (&a, "2025-01-02"),
            (&a, "2025-01-01"),
            (&b, "2025-01-03"),
            (&b, "2025-01-01"),
            (&a, "2025-01-01"),
        ];

        for (habit, date) in steps {
            store.toggle_completion(&habit.id, day(date)).unwrap();
            assert_eq!(store.total_points(), POINTS_PER_COMPLETION * true_flags(&store));
            assert!(store.verify_points().is_ok());
        }
    }

    #[test]
    fn test_double_toggle_restores_state() {
        let mut store = HabitStore::new();
        let habit = store.add_habit("Exercise").unwrap();
        store.toggle_completion(&habit.id, day("2025-01-02")).unwrap();

        let before_points = store.total_points();
        let before_flag = store.is_completed(&habit.id, day("2025-01-01"));

        store.toggle_completion(&habit.id, day("2025-01-01")).unwrap();
        store.toggle_completion(&habit.id, day("2025-01-01")).unwrap();

        assert_eq!(store.total_points(), before_points);
        assert_eq!(store.is_completed(&habit.id, day("2025-01-01")), before_flag);
    }

    #[test]
    fn test_rename_shows_in_history() {
        let mut store = HabitStore::new();
        let habit = store.add_habit("Exercise").unwrap();
        store.toggle_completion(&habit.id, day("2025-01-01")).unwrap();
        store.toggle_completion(&habit.id, day("2025-01-05")).unwrap();

        assert!(store.rename_habit(&habit.id, "Morning run").unwrap());

        for history_day in store.history_days(None) {
            assert_eq!(history_day.completed[0].name, "Morning run");
        }
    }

    #[test]
    fn test_archive_keeps_records() {
        let mut store = HabitStore::new();
        let habit = store.add_habit("Exercise").unwrap();
        store.toggle_completion(&habit.id, day("2025-01-01")).unwrap();
        let points = store.total_points();

        assert!(store.archive_habit(&habit.id).unwrap());

        assert!(store.get_day_record(day("2025-01-01")).unwrap().is_completed(&habit.id));
        assert!(store.list_active_habits().is_empty());
        assert_eq!(store.list_all_habits().len(), 1);
        assert_eq!(store.total_points(), points);

        // A second archive is a no-op
        assert!(!store.archive_habit(&habit.id).unwrap());
    }

    #[test]
    fn test_archived_habit_can_still_be_toggled() {
        let mut store = HabitStore::new();
        let habit = store.add_habit("Exercise").unwrap();
        store.archive_habit(&habit.id).unwrap();

        assert!(store.toggle_completion(&habit.id, day("2025-01-01")).unwrap());

        assert_eq!(store.total_points(), 10);
        assert!(store.verify_points().is_ok());
        assert!(store.is_completed(&habit.id, day("2025-01-01")));
        assert_eq!(store.compute_streak(&habit.id, day("2025-01-01")).unwrap(), 1);
        assert!(store.list_active_habits().is_empty());
        assert!(store.habit(&habit.id).unwrap().archived);
    }

    #[test]
    fn test_streaks() {
        let mut store = HabitStore::new();
        let habit = store.add_habit("Exercise").unwrap();
        for date in ["2025-03-08", "2025-03-09", "2025-03-10"] {
            store.toggle_completion(&habit.id, day(date)).unwrap();
        }
        assert_eq!(store.compute_streak(&habit.id, day("2025-03-10")).unwrap(), 3);

        store.toggle_completion(&habit.id, day("2025-03-09")).unwrap();
        assert_eq!(store.compute_streak(&habit.id, day("2025-03-10")).unwrap(), 1);
        assert_eq!(store.compute_streak(&habit.id, day("2025-03-09")).unwrap(), 0);
    }

    #[test]
    fn test_streak_crosses_month_and_year() {
        let mut store = HabitStore::new();
        let habit = store.add_habit("Exercise").unwrap();
        for date in ["2024-12-30", "2024-12-31", "2025-01-01"] {
            store.toggle_completion(&habit.id, day(date)).unwrap();
        }

        assert_eq!(store.compute_streak(&habit.id, day("2025-01-01")).unwrap(), 3);
    }

    #[test]
    fn test_unknown_habit_is_not_found() {
        let mut store = HabitStore::new();
        let missing = HabitId::from("missing");

        assert!(store.toggle_completion(&missing, day("2025-01-01")).unwrap_err().is_not_found());
        assert!(store.rename_habit(&missing, "X").unwrap_err().is_not_found());
        assert!(store.compute_streak(&missing, day("2025-01-01")).unwrap_err().is_not_found());
        assert_eq!(store.total_points(), 0);
    }

    #[test]
    fn test_blank_names_are_ignored() {
        let mut store = HabitStore::new();
        assert!(store.add_habit("   ").is_none());

        let habit = store.add_habit("  Exercise  ").unwrap();
        assert_eq!(habit.name, "Exercise");
        assert!(!store.rename_habit(&habit.id, "").unwrap());
        assert_eq!(store.habit_name(&habit.id), "Exercise");
    }

    #[test]
    fn test_calendar_with_one_habit() {
        let mut store = HabitStore::new();
        let habit = store.add_habit("Exercise").unwrap();
        for d in 1..=10 {
            store
                .toggle_completion(&habit.id, DayKey::from_ymd(2025, 1, d).unwrap())
                .unwrap();
        }

        let month = store.compute_calendar_month_at(2025, 1, day("2025-02-01")).unwrap();
        assert_eq!(month.days.len(), 31);
        for cell in &month.days {
            if cell.date.day() <= 10 {
                assert_eq!(cell.state, DayState::Complete);
            } else {
                assert_eq!(cell.state, DayState::Empty);
                assert_eq!(cell.total, 0);
            }
        }
    }

    #[test]
    fn test_export_import_roundtrip() {
        let mut store = HabitStore::new();
        let a = store.add_habit("Exercise").unwrap();
        let b = store.add_habit("Read").unwrap();
        store.toggle_completion(&a.id, day("2025-01-01")).unwrap();
        store.toggle_completion(&b.id, day("2025-01-02")).unwrap();
        store.archive_habit(&b.id).unwrap();

        let json = store.export_snapshot().unwrap();
        let mut restored = HabitStore::new();
        restored.import_snapshot(&json).unwrap();

        assert_eq!(restored.snapshot(), store.snapshot());
    }

    #[test]
    fn test_malformed_import_leaves_state_intact() {
        let mut store = HabitStore::new();
        let habit = store.add_habit("Exercise").unwrap();
        store.toggle_completion(&habit.id, day("2025-01-01")).unwrap();
        let before = store.snapshot();

        for bad in [r#"{"foo":1}"#, "not json", "[]"] {
            let err = store.import_snapshot(bad).unwrap_err();
            assert!(err.is_validation(), "expected validation error for {}", bad);
            assert_eq!(store.snapshot(), before);
        }
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut store = HabitStore::new();
        let habit = store.add_habit("Exercise").unwrap();
        store.toggle_completion(&habit.id, day("2025-01-01")).unwrap();

        store.reset_all();

        assert!(store.list_all_habits().is_empty());
        assert!(store.history().is_empty());
        assert_eq!(store.total_points(), 0);
    }

    #[test]
    fn test_exercise_and_read_scenario() {
        let mut store = HabitStore::new();
        let exercise = store.add_habit("Exercise").unwrap();

        store.toggle_completion(&exercise.id, day("2025-01-01")).unwrap();
        assert_eq!(store.total_points(), 10);

        store.toggle_completion(&exercise.id, day("2025-01-01")).unwrap();
        assert_eq!(store.total_points(), 0);

        let read = store.add_habit("Read").unwrap();
        store.toggle_completion(&exercise.id, day("2025-01-01")).unwrap();
        store.toggle_completion(&read.id, day("2025-01-01")).unwrap();

        let completion = store.compute_day_completion_at(day("2025-01-01"), day("2025-01-01"));
        assert_eq!(completion, DayCompletion { done: 2, total: 2 });
        assert_eq!(completion.state(), DayState::Complete);
    }
}
