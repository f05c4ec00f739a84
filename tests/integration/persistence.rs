/// End-to-end persistence through the real storage adapters
use habit_store::*;
use tempfile::tempdir;

fn day(s: &str) -> DayKey {
    DayKey::parse(s).expect("valid day key")
}

#[cfg(test)]
mod persistence_tests {
    use super::*;

    #[test]
    fn test_sqlite_state_survives_reopen() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("habits.db");

        let habit_id = {
            let storage = StorageBackend::Sqlite.open(&path).expect("Failed to open storage");
            let mut server = HabitTrackerServer::new(storage, CompletionPolicy::default())
                .expect("Failed to create server");

            let habit = server.add_habit("Exercise").unwrap().unwrap();
            server.toggle_completion(&habit.id, day("2025-01-01")).unwrap();
            server.rename_habit(&habit.id, "Morning run").unwrap();
            habit.id
        };

        let storage = StorageBackend::Sqlite.open(&path).expect("Failed to reopen storage");
        let server = HabitTrackerServer::new(storage, CompletionPolicy::default())
            .expect("Failed to create second server");

        assert_eq!(server.store().habit_name(&habit_id), "Morning run");
        assert!(server.store().is_completed(&habit_id, day("2025-01-01")));
        assert_eq!(server.store().total_points(), 10);
    }

    #[test]
    fn test_json_file_state_survives_reopen() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("nested").join("habits.json");
        assert_eq!(StorageBackend::from_path(&path), StorageBackend::Json);

        {
            let storage = StorageBackend::from_path(&path).open(&path).unwrap();
            let mut server = HabitTrackerServer::new(storage, CompletionPolicy::default()).unwrap();
            let habit = server.add_habit("Read").unwrap().unwrap();
            server.toggle_completion(&habit.id, day("2025-01-01")).unwrap();
            server.archive_habit(&habit.id).unwrap();
        }

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["points"], serde_json::json!(10));

        let storage = StorageBackend::Json.open(&path).unwrap();
        let server = HabitTrackerServer::new(storage, CompletionPolicy::default()).unwrap();
        assert!(server.store().list_active_habits().is_empty());
        assert_eq!(server.store().list_all_habits().len(), 1);
        assert_eq!(server.store().total_points(), 10);
    }

    #[test]
    fn test_invalid_stored_snapshot_is_not_overwritten() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("habits.json");
        std::fs::write(&path, r#"{"foo": 1}"#).unwrap();

        let storage = StorageBackend::Json.open(&path).unwrap();
        let result = HabitTrackerServer::new(storage, CompletionPolicy::default());

        assert!(matches!(result, Err(ServerError::Domain(e)) if e.is_validation()));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), r#"{"foo": 1}"#);
    }

    #[test]
    fn test_import_and_reset_are_persisted() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("habits.db");

        {
            let storage = StorageBackend::Sqlite.open(&path).unwrap();
            let mut server = HabitTrackerServer::new(storage, CompletionPolicy::RecordedHabits).unwrap();
            server
                .import_snapshot(r#"{"habits":[{"id":"a","name":"Walk"}],"history":{"2025-01-01":{"a":true}}}"#)
                .unwrap();
        }

        let storage = StorageBackend::Sqlite.open(&path).unwrap();
        let mut server = HabitTrackerServer::new(storage, CompletionPolicy::RecordedHabits).unwrap();
        assert_eq!(server.store().total_points(), 10);
        assert_eq!(
            server.store().compute_day_completion_at(day("2025-01-01"), day("2025-06-01")),
            DayCompletion { done: 1, total: 1 }
        );

        server.reset_all().unwrap();
        drop(server);

        let storage = StorageBackend::Sqlite.open(&path).unwrap();
        let server = HabitTrackerServer::new(storage, CompletionPolicy::default()).unwrap();
        assert!(server.store().list_all_habits().is_empty());
        assert_eq!(server.store().total_points(), 0);
    }
}
