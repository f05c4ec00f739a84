/// Loading snapshots captured by older versions of the tracker
use habit_store::*;
use serde_json::json;

#[cfg(test)]
mod legacy_snapshot_tests {
    use super::*;

    #[test]
    fn test_string_list_history_resolves_names() {
        let raw = json!({
            "habits": [{"id": 1700000000000u64, "name": "Walk"}],
            "history": {"2025-02-01": ["Walk", "Gone"]},
            "points": 20
        });

        let store = HabitStore::load_snapshot(&raw).unwrap();
        let walk = HabitId::from("1700000000000");

        assert!(store.is_completed(&walk, DayKey::parse("2025-02-01").unwrap()));
        assert_eq!(store.total_points(), 20);

        let days = store.history_days(None);
        let names: Vec<&str> = days[0].completed.iter().map(|item| item.name.as_str()).collect();
        assert!(names.contains(&"Walk"));
        assert!(names.contains(&DELETED_HABIT_NAME));
    }

    #[test]
    fn test_missing_fields_get_defaults() {
        let store = HabitStore::load_snapshot(&json!({"habits": [{"id": "a", "name": "Read"}]})).unwrap();

        assert_eq!(store.list_active_habits().len(), 1);
        assert!(store.history().is_empty());
        assert_eq!(store.total_points(), 0);
    }

    #[test]
    fn test_legacy_import_then_export_is_canonical() {
        let mut store = HabitStore::new();
        store
            .import_snapshot(r#"{"habits":[{"name":"Walk"}],"records":{"2025-01-02":{"Walk":true}}}"#)
            .unwrap();

        let habit_id = store.list_all_habits()[0].id.clone();
        let exported: serde_json::Value = serde_json::from_str(&store.export_snapshot().unwrap()).unwrap();

        assert_eq!(exported["habits"][0]["id"], json!(habit_id.as_str()));
        assert_eq!(exported["history"]["2025-01-02"][habit_id.as_str()], json!(true));
        assert_eq!(exported["points"], json!(10));
    }

    #[test]
    fn test_bad_date_keys_are_rejected() {
        for key in ["2025-1-2", "02/01/2025", "2025-02-30"] {
            let raw = json!({"habits": [], "history": {key: {}}});
            assert!(HabitStore::load_snapshot(&raw).unwrap_err().is_validation());
        }
    }
}
