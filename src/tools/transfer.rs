/// Tools for exporting, importing and clearing all habit data
///
/// This module implements the data_export, data_import and data_reset MCP
/// tools. Import and reset replace everything and need explicit confirmation.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::tools::require_confirmation;
use crate::{HabitTrackerServer, ServerError};

/// Parameters for importing a snapshot
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ImportParams {
    /// Snapshot JSON as produced by data_export
    pub json: String,
    /// Must be true; the import replaces all existing data
    pub confirm: Option<bool>,
}

/// Parameters for clearing all data
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ResetParams {
    /// Must be true; every habit and record is deleted
    pub confirm: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct TransferResponse {
    pub success: bool,
    pub message: String,
}

/// The snapshot as pretty JSON
pub fn export_data(server: &HabitTrackerServer) -> Result<String, ServerError> {
    server.export_snapshot()
}

pub fn import_data(
    server: &mut HabitTrackerServer,
    params: ImportParams,
) -> Result<TransferResponse, ServerError> {
    require_confirmation(params.confirm, "Importing a snapshot")?;
    server.import_snapshot(&params.json)?;

    let store = server.store();
    Ok(TransferResponse {
        success: true,
        message: format!(
            "📥 Imported {} habits and {} days of history ({} points)",
            store.list_all_habits().len(),
            store.history().len(),
            store.total_points()
        ),
    })
}

pub fn reset_data(
    server: &mut HabitTrackerServer,
    params: ResetParams,
) -> Result<TransferResponse, ServerError> {
    require_confirmation(params.confirm, "Clearing all data")?;
    server.reset_all()?;

    Ok(TransferResponse {
        success: true,
        message: "🧹 All habits and history cleared".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::server;
    use crate::DayKey;

    #[test]
    fn test_export_import_roundtrip() {
        let (mut server, _) = server();
        let habit = server.add_habit("Exercise").unwrap().unwrap();
        server.toggle_completion(&habit.id, DayKey::parse("2025-01-01").unwrap()).unwrap();
        let exported = export_data(&server).unwrap();

        reset_data(&mut server, ResetParams { confirm: Some(true) }).unwrap();
        assert!(server.store().list_all_habits().is_empty());

        let response = import_data(&mut server, ImportParams { json: exported, confirm: Some(true) }).unwrap();
        assert!(response.success);
        assert_eq!(server.store().total_points(), 10);
        assert_eq!(server.store().habit_name(&habit.id), "Exercise");
    }

    #[test]
    fn test_reset_without_confirmation_keeps_data() {
        let (mut server, storage) = server();
        server.add_habit("Exercise").unwrap();

        assert!(reset_data(&mut server, ResetParams { confirm: Some(false) }).is_err());
        assert_eq!(server.store().list_all_habits().len(), 1);
        assert_eq!(storage.save_count(), 1);
    }

    #[test]
    fn test_malformed_import_keeps_data() {
        let (mut server, storage) = server();
        server.add_habit("Exercise").unwrap();

        let result = import_data(
            &mut server,
            ImportParams { json: r#"{"foo":1}"#.to_string(), confirm: Some(true) },
        );
        assert!(matches!(result, Err(ServerError::Domain(e)) if e.is_validation()));
        assert_eq!(server.store().list_all_habits().len(), 1);
        assert_eq!(storage.save_count(), 1);
    }
}
