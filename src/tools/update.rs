/// Tools for renaming and archiving existing habits
///
/// This module implements the habit_rename and habit_archive MCP tools.
/// Archiving hides a habit from the active list and keeps its history.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::tools::{parse_habit_id, require_confirmation};
use crate::{HabitTrackerServer, ServerError};

/// Parameters for renaming a habit
#[derive(Debug, Deserialize, JsonSchema)]
pub struct RenameHabitParams {
    /// ID of the habit to rename
    pub habit_id: String,
    /// New display name
    pub name: String,
}

/// Parameters for archiving a habit
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ArchiveHabitParams {
    /// ID of the habit to archive
    pub habit_id: String,
    /// Must be true; archiving cannot be undone
    pub confirm: Option<bool>,
}

/// Response from updating a habit
#[derive(Debug, Serialize)]
pub struct UpdateHabitResponse {
    pub success: bool,
    pub message: String,
}

pub fn rename_habit(
    server: &mut HabitTrackerServer,
    params: RenameHabitParams,
) -> Result<UpdateHabitResponse, ServerError> {
    let habit_id = parse_habit_id(&params.habit_id)?;

    if server.rename_habit(&habit_id, &params.name)? {
        Ok(UpdateHabitResponse {
            success: true,
            message: format!("✅ Renamed habit to '{}'", server.store().habit_name(&habit_id)),
        })
    } else {
        Ok(UpdateHabitResponse {
            success: false,
            message: format!(
                "New name is empty, keeping '{}'",
                server.store().habit_name(&habit_id)
            ),
        })
    }
}

pub fn archive_habit(
    server: &mut HabitTrackerServer,
    params: ArchiveHabitParams,
) -> Result<UpdateHabitResponse, ServerError> {
    let habit_id = parse_habit_id(&params.habit_id)?;
    require_confirmation(params.confirm, "Archiving a habit")?;

    let archived = server.archive_habit(&habit_id)?;
    let name = server.store().habit_name(&habit_id).to_string();

    let message = if archived {
        format!("🗄️ Archived habit '{}'. Its history is kept.", name)
    } else {
        format!("Habit '{}' was already archived", name)
    };

    Ok(UpdateHabitResponse {
        success: true,
        message,
    })
}
