/// Tool for creating new habits
///
/// This module implements the habit_create MCP tool.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{HabitTrackerServer, ServerError};

/// Parameters for creating a new habit
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateHabitParams {
    /// Name of the habit
    pub name: String,
}

/// Response from creating a habit
#[derive(Debug, Serialize)]
pub struct CreateHabitResponse {
    pub success: bool,
    pub habit_id: Option<String>,
    pub message: String,
}

/// Add a habit; a blank name is ignored rather than treated as an error
pub fn create_habit(
    server: &mut HabitTrackerServer,
    params: CreateHabitParams,
) -> Result<CreateHabitResponse, ServerError> {
    match server.add_habit(&params.name)? {
        Some(habit) => Ok(CreateHabitResponse {
            success: true,
            habit_id: Some(habit.id.to_string()),
            message: format!("✅ Created habit '{}'! Ready to start your streak!", habit.name),
        }),
        None => Ok(CreateHabitResponse {
            success: false,
            habit_id: None,
            message: "Habit name is empty, nothing was added".to_string(),
        }),
    }
}
