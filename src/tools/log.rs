/// Tool for toggling habit completions
///
/// This module implements the habit_toggle MCP tool. Toggling twice on the
/// same day returns the habit and the points total to where they started.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::tools::{parse_day, parse_habit_id};
use crate::{HabitTrackerServer, ServerError};

/// Parameters for toggling a habit completion
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ToggleHabitParams {
    /// ID of the habit to toggle
    pub habit_id: String,
    /// Day to toggle (YYYY-MM-DD, optional - defaults to today)
    pub date: Option<String>,
}

/// Response from toggling a habit
#[derive(Debug, Serialize)]
pub struct ToggleHabitResponse {
    pub completed: bool,
    pub current_streak: u32,
    pub points: u64,
    pub message: String,
}

pub fn toggle_habit(
    server: &mut HabitTrackerServer,
    params: ToggleHabitParams,
) -> Result<ToggleHabitResponse, ServerError> {
    let habit_id = parse_habit_id(&params.habit_id)?;
    let day = parse_day(params.date.as_deref())?;

    let completed = server.toggle_completion(&habit_id, day)?;

    let store = server.store();
    let current_streak = store.compute_streak(&habit_id, day)?;
    let points = store.total_points();
    let name = store.habit_name(&habit_id);

    let message = if completed {
        format!(
            "🔥 Marked '{}' done for {}! Current streak: {} day{} | Points: {}",
            name,
            day,
            current_streak,
            if current_streak == 1 { "" } else { "s" },
            points
        )
    } else {
        format!("↩️ Unmarked '{}' for {} | Points: {}", name, day, points)
    };

    Ok(ToggleHabitResponse {
        completed,
        current_streak,
        points,
        message,
    })
}
