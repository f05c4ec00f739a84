/// Tool for checking one day's checklist
///
/// This module implements the habit_status MCP tool: the habits for a day,
/// which of them are done, the day's completion ratio and the points total.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{DayKey, DayState, HabitId};
use crate::tools::parse_day;
use crate::{HabitTrackerServer, ServerError};

/// Parameters for checking a day's status
#[derive(Debug, Deserialize, JsonSchema)]
pub struct StatusParams {
    /// Day to show (YYYY-MM-DD, optional - defaults to today)
    pub date: Option<String>,
}

/// One line of the day's checklist
#[derive(Debug, Serialize)]
pub struct DayHabitStatus {
    pub habit_id: HabitId,
    pub name: String,
    pub completed: bool,
    pub archived: bool,
    /// Recorded under an id that no longer names a habit
    pub deleted: bool,
}

/// Response from checking a day's status
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub date: DayKey,
    pub done: usize,
    pub total: usize,
    pub state: DayState,
    pub habits: Vec<DayHabitStatus>,
    pub points: u64,
    pub message: String,
}

pub fn get_day_status(
    server: &HabitTrackerServer,
    params: StatusParams,
) -> Result<StatusResponse, ServerError> {
    let day = parse_day(params.date.as_deref())?;
    let store = server.store();
    let record = store.get_day_record(day);

    // Active habits first, then anything else recorded that day
    let mut habits: Vec<DayHabitStatus> = store
        .list_active_habits()
        .into_iter()
        .map(|h| DayHabitStatus {
            habit_id: h.id.clone(),
            name: h.name.clone(),
            completed: record.map(|r| r.is_completed(&h.id)).unwrap_or(false),
            archived: false,
            deleted: false,
        })
        .collect();

    if let Some(record) = record {
        for (habit_id, completed) in record.iter() {
            if habits.iter().any(|h| &h.habit_id == habit_id) {
                continue;
            }
            let habit = store.habit(habit_id);
            habits.push(DayHabitStatus {
                habit_id: habit_id.clone(),
                name: store.habit_name(habit_id).to_string(),
                completed,
                archived: habit.map(|h| h.archived).unwrap_or(false),
                deleted: habit.is_none(),
            });
        }
    }

    let completion = store.compute_day_completion(day);
    let points = store.total_points();

    let mut message = format!(
        "📅 Habits for {}: {}/{} done ({}) | Points: {}",
        day,
        completion.done,
        completion.total,
        completion.state().as_str(),
        points
    );
    for h in &habits {
        message.push_str(&format!(
            "\n{} {}{}",
            if h.completed { "☑" } else { "☐" },
            h.name,
            if h.archived { " (archived)" } else { "" }
        ));
    }

    Ok(StatusResponse {
        date: day,
        done: completion.done,
        total: completion.total,
        state: completion.state(),
        habits,
        points,
        message,
    })
}
