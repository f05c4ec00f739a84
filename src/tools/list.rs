/// Tool for listing all habits
///
/// This module implements the habit_list MCP tool.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analytics::{HabitStats, StoreSummary};
use crate::tools::parse_day;
use crate::{HabitTrackerServer, ServerError};

/// Parameters for listing habits
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListHabitsParams {
    /// Include archived habits (default: false)
    pub include_archived: Option<bool>,
    /// Reference day for streaks and checkmarks (YYYY-MM-DD, defaults to today)
    pub date: Option<String>,
}

/// Information about a habit in the list
#[derive(Debug, Serialize)]
pub struct HabitSummary {
    #[serde(flatten)]
    pub stats: HabitStats,
    /// Marked done on the reference day
    pub done: bool,
}

/// Response from listing habits
#[derive(Debug, Serialize)]
pub struct ListHabitsResponse {
    pub habits: Vec<HabitSummary>,
    pub summary: StoreSummary,
}

pub fn list_habits(
    server: &HabitTrackerServer,
    params: ListHabitsParams,
) -> Result<ListHabitsResponse, ServerError> {
    let day = parse_day(params.date.as_deref())?;
    let include_archived = params.include_archived.unwrap_or(false);
    let store = server.store();

    let habits = server
        .analytics()
        .all_habit_stats(store, day, include_archived)?
        .into_iter()
        .map(|stats| HabitSummary {
            done: store.is_completed(&stats.habit_id, day),
            stats,
        })
        .collect();

    Ok(ListHabitsResponse {
        habits,
        summary: server.analytics().summary(store),
    })
}

impl ListHabitsResponse {
    /// Text rendering for the MCP client
    pub fn render(&self) -> String {
        if self.habits.is_empty() {
            return "No habits found. Create your first habit to get started!".to_string();
        }

        let header = format!(
            "📋 **Habits** ({} active, {} archived) | Points: {}\n\n",
            self.summary.active_habits, self.summary.archived_habits, self.summary.points
        );

        let lines = self
            .habits
            .iter()
            .map(|h| {
                format!(
                    "{} **{}** ({})\n   🔥 Streak: {} days | Best: {} | ✅ Total: {}{}",
                    if h.done { "☑" } else { "☐" },
                    h.stats.name,
                    h.stats.habit_id,
                    h.stats.current_streak,
                    h.stats.longest_streak,
                    h.stats.total_completions,
                    if h.stats.archived { " 🗄️ (archived)" } else { "" }
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n");

        format!("{}{}", header, lines)
    }
}
