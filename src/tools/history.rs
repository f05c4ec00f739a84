/// Tool for browsing past completions
///
/// This module implements the habit_history MCP tool. Names are looked up by
/// id when the history is rendered, so renamed habits show their new name.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::HistoryDay;
use crate::tools::parse_day;
use crate::{HabitTrackerServer, ServerError};

/// Parameters for the history view
#[derive(Debug, Deserialize, JsonSchema)]
pub struct HistoryParams {
    /// Day to leave out, usually the one shown in the checklist (YYYY-MM-DD, optional)
    pub exclude_date: Option<String>,
    /// Maximum number of days to return (optional)
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub days: Vec<HistoryDay>,
    pub message: String,
}

pub fn get_history(
    server: &HabitTrackerServer,
    params: HistoryParams,
) -> Result<HistoryResponse, ServerError> {
    let exclude = match params.exclude_date.as_deref() {
        Some(date) => Some(parse_day(Some(date))?),
        None => None,
    };

    let mut days = server.store().history_days(exclude);
    if let Some(limit) = params.limit {
        days.truncate(limit);
    }

    let message = if days.is_empty() {
        "No completed habits in the history yet.".to_string()
    } else {
        days.iter()
            .map(|day| {
                let names = day
                    .completed
                    .iter()
                    .map(|item| format!("  - {}", item.name))
                    .collect::<Vec<_>>()
                    .join("\n");
                format!("{}\n{}", day.date, names)
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    Ok(HistoryResponse { days, message })
}
