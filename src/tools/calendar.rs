/// Tool for the monthly calendar heat-map
///
/// This module implements the habit_calendar MCP tool.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{CalendarMonth, DayKey, DayState};
use crate::{HabitTrackerServer, ServerError};

/// Parameters for the calendar view
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CalendarParams {
    /// Year (optional - defaults to the current year)
    pub year: Option<i32>,
    /// Month 1-12 (optional - defaults to the current month)
    pub month: Option<u32>,
}

/// Response from the calendar view
#[derive(Debug, Serialize)]
pub struct CalendarResponse {
    #[serde(flatten)]
    pub calendar: CalendarMonth,
    pub message: String,
}

pub fn get_calendar(
    server: &HabitTrackerServer,
    params: CalendarParams,
) -> Result<CalendarResponse, ServerError> {
    let today = DayKey::today();
    let year = params.year.unwrap_or(today.year());
    let month = params.month.unwrap_or(today.month());

    let calendar = server.store().compute_calendar_month(year, month)?;
    let message = render_grid(&calendar);

    Ok(CalendarResponse { calendar, message })
}

/// Sunday-first text grid: ✓ complete, ~ partial, · pending
fn render_grid(calendar: &CalendarMonth) -> String {
    let mut out = format!("🗓️ {}-{:02}\n Su  Mo  Tu  We  Th  Fr  Sa\n", calendar.year, calendar.month);
    let mut column = calendar.leading_blanks as usize;
    out.push_str(&"    ".repeat(column));

    for day in &calendar.days {
        let mark = match day.state {
            DayState::Complete => '✓',
            DayState::Partial => '~',
            DayState::Pending => '·',
            DayState::Empty => ' ',
        };
        out.push_str(&format!("{:>3}{}", day.date.day(), mark));

        column += 1;
        if column == 7 {
            out.push('\n');
            column = 0;
        }
    }

    out.trim_end().to_string()
}
