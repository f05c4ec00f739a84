/// Day completion ratios and the monthly calendar grid
///
/// Each calendar cell shows how many of the habits in scope for that day were
/// done. Which habits are "in scope" depends on the store's CompletionPolicy.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::domain::{CompletionPolicy, DayKey, DayState, DomainError, HabitStore};

/// Done/total counts for one day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayCompletion {
    pub done: usize,
    pub total: usize,
}

impl DayCompletion {
    pub fn state(&self) -> DayState {
        DayState::classify(self.done, self.total)
    }
}

/// One populated cell of the calendar grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    pub date: DayKey,
    pub done: usize,
    pub total: usize,
    pub state: DayState,
}

/// A month laid out for a Sunday-first grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarMonth {
    pub year: i32,
    /// 1 = January
    pub month: u32,
    /// Blank cells before day 1 (0 = month starts on Sunday)
    pub leading_blanks: u32,
    pub days: Vec<CalendarDay>,
}

impl HabitStore {
    /// Completion for a day, judged against the local current day
    pub fn compute_day_completion(&self, day: DayKey) -> DayCompletion {
        self.compute_day_completion_at(day, DayKey::today())
    }

    /// Completion for a day, with `today` supplied by the caller
    pub fn compute_day_completion_at(&self, day: DayKey, today: DayKey) -> DayCompletion {
        let record = self.history.get(&day);

        let recorded_only = match self.policy {
            CompletionPolicy::ActiveHabits => false,
            CompletionPolicy::RecordedHabits => true,
            CompletionPolicy::Hybrid => day < today,
        };

        if recorded_only {
            return record
                .map(|r| DayCompletion {
                    done: r.completed_count(),
                    total: r.len(),
                })
                .unwrap_or(DayCompletion { done: 0, total: 0 });
        }

        let active = self.list_active_habits();
        let done = record
            .map(|r| active.iter().filter(|h| r.is_completed(&h.id)).count())
            .unwrap_or(0);

        DayCompletion {
            done,
            total: active.len(),
        }
    }

    /// Calendar cells for every day of a month (1-based)
    pub fn compute_calendar_month(&self, year: i32, month: u32) -> Result<CalendarMonth, DomainError> {
        self.compute_calendar_month_at(year, month, DayKey::today())
    }

    pub fn compute_calendar_month_at(
        &self,
        year: i32,
        month: u32,
        today: DayKey,
    ) -> Result<CalendarMonth, DomainError> {
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
            DomainError::validation(format!("Invalid calendar month {}-{:02}", year, month))
        })?;

        let days = (1..=days_in_month(first))
            .filter_map(|d| first.with_day(d))
            .map(|date| {
                let date = DayKey::from_date(date);
                let completion = self.compute_day_completion_at(date, today);
                CalendarDay {
                    date,
                    done: completion.done,
                    total: completion.total,
                    state: completion.state(),
                }
            })
            .collect();

        Ok(CalendarMonth {
            year,
            month,
            leading_blanks: first.weekday().num_days_from_sunday(),
            days,
        })
    }
}

fn days_in_month(first: NaiveDate) -> u32 {
    let next_month = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    };

    next_month
        .and_then(|d| d.pred_opt())
        .map(|last| last.day())
        // December of chrono's maximum year
        .unwrap_or(31)
}
