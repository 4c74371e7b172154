//! Care task model and its scheduling rules.

use jiff::{civil::Date, tz::TimeZone, Timestamp};
use serde::Serialize;

use super::TaskId;
use crate::{
    dates::{add_days, start_of_day},
    error::Result,
};

/// Frequency used when a task is created without one.
pub const DEFAULT_FREQUENCY_DAYS: u32 = 7;

/// Scheduling state of a task relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskState {
    /// Due today or on a later day
    Scheduled,

    /// Due day has already passed
    Overdue,
}

/// A recurring maintenance action attached to a plant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CareTask {
    pub id: TaskId,

    /// Short label, e.g. "Water"
    pub name: String,

    /// Days between occurrences, always positive
    pub frequency: u32,

    /// Calendar day on which the task next surfaces
    #[serde(rename = "nextDueDate")]
    pub next_due: Date,

    /// One entry per completion, oldest first
    pub completion_history: Vec<Timestamp>,

    pub created_at: Timestamp,
}

impl CareTask {
    pub fn new(
        id: TaskId,
        name: impl Into<String>,
        frequency: u32,
        next_due: Date,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            frequency,
            next_due,
            completion_history: Vec::new(),
            created_at,
        }
    }

    pub fn state(&self, today: Date) -> TaskState {
        if self.next_due < today {
            TaskState::Overdue
        } else {
            TaskState::Scheduled
        }
    }

    /// Overdue tasks collapse onto `today`; every other task is due only on
    /// its exact due day.
    pub fn is_due_on(&self, date: Date, today: Date) -> bool {
        match self.state(today) {
            TaskState::Overdue => date == today,
            TaskState::Scheduled => date == self.next_due,
        }
    }

    /// Appends `at` to the history and reschedules `frequency` days after
    /// the local day of the completion.
    pub fn record_completion(&mut self, at: Timestamp, tz: &TimeZone) -> Result<()> {
        let next_due = add_days(start_of_day(at, tz), i64::from(self.frequency))?;
        self.completion_history.push(at);
        self.next_due = next_due;
        Ok(())
    }

    /// Moves the task to the day after `today`, whatever its current due day.
    pub fn postpone(&mut self, today: Date) -> Result<()> {
        self.next_due = add_days(today, 1)?;
        Ok(())
    }

    /// Local days on which the task was completed, in history order.
    pub fn completion_days<'a>(&'a self, tz: &'a TimeZone) -> impl Iterator<Item = Date> + 'a {
        self.completion_history
            .iter()
            .map(move |at| start_of_day(*at, tz))
    }

    pub fn was_completed_on(&self, date: Date, tz: &TimeZone) -> bool {
        self.completion_days(tz).any(|day| day == date)
    }

    /// True if any completion falls within `start..=end`.
    pub fn was_completed_between(&self, start: Date, end: Date, tz: &TimeZone) -> bool {
        self.completion_days(tz)
            .any(|day| start <= day && day <= end)
    }
}
