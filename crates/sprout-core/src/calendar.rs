//! Range queries and calendar grids for the weekly and monthly views.

use std::{fmt, str::FromStr};

use jiff::{civil::Date, tz::TimeZone, ToSpan};
use serde::{Deserialize, Serialize};

use crate::{
    dates::add_days,
    error::{CareError, Result},
    models::{CareTask, Plant},
    resolver::tasks_due_on,
};

/// Tasks with any completion within `start..=end` (local days).
pub fn completed_in_range<'a>(
    plant: &'a Plant,
    start: Date,
    end: Date,
    tz: &TimeZone,
) -> Vec<&'a CareTask> {
    plant
        .care_tasks
        .iter()
        .filter(|task| task.was_completed_between(start, end, tz))
        .collect()
}

/// First column of week rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Monday,
    Sunday,
}

impl WeekStart {
    /// Column index of `day` in a row starting on this weekday.
    pub fn column(self, day: Date) -> i8 {
        match self {
            WeekStart::Monday => day.weekday().to_monday_zero_offset(),
            WeekStart::Sunday => day.weekday().to_sunday_zero_offset(),
        }
    }
}

impl FromStr for WeekStart {
    type Err = CareError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "monday" | "mon" => Ok(WeekStart::Monday),
            "sunday" | "sun" => Ok(WeekStart::Sunday),
            _ => Err(CareError::invalid_input("week_start")
                .with_reason(format!("expected monday or sunday, got {s:?}"))),
        }
    }
}

impl fmt::Display for WeekStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeekStart::Monday => f.write_str("monday"),
            WeekStart::Sunday => f.write_str("sunday"),
        }
    }
}

/// The seven days of the week containing `anchor`.
pub fn week_days(anchor: Date, week_start: WeekStart) -> Result<[Date; 7]> {
    let first = add_days(anchor, -i64::from(week_start.column(anchor)))?;
    let mut days = [first; 7];
    for (offset, day) in days.iter_mut().enumerate().skip(1) {
        *day = add_days(first, offset as i64)?;
    }
    Ok(days)
}

/// Rows of seven slots covering the month of `anchor`, padded with `None`.
pub fn month_grid(anchor: Date, week_start: WeekStart) -> Result<Vec<[Option<Date>; 7]>> {
    let first = anchor.first_of_month();
    let mut rows = Vec::with_capacity(6);
    let mut row = [None; 7];
    let mut column = week_start.column(first) as usize;

    for offset in 0..i64::from(first.days_in_month()) {
        row[column] = Some(add_days(first, offset)?);
        column += 1;
        if column == 7 {
            rows.push(row);
            row = [None; 7];
            column = 0;
        }
    }
    if column > 0 {
        rows.push(row);
    }

    Ok(rows)
}

/// Badge counts for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarCell {
    pub date: Date,
    pub due_count: usize,
    pub completed_count: usize,
}

impl CalendarCell {
    pub fn compute(plants: &[Plant], date: Date, today: Date, tz: &TimeZone) -> Self {
        let (due_count, completed_count) =
            plants.iter().fold((0, 0), |(due, completed), plant| {
                (
                    due + tasks_due_on(plant, date, today).len(),
                    completed + completed_in_range(plant, date, date, tz).len(),
                )
            });

        Self {
            date,
            due_count,
            completed_count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.due_count == 0 && self.completed_count == 0
    }
}

pub fn populate_week(
    plants: &[Plant],
    anchor: Date,
    week_start: WeekStart,
    today: Date,
    tz: &TimeZone,
) -> Result<Vec<CalendarCell>> {
    Ok(week_days(anchor, week_start)?
        .into_iter()
        .map(|day| CalendarCell::compute(plants, day, today, tz))
        .collect())
}

pub fn populate_month(
    plants: &[Plant],
    anchor: Date,
    week_start: WeekStart,
    today: Date,
    tz: &TimeZone,
) -> Result<Vec<[Option<CalendarCell>; 7]>> {
    Ok(month_grid(anchor, week_start)?
        .into_iter()
        .map(|row| row.map(|slot| slot.map(|day| CalendarCell::compute(plants, day, today, tz))))
        .collect())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// Steps the view one period back or forward.
///
/// Returns `None` when the move is not allowed: going back from today or
/// earlier, or going forward past `today + horizon_months`.
pub fn navigate(
    current: Date,
    mode: ViewMode,
    direction: Direction,
    today: Date,
    horizon_months: u32,
) -> Result<Option<Date>> {
    if direction == Direction::Previous && current <= today {
        return Ok(None);
    }

    let sign: i64 = match direction {
        Direction::Previous => -1,
        Direction::Next => 1,
    };
    let next = match mode {
        ViewMode::Daily => current.checked_add(sign.days())?,
        ViewMode::Weekly => current.checked_add((sign * 7).days())?,
        ViewMode::Monthly => current.checked_add(sign.months())?,
    };

    let limit = today.checked_add(i64::from(horizon_months).months())?;
    Ok((next <= limit).then_some(next))
}

#[cfg(test)]
mod tests {
    use jiff::{civil::date, Timestamp};

    use super::*;
    use crate::models::{PlantId, TaskId};

    fn utc(day: Date, hour: i8) -> Timestamp {
        day.at(hour, 0, 0, 0)
            .to_zoned(TimeZone::UTC)
            .unwrap()
            .timestamp()
    }

    fn plant_with_history() -> Plant {
        let mut plant = Plant::new(PlantId::new("p1"), "Fern");
        let mut task = CareTask::new(
            TaskId::new("b"),
            "Feed",
            14,
            date(2025, 1, 19),
            Timestamp::UNIX_EPOCH,
        );
        task.completion_history = vec![utc(date(2025, 1, 1), 9), utc(date(2025, 1, 5), 9)];
        plant.care_tasks.push(task);
        plant
    }

    #[test]
    fn test_completed_in_range_is_inclusive() {
        let plant = plant_with_history();
        let tz = TimeZone::UTC;

        assert_eq!(
            completed_in_range(&plant, date(2025, 1, 1), date(2025, 1, 3), &tz).len(),
            1
        );
        assert!(completed_in_range(&plant, date(2025, 1, 2), date(2025, 1, 4), &tz).is_empty());
        assert_eq!(
            completed_in_range(&plant, date(2025, 1, 5), date(2025, 1, 5), &tz).len(),
            1
        );
    }

    #[test]
    fn test_week_days_respect_week_start() {
        // 2025-06-04 is a Wednesday
        let monday = week_days(date(2025, 6, 4), WeekStart::Monday).unwrap();
        assert_eq!(monday[0], date(2025, 6, 2));
        assert_eq!(monday[6], date(2025, 6, 8));

        let sunday = week_days(date(2025, 6, 4), WeekStart::Sunday).unwrap();
        assert_eq!(sunday[0], date(2025, 6, 1));
        assert_eq!(sunday[6], date(2025, 6, 7));
    }

    #[test]
    fn test_month_grid_padding() {
        // June 2025 starts on a Sunday and has 30 days
        let grid = month_grid(date(2025, 6, 15), WeekStart::Monday).unwrap();
        assert_eq!(grid.len(), 6);
        assert!(grid[0][..6].iter().all(Option::is_none));
        assert_eq!(grid[0][6], Some(date(2025, 6, 1)));
        assert_eq!(grid[5][0], Some(date(2025, 6, 30)));
        assert!(grid[5][1..].iter().all(Option::is_none));

        let grid = month_grid(date(2025, 6, 15), WeekStart::Sunday).unwrap();
        assert_eq!(grid.len(), 5);
        assert_eq!(grid[0][0], Some(date(2025, 6, 1)));
        assert!(grid.iter().all(|row| row.len() == 7));
        assert_eq!(grid.iter().flatten().flatten().count(), 30);
    }

    #[test]
    fn test_populate_week_counts() {
        let plant = plant_with_history();
        let today = date(2025, 1, 1);

        let cells =
            populate_week(&[plant], today, WeekStart::Monday, today, &TimeZone::UTC).unwrap();
        // Week of Mon 2024-12-30
        assert_eq!(cells[0].date, date(2024, 12, 30));
        assert_eq!(cells[2].completed_count, 1);
        assert_eq!(cells[6].completed_count, 1);
        assert!(cells.iter().all(|cell| cell.due_count == 0));
    }

    #[test]
    fn test_populate_month_marks_due_day() {
        let plant = plant_with_history();
        let today = date(2025, 1, 10);

        let rows =
            populate_month(&[plant], today, WeekStart::Monday, today, &TimeZone::UTC).unwrap();
        let due: Vec<_> = rows
            .iter()
            .flatten()
            .flatten()
            .filter(|cell| cell.due_count > 0)
            .map(|cell| cell.date)
            .collect();
        assert_eq!(due, vec![date(2025, 1, 19)]);
    }

    #[test]
    fn test_navigate_limits() {
        let today = date(2025, 6, 1);

        assert_eq!(
            navigate(today, ViewMode::Daily, Direction::Previous, today, 3).unwrap(),
            None
        );
        assert_eq!(
            navigate(today, ViewMode::Weekly, Direction::Next, today, 3).unwrap(),
            Some(date(2025, 6, 8))
        );
        assert_eq!(
            navigate(date(2025, 8, 1), ViewMode::Monthly, Direction::Next, today, 3).unwrap(),
            Some(date(2025, 9, 1))
        );
        assert_eq!(
            navigate(date(2025, 9, 1), ViewMode::Daily, Direction::Next, today, 3).unwrap(),
            None
        );
        assert_eq!(
            navigate(date(2025, 6, 3), ViewMode::Daily, Direction::Previous, today, 3).unwrap(),
            Some(date(2025, 6, 2))
        );
    }

    #[test]
    fn test_week_start_parsing() {
        assert_eq!("Sunday".parse::<WeekStart>().unwrap(), WeekStart::Sunday);
        assert_eq!("mon".parse::<WeekStart>().unwrap(), WeekStart::Monday);
        assert!("friday".parse::<WeekStart>().is_err());
    }
}
