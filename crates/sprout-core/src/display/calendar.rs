//! Week and month tables.
//!
//! Each cell shows `due/done` badge counts; empty days are left blank.

use std::fmt;

use jiff::civil::Date;

use crate::calendar::CalendarCell;

fn badge(cell: &CalendarCell) -> String {
    match (cell.due_count, cell.completed_count) {
        (0, 0) => String::new(),
        (due, 0) => format!("{due} due"),
        (0, done) => format!("{done} done"),
        (due, done) => format!("{due} due, {done} done"),
    }
}

fn header_row(f: &mut fmt::Formatter<'_>, days: impl Iterator<Item = Date>) -> fmt::Result {
    let names: Vec<String> = days.map(|day| day.strftime("%a").to_string()).collect();
    writeln!(f, "| {} |", names.join(" | "))?;
    writeln!(f, "|{}", "---|".repeat(names.len()))
}

/// Seven consecutive days as a one-row table.
pub struct WeekView(pub Vec<CalendarCell>);

impl fmt::Display for WeekView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (Some(first), Some(last)) = (self.0.first(), self.0.last()) else {
            return writeln!(f, "No days to show.");
        };

        writeln!(f, "# Week of {} to {}", first.date, last.date)?;
        writeln!(f)?;
        header_row(f, self.0.iter().map(|cell| cell.date))?;

        let cells: Vec<String> = self
            .0
            .iter()
            .map(|cell| {
                let badge = badge(cell);
                if badge.is_empty() {
                    cell.date.day().to_string()
                } else {
                    format!("{} · {badge}", cell.date.day())
                }
            })
            .collect();
        writeln!(f, "| {} |", cells.join(" | "))
    }
}

/// A month grid; `None` slots are padding outside the month.
pub struct MonthView {
    pub anchor: Date,
    pub rows: Vec<[Option<CalendarCell>; 7]>,
}

impl fmt::Display for MonthView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.anchor.strftime("%B %Y"))?;
        writeln!(f)?;

        // Weekday names from the first complete row
        let Some(full) = self.rows.iter().find(|row| row.iter().all(Option::is_some)) else {
            return writeln!(f, "No days to show.");
        };
        header_row(f, full.iter().flatten().map(|cell| cell.date))?;

        for row in &self.rows {
            let cells: Vec<String> = row
                .iter()
                .map(|slot| match slot {
                    Some(cell) if cell.is_empty() => cell.date.day().to_string(),
                    Some(cell) => format!("**{}** {}", cell.date.day(), badge(cell)),
                    None => String::new(),
                })
                .collect();
            writeln!(f, "| {} |", cells.join(" | "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;
    use crate::calendar::{month_grid, week_days, WeekStart};

    fn cell(day: Date, due_count: usize, completed_count: usize) -> CalendarCell {
        CalendarCell {
            date: day,
            due_count,
            completed_count,
        }
    }

    #[test]
    fn test_week_view() {
        let days = week_days(date(2025, 6, 4), WeekStart::Monday).unwrap();
        let mut cells: Vec<_> = days.iter().map(|d| cell(*d, 0, 0)).collect();
        cells[2] = cell(date(2025, 6, 4), 2, 1);

        let output = WeekView(cells).to_string();
        assert!(output.contains("# Week of 2025-06-02 to 2025-06-08"));
        assert!(output.contains("| Mon | Tue | Wed | Thu | Fri | Sat | Sun |"));
        assert!(output.contains("4 · 2 due, 1 done"));
    }

    #[test]
    fn test_month_view() {
        let rows = month_grid(date(2025, 6, 1), WeekStart::Sunday)
            .unwrap()
            .into_iter()
            .map(|row| row.map(|slot| slot.map(|day| cell(day, usize::from(day.day() == 4), 0))))
            .collect();

        let output = MonthView {
            anchor: date(2025, 6, 1),
            rows,
        }
        .to_string();

        assert!(output.starts_with("# June 2025"));
        assert!(output.contains("| Sun | Mon | Tue | Wed | Thu | Fri | Sat |"));
        assert!(output.contains("**4** 1 due"));
        assert!(output.contains("| 29 | 30 |  |  |  |  |  |"));
    }
}
