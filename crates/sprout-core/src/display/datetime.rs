//! DateTime display utilities.

use std::fmt;

use jiff::civil::Date;

use crate::dates::relative_day_label;

/// A calendar day relative to today: `Today (Jun 1)`, `Tomorrow (Jun 2)`,
/// `Friday (Jun 6)`.
pub struct DayLabel {
    pub day: Date,
    pub today: Date,
}

impl fmt::Display for DayLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({})",
            relative_day_label(self.day, self.today),
            self.day.strftime("%b %-d")
        )
    }
}
