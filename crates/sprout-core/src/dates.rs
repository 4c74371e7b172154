//! Calendar-day normalization.
//!
//! Due dates are calendar days ([`Date`]) while completion events are
//! instants ([`Timestamp`]). Every comparison in the engine happens on local
//! calendar days, so instants are converted with [`start_of_day`] before they
//! are compared with anything.

use std::sync::{Mutex, PoisonError};

use jiff::{civil::Date, tz::TimeZone, Timestamp, ToSpan};

use crate::error::Result;

/// Source of "now" and of the local time zone used for day boundaries.
pub trait Clock: Send + Sync {
    /// Current instant.
    fn now(&self) -> Timestamp;

    /// Time zone that defines local day boundaries.
    fn time_zone(&self) -> TimeZone;

    /// Local calendar day of [`Clock::now`].
    fn today(&self) -> Date {
        start_of_day(self.now(), &self.time_zone())
    }
}

/// Wall clock in the system time zone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }

    fn time_zone(&self) -> TimeZone {
        TimeZone::system()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<Timestamp>,
    tz: TimeZone,
}

impl FixedClock {
    pub fn new(now: Timestamp, tz: TimeZone) -> Self {
        Self {
            now: Mutex::new(now),
            tz,
        }
    }

    /// A clock reading `hour:00` local time on `day`.
    pub fn at(day: Date, hour: i8, tz: TimeZone) -> Result<Self> {
        let now = day.at(hour, 0, 0, 0).to_zoned(tz.clone())?.timestamp();
        Ok(Self::new(now, tz))
    }

    pub fn set(&self, now: Timestamp) {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner) = now;
    }

    /// Moves the clock forward by whole days.
    pub fn advance_days(&self, days: i64) -> Result<()> {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        let zoned = now.to_zoned(self.tz.clone()).checked_add(days.days())?;
        *now = zoned.timestamp();
        Ok(())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn time_zone(&self) -> TimeZone {
        self.tz.clone()
    }
}

/// Local calendar day containing `instant`.
pub fn start_of_day(instant: Timestamp, tz: &TimeZone) -> Date {
    instant.to_zoned(tz.clone()).date()
}

/// Compares two instants by local year, month and day.
pub fn is_same_calendar_day(a: Timestamp, b: Timestamp, tz: &TimeZone) -> bool {
    start_of_day(a, tz) == start_of_day(b, tz)
}

/// `day` shifted by `days` (negative moves backwards).
pub fn add_days(day: Date, days: i64) -> Result<Date> {
    Ok(day.checked_add(days.days())?)
}

/// Parses a stored due date.
///
/// Accepts a plain `YYYY-MM-DD` day or a full RFC 3339 instant; instants are
/// reduced to their local day in `tz`.
pub fn parse_day(text: &str, tz: &TimeZone) -> Option<Date> {
    let text = text.trim();
    if let Ok(instant) = text.parse::<Timestamp>() {
        return Some(start_of_day(instant, tz));
    }
    text.parse::<Date>().ok()
}

/// "Today", "Tomorrow", or the weekday name of `day`.
pub fn relative_day_label(day: Date, today: Date) -> String {
    if day == today {
        return "Today".to_string();
    }
    if add_days(today, 1).is_ok_and(|tomorrow| tomorrow == day) {
        return "Tomorrow".to_string();
    }
    day.strftime("%A").to_string()
}
