mod arg;
mod consts;
mod format;
mod prelude;
mod week;

pub use arg::WeekArg;
pub use consts::*;
pub use format::{Token, format, format_value};
pub use week::{from_year_and_week, week_end, week_number, week_start};

use crate::prelude::*;
use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// A wall-clock date and time with millisecond precision.
///
/// The value carries no timezone: its fields are the local reading it was
/// built from, and its epoch-millisecond form is that reading placed on a
/// UTC timeline. Shifting by `n * MS_PER_DAY` therefore always lands on the
/// same clock time `n` calendar days away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Into, Serialize, Deserialize)]
#[display(fmt = "{_0}")]
#[serde(try_from = "i64", into = "i64")]
pub struct CalendarDate(NaiveDateTime);

/// Errors produced by date construction, week lookup and formatting.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateError {
    /// An argument that must be an integer did not start with one.
    #[error("Invalid argument `{name}`: {value} is not numeric")]
    InvalidArgument { name: &'static str, value: String },

    /// An argument had the wrong dynamic type.
    #[error("Type error: expected {expected}, found {found}")]
    TypeError {
        expected: &'static str,
        found: &'static str,
    },

    /// The calendar fields do not name an existing day.
    #[error("Invalid date {year}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },

    /// The clock fields do not name an existing time of day.
    #[error("Invalid time {hour:02}:{minute:02}:{second:02}")]
    InvalidTime { hour: u32, minute: u32, second: u32 },

    /// A value falls outside the supported date range.
    #[error("{what} out of supported range: {value}")]
    OutOfRange { what: &'static str, value: i64 },
}

impl CalendarDate {
    /// Creates a date from calendar and clock fields (month is 1-based).
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` if the year is outside `MIN_YEAR..=MAX_YEAR`,
    /// `DateError::InvalidDate` or `DateError::InvalidTime` if the fields don't exist.
    pub fn from_ymd_hms(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Result<Self, DateError> {
        check_year(year)?;
        let date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or(DateError::InvalidDate { year, month, day })?;
        let time = NaiveTime::from_hms_opt(hour, minute, second).ok_or(DateError::InvalidTime {
            hour,
            minute,
            second,
        })?;
        Ok(Self(date.and_time(time)))
    }

    /// Creates a date at 00:00:00 (month is 1-based).
    ///
    /// # Errors
    /// Same as [`CalendarDate::from_ymd_hms`].
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        Self::from_ymd_hms(year, month, day, 0, 0, 0)
    }

    /// Creates a date from its epoch-millisecond representation.
    ///
    /// Accepts every instant in the Monday-to-Sunday weeks that overlap
    /// `MIN_YEAR..=MAX_YEAR`, so any `week_start`/`week_end` result converts back.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` if the instant lies outside those weeks.
    pub fn from_millis(millis: i64) -> Result<Self, DateError> {
        DateTime::<Utc>::from_timestamp_millis(millis)
            .map(|dt| Self(dt.naive_utc()))
            .filter(|date| within_bounds(date.0.date()))
            .ok_or(DateError::OutOfRange {
                what: "timestamp",
                value: millis,
            })
    }

    /// The current local wall-clock reading.
    pub fn now() -> Self {
        Self(Local::now().naive_local())
    }

    /// Epoch-millisecond representation.
    pub fn millis(&self) -> i64 {
        self.0.and_utc().timestamp_millis()
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Month, 1-based (January = 1)
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Month, 0-based (January = 0)
    pub fn month0(&self) -> u32 {
        self.0.month0()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    pub fn second(&self) -> u32 {
        self.0.second()
    }

    /// Day of week, Sunday = 0 .. Saturday = 6
    pub fn day_of_week(&self) -> u32 {
        self.0.weekday().num_days_from_sunday()
    }

    /// Returns a copy with only the year field replaced.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` for years outside `MIN_YEAR..=MAX_YEAR`
    /// and `DateError::InvalidDate` when the day doesn't exist in that year (Feb 29).
    pub fn with_year(&self, year: i32) -> Result<Self, DateError> {
        check_year(year)?;
        self.0.with_year(year).map(Self).ok_or(DateError::InvalidDate {
            year,
            month: self.month(),
            day: self.day(),
        })
    }

    /// Same calendar day at 00:00:00.
    pub fn start_of_day(&self) -> Self {
        Self(self.0.date().and_time(NaiveTime::MIN))
    }

    /// Adds a signed number of milliseconds. Returns `None` if the result
    /// leaves the weeks overlapping `MIN_YEAR..=MAX_YEAR`.
    pub fn checked_add_millis(&self, millis: i64) -> Option<Self> {
        self.raw_add_millis(millis)
            .filter(|date| within_bounds(date.0.date()))
    }

    /// Adds a signed number of 24h days. Returns `None` if the result
    /// leaves the weeks overlapping `MIN_YEAR..=MAX_YEAR`.
    pub fn checked_add_days(&self, days: i64) -> Option<Self> {
        days.checked_mul(MS_PER_DAY)
            .and_then(|millis| self.checked_add_millis(millis))
    }

    pub const fn as_naive(&self) -> NaiveDateTime {
        self.0
    }

    /// Millisecond shift bounded only by chrono's own range.
    pub(crate) fn raw_add_millis(&self, millis: i64) -> Option<Self> {
        TimeDelta::try_milliseconds(millis)
            .and_then(|delta| self.0.checked_add_signed(delta))
            .map(Self)
    }

    /// Shift by whole 24h days. Every value sits within a week of
    /// `MIN_YEAR..=MAX_YEAR`, far inside chrono's range, so week-sized shifts
    /// never hit the fallback.
    pub(crate) fn shifted_days(&self, days: i64) -> Self {
        days.checked_mul(MS_PER_DAY)
            .and_then(|millis| self.raw_add_millis(millis))
            .unwrap_or(*self)
    }
}

fn check_year(year: i32) -> Result<(), DateError> {
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Ok(())
    } else {
        Err(DateError::OutOfRange {
            what: "year",
            value: i64::from(year),
        })
    }
}

/// Whether `date` falls in a Monday-to-Sunday week that overlaps
/// `MIN_YEAR..=MAX_YEAR`. The range is a union of whole weeks, so week
/// boundaries of an in-range date are in range too.
fn within_bounds(date: NaiveDate) -> bool {
    let from_monday = date.weekday().num_days_from_monday();
    match date.year() {
        year if (MIN_YEAR..=MAX_YEAR).contains(&year) => true,
        // Its Monday is still in MAX_YEAR.
        year if year == MAX_YEAR + 1 => date.ordinal0() < from_monday,
        // Its Sunday is already in MIN_YEAR.
        year if year == MIN_YEAR - 1 => {
            let days_in_year = if date.leap_year() { 366 } else { 365 };
            days_in_year - date.ordinal() < 6 - from_monday
        }
        _ => false,
    }
}

impl TryFrom<i64> for CalendarDate {
    type Error = DateError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::from_millis(value)
    }
}

impl From<CalendarDate> for i64 {
    fn from(date: CalendarDate) -> Self {
        date.millis()
    }
}
