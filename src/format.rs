//! Token-pattern formatting.
//!
//! A pattern is plain text with two-character `%x` tokens in it. Each
//! recognised token is replaced everywhere it occurs; unrecognised `%x`
//! sequences and all other text are copied through.
//!
//! | Token | Output |
//! |-------|--------|
//! | `%j` | day of month, `1`..`31` |
//! | `%d` | day of month, `01`..`31` |
//! | `%n` | month, `1`..`12` |
//! | `%m` | month, `01`..`12` |
//! | `%F` | month name, `January`..`December` |
//! | `%M` | short month name, `Jan`..`Dec` |
//! | `%G` | hour, `0`..`23` |
//! | `%H` | hour, `00`..`23` |
//! | `%i` | minute, `00`..`59` |
//! | `%s` | second, `00`..`59` |
//! | `%W` | week number, `01`..`54` |
//! | `%Y` | year, as many digits as it has |

use log::debug;
use serde_json::Value;

use crate::{CalendarDate, DateError, FULL_MONTH_NAMES, SHORT_MONTH_NAMES, prelude::*};

/// A recognised pattern token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Token {
    #[display(fmt = "%j")]
    Day,
    #[display(fmt = "%d")]
    DayPadded,
    #[display(fmt = "%n")]
    Month,
    #[display(fmt = "%m")]
    MonthPadded,
    #[display(fmt = "%F")]
    MonthName,
    #[display(fmt = "%M")]
    ShortMonthName,
    #[display(fmt = "%G")]
    Hour,
    #[display(fmt = "%H")]
    HourPadded,
    #[display(fmt = "%i")]
    Minute,
    #[display(fmt = "%s")]
    Second,
    #[display(fmt = "%W")]
    Week,
    #[display(fmt = "%Y")]
    Year,
}

impl Token {
    /// All tokens, in substitution order.
    pub const ALL: [Self; 12] = [
        Self::Day,
        Self::DayPadded,
        Self::Month,
        Self::MonthPadded,
        Self::MonthName,
        Self::ShortMonthName,
        Self::Hour,
        Self::HourPadded,
        Self::Minute,
        Self::Second,
        Self::Week,
        Self::Year,
    ];

    /// Replacement text for this token.
    pub fn render(self, date: &CalendarDate) -> String {
        match self {
            Self::Day => date.day().to_string(),
            Self::DayPadded => format!("{:02}", date.day()),
            Self::Month => date.month().to_string(),
            Self::MonthPadded => format!("{:02}", date.month()),
            Self::MonthName => FULL_MONTH_NAMES[date.month0() as usize].to_owned(),
            Self::ShortMonthName => SHORT_MONTH_NAMES[date.month0() as usize].to_owned(),
            Self::Hour => date.hour().to_string(),
            Self::HourPadded => format!("{:02}", date.hour()),
            Self::Minute => format!("{:02}", date.minute()),
            Self::Second => format!("{:02}", date.second()),
            Self::Week => format!("{:02}", date.week_number()),
            Self::Year => date.year().to_string(),
        }
    }
}

impl CalendarDate {
    /// Renders this date through `pattern`.
    ///
    /// Replacements are computed once, then applied one token at a time in
    /// [`Token::ALL`] order, each over the output of the previous one.
    ///
    /// ```
    /// # use date_extensions::CalendarDate;
    /// let date = CalendarDate::from_ymd_hms(2016, 6, 24, 9, 0, 0).unwrap();
    /// assert_eq!(date.format("%m/%d/%Y - %H:%i"), "06/24/2016 - 09:00");
    /// assert_eq!(date.format("%n/%d/%Y - %G.%i"), "6/24/2016 - 9.00");
    /// ```
    pub fn format(&self, pattern: &str) -> String {
        let replacements = Token::ALL.map(|token| (token.to_string(), token.render(self)));
        replacements
            .iter()
            .fold(pattern.to_owned(), |out, (token, value)| out.replace(token, value))
    }

    /// Renders this date through a dynamically typed pattern.
    ///
    /// # Errors
    /// Returns `DateError::TypeError` if `pattern` is not a JSON string.
    pub fn format_value(&self, pattern: &Value) -> Result<String, DateError> {
        match pattern {
            Value::String(pattern) => Ok(self.format(pattern)),
            other => {
                let found = json_type_name(other);
                debug!("format pattern must be a string, got {found}");
                Err(DateError::TypeError {
                    expected: "string",
                    found,
                })
            }
        }
    }
}

const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Free-function form of [`CalendarDate::format`].
pub fn format(date: &CalendarDate, pattern: &str) -> String {
    date.format(pattern)
}

/// Free-function form of [`CalendarDate::format_value`].
///
/// # Errors
/// See [`CalendarDate::format_value`].
pub fn format_value(date: &CalendarDate, pattern: &Value) -> Result<String, DateError> {
    date.format_value(pattern)
}
