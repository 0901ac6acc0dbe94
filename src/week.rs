//! Monday-first week boundaries and week numbering.
//!
//! Week numbers are counted the iterative way: step back one week at a time
//! from the date itself until the year drops below the year of the date's
//! week start. This is not ISO-8601 week numbering. It agrees with
//! [`CalendarDate::from_year_and_week`], and the two round-trip for Mondays.

use log::{debug, trace};

use crate::{
    ANCHOR_YEAR, CalendarDate, DAYS_PER_WEEK, DateError, MAX_YEAR, MIN_YEAR, MS_PER_WEEK, SUNDAY,
    WeekArg,
};

impl CalendarDate {
    /// Start (00:00:00) of the Monday of the week containing this date.
    /// A Sunday belongs to the week that started six days earlier.
    pub fn week_start(&self) -> Self {
        let day = self.start_of_day();
        let offset = match day.day_of_week() {
            SUNDAY => DAYS_PER_WEEK - 1,
            dow => i64::from(dow) - 1,
        };
        day.shifted_days(-offset)
    }

    /// Start (00:00:00) of the Sunday of the week containing this date.
    /// A Sunday is its own week end.
    pub fn week_end(&self) -> Self {
        let day = self.start_of_day();
        let offset = match day.day_of_week() {
            SUNDAY => 0,
            dow => DAYS_PER_WEEK - i64::from(dow),
        };
        day.shifted_days(offset)
    }

    /// 1-based week number within the year of this date's week start.
    ///
    /// Early-January dates whose week began in December count against the
    /// previous year, so they get that year's high week numbers (Friday
    /// 2016-01-01 is week 53). Results lie in `1..=54`.
    pub fn week_number(&self) -> u32 {
        let ref_year = self.week_start().year();
        let weeks = self.weeks_back_to(ref_year);
        if weeks >= 1 {
            return weeks;
        }

        trace!("week number for {self} fell below 1 against {ref_year}, retrying against {}", ref_year - 1);
        self.weeks_back_to(ref_year - 1)
    }

    /// Monday (00:00:00) of week `week` in `year`, as numbered by
    /// [`CalendarDate::week_number`].
    ///
    /// Builds January 1st of `year`, moves `week * 7 - 1` days forward and
    /// takes the week start of that day.
    ///
    /// Years are used as given: `5` means year 5, not 1905.
    ///
    /// # Errors
    /// Returns `DateError::InvalidArgument` if `year` or `week` is not numeric,
    /// `DateError::OutOfRange` if the year or resulting date is outside
    /// `MIN_YEAR..=MAX_YEAR`.
    pub fn from_year_and_week(year: impl WeekArg, week: impl WeekArg) -> Result<Self, DateError> {
        let int_year = year.to_int().ok_or_else(|| invalid_argument("year", &year))?;
        let int_week = week.to_int().ok_or_else(|| invalid_argument("week", &week))?;

        let int_year = i32::try_from(int_year)
            .ok()
            .filter(|y| (MIN_YEAR..=MAX_YEAR).contains(y))
            .ok_or(DateError::OutOfRange {
                what: "year",
                value: int_year,
            })?;

        let week_out_of_range = DateError::OutOfRange {
            what: "week",
            value: int_week,
        };
        let days = int_week
            .checked_mul(DAYS_PER_WEEK)
            .and_then(|days| days.checked_sub(1))
            .ok_or_else(|| week_out_of_range.clone())?;

        let jan_first = CalendarDate::from_ymd(ANCHOR_YEAR, 1, 1)?.with_year(int_year)?;
        let probe = jan_first
            .checked_add_days(days)
            .ok_or(week_out_of_range)?;

        Ok(probe.week_start())
    }

    /// Number of one-week steps back from this date that stay at or above `ref_year`.
    fn weeks_back_to(&self, ref_year: i32) -> u32 {
        let mut probe = *self;
        let mut count = 0;
        while probe.year() >= ref_year {
            count += 1;
            let Some(previous) = probe.raw_add_millis(-MS_PER_WEEK) else {
                break;
            };
            probe = previous;
        }
        count
    }
}

fn invalid_argument(name: &'static str, value: &impl WeekArg) -> DateError {
    let value = value.describe();
    debug!("rejecting non-numeric {name} argument {value}");
    DateError::InvalidArgument { name, value }
}

/// Free-function form of [`CalendarDate::week_start`].
pub fn week_start(date: &CalendarDate) -> CalendarDate {
    date.week_start()
}

/// Free-function form of [`CalendarDate::week_end`].
pub fn week_end(date: &CalendarDate) -> CalendarDate {
    date.week_end()
}

/// Free-function form of [`CalendarDate::week_number`].
pub fn week_number(date: &CalendarDate) -> u32 {
    date.week_number()
}

/// Free-function form of [`CalendarDate::from_year_and_week`].
///
/// # Errors
/// See [`CalendarDate::from_year_and_week`].
pub fn from_year_and_week(year: impl WeekArg, week: impl WeekArg) -> Result<CalendarDate, DateError> {
    CalendarDate::from_year_and_week(year, week)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ymd(year: i32, month: u32, day: u32) -> CalendarDate {
        CalendarDate::from_ymd(year, month, day).unwrap()
    }

    /// Every day from January 1st of `first` through December 31st of `last`.
    fn days_between(first: i32, last: i32) -> impl Iterator<Item = CalendarDate> {
        let end = ymd(last, 12, 31);
        std::iter::successors(Some(ymd(first, 1, 1)), move |d| {
            d.checked_add_days(1).filter(|next| *next <= end)
        })
    }

    #[test]
    fn test_week_start_midweek() {
        // Friday
        let date = CalendarDate::from_ymd_hms(2016, 6, 24, 9, 0, 0).unwrap();
        assert_eq!(date.week_start(), ymd(2016, 6, 20));
        assert_eq!(date.week_end(), ymd(2016, 6, 26));
    }

    #[test]
    fn test_sunday_belongs_to_previous_monday() {
        let sunday = CalendarDate::from_ymd_hms(2016, 6, 26, 15, 30, 0).unwrap();
        assert_eq!(sunday.week_start(), ymd(2016, 6, 20));
        assert_eq!(sunday.week_end(), ymd(2016, 6, 26));
        assert_eq!(sunday.week_end(), sunday.start_of_day());
    }

    #[test]
    fn test_monday_is_its_own_week_start() {
        let monday = ymd(2016, 6, 20);
        assert_eq!(monday.week_start(), monday);
        assert_eq!(monday.week_end(), ymd(2016, 6, 26));
    }

    #[test]
    fn test_week_boundaries_cross_year() {
        // Friday 2016-01-01
        let date = ymd(2016, 1, 1);
        assert_eq!(date.week_start(), ymd(2015, 12, 28));
        assert_eq!(date.week_end(), ymd(2016, 1, 3));

        // Tuesday 2019-12-31
        let date = ymd(2019, 12, 31);
        assert_eq!(date.week_start(), ymd(2019, 12, 30));
        assert_eq!(date.week_end(), ymd(2020, 1, 5));
    }

    #[test]
    fn test_week_boundaries_for_every_day() {
        for date in days_between(2012, 2024) {
            let start = date.week_start();
            let end = date.week_end();
            assert_eq!(start.day_of_week(), 1, "week start of {date}");
            assert_eq!(end.day_of_week(), SUNDAY, "week end of {date}");
            assert!(start <= date.start_of_day() && date.start_of_day() <= end, "{date}");
            assert_eq!(end.checked_add_days(-6), Some(start), "{date}");
            assert_eq!(start.week_start(), start, "idempotent for {date}");
            assert_eq!(end.week_end(), end, "idempotent for {date}");
        }
    }

    #[test]
    fn test_week_number_examples() {
        assert_eq!(ymd(2016, 6, 24).week_number(), 26);
        assert_eq!(ymd(2016, 1, 4).week_number(), 1);
        assert_eq!(ymd(2016, 1, 8).week_number(), 2);
        assert_eq!(ymd(2016, 12, 31).week_number(), 53);
    }

    #[test]
    fn test_week_number_counts_from_the_date_itself() {
        // Monday and Wednesday of the same week; Wednesday still reaches
        // back to January 1st.
        assert_eq!(ymd(2020, 1, 6).week_number(), 1);
        assert_eq!(ymd(2020, 1, 8).week_number(), 2);
    }

    #[test]
    fn test_january_first_on_friday_uses_previous_year() {
        let date = ymd(2016, 1, 1);
        assert_eq!(date.day_of_week(), 5);
        assert_eq!(date.week_number(), 53);
        assert_eq!(ymd(2016, 1, 3).week_number(), 53);
    }

    #[test]
    fn test_week_number_can_reach_54() {
        // Week started Monday 2012-12-31; 2012 is a leap year beginning on a Sunday.
        let date = ymd(2013, 1, 6);
        assert_eq!(date.week_start(), ymd(2012, 12, 31));
        assert_eq!(date.week_number(), 54);
    }

    #[test]
    fn test_week_number_range_for_every_day() {
        for date in days_between(1999, 2031) {
            let week = date.week_number();
            assert!((1..=54).contains(&week), "{date} -> {week}");
            // The fallback branch never triggers: the first probe is the date
            // itself and its year is never below its week start's year.
            assert!(date.weeks_back_to(date.week_start().year()) >= 1, "{date}");
        }
    }

    #[test]
    fn test_week_number_ignores_time_of_day() {
        let morning = CalendarDate::from_ymd_hms(2016, 6, 24, 0, 0, 1).unwrap();
        let evening = CalendarDate::from_ymd_hms(2016, 6, 24, 23, 59, 59).unwrap();
        assert_eq!(morning.week_number(), evening.week_number());
    }

    #[test]
    fn test_from_year_and_week_examples() {
        assert_eq!(CalendarDate::from_year_and_week(2016, 1).unwrap(), ymd(2016, 1, 4));
        assert_eq!(CalendarDate::from_year_and_week(2016, 26).unwrap(), ymd(2016, 6, 27));
        assert_eq!(CalendarDate::from_year_and_week(2020, 1).unwrap(), ymd(2020, 1, 6));
        // Thursday 2015-01-01: week 1 starts on the first Monday after it
        assert_eq!(CalendarDate::from_year_and_week(2015, 1).unwrap(), ymd(2015, 1, 5));
    }

    #[test]
    fn test_from_year_and_week_zero_and_negative() {
        // Week 0 is the week containing December 31st of the previous year.
        assert_eq!(CalendarDate::from_year_and_week(2016, 0).unwrap(), ymd(2015, 12, 28));
        assert_eq!(CalendarDate::from_year_and_week(2016, -1).unwrap(), ymd(2015, 12, 21));
    }

    #[test]
    fn test_from_year_and_week_accepts_numeric_strings() {
        let expected = ymd(2016, 6, 27);
        assert_eq!(CalendarDate::from_year_and_week("2016", "26").unwrap(), expected);
        assert_eq!(CalendarDate::from_year_and_week(" 2016", 26).unwrap(), expected);
        assert_eq!(
            CalendarDate::from_year_and_week(String::from("2016"), &String::from("26")).unwrap(),
            expected
        );
        assert_eq!(CalendarDate::from_year_and_week(json!(2016), json!("26")).unwrap(), expected);
        assert_eq!(from_year_and_week(2016_u16, 26_u8).unwrap(), expected);
    }

    #[test]
    fn test_from_year_and_week_rejects_non_numeric() {
        let result = CalendarDate::from_year_and_week("abc", 1);
        assert!(matches!(
            result,
            Err(DateError::InvalidArgument { name: "year", .. })
        ));

        let result = CalendarDate::from_year_and_week(2016, "abc");
        assert_eq!(
            result,
            Err(DateError::InvalidArgument {
                name: "week",
                value: "\"abc\"".to_owned()
            })
        );

        let result = CalendarDate::from_year_and_week(json!(null), 1);
        assert!(matches!(result, Err(DateError::InvalidArgument { .. })));
    }

    #[test]
    fn test_from_year_and_week_out_of_range() {
        let result = CalendarDate::from_year_and_week(10000, 1);
        assert!(matches!(
            result,
            Err(DateError::OutOfRange { what: "year", .. })
        ));

        let result = CalendarDate::from_year_and_week(MAX_YEAR, 60);
        assert!(matches!(
            result,
            Err(DateError::OutOfRange { what: "week", .. })
        ));

        let result = CalendarDate::from_year_and_week(2016, i64::MAX);
        assert!(matches!(
            result,
            Err(DateError::OutOfRange { what: "week", .. })
        ));
    }

    #[test]
    fn test_from_year_and_week_two_digit_year_is_literal() {
        let date = CalendarDate::from_year_and_week(5, 1).unwrap();
        assert_eq!(date.year(), 5);
        assert_eq!(date.month(), 1);
        assert_eq!(date.day_of_week(), 1);
        assert_eq!(CalendarDate::from_year_and_week("99", 1).unwrap().year(), 99);
    }

    #[test]
    fn test_from_year_and_week_always_monday() {
        for year in 1995..=2030 {
            for week in 0..=54 {
                let date = CalendarDate::from_year_and_week(year, week).unwrap();
                assert_eq!(date.day_of_week(), 1, "{year} week {week}");
                assert_eq!(date, date.start_of_day(), "{year} week {week}");
            }
        }
    }

    #[test]
    fn test_round_trip_for_every_monday() {
        for monday in days_between(1999, 2031).filter(|d| d.day_of_week() == 1) {
            let week = monday.week_number();
            let rebuilt = CalendarDate::from_year_and_week(monday.year(), week).unwrap();
            assert_eq!(rebuilt, monday, "{monday} is week {week}");
        }
    }

    #[test]
    fn test_free_functions() {
        let date = ymd(2016, 6, 24);
        assert_eq!(week_start(&date), date.week_start());
        assert_eq!(week_end(&date), date.week_end());
        assert_eq!(week_number(&date), date.week_number());
    }
}
