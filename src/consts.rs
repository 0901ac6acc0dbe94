/// Smallest year accepted by the `CalendarDate` constructors (inclusive)
pub const MIN_YEAR: i32 = -9999;

/// Largest year accepted by the `CalendarDate` constructors (inclusive)
pub const MAX_YEAR: i32 = 9999;

/// Milliseconds in one 24h day
pub const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Days in one Monday-first week
pub const DAYS_PER_WEEK: i64 = 7;

/// Milliseconds in one week
pub const MS_PER_WEEK: i64 = DAYS_PER_WEEK * MS_PER_DAY;

/// Year of the January 1st, 00:00:00 reference date used to build dates from
/// a (year, week) pair. Only its month, day and clock fields survive.
pub const ANCHOR_YEAR: i32 = 2015;

/// Day-of-week number for Sunday (Sunday = 0 .. Saturday = 6)
pub const SUNDAY: u32 = 0;

/// English month names, indexed by 0-based month
pub const FULL_MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Three-letter English month names, indexed by 0-based month
pub const SHORT_MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
