//! Integer coercion for the loosely typed `(year, week)` arguments.

use serde_json::Value;

/// A value that can stand in for an integer year or week number.
///
/// Integers convert directly. Strings are read the lenient way: leading
/// whitespace is skipped, an optional sign and the leading run of decimal
/// digits are taken, and anything after them is ignored (`"12abc"` is 12).
/// JSON numbers are truncated toward zero; other JSON values never convert.
pub trait WeekArg {
    /// The integer value, or `None` if the argument does not start with one.
    fn to_int(&self) -> Option<i64>;

    /// Rendering used in error messages.
    fn describe(&self) -> String;
}

impl<T: WeekArg + ?Sized> WeekArg for &T {
    fn to_int(&self) -> Option<i64> {
        (**self).to_int()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

macro_rules! impl_week_arg_for_int {
    ($($ty:ty),*) => {
        $(
            impl WeekArg for $ty {
                fn to_int(&self) -> Option<i64> {
                    i64::try_from(*self).ok()
                }

                fn describe(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

impl_week_arg_for_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl WeekArg for str {
    fn to_int(&self) -> Option<i64> {
        parse_leading_int(self)
    }

    fn describe(&self) -> String {
        format!("{self:?}")
    }
}

impl WeekArg for String {
    fn to_int(&self) -> Option<i64> {
        parse_leading_int(self)
    }

    fn describe(&self) -> String {
        format!("{self:?}")
    }
}

impl WeekArg for Value {
    fn to_int(&self) -> Option<i64> {
        match self {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(truncate)),
            Value::String(s) => parse_leading_int(s),
            Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => None,
        }
    }

    fn describe(&self) -> String {
        self.to_string()
    }
}

fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let sign_len = usize::from(s.starts_with(['+', '-']));
    let digits = s[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits == 0 {
        return None;
    }
    // An over-long digit run overflows i64 and is rejected like a non-number.
    s[..sign_len + digits].parse().ok()
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn truncate(value: f64) -> Option<i64> {
    let limit = i64::MAX as f64;
    (value.is_finite() && value.abs() < limit).then(|| value.trunc() as i64)
}
