//! Fixed layout date and duration strings.
//!
//! - Datetime: `YYYY-MM-DD HH:MM:SS`, e.g. `2016-07-02 20:24:59`
//! - Duration: `HH:MM:SS.ff`, e.g. `00:00:04.80`
//!
//! Fields are read at fixed column offsets. No timezone handling,
//! a datetime is returned with the literal digits of the input.

use std::ops::Range;

use time::{
    format_description::BorrowedFormatItem,
    macros::format_description,
    Date,
    Duration,
    Month,
    PrimitiveDateTime,
};

use crate::errors::FormatError;

/// Naive calendar date and time.
pub type Timestamp = PrimitiveDateTime;

const DATETIME_LAYOUT: &str = "YYYY-MM-DD HH:MM:SS";
const DURATION_LAYOUT: &str = "HH:MM:SS.ff";

const DATETIME_FORMAT: &[BorrowedFormatItem<'_>] = format_description!(
    "[year]-[month]-[day] [hour]:[minute]:[second]"
);

/// Max number of fraction digits for duration seconds (nanosecond precision).
const MAX_FRACTION_DIGITS: usize = 9;

fn invalid(input: &str, expected: &'static str) -> FormatError {
    FormatError::InvalidLayout{input: input.to_owned(), expected}
}

fn out_of_range(input: &str, field: &'static str) -> FormatError {
    FormatError::OutOfRange{input: input.to_owned(), field}
}

/// Parses the ASCII digits at `range` as a decimal value.
fn digits(input: &str, range: Range<usize>, expected: &'static str) -> Result<u32, FormatError> {
    let bytes = input.as_bytes()
        .get(range)
        .ok_or_else(|| invalid(input, expected))?;

    bytes.iter().try_fold(0_u32, |acc, b| match b {
        b'0'..=b'9' => Ok(acc * 10 + (b - b'0') as u32),
        _ => Err(invalid(input, expected)),
    })
}

/// Checks that byte at `pos` is `separator`.
fn separator(input: &str, pos: usize, separator: u8, expected: &'static str) -> Result<(), FormatError> {
    match input.as_bytes().get(pos) {
        Some(b) if *b == separator => Ok(()),
        _ => Err(invalid(input, expected)),
    }
}

/// Parses `YYYY-MM-DD HH:MM:SS`.
///
/// At least 19 characters are required, anything after
/// column 18 (e.g. fractional seconds) is ignored.
pub fn parse_datetime(input: &str) -> Result<Timestamp, FormatError> {
    let l = DATETIME_LAYOUT;

    if input.len() < l.len() {
        return Err(invalid(input, l))
    }

    separator(input, 4, b'-', l)?;
    separator(input, 7, b'-', l)?;
    separator(input, 10, b' ', l)?;
    separator(input, 13, b':', l)?;
    separator(input, 16, b':', l)?;

    let year = digits(input, 0..4, l)? as i32;
    let month = digits(input, 5..7, l)?;
    let day = digits(input, 8..10, l)?;
    let hour = digits(input, 11..13, l)?;
    let minute = digits(input, 14..16, l)?;
    let second = digits(input, 17..19, l)?;

    // Two digit fields always fit in u8
    let month = Month::try_from(month as u8)
        .map_err(|err| out_of_range(input, err.name()))?;
    let date = Date::from_calendar_date(year, month, day as u8)
        .map_err(|err| out_of_range(input, err.name()))?;
    let datetime = date.with_hms(hour as u8, minute as u8, second as u8)
        .map_err(|err| out_of_range(input, err.name()))?;

    Ok(datetime)
}

/// Parses `HH:MM:SS.ff` into a duration.
///
/// Seconds are read as a decimal number from column 6,
/// with 1 to 9 fraction digits. The fraction is converted
/// exactly, `00:00:04.80` is 4.8 seconds with no rounding.
pub fn parse_duration(input: &str) -> Result<Duration, FormatError> {
    let l = DURATION_LAYOUT;

    separator(input, 2, b':', l)?;
    separator(input, 5, b':', l)?;
    separator(input, 8, b'.', l)?;

    let fraction_len = input.len().saturating_sub(9);
    if !(1..=MAX_FRACTION_DIGITS).contains(&fraction_len) {
        return Err(invalid(input, l))
    }

    let hours = digits(input, 0..2, l)?;
    let minutes = digits(input, 3..5, l)?;
    let seconds = digits(input, 6..8, l)?;
    let fraction = digits(input, 9..input.len(), l)?;

    if minutes > 59 {
        return Err(out_of_range(input, "minutes"))
    }
    if seconds > 59 {
        return Err(out_of_range(input, "seconds"))
    }

    // e.g. "8" -> 800_000_000, "80" -> 800_000_000
    let nanos = fraction * 10_u32.pow((MAX_FRACTION_DIGITS - fraction_len) as u32);

    Ok(Duration::hours(hours as i64)
        + Duration::minutes(minutes as i64)
        + Duration::new(seconds as i64, nanos as i32))
}

/// Writes `YYYY-MM-DD HH:MM:SS`.
///
/// Only years 0-9999 fit the layout.
pub fn format_datetime(datetime: &Timestamp) -> Result<String, FormatError> {
    if !(0..=9999).contains(&datetime.year()) {
        return Err(FormatError::OutOfRange{input: datetime.to_string(), field: "year"})
    }
    Ok(datetime.format(DATETIME_FORMAT)?)
}

/// Writes `HH:MM:SS.ff`.
///
/// At least two fraction digits are written, more if needed to
/// keep the full nanosecond precision (`00:00:04.805`).
/// Negative durations and durations of 100 hours or more
/// do not fit the layout.
pub fn format_duration(duration: &Duration) -> Result<String, FormatError> {
    if duration.is_negative() || duration.whole_hours() > 99 {
        return Err(FormatError::OutOfRange{input: duration.to_string(), field: "hours"})
    }

    let total = duration.whole_seconds();
    let hours = total / 3600;
    let minutes = total % 3600 / 60;
    let seconds = total % 60;
    let mut fraction = format!("{:09}", duration.subsec_nanoseconds());
    let digits = fraction.trim_end_matches('0').len().max(2);
    fraction.truncate(digits);

    Ok(format!("{hours:02}:{minutes:02}:{seconds:02}.{fraction}"))
}
