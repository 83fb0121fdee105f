//! Date-time parsing and day detection.
//!
//! Shift timestamps travel as separate date (`YYYY-MM-DD`) and time (`HH:MM`)
//! strings. This module combines them into local naive instants, detects
//! Sundays from the calendar date, and holds the shared two-decimal rounding.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::DATE_FORMAT;

const TIME_FORMATS: [&str; 2] = ["%H:%M", "%H:%M:%S"];

/// Combines a date string and a time string into a local instant.
///
/// Returns `None` when either part is malformed. Seconds are accepted but
/// not required.
///
/// # Example
///
/// ```
/// use shiftcash_engine::calculation::parse_instant;
///
/// assert!(parse_instant("2024-01-07", "09:00").is_some());
/// assert!(parse_instant("2024-01-07", "09:00:30").is_some());
/// assert!(parse_instant("2024-02-30", "09:00").is_none());
/// assert!(parse_instant("2024-01-07", "9am").is_none());
/// ```
pub fn parse_instant(date: &str, time: &str) -> Option<NaiveDateTime> {
    let date = NaiveDate::parse_from_str(date, DATE_FORMAT).ok()?;
    let time = TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(time, format).ok())?;
    Some(date.and_time(time))
}

/// Returns the elapsed seconds between two date/time pairs.
///
/// `None` if either instant cannot be parsed. The result is negative when the
/// end precedes the start.
pub fn elapsed_seconds(
    start_date: &str,
    start_time: &str,
    end_date: &str,
    end_time: &str,
) -> Option<i64> {
    let start = parse_instant(start_date, start_time)?;
    let end = parse_instant(end_date, end_time)?;
    Some((end - start).num_seconds())
}

/// Determines whether a `YYYY-MM-DD` date falls on a Sunday.
///
/// The weekday comes from the calendar date alone, with no timezone
/// conversion. A malformed date is never a Sunday.
///
/// # Example
///
/// ```
/// use shiftcash_engine::calculation::is_sunday;
///
/// assert!(is_sunday("2024-01-07"));
/// assert!(!is_sunday("2024-01-08"));
/// assert!(!is_sunday("not-a-date"));
/// ```
pub fn is_sunday(date: &str) -> bool {
    NaiveDate::parse_from_str(date, DATE_FORMAT)
        .map(|d| d.weekday() == Weekday::Sun)
        .unwrap_or(false)
}

/// Rounds to two decimal places, halves away from zero.
pub fn round_2dp(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
