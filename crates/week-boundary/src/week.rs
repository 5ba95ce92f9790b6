//! Week boundaries in a datetime's own fixed offset.
//!
//! No zone rules are consulted: the week containing `instant` is taken from
//! its wall clock at its own offset, starting Monday (see
//! [`CalendarUnit::Week`]). Next/previous/end are flat shifts of that start.

use chrono::{DateTime, Datelike, Duration, FixedOffset, TimeZone, Utc};

use crate::error::{Result, WeekError};
use crate::period::{start_of, CalendarUnit};

pub(crate) fn one_week() -> Duration {
    Duration::days(7)
}

/// Smallest representable step: one nanosecond.
pub(crate) fn one_tick() -> Duration {
    Duration::nanoseconds(1)
}

/// Shift `dt` by `delta` in absolute time.
pub(crate) fn shift<T: TimeZone>(dt: DateTime<T>, delta: Duration) -> Result<DateTime<T>> {
    dt.clone()
        .checked_add_signed(delta)
        .ok_or_else(|| WeekError::OutOfRange(format!("{:?} shifted by {}", dt, delta)))
}

/// Monday 00:00 of the week containing `instant`.
pub fn start_of_week(instant: impl Into<DateTime<FixedOffset>>) -> Result<DateTime<FixedOffset>> {
    start_of(instant, CalendarUnit::Week)
}

/// Monday 00:00 of the following week.
pub fn start_of_next_week(
    instant: impl Into<DateTime<FixedOffset>>,
) -> Result<DateTime<FixedOffset>> {
    shift(start_of_week(instant)?, one_week())
}

/// Monday 00:00 of the preceding week.
pub fn start_of_previous_week(
    instant: impl Into<DateTime<FixedOffset>>,
) -> Result<DateTime<FixedOffset>> {
    shift(start_of_week(instant)?, -one_week())
}

/// One tick before the start of the following week.
pub fn end_of_week(instant: impl Into<DateTime<FixedOffset>>) -> Result<DateTime<FixedOffset>> {
    shift(start_of_next_week(instant)?, -one_tick())
}

pub fn end_of_next_week(instant: impl Into<DateTime<FixedOffset>>) -> Result<DateTime<FixedOffset>> {
    shift(end_of_week(instant)?, one_week())
}

pub fn end_of_previous_week(
    instant: impl Into<DateTime<FixedOffset>>,
) -> Result<DateTime<FixedOffset>> {
    shift(end_of_week(instant)?, -one_week())
}

/// ISO 8601 week number (1–53) of the UTC calendar date of `instant`.
pub fn utc_week_number<T: TimeZone>(instant: &DateTime<T>) -> u32 {
    instant.with_timezone(&Utc).iso_week().week()
}
