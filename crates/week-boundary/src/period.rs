//! Start of a calendar unit in a datetime's own offset.
//!
//! Weeks here follow ISO 8601 (Monday first). For a configurable first day
//! and DST-aware zones, use [`crate::zoned`].

use chrono::{DateTime, Datelike, Days, FixedOffset, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{Result, WeekError};

/// A calendar unit whose start can be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarUnit {
    Day,
    /// ISO 8601 week, starting Monday.
    Week,
    Month,
    Quarter,
    Year,
}

/// Midnight at the start of the `unit` containing `instant`, in the same
/// offset as `instant`.
///
/// # Errors
///
/// Returns [`WeekError::OutOfRange`] if the start falls outside chrono's
/// supported date range.
///
/// # Examples
///
/// ```
/// use chrono::DateTime;
/// use week_boundary::period::{start_of, CalendarUnit};
///
/// let dt = DateTime::parse_from_rfc3339("2026-02-18T15:30:00+02:00").unwrap();
/// let start = start_of(dt, CalendarUnit::Week).unwrap();
/// assert_eq!(start.to_rfc3339(), "2026-02-16T00:00:00+02:00");
/// ```
pub fn start_of(
    instant: impl Into<DateTime<FixedOffset>>,
    unit: CalendarUnit,
) -> Result<DateTime<FixedOffset>> {
    let instant = instant.into();
    let date = instant.date_naive();

    let start = match unit {
        CalendarUnit::Day => Some(date),
        CalendarUnit::Week => {
            let back = u64::from(date.weekday().num_days_from_monday());
            date.checked_sub_days(Days::new(back))
        }
        CalendarUnit::Month => date.with_day(1),
        CalendarUnit::Quarter => {
            let q_start_month = ((date.month() - 1) / 3) * 3 + 1;
            NaiveDate::from_ymd_opt(date.year(), q_start_month, 1)
        }
        CalendarUnit::Year => NaiveDate::from_ymd_opt(date.year(), 1, 1),
    }
    .ok_or_else(|| WeekError::OutOfRange(format!("start of {:?} for {}", unit, instant)))?;

    start
        .and_time(NaiveTime::MIN)
        .and_local_timezone(*instant.offset())
        .single()
        .ok_or_else(|| {
            WeekError::OutOfRange(format!("midnight of {} at {}", start, instant.offset()))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    #[test]
    fn test_start_of_day() {
        let start = start_of(parse("2026-02-18T15:30:00-05:00"), CalendarUnit::Day).unwrap();
        assert_eq!(start, parse("2026-02-18T00:00:00-05:00"));
    }

    #[test]
    fn test_start_of_week_is_monday() {
        // Wed Feb 18 → Mon Feb 16
        let start = start_of(parse("2026-02-18T15:30:00Z"), CalendarUnit::Week).unwrap();
        assert_eq!(start, parse("2026-02-16T00:00:00Z"));
    }

    #[test]
    fn test_start_of_week_on_monday_stays() {
        let start = start_of(parse("2026-02-16T00:00:00Z"), CalendarUnit::Week).unwrap();
        assert_eq!(start, parse("2026-02-16T00:00:00Z"));
    }

    #[test]
    fn test_start_of_week_keeps_offset() {
        // 23:30 Sunday at +09:00 is still Sunday locally, so the week began
        // the previous Monday even though it is Sunday 14:30 UTC.
        let start = start_of(parse("2026-02-22T23:30:00+09:00"), CalendarUnit::Week).unwrap();
        assert_eq!(start.to_rfc3339(), "2026-02-16T00:00:00+09:00");
    }

    #[test]
    fn test_start_of_month() {
        let start = start_of(parse("2026-02-18T15:30:00Z"), CalendarUnit::Month).unwrap();
        assert_eq!(start, parse("2026-02-01T00:00:00Z"));
    }

    #[test]
    fn test_start_of_quarter() {
        let start = start_of(parse("2026-08-18T15:30:00Z"), CalendarUnit::Quarter).unwrap();
        assert_eq!(start, parse("2026-07-01T00:00:00Z"));
    }

    #[test]
    fn test_start_of_year() {
        let start = start_of(parse("2026-08-18T15:30:00Z"), CalendarUnit::Year).unwrap();
        assert_eq!(start, parse("2026-01-01T00:00:00Z"));
    }

    #[test]
    fn test_utc_input_accepted() {
        use chrono::{TimeZone, Utc};

        let dt = Utc.with_ymd_and_hms(2026, 2, 18, 15, 30, 0).unwrap();
        let start = start_of(dt, CalendarUnit::Week).unwrap();
        assert_eq!(start, parse("2026-02-16T00:00:00Z"));
    }

    #[test]
    fn test_unit_deserializes_lowercase() {
        let unit: CalendarUnit = serde_json::from_str("\"quarter\"").unwrap();
        assert_eq!(unit, CalendarUnit::Quarter);
    }
}
