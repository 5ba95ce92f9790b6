//! String-in, report-out week lookup.
//!
//! [`week_window`] takes an RFC 3339 timestamp and an IANA zone name, the way
//! they arrive from configuration files or API requests, and reports the
//! full week around that instant.

use chrono::{DateTime, Datelike, Utc, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{Result, WeekError};
use crate::rules::parse_timezone;
use crate::week::{one_tick, shift};
use crate::zoned::{resolve_boundary, resolve_next_boundary, Disambiguation, WeekBoundarySpec};

/// Week configuration a host application can embed in its own config.
///
/// Missing fields fall back to ISO 8601 (Monday-first) weeks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeekOptions {
    pub first_day_of_week: Weekday,
}

impl Default for WeekOptions {
    fn default() -> Self {
        Self {
            first_day_of_week: Weekday::Mon,
        }
    }
}

/// The week containing an instant, as observed in one zone.
#[derive(Debug, Clone, Serialize)]
pub struct WeekWindow {
    /// Start of the week in UTC (RFC 3339).
    pub start_utc: String,
    /// Start of the week in the zone (RFC 3339 with offset).
    pub start_local: String,
    /// Last representable instant of the week in UTC (RFC 3339).
    pub end_utc: String,
    /// Last representable instant of the week in the zone.
    pub end_local: String,
    /// The IANA timezone name used.
    pub timezone: String,
    pub first_day_of_week: Weekday,
    /// ISO 8601 week number of the instant's local date.
    pub iso_week: u32,
    /// ISO 8601 week-numbering year of the instant's local date.
    pub iso_year: i32,
    /// Local midnight did not exist on the first day; the week starts at
    /// the first valid local time after it.
    pub start_shifted_by_gap: bool,
    /// Local midnight occurred twice on the first day; the earlier one is used.
    pub start_was_ambiguous: bool,
}

/// Compute the week containing `datetime` in `timezone`.
///
/// # Errors
///
/// Returns [`WeekError::InvalidDatetime`] if the datetime string cannot be
/// parsed, [`WeekError::InvalidTimezone`] if the timezone name is not a valid
/// IANA timezone, or any error from resolving the boundaries.
///
/// # Examples
///
/// ```
/// use week_boundary::window::{week_window, WeekOptions};
///
/// let week = week_window("2026-02-18T14:00:00Z", "America/New_York", &WeekOptions::default()).unwrap();
/// assert_eq!(week.start_local, "2026-02-16T00:00:00-05:00");
/// assert_eq!(week.iso_week, 8);
/// ```
pub fn week_window(datetime: &str, timezone: &str, options: &WeekOptions) -> Result<WeekWindow> {
    let dt = parse_rfc3339(datetime)?;
    let tz = parse_timezone(timezone)?;
    let spec = WeekBoundarySpec::new(&tz).with_first_day(options.first_day_of_week);

    let start = resolve_boundary(&dt, &spec)?;
    let next = resolve_next_boundary(&dt, &spec)?;
    let end = shift(next.utc, -one_tick())?;

    let iso = dt.with_timezone(&tz).iso_week();

    Ok(WeekWindow {
        start_utc: start.utc.to_rfc3339(),
        start_local: local_rfc3339(&start.utc, &tz),
        end_utc: end.to_rfc3339(),
        end_local: local_rfc3339(&end, &tz),
        timezone: timezone.to_string(),
        first_day_of_week: options.first_day_of_week,
        iso_week: iso.week(),
        iso_year: iso.year(),
        start_shifted_by_gap: start.disambiguation == Disambiguation::ShiftedPastGap,
        start_was_ambiguous: start.disambiguation == Disambiguation::EarlierOfFold,
    })
}

/// Parse an RFC 3339 datetime string into `DateTime<Utc>`.
fn parse_rfc3339(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| WeekError::InvalidDatetime(format!("'{}': {}", s, e)))
}

fn local_rfc3339(utc: &DateTime<Utc>, tz: &Tz) -> String {
    utc.with_timezone(tz).to_rfc3339()
}
