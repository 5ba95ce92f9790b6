//! DST-aware week boundaries in an arbitrary zone.
//!
//! A week starts at local midnight on the configured first day of the week.
//! The instant is converted to the zone's wall clock using the offset in
//! effect at that instant, stepped back to the boundary date, and the
//! resulting midnight is mapped back to exactly one UTC instant:
//!
//! - a midnight that never happened (DST gap) becomes the earliest valid
//!   local time after it, so the first day of the week is shortened rather
//!   than the week starting early;
//! - a midnight that happened twice (DST fold) resolves to the earlier
//!   occurrence, i.e. the larger of the two offsets.
//!
//! Every function here is pure: the zone rules are borrowed read-only and
//! nothing is cached between calls.

use std::fmt;

use chrono::{
    DateTime, Datelike, Days, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime,
    TimeZone, Utc, Weekday,
};
use tracing::{debug, trace, warn};

use crate::error::{Result, WeekError};
use crate::rules::{LocalOffsets, ZoneRules};
use crate::week::{one_tick, one_week, shift};

/// Gaps are never longer than a day; allow two before blaming the rules.
const MAX_GAP_MINUTES: u32 = 48 * 60;

/// Where and how weeks begin.
pub struct WeekBoundarySpec<'a, Z: ZoneRules + ?Sized> {
    pub first_day: Weekday,
    pub zone: &'a Z,
}

impl<'a, Z: ZoneRules + ?Sized> WeekBoundarySpec<'a, Z> {
    /// Weeks in `zone` starting Monday.
    pub fn new(zone: &'a Z) -> Self {
        Self {
            first_day: Weekday::Mon,
            zone,
        }
    }

    pub fn with_first_day(mut self, first_day: Weekday) -> Self {
        self.first_day = first_day;
        self
    }
}

impl<Z: ZoneRules + ?Sized> Clone for WeekBoundarySpec<'_, Z> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Z: ZoneRules + ?Sized> Copy for WeekBoundarySpec<'_, Z> {}

impl<Z: ZoneRules + ?Sized> fmt::Debug for WeekBoundarySpec<'_, Z> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeekBoundarySpec")
            .field("first_day", &self.first_day)
            .field("zone", &self.zone.zone_name())
            .finish()
    }
}

/// How a nominal local midnight was mapped to UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Disambiguation {
    Exact,
    ShiftedPastGap,
    EarlierOfFold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ResolvedBoundary {
    pub utc: DateTime<Utc>,
    pub disambiguation: Disambiguation,
}

/// How many days `weekday` is from `first_day`, in `0..7`.
fn days_from_week_start(weekday: Weekday, first_day: Weekday) -> u64 {
    u64::from((7 + weekday.num_days_from_monday() - first_day.num_days_from_monday()) % 7)
}

/// Local date on which the week containing `instant` begins.
fn nominal_week_start<Z: ZoneRules + ?Sized>(
    instant: &DateTime<Utc>,
    spec: &WeekBoundarySpec<'_, Z>,
) -> Result<NaiveDate> {
    let offset = spec.zone.offset_at(instant)?;
    let local_date = instant.with_timezone(&offset).date_naive();
    let back = days_from_week_start(local_date.weekday(), spec.first_day);
    let start = local_date.checked_sub_days(Days::new(back)).ok_or_else(|| {
        WeekError::OutOfRange(format!("{} days before {}", back, local_date))
    })?;
    trace!(
        zone = %spec.zone.zone_name(),
        %instant,
        %local_date,
        week_start = %start,
        "nominal week start"
    );
    Ok(start)
}

fn to_utc(local: NaiveDateTime, offset: FixedOffset) -> Result<DateTime<Utc>> {
    local
        .and_local_timezone(offset)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| WeekError::OutOfRange(format!("{} at offset {}", local, offset)))
}

fn zone_rules_error<Z: ZoneRules + ?Sized>(zone: &Z, message: String) -> WeekError {
    warn!(zone = %zone.zone_name(), "{}", message);
    WeekError::ZoneRules(message)
}

/// Earliest valid wall-clock value after `nominal`, which lies in a gap.
///
/// Scans forward a minute at a time, then narrows the last skipped minute
/// down to the second so gaps that end off the minute are handled too.
fn first_valid_after_gap<Z: ZoneRules + ?Sized>(
    nominal: NaiveDateTime,
    zone: &Z,
) -> Result<(NaiveDateTime, LocalOffsets)> {
    let mut invalid = nominal;
    for _ in 0..MAX_GAP_MINUTES {
        let candidate = invalid
            .checked_add_signed(Duration::minutes(1))
            .ok_or_else(|| WeekError::OutOfRange(format!("one minute after {}", invalid)))?;
        match zone.offsets_for_local(&candidate)? {
            LocalOffsets::Gap => invalid = candidate,
            found => return narrow_gap_end(invalid, candidate, found, zone),
        }
    }
    Err(zone_rules_error(
        zone,
        format!(
            "no valid local time within {} minutes after {}",
            MAX_GAP_MINUTES, nominal
        ),
    ))
}

/// Binary search for the first valid second in `(invalid, valid]`.
fn narrow_gap_end<Z: ZoneRules + ?Sized>(
    mut invalid: NaiveDateTime,
    mut valid: NaiveDateTime,
    mut offsets: LocalOffsets,
    zone: &Z,
) -> Result<(NaiveDateTime, LocalOffsets)> {
    while (valid - invalid).num_seconds() > 1 {
        let mid = invalid + Duration::seconds((valid - invalid).num_seconds() / 2);
        match zone.offsets_for_local(&mid)? {
            LocalOffsets::Gap => invalid = mid,
            found => {
                valid = mid;
                offsets = found;
            }
        }
    }
    Ok((valid, offsets))
}

/// Map local midnight of `date` to a single UTC instant.
pub(crate) fn resolve_local_midnight<Z: ZoneRules + ?Sized>(
    date: NaiveDate,
    zone: &Z,
) -> Result<ResolvedBoundary> {
    let nominal = date.and_time(NaiveTime::MIN);

    let (local, offsets, disambiguation) = match zone.offsets_for_local(&nominal)? {
        LocalOffsets::Gap => {
            let (local, offsets) = first_valid_after_gap(nominal, zone)?;
            debug!(
                zone = %zone.zone_name(),
                %nominal,
                resolved = %local,
                "week boundary falls in a DST gap, using first valid local time"
            );
            (local, offsets, Disambiguation::ShiftedPastGap)
        }
        offsets @ LocalOffsets::Ambiguous(earlier, later) => {
            debug!(
                zone = %zone.zone_name(),
                %nominal,
                %earlier,
                %later,
                "week boundary falls in a DST fold, using earlier occurrence"
            );
            (nominal, offsets, Disambiguation::EarlierOfFold)
        }
        offsets @ LocalOffsets::Unique(_) => (nominal, offsets, Disambiguation::Exact),
    };

    let offset = offsets.earliest().ok_or_else(|| {
        zone_rules_error(zone, format!("no offset for local time {}", local))
    })?;
    Ok(ResolvedBoundary {
        utc: to_utc(local, offset)?,
        disambiguation,
    })
}

pub(crate) fn resolve_boundary<T: TimeZone, Z: ZoneRules + ?Sized>(
    instant: &DateTime<T>,
    spec: &WeekBoundarySpec<'_, Z>,
) -> Result<ResolvedBoundary> {
    let utc = instant.with_timezone(&Utc);
    let date = nominal_week_start(&utc, spec)?;
    resolve_local_midnight(date, spec.zone)
}

/// Start of the following week, resolved from its own local midnight.
pub(crate) fn resolve_next_boundary<T: TimeZone, Z: ZoneRules + ?Sized>(
    instant: &DateTime<T>,
    spec: &WeekBoundarySpec<'_, Z>,
) -> Result<ResolvedBoundary> {
    let utc = instant.with_timezone(&Utc);
    let date = nominal_week_start(&utc, spec)?;
    let next = date
        .checked_add_days(Days::new(7))
        .ok_or_else(|| WeekError::OutOfRange(format!("7 days after {}", date)))?;
    resolve_local_midnight(next, spec.zone)
}

/// UTC instant at which the week containing `instant` begins in `spec.zone`.
///
/// # Errors
///
/// Returns [`WeekError::ZoneRules`] if the zone cannot resolve offsets for
/// the boundary, or [`WeekError::OutOfRange`] at the edges of chrono's range.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc, Weekday};
/// use week_boundary::rules::parse_timezone;
/// use week_boundary::zoned::{resolve_week_start, WeekBoundarySpec};
///
/// let tz = parse_timezone("America/New_York").unwrap();
/// let spec = WeekBoundarySpec::new(&tz).with_first_day(Weekday::Sun);
/// let instant = Utc.with_ymd_and_hms(2026, 7, 15, 12, 0, 0).unwrap();
/// // Sunday July 12 00:00 EDT (UTC-4)
/// let start = resolve_week_start(&instant, &spec).unwrap();
/// assert_eq!(start, Utc.with_ymd_and_hms(2026, 7, 12, 4, 0, 0).unwrap());
/// ```
pub fn resolve_week_start<T: TimeZone, Z: ZoneRules + ?Sized>(
    instant: &DateTime<T>,
    spec: &WeekBoundarySpec<'_, Z>,
) -> Result<DateTime<Utc>> {
    resolve_boundary(instant, spec).map(|b| b.utc)
}

pub fn start_of_tz_week<T: TimeZone, Z: ZoneRules + ?Sized>(
    instant: &DateTime<T>,
    zone: &Z,
    first_day: Weekday,
) -> Result<DateTime<Utc>> {
    resolve_week_start(instant, &WeekBoundarySpec::new(zone).with_first_day(first_day))
}

/// [`start_of_tz_week`] plus seven days of absolute time.
pub fn start_of_next_tz_week<T: TimeZone, Z: ZoneRules + ?Sized>(
    instant: &DateTime<T>,
    zone: &Z,
    first_day: Weekday,
) -> Result<DateTime<Utc>> {
    shift(start_of_tz_week(instant, zone, first_day)?, one_week())
}

/// [`start_of_tz_week`] minus seven days of absolute time.
pub fn start_of_previous_tz_week<T: TimeZone, Z: ZoneRules + ?Sized>(
    instant: &DateTime<T>,
    zone: &Z,
    first_day: Weekday,
) -> Result<DateTime<Utc>> {
    shift(start_of_tz_week(instant, zone, first_day)?, -one_week())
}

/// One tick before the following week's start.
///
/// The following week's start is resolved from its own local midnight, so
/// a week spanning a DST change ends exactly where the next one begins.
pub fn end_of_tz_week<T: TimeZone, Z: ZoneRules + ?Sized>(
    instant: &DateTime<T>,
    zone: &Z,
    first_day: Weekday,
) -> Result<DateTime<Utc>> {
    let spec = WeekBoundarySpec::new(zone).with_first_day(first_day);
    let next = resolve_next_boundary(instant, &spec)?;
    shift(next.utc, -one_tick())
}

pub fn end_of_next_tz_week<T: TimeZone, Z: ZoneRules + ?Sized>(
    instant: &DateTime<T>,
    zone: &Z,
    first_day: Weekday,
) -> Result<DateTime<Utc>> {
    shift(end_of_tz_week(instant, zone, first_day)?, one_week())
}

pub fn end_of_previous_tz_week<T: TimeZone, Z: ZoneRules + ?Sized>(
    instant: &DateTime<T>,
    zone: &Z,
    first_day: Weekday,
) -> Result<DateTime<Utc>> {
    shift(end_of_tz_week(instant, zone, first_day)?, -one_week())
}

/// ISO 8601 week number (1–53) of the local date of `instant` in `zone`.
pub fn tz_week_number<T: TimeZone, Z: ZoneRules + ?Sized>(
    instant: &DateTime<T>,
    zone: &Z,
) -> Result<u32> {
    let utc = instant.with_timezone(&Utc);
    let offset = zone.offset_at(&utc)?;
    Ok(utc.with_timezone(&offset).iso_week().week())
}
