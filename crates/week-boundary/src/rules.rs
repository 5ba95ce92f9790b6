//! Time-zone rule sources.
//!
//! Week resolution never looks a zone up on its own. Callers hand it any value
//! implementing [`ZoneRules`]: a `chrono_tz::Tz` from the bundled IANA
//! database, a plain `FixedOffset`, `Utc`, or a
//! [`TransitionTable`](crate::transitions::TransitionTable) built from
//! explicit transitions.

use chrono::{DateTime, FixedOffset, LocalResult, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{Result, WeekError};

/// How a local wall-clock value maps onto UTC offsets in a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalOffsets {
    /// Clocks jumped forward across this value, so it never occurred.
    Gap,
    /// Exactly one offset applies.
    Unique(FixedOffset),
    /// Clocks jumped backward and the value occurred twice. The first offset
    /// belongs to the earlier occurrence.
    Ambiguous(FixedOffset, FixedOffset),
}

impl LocalOffsets {
    /// Build the result for a value matched by two offsets.
    ///
    /// The pair is reordered so the earlier occurrence comes first. Since
    /// `utc = local - offset`, that is the larger offset. Equal offsets
    /// collapse into [`LocalOffsets::Unique`].
    pub fn from_pair(a: FixedOffset, b: FixedOffset) -> Self {
        use std::cmp::Ordering;

        match a.local_minus_utc().cmp(&b.local_minus_utc()) {
            Ordering::Equal => LocalOffsets::Unique(a),
            Ordering::Greater => LocalOffsets::Ambiguous(a, b),
            Ordering::Less => LocalOffsets::Ambiguous(b, a),
        }
    }

    /// The offset giving the earliest UTC instant, or `None` inside a gap.
    pub fn earliest(self) -> Option<FixedOffset> {
        match self {
            LocalOffsets::Gap => None,
            LocalOffsets::Unique(offset) => Some(offset),
            LocalOffsets::Ambiguous(a, b) => {
                if a.local_minus_utc() >= b.local_minus_utc() {
                    Some(a)
                } else {
                    Some(b)
                }
            }
        }
    }
}

/// Read-only access to a zone's offset rules.
///
/// Implementations must be safe to query from many threads at once; the
/// resolver never mutates them.
pub trait ZoneRules {
    /// Name used in error messages and reports (e.g. `"America/New_York"`).
    fn zone_name(&self) -> String;

    /// The offset in effect at `instant`.
    fn offset_at(&self, instant: &DateTime<Utc>) -> Result<FixedOffset>;

    /// Every offset under which the wall-clock value `local` occurred.
    ///
    /// Returns [`WeekError::ZoneRules`] when the rule data cannot answer.
    fn offsets_for_local(&self, local: &NaiveDateTime) -> Result<LocalOffsets>;

    /// Whether `local` falls inside a forward jump.
    fn is_invalid(&self, local: &NaiveDateTime) -> Result<bool> {
        Ok(matches!(self.offsets_for_local(local)?, LocalOffsets::Gap))
    }

    /// Whether `local` falls inside a backward jump.
    fn is_ambiguous(&self, local: &NaiveDateTime) -> Result<bool> {
        Ok(matches!(
            self.offsets_for_local(local)?,
            LocalOffsets::Ambiguous(..)
        ))
    }

    /// Both candidate offsets for an ambiguous value, earlier occurrence first.
    fn ambiguous_offsets(
        &self,
        local: &NaiveDateTime,
    ) -> Result<Option<(FixedOffset, FixedOffset)>> {
        match self.offsets_for_local(local)? {
            LocalOffsets::Ambiguous(a, b) => Ok(Some((a, b))),
            _ => Ok(None),
        }
    }
}

/// Classify a local value using chrono's own local-time lookup.
fn chrono_offsets<T: TimeZone>(tz: &T, local: &NaiveDateTime) -> LocalOffsets {
    match tz.offset_from_local_datetime(local) {
        LocalResult::None => LocalOffsets::Gap,
        LocalResult::Single(offset) => LocalOffsets::Unique(offset.fix()),
        LocalResult::Ambiguous(a, b) => LocalOffsets::from_pair(a.fix(), b.fix()),
    }
}

impl ZoneRules for Tz {
    fn zone_name(&self) -> String {
        self.to_string()
    }

    fn offset_at(&self, instant: &DateTime<Utc>) -> Result<FixedOffset> {
        Ok(self.offset_from_utc_datetime(&instant.naive_utc()).fix())
    }

    fn offsets_for_local(&self, local: &NaiveDateTime) -> Result<LocalOffsets> {
        Ok(chrono_offsets(self, local))
    }
}

impl ZoneRules for FixedOffset {
    fn zone_name(&self) -> String {
        self.to_string()
    }

    fn offset_at(&self, _instant: &DateTime<Utc>) -> Result<FixedOffset> {
        Ok(*self)
    }

    fn offsets_for_local(&self, local: &NaiveDateTime) -> Result<LocalOffsets> {
        Ok(chrono_offsets(self, local))
    }
}

impl ZoneRules for Utc {
    fn zone_name(&self) -> String {
        "UTC".to_string()
    }

    fn offset_at(&self, _instant: &DateTime<Utc>) -> Result<FixedOffset> {
        Ok(Utc.fix())
    }

    fn offsets_for_local(&self, local: &NaiveDateTime) -> Result<LocalOffsets> {
        Ok(chrono_offsets(self, local))
    }
}

/// Parse an IANA timezone string into `Tz`.
pub fn parse_timezone(s: &str) -> Result<Tz> {
    s.parse::<Tz>()
        .map_err(|_| WeekError::InvalidTimezone(format!("'{}'", s)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn local(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn hours(h: i32) -> FixedOffset {
        FixedOffset::east_opt(h * 3600).unwrap()
    }

    #[test]
    fn test_new_york_spring_forward_is_gap() {
        // March 8, 2026: 2:00 AM → 3:00 AM
        let tz = parse_timezone("America/New_York").unwrap();
        let wall = local(2026, 3, 8, 2, 30);
        assert_eq!(tz.offsets_for_local(&wall).unwrap(), LocalOffsets::Gap);
        assert!(tz.is_invalid(&wall).unwrap());
        assert!(!tz.is_ambiguous(&wall).unwrap());
    }

    #[test]
    fn test_new_york_fall_back_is_ambiguous() {
        // November 1, 2026: 2:00 AM → 1:00 AM, so 1:30 happens twice
        let tz = parse_timezone("America/New_York").unwrap();
        let wall = local(2026, 11, 1, 1, 30);
        assert_eq!(
            tz.offsets_for_local(&wall).unwrap(),
            LocalOffsets::Ambiguous(hours(-4), hours(-5))
        );
        assert_eq!(
            tz.ambiguous_offsets(&wall).unwrap(),
            Some((hours(-4), hours(-5)))
        );
    }

    #[test]
    fn test_new_york_ordinary_time_is_unique() {
        let tz = parse_timezone("America/New_York").unwrap();
        let wall = local(2026, 7, 15, 9, 0);
        assert_eq!(
            tz.offsets_for_local(&wall).unwrap(),
            LocalOffsets::Unique(hours(-4))
        );
        assert_eq!(tz.ambiguous_offsets(&wall).unwrap(), None);
    }

    #[test]
    fn test_offset_at_uses_instant_specific_offset() {
        let tz = parse_timezone("America/New_York").unwrap();
        let winter = Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap();
        let summer = Utc.with_ymd_and_hms(2026, 7, 15, 12, 0, 0).unwrap();
        assert_eq!(tz.offset_at(&winter).unwrap(), hours(-5));
        assert_eq!(tz.offset_at(&summer).unwrap(), hours(-4));
    }

    #[test]
    fn test_fixed_offset_never_gaps_or_folds() {
        let offset = hours(9);
        let wall = local(2026, 3, 8, 2, 30);
        assert_eq!(
            offset.offsets_for_local(&wall).unwrap(),
            LocalOffsets::Unique(offset)
        );
        assert_eq!(offset.zone_name(), "+09:00");
    }

    #[test]
    fn test_utc_rules() {
        let wall = local(2026, 3, 8, 2, 30);
        assert_eq!(
            Utc.offsets_for_local(&wall).unwrap(),
            LocalOffsets::Unique(hours(0))
        );
        assert_eq!(Utc.zone_name(), "UTC");
    }

    #[test]
    fn test_from_pair_orders_earlier_occurrence_first() {
        assert_eq!(
            LocalOffsets::from_pair(hours(-5), hours(-4)),
            LocalOffsets::Ambiguous(hours(-4), hours(-5))
        );
        assert_eq!(
            LocalOffsets::from_pair(hours(2), hours(2)),
            LocalOffsets::Unique(hours(2))
        );
    }

    #[test]
    fn test_earliest_picks_larger_offset() {
        assert_eq!(
            LocalOffsets::Ambiguous(hours(-5), hours(-4)).earliest(),
            Some(hours(-4))
        );
        assert_eq!(LocalOffsets::Gap.earliest(), None);
    }

    #[test]
    fn test_parse_invalid_timezone_returns_error() {
        let err = parse_timezone("Invalid/Zone").unwrap_err();
        assert_eq!(err, WeekError::InvalidTimezone("'Invalid/Zone'".to_string()));
        assert!(err.to_string().contains("Invalid timezone"), "got: {err}");
    }
}
