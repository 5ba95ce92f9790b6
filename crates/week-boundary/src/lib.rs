//! # week-boundary
//!
//! Deterministic week boundaries for instants.
//!
//! Given an instant, this crate answers "when does this week start (or end)"
//! either in the instant's own fixed offset or, DST-aware, in any IANA or
//! caller-supplied zone. Boundaries that land on a nonexistent or repeated
//! local midnight are resolved to exactly one UTC instant, every time.
//!
//! ## Modules
//!
//! - [`zoned`] — DST-aware week start/end in a zone, configurable first day
//! - [`week`] — Fixed-offset (ISO Monday) week start/end, UTC week number
//! - [`period`] — Start of day/week/month/quarter/year in a fixed offset
//! - [`rules`] — The [`ZoneRules`] trait and its chrono / chrono-tz impls
//! - [`transitions`] — Zone rules from an explicit transition list
//! - [`window`] — RFC 3339 + IANA name in, serializable week report out
//! - [`error`] — Error types

pub mod error;
pub mod period;
pub mod rules;
pub mod transitions;
pub mod week;
pub mod window;
pub mod zoned;

pub use error::{Result, WeekError};
pub use period::{start_of, CalendarUnit};
pub use rules::{parse_timezone, LocalOffsets, ZoneRules};
pub use transitions::{Transition, TransitionTable};
pub use week::{
    end_of_next_week, end_of_previous_week, end_of_week, start_of_next_week,
    start_of_previous_week, start_of_week, utc_week_number,
};
pub use window::{week_window, WeekOptions, WeekWindow};
pub use zoned::{
    end_of_next_tz_week, end_of_previous_tz_week, end_of_tz_week, resolve_week_start,
    start_of_next_tz_week, start_of_previous_tz_week, start_of_tz_week, tz_week_number,
    WeekBoundarySpec,
};
