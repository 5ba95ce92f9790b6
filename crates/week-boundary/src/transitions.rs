//! Zone rules built from an explicit list of offset transitions.
//!
//! A [`TransitionTable`] is the smallest possible rule database: an initial
//! offset plus the instants at which the offset changes. It is useful for
//! loading rules from an external source and for pinning down gap and fold
//! behaviour in tests without depending on real-world transition dates.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};

use crate::error::{Result, WeekError};
use crate::rules::{LocalOffsets, ZoneRules};

/// A change of UTC offset taking effect at `at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// First instant at which `offset` applies.
    pub at: DateTime<Utc>,
    pub offset: FixedOffset,
}

/// Offsets over time: `initial` until the first transition, then each
/// transition's offset until the next one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionTable {
    name: String,
    initial: FixedOffset,
    transitions: Vec<Transition>,
}

impl TransitionTable {
    /// Build a table, rejecting transitions that are not strictly increasing.
    pub fn new(
        name: impl Into<String>,
        initial: FixedOffset,
        transitions: Vec<Transition>,
    ) -> Result<Self> {
        let name = name.into();
        if let Some(pair) = transitions.windows(2).find(|w| w[0].at >= w[1].at) {
            return Err(WeekError::ZoneRules(format!(
                "transitions for '{}' are not in order: {} is not before {}",
                name, pair[0].at, pair[1].at
            )));
        }
        Ok(Self {
            name,
            initial,
            transitions,
        })
    }

    /// A table with a single offset and no transitions.
    pub fn fixed(name: impl Into<String>, offset: FixedOffset) -> Self {
        Self {
            name: name.into(),
            initial: offset,
            transitions: Vec::new(),
        }
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// `(start, end, offset)` for every period, open-ended at both extremes.
    fn periods(
        &self,
    ) -> impl Iterator<Item = (Option<DateTime<Utc>>, Option<DateTime<Utc>>, FixedOffset)> + '_
    {
        let starts = std::iter::once(None).chain(self.transitions.iter().map(|t| Some(t.at)));
        let ends = self
            .transitions
            .iter()
            .map(|t| Some(t.at))
            .chain(std::iter::once(None));
        let offsets =
            std::iter::once(self.initial).chain(self.transitions.iter().map(|t| t.offset));
        starts
            .zip(ends)
            .zip(offsets)
            .map(|((start, end), offset)| (start, end, offset))
    }
}

impl ZoneRules for TransitionTable {
    fn zone_name(&self) -> String {
        self.name.clone()
    }

    fn offset_at(&self, instant: &DateTime<Utc>) -> Result<FixedOffset> {
        let idx = self.transitions.partition_point(|t| t.at <= *instant);
        Ok(match idx {
            0 => self.initial,
            i => self.transitions[i - 1].offset,
        })
    }

    fn offsets_for_local(&self, local: &NaiveDateTime) -> Result<LocalOffsets> {
        let mut candidates = Vec::with_capacity(2);
        for (start, end, offset) in self.periods() {
            let utc = local
                .and_local_timezone(offset)
                .single()
                .map(|dt| dt.with_timezone(&Utc))
                .ok_or_else(|| {
                    WeekError::OutOfRange(format!("{} at offset {}", local, offset))
                })?;
            let after_start = start.is_none_or(|s| utc >= s);
            let before_end = end.is_none_or(|e| utc < e);
            if after_start && before_end {
                candidates.push(offset);
            }
        }

        match candidates.as_slice() {
            [] => Ok(LocalOffsets::Gap),
            [offset] => Ok(LocalOffsets::Unique(*offset)),
            [a, b] => Ok(LocalOffsets::from_pair(*a, *b)),
            more => Err(WeekError::ZoneRules(format!(
                "'{}' maps local time {} to {} offsets",
                self.name,
                local,
                more.len()
            ))),
        }
    }
}
