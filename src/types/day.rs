//! Derived per-day and per-decade output types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

use super::date::CalendarDate;
use super::marker::MarkerId;

/// Category of a single day in the lifespan.
///
/// Presentation attributes (color, name) are resolved from the marker id at
/// render time, see [`crate::LifeGrid::marker_for`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DayCategory {
    /// Not yet lived.
    Future,
    /// Lived, no marker covers it.
    LivedPlain,
    /// Lived and covered by at least one marker.
    LivedMarked {
        /// The governing (last-added matching) marker.
        marker: MarkerId,
    },
}

impl DayCategory {
    /// Whether the day has been lived.
    pub fn is_lived(&self) -> bool {
        !matches!(self, Self::Future)
    }

    /// Governing marker, if any.
    pub fn marker(&self) -> Option<MarkerId> {
        match self {
            Self::LivedMarked { marker } => Some(*marker),
            _ => None,
        }
    }
}

impl fmt::Display for DayCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Future => write!(f, "future"),
            Self::LivedPlain => write!(f, "lived"),
            Self::LivedMarked { .. } => write!(f, "marked"),
        }
    }
}

/// Classification of one day offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DayRecord {
    /// 0-based day index from birth.
    pub offset: u32,
    /// Calendar date of this offset.
    pub date: CalendarDate,
    /// Category and governing marker.
    pub category: DayCategory,
}

impl DayRecord {
    /// 1-based day number ("Day N" labels).
    pub fn day_number(&self) -> u32 {
        self.offset + 1
    }
}

/// Number of day offsets in one decade bucket.
pub const DAYS_PER_DECADE: u32 = 3650;

/// Number of years labelled by one decade bucket.
pub const YEARS_PER_DECADE: u32 = 10;

/// A fixed-width group of day offsets with its age label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DecadeBucket {
    /// Bucket index, starting at 0.
    pub index: u32,
    /// First offset in the bucket.
    pub start_day: u32,
    /// One past the last offset in the bucket.
    pub end_day: u32,
    /// Age at the start of the bucket.
    pub start_age: u32,
    /// Age at the end of the bucket, clamped to the life expectancy.
    pub end_age: u32,
}

impl DecadeBucket {
    /// Offsets covered, `[start_day, end_day)`.
    pub fn day_range(&self) -> Range<u32> {
        self.start_day..self.end_day
    }

    /// Number of offsets in the bucket.
    pub fn len(&self) -> u32 {
        self.end_day - self.start_day
    }

    /// Whether the bucket covers no offsets.
    pub fn is_empty(&self) -> bool {
        self.start_day == self.end_day
    }

    /// Label such as `"10 - 20"`.
    pub fn age_label(&self) -> String {
        format!("{} - {}", self.start_age, self.end_age)
    }
}

/// Headline figures for a computed lifespan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifeSummary {
    /// Days elapsed since birth.
    pub lived_days: u32,
    /// Estimated lifespan in days.
    pub total_days: u32,
    /// `lived_days / 365`.
    pub years_lived: u32,
    /// `lived_days % 365`.
    pub days_remainder: u32,
    /// Estimated days left, zero once the estimate is exceeded.
    pub remaining_days: u32,
}

impl LifeSummary {
    /// Derive the summary from lived and total day counts.
    pub fn new(lived_days: u32, total_days: u32) -> Self {
        Self {
            lived_days,
            total_days,
            years_lived: lived_days / 365,
            days_remainder: lived_days % 365,
            remaining_days: total_days.saturating_sub(lived_days),
        }
    }
}
