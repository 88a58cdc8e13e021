//! Calendar date type for the lifegrid kernel.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::calendar::CalendarError;

/// ISO date format accepted at the input boundary.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// A calendar day with no time or timezone component.
///
/// Wraps a `NaiveDate` and implements `Ord` for inclusive range checks.
/// Serializes as an ISO `YYYY-MM-DD` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Create a date from a `NaiveDate`.
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Create a date from year, month and day.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, CalendarError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| CalendarError::InvalidDate {
                input: format!("{year:04}-{month:02}-{day:02}"),
                reason: "no such calendar day".to_string(),
            })
    }

    /// Parse a `YYYY-MM-DD` string.
    ///
    /// Surrounding whitespace is ignored. Impossible days such as
    /// `2023-02-30` are rejected rather than rolled over.
    pub fn parse(input: &str) -> Result<Self, CalendarError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(CalendarError::InvalidDate {
                input: input.to_string(),
                reason: "empty date".to_string(),
            });
        }
        NaiveDate::parse_from_str(trimmed, ISO_DATE_FORMAT)
            .map(Self)
            .map_err(|e| CalendarError::InvalidDate {
                input: input.to_string(),
                reason: e.to_string(),
            })
    }

    /// Get the inner `NaiveDate`.
    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }

    /// Calendar year.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Render as `DD/MM/YYYY`.
    pub fn format_dmy(&self) -> String {
        self.0.format("%d/%m/%Y").to_string()
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(ISO_DATE_FORMAT))
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl std::str::FromStr for CalendarDate {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
