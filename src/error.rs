//! Boundary error type.
//!
//! Every variant is an input-contract violation caught before a computation
//! cycle starts. A rejected input leaves the previous session state untouched.

use crate::calendar::CalendarError;
use crate::types::{CalendarDate, MarkerId};

/// Error type for session and validation operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KernelError {
    /// Malformed or unparseable date string.
    #[error("Invalid date '{input}': {reason}")]
    InvalidDate {
        /// The rejected input.
        input: String,
        /// Why it was rejected.
        reason: String,
    },
    /// Birth date not strictly in the past, or unusable life expectancy.
    #[error("Invalid profile: {0}")]
    InvalidProfile(String),
    /// Marker end date before its start date.
    #[error("Invalid marker range: end {end} is before start {start}")]
    InvalidMarkerRange {
        /// Marker start date.
        start: CalendarDate,
        /// Marker end date.
        end: CalendarDate,
    },
    /// Marker name, color or dates rejected.
    #[error("Invalid marker: {0}")]
    InvalidMarker(String),
    /// No marker with this id in the session.
    #[error("Marker not found: {0}")]
    MarkerNotFound(MarkerId),
    /// Calendar arithmetic failed.
    #[error("Calendar error: {0}")]
    Calendar(CalendarError),
}

impl From<CalendarError> for KernelError {
    fn from(err: CalendarError) -> Self {
        match err {
            CalendarError::InvalidDate { input, reason } => Self::InvalidDate { input, reason },
            other => Self::Calendar(other),
        }
    }
}
