//! Calendar math.
//!
//! Pure day-granularity arithmetic over [`CalendarDate`]. No timezones, no
//! partial days.
//!
//! ## Total-day estimate
//!
//! [`estimate_total_days`] uses the fixed approximation
//! `years * 365 + floor(years / 4)`. It ignores the century corrections of the
//! Gregorian calendar and may be off by a few days for a given birth date.
//! Displayed lifespan figures depend on this exact formula, so it must not be
//! replaced with a calendar-accurate count.

use chrono::Days;

use crate::types::CalendarDate;

/// Error type for calendar math.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    /// Malformed or non-existent calendar date.
    #[error("Invalid date '{input}': {reason}")]
    InvalidDate {
        /// The rejected input.
        input: String,
        /// Why it was rejected.
        reason: String,
    },
    /// Arithmetic left the representable calendar.
    #[error("Date out of range: {date} + {days} days")]
    OutOfRange {
        /// Starting date.
        date: CalendarDate,
        /// Requested offset.
        days: i64,
    },
}

/// Whole days from `a` to `b` (`b - a`). Negative when `b` precedes `a`.
pub fn days_between(a: CalendarDate, b: CalendarDate) -> i64 {
    b.as_naive().signed_duration_since(a.as_naive()).num_days()
}

/// The date `n` days after `date` (before it when `n` is negative).
pub fn add_days(date: CalendarDate, n: i64) -> Result<CalendarDate, CalendarError> {
    let naive = date.as_naive();
    let shifted = if n >= 0 {
        naive.checked_add_days(Days::new(n as u64))
    } else {
        naive.checked_sub_days(Days::new(n.unsigned_abs()))
    };
    shifted
        .map(CalendarDate::new)
        .ok_or(CalendarError::OutOfRange { date, days: n })
}

/// Estimated lifespan in days: `years * 365 + floor(years / 4)`.
pub fn estimate_total_days(years: u32) -> u32 {
    years.saturating_mul(365).saturating_add(years / 4)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> CalendarDate {
        CalendarDate::parse(s).unwrap()
    }

    #[test]
    fn test_days_between_forward_and_backward() {
        assert_eq!(days_between(date("2000-01-01"), date("2024-01-01")), 8766);
        assert_eq!(days_between(date("2024-01-01"), date("2000-01-01")), -8766);
        assert_eq!(days_between(date("2010-03-15"), date("2010-03-15")), 0);
    }

    #[test]
    fn test_add_days_rolls_over_months_and_leap_days() {
        assert_eq!(add_days(date("2024-02-28"), 1).unwrap(), date("2024-02-29"));
        assert_eq!(add_days(date("2023-02-28"), 1).unwrap(), date("2023-03-01"));
        assert_eq!(add_days(date("1999-12-31"), 1).unwrap(), date("2000-01-01"));
        assert_eq!(add_days(date("2000-03-01"), -1).unwrap(), date("2000-02-29"));
    }

    #[test]
    fn test_add_days_inverse_of_days_between() {
        let birth = date("1987-06-21");
        for n in [0, 1, 365, 3650, 29220] {
            let later = add_days(birth, n).unwrap();
            assert_eq!(days_between(birth, later), n);
        }
    }

    #[test]
    fn test_add_days_out_of_range() {
        let result = add_days(date("2000-01-01"), i64::from(i32::MAX));
        assert!(matches!(result, Err(CalendarError::OutOfRange { .. })));
    }

    #[test]
    fn test_estimate_total_days() {
        assert_eq!(estimate_total_days(80), 29220);
        assert_eq!(estimate_total_days(90), 32872);
        assert_eq!(estimate_total_days(3), 1095);
        assert_eq!(estimate_total_days(4), 1461);
        assert_eq!(estimate_total_days(0), 0);
    }
}
