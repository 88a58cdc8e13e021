//! Life profile: the birth date and life-expectancy pair driving a cycle.

use serde::{Deserialize, Serialize};

use crate::calendar::{add_days, estimate_total_days};
use crate::error::KernelError;
use super::date::CalendarDate;

/// Birth date plus life expectancy, validated against "today".
///
/// Immutable for the duration of a computation cycle. Edits replace the whole
/// profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LifeProfile {
    /// Day of birth.
    pub birth_date: CalendarDate,
    /// Expected lifespan in whole years (> 0).
    pub life_expectancy_years: u32,
}

impl LifeProfile {
    /// Validate and build a profile.
    ///
    /// # Errors
    /// - `InvalidProfile` when `birth_date` is not strictly before `today`.
    /// - `InvalidProfile` when `life_expectancy_years` is not in `1..=max_years`.
    /// - `InvalidProfile` when the estimated last day is not a representable date.
    pub fn new(
        birth_date: CalendarDate,
        life_expectancy_years: i64,
        today: CalendarDate,
        max_years: u32,
    ) -> Result<Self, KernelError> {
        if birth_date >= today {
            return Err(KernelError::InvalidProfile(format!(
                "birth date {birth_date} must be before {today}"
            )));
        }
        let years = validate_expectancy(life_expectancy_years, max_years)?;
        let profile = Self {
            birth_date,
            life_expectancy_years: years,
        };
        add_days(birth_date, i64::from(profile.total_days())).map_err(|e| {
            KernelError::InvalidProfile(format!("lifespan does not fit the calendar: {e}"))
        })?;
        Ok(profile)
    }

    /// Same profile with a different life expectancy.
    pub fn with_expectancy(
        &self,
        life_expectancy_years: i64,
        today: CalendarDate,
        max_years: u32,
    ) -> Result<Self, KernelError> {
        Self::new(self.birth_date, life_expectancy_years, today, max_years)
    }

    /// Estimated lifespan in days.
    pub fn total_days(&self) -> u32 {
        estimate_total_days(self.life_expectancy_years)
    }
}

/// Check a raw expectancy value from the input layer.
pub fn validate_expectancy(years: i64, max_years: u32) -> Result<u32, KernelError> {
    if years <= 0 {
        return Err(KernelError::InvalidProfile(format!(
            "life expectancy must be positive, got {years}"
        )));
    }
    if years > i64::from(max_years) {
        return Err(KernelError::InvalidProfile(format!(
            "life expectancy {years} exceeds the maximum of {max_years} years"
        )));
    }
    Ok(years as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> CalendarDate {
        CalendarDate::parse(s).unwrap()
    }

    #[test]
    fn test_valid_profile() {
        let profile = LifeProfile::new(date("2000-01-01"), 80, date("2024-01-01"), 150).unwrap();
        assert_eq!(profile.total_days(), 29220);
    }

    #[test]
    fn test_birth_today_or_future_rejected() {
        let today = date("2024-01-01");
        assert!(matches!(
            LifeProfile::new(today, 80, today, 150),
            Err(KernelError::InvalidProfile(_))
        ));
        assert!(matches!(
            LifeProfile::new(date("2030-01-01"), 80, today, 150),
            Err(KernelError::InvalidProfile(_))
        ));
    }

    #[test]
    fn test_non_positive_expectancy_rejected() {
        let today = date("2024-01-01");
        for years in [0, -1, -80] {
            assert!(LifeProfile::new(date("2000-01-01"), years, today, 150).is_err());
        }
    }

    #[test]
    fn test_expectancy_over_limit_rejected() {
        let today = date("2024-01-01");
        assert!(LifeProfile::new(date("2000-01-01"), 151, today, 150).is_err());
        assert!(LifeProfile::new(date("2000-01-01"), 150, today, 150).is_ok());
    }

    #[test]
    fn test_with_expectancy_keeps_birth_date() {
        let today = date("2024-01-01");
        let profile = LifeProfile::new(date("2000-01-01"), 80, today, 150).unwrap();
        let longer = profile.with_expectancy(95, today, 150).unwrap();
        assert_eq!(longer.birth_date, profile.birth_date);
        assert_eq!(longer.life_expectancy_years, 95);
    }
}
