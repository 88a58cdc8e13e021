//! Deterministic day classifier.
//!
//! Assigns every day offset of a lifespan one [`DayCategory`] and, for lived
//! days covered by markers, the governing marker.

use std::sync::Arc;

use crate::calendar::days_between;
use crate::index::MarkerRangeIndex;
use crate::types::{CalendarDate, DayCategory, DayRecord, LifeProfile};

/// Day counts fixed for one classification cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleBounds {
    /// Days elapsed between birth and "today", clamped at zero.
    pub lived_days: u32,
    /// Estimated lifespan in days.
    pub total_days: u32,
}

impl CycleBounds {
    /// Sample the bounds for `profile` as of `today`.
    pub fn new(profile: &LifeProfile, today: CalendarDate) -> Self {
        let lived = days_between(profile.birth_date, today).clamp(0, i64::from(u32::MAX));
        Self {
            lived_days: lived as u32,
            total_days: profile.total_days(),
        }
    }
}

/// Day classifier bound to one marker index snapshot.
///
/// ## Algorithm
///
/// For each offset in `[0, total_days)`:
/// 1. `date = birth_date + offset`
/// 2. `offset >= lived_days` → `Future` (markers are not consulted)
/// 3. Otherwise the last marker in insertion order whose inclusive range
///    contains `date` governs → `LivedMarked`; no match → `LivedPlain`
///
/// `lived_days` is sampled once per cycle. The classifier is a pure function
/// of the profile, the index snapshot and `today`.
#[derive(Debug, Clone)]
pub struct DayClassifier {
    index: Arc<MarkerRangeIndex>,
}

impl DayClassifier {
    /// Create a classifier over an index snapshot.
    pub fn new(index: Arc<MarkerRangeIndex>) -> Self {
        Self { index }
    }

    /// Classify a single date that is known to be lived.
    pub fn classify_lived(&self, date: CalendarDate) -> DayCategory {
        match self.index.governing(date) {
            Some(range) => DayCategory::LivedMarked { marker: range.marker.id },
            None => DayCategory::LivedPlain,
        }
    }

    /// Produce the full record sequence for `profile` as of `today`.
    ///
    /// The profile must already be validated; its last day is then a
    /// representable date and this call cannot fail.
    pub fn classify(&self, profile: &LifeProfile, today: CalendarDate) -> Vec<DayRecord> {
        let bounds = CycleBounds::new(profile, today);
        self.classify_with_bounds(profile, bounds)
    }

    /// Same as [`classify`](Self::classify) with pre-sampled bounds.
    pub fn classify_with_bounds(&self, profile: &LifeProfile, bounds: CycleBounds) -> Vec<DayRecord> {
        let mut records = Vec::with_capacity(bounds.total_days as usize);

        let dates = profile.birth_date.as_naive().iter_days().map(CalendarDate::new);
        for (offset, date) in (0..bounds.total_days).zip(dates) {
            let category = if offset >= bounds.lived_days {
                DayCategory::Future
            } else {
                self.classify_lived(date)
            };
            records.push(DayRecord { offset, date, category });
        }

        records
    }

    /// Get the index snapshot.
    pub fn index(&self) -> &MarkerRangeIndex {
        &self.index
    }
}
