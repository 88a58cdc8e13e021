//! Render-ready result of one computation cycle.

use std::sync::Arc;

use serde::Serialize;

use crate::calendar::days_between;
use crate::canonical::{canonical_hash_hex, to_canonical_bytes};
use crate::classifier::{CycleBounds, DayClassifier};
use crate::decade::group_decades;
use crate::index::MarkerRangeIndex;
use crate::LIFEGRID_SCHEMA_VERSION;
use crate::types::{
    CalendarDate, DayCategory, DayRecord, DecadeBucket, LifeProfile, LifeSummary, Marker,
    MarkerColor,
};

/// Classified days and decade buckets for one profile, marker set and day.
///
/// Never patched: any input change produces a new grid.
#[derive(Debug, Clone)]
pub struct LifeGrid {
    profile: LifeProfile,
    today: CalendarDate,
    bounds: CycleBounds,
    records: Vec<DayRecord>,
    decades: Vec<DecadeBucket>,
    index: Arc<MarkerRangeIndex>,
    fingerprint: String,
}

/// Presentation-facing view of one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell<'a> {
    /// The classified record.
    pub record: &'a DayRecord,
    /// Governing marker, for `LivedMarked` days.
    pub marker: Option<&'a Marker>,
}

impl DayCell<'_> {
    /// Marker color, if marked.
    pub fn color(&self) -> Option<&MarkerColor> {
        self.marker.map(|m| &m.color)
    }

    /// Tooltip text: `"Day N"`, plus the marker name for marked days.
    pub fn title(&self) -> String {
        match self.marker {
            Some(m) => format!("Day {} · {} ({})", self.record.day_number(), m.display_name(), self.record.date),
            None => format!("Day {}", self.record.day_number()),
        }
    }
}

impl LifeGrid {
    /// Run a full cycle: classify every day, then group into decades.
    pub fn compute(profile: LifeProfile, today: CalendarDate, index: Arc<MarkerRangeIndex>) -> Self {
        let bounds = CycleBounds::new(&profile, today);
        let classifier = DayClassifier::new(Arc::clone(&index));
        let records = classifier.classify_with_bounds(&profile, bounds);
        let decades = group_decades(bounds.total_days, profile.life_expectancy_years);

        let fingerprint = canonical_hash_hex(&GridExport {
            schema_version: LIFEGRID_SCHEMA_VERSION,
            profile: &profile,
            today,
            lived_days: bounds.lived_days,
            total_days: bounds.total_days,
            records: &records,
            decades: &decades,
        });

        tracing::debug!(
            birth_date = %profile.birth_date,
            life_expectancy_years = profile.life_expectancy_years,
            lived_days = bounds.lived_days,
            total_days = bounds.total_days,
            markers = index.len(),
            fingerprint = %fingerprint,
            "grid computed"
        );

        Self {
            profile,
            today,
            bounds,
            records,
            decades,
            index,
            fingerprint,
        }
    }

    /// Profile this grid was computed for.
    pub fn profile(&self) -> &LifeProfile {
        &self.profile
    }

    /// "Today" as sampled for this cycle.
    pub fn today(&self) -> CalendarDate {
        self.today
    }

    /// All day records, by offset.
    pub fn records(&self) -> &[DayRecord] {
        &self.records
    }

    /// Decade buckets, by index.
    pub fn decades(&self) -> &[DecadeBucket] {
        &self.decades
    }

    /// Records belonging to one decade bucket.
    pub fn decade_records(&self, bucket: &DecadeBucket) -> &[DayRecord] {
        let end = (bucket.end_day as usize).min(self.records.len());
        let start = (bucket.start_day as usize).min(end);
        &self.records[start..end]
    }

    /// Record for a calendar date inside the lifespan.
    pub fn record_for_date(&self, date: CalendarDate) -> Option<&DayRecord> {
        let offset = days_between(self.profile.birth_date, date);
        usize::try_from(offset).ok().and_then(|i| self.records.get(i))
    }

    /// Governing marker of a record.
    pub fn marker_for(&self, record: &DayRecord) -> Option<&Marker> {
        record.category.marker().and_then(|id| self.index.marker(&id))
    }

    /// Record plus resolved marker, for rendering one cell.
    pub fn cell<'a>(&'a self, record: &'a DayRecord) -> DayCell<'a> {
        DayCell {
            record,
            marker: self.marker_for(record),
        }
    }

    /// Number of records whose category satisfies `predicate`.
    pub fn count(&self, predicate: fn(&DayCategory) -> bool) -> usize {
        self.records.iter().filter(|r| predicate(&r.category)).count()
    }

    /// Headline figures.
    pub fn summary(&self) -> LifeSummary {
        LifeSummary::new(self.bounds.lived_days, self.bounds.total_days)
    }

    /// Marker index snapshot used for this grid.
    pub fn index(&self) -> &MarkerRangeIndex {
        &self.index
    }

    /// Hash of the canonical output.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// Canonical JSON bytes of the output.
    pub fn to_canonical_bytes(&self) -> Vec<u8> {
        to_canonical_bytes(&GridExport {
            schema_version: LIFEGRID_SCHEMA_VERSION,
            profile: &self.profile,
            today: self.today,
            lived_days: self.bounds.lived_days,
            total_days: self.bounds.total_days,
            records: &self.records,
            decades: &self.decades,
        })
    }
}

/// Serialized form used for fingerprints and canonical bytes.
#[derive(Serialize)]
struct GridExport<'a> {
    schema_version: &'static str,
    profile: &'a LifeProfile,
    today: CalendarDate,
    lived_days: u32,
    total_days: u32,
    records: &'a [DayRecord],
    decades: &'a [DecadeBucket],
}
