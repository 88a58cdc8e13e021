//! Marker range index.
//!
//! Normalizes the session's markers into `{start, end, marker}` triples once
//! per marker-set change, so the classifier compares dates without re-reading
//! marker fields for every (day, marker) pair.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::canonical::canonical_hash_hex;
use crate::types::{CalendarDate, Marker, MarkerId};

/// One normalized marker range, inclusive on both ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerRange {
    /// First covered day.
    pub start: CalendarDate,
    /// Last covered day (`start` for single-day markers).
    pub end: CalendarDate,
    /// The marker this range was built from.
    pub marker: Marker,
}

impl MarkerRange {
    /// Whether `date` falls inside `[start, end]`.
    #[inline]
    pub fn contains(&self, date: CalendarDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Markers in insertion order, pre-normalized for classification.
#[derive(Debug, Clone)]
pub struct MarkerRangeIndex {
    ranges: Vec<MarkerRange>,
    positions: BTreeMap<MarkerId, usize>,
    fingerprint: String,
}

impl MarkerRangeIndex {
    /// Build the index from markers in insertion order.
    pub fn build<'a, I>(markers: I) -> Self
    where
        I: IntoIterator<Item = &'a Marker>,
    {
        let ranges: Vec<MarkerRange> = markers
            .into_iter()
            .map(|marker| MarkerRange {
                start: marker.start_date,
                end: marker.last_day(),
                marker: marker.clone(),
            })
            .collect();

        let positions = ranges
            .iter()
            .enumerate()
            .map(|(i, r)| (r.marker.id, i))
            .collect();

        let fingerprint = {
            let markers: Vec<&Marker> = ranges.iter().map(|r| &r.marker).collect();
            canonical_hash_hex(&IndexFingerprintInput { markers })
        };

        Self {
            ranges,
            positions,
            fingerprint,
        }
    }

    /// The governing range for `date`: the last matching range in insertion order.
    pub fn governing(&self, date: CalendarDate) -> Option<&MarkerRange> {
        self.ranges.iter().rev().find(|r| r.contains(date))
    }

    /// All ranges covering `date`, in insertion order.
    pub fn matching(&self, date: CalendarDate) -> impl Iterator<Item = &MarkerRange> {
        self.ranges.iter().filter(move |r| r.contains(date))
    }

    /// Look up a marker by id.
    pub fn marker(&self, id: &MarkerId) -> Option<&Marker> {
        self.positions.get(id).map(|&i| &self.ranges[i].marker)
    }

    /// Ranges in insertion order.
    pub fn ranges(&self) -> &[MarkerRange] {
        &self.ranges
    }

    /// Number of markers.
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Whether the index holds no markers.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Hash of the markers and their order.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

impl Default for MarkerRangeIndex {
    fn default() -> Self {
        Self::build(std::iter::empty())
    }
}

#[derive(Serialize)]
struct IndexFingerprintInput<'a> {
    markers: Vec<&'a Marker>,
}
