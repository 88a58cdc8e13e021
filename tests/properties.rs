//! Property tests for classification, bucketing and debouncing.

use std::sync::Arc;
use std::time::{Duration, Instant};

use proptest::prelude::*;

use lifegrid_kernel::{
    add_days, estimate_total_days, group_decades, CalendarDate, DayCategory, LifeGrid,
    LifeProfile, Marker, MarkerColor, MarkerId, MarkerRangeIndex, RecomputeScheduler,
};
use uuid::Uuid;

fn base_date() -> CalendarDate {
    CalendarDate::parse("1950-01-01").unwrap()
}

fn today() -> CalendarDate {
    CalendarDate::parse("2024-01-01").unwrap()
}

/// Markers as (start offset from 1950-01-01, optional length) pairs.
fn arb_markers() -> impl Strategy<Value = Vec<Marker>> {
    prop::collection::vec((0i64..27_000, prop::option::of(0i64..2_000)), 0..6).prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (start, len))| {
                let start_date = add_days(base_date(), start).unwrap();
                Marker {
                    id: MarkerId::new(Uuid::from_u128(i as u128 + 1)),
                    name: String::new(),
                    start_date,
                    end_date: len.map(|l| add_days(start_date, l).unwrap()),
                    color: MarkerColor::parse("#ff00ff").unwrap(),
                }
            })
            .collect()
    })
}

fn arb_profile() -> impl Strategy<Value = LifeProfile> {
    (0i64..25_000, 1u32..110).prop_map(|(birth, years)| LifeProfile {
        birth_date: add_days(base_date(), birth).unwrap(),
        life_expectancy_years: years,
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn records_cover_lifespan(profile in arb_profile(), markers in arb_markers()) {
        let grid = LifeGrid::compute(profile, today(), Arc::new(MarkerRangeIndex::build(&markers)));
        let total = estimate_total_days(profile.life_expectancy_years);
        let lived = grid.summary().lived_days;

        prop_assert_eq!(grid.records().len(), total as usize);
        for (i, record) in grid.records().iter().enumerate() {
            prop_assert_eq!(record.offset as usize, i);
            prop_assert_eq!(record.category == DayCategory::Future, record.offset >= lived);
        }
    }

    #[test]
    fn governing_marker_is_last_match(profile in arb_profile(), markers in arb_markers()) {
        let grid = LifeGrid::compute(profile, today(), Arc::new(MarkerRangeIndex::build(&markers)));

        for record in grid.records().iter().filter(|r| r.category.is_lived()) {
            let expected = markers
                .iter()
                .filter(|m| m.start_date <= record.date && record.date <= m.last_day())
                .last()
                .map(|m| m.id);
            prop_assert_eq!(record.category.marker(), expected);
        }
    }

    #[test]
    fn decades_partition_offsets(years in 1u32..200) {
        let total = estimate_total_days(years);
        let buckets = group_decades(total, years);

        let mut next = 0;
        for (i, bucket) in buckets.iter().enumerate() {
            prop_assert_eq!(bucket.index as usize, i);
            prop_assert_eq!(bucket.start_day, next);
            prop_assert!(bucket.end_day > bucket.start_day);
            prop_assert!(bucket.end_age <= years);
            next = bucket.end_day;
        }
        prop_assert_eq!(next, total);
        prop_assert_eq!(buckets.last().map(|b| b.end_age), Some(years));
    }

    #[test]
    fn burst_fires_once_with_last_value(gaps in prop::collection::vec(0u64..799, 1..20)) {
        let delay = Duration::from_millis(800);
        let mut scheduler = RecomputeScheduler::new(delay);
        let t0 = Instant::now();

        let mut now = t0;
        let mut fired = Vec::new();
        for (value, gap) in gaps.iter().enumerate() {
            now += Duration::from_millis(*gap);
            if let Some(v) = scheduler.poll(now) {
                fired.push(v);
            }
            scheduler.schedule(value, now);
        }
        for step in 0..=20 {
            if let Some(v) = scheduler.poll(now + Duration::from_millis(step * 100)) {
                fired.push(v);
            }
        }

        prop_assert_eq!(fired, vec![gaps.len() - 1]);
    }
}
