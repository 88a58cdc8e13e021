//! Decade grouping for paged rendering.
//!
//! Splits `[0, total_days)` into consecutive buckets of [`DAYS_PER_DECADE`]
//! offsets. Bucket `d` is labelled with ages `[d*10, min(d*10 + 10, years)]`.
//! The grouping knows nothing about day categories.

use crate::types::{DecadeBucket, DAYS_PER_DECADE, YEARS_PER_DECADE};

/// Number of buckets needed for `total_days`: `ceil(total_days / 3650)`.
pub fn decade_count(total_days: u32) -> u32 {
    total_days.div_ceil(DAYS_PER_DECADE)
}

/// Partition `[0, total_days)` into decade buckets.
pub fn group_decades(total_days: u32, life_expectancy_years: u32) -> Vec<DecadeBucket> {
    (0..decade_count(total_days))
        .map(|index| {
            let start_day = index * DAYS_PER_DECADE;
            let start_age = index * YEARS_PER_DECADE;
            DecadeBucket {
                index,
                start_day,
                end_day: (start_day + DAYS_PER_DECADE).min(total_days),
                start_age,
                end_age: (start_age + YEARS_PER_DECADE).min(life_expectancy_years),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eighty_years() {
        let buckets = group_decades(29220, 80);
        assert_eq!(buckets.len(), 9);
        assert_eq!(buckets[0].day_range(), 0..3650);
        assert_eq!((buckets[0].start_age, buckets[0].end_age), (0, 10));
        let last = buckets.last().unwrap();
        assert_eq!(last.day_range(), 29200..29220);
        assert_eq!((last.start_age, last.end_age), (80, 80));
    }

    #[test]
    fn test_contiguous_cover() {
        for (total, years) in [(1, 1), (3650, 10), (3651, 10), (32872, 90), (1826, 5)] {
            let buckets = group_decades(total, years);
            let mut next = 0;
            for b in &buckets {
                assert_eq!(b.start_day, next);
                assert!(!b.is_empty());
                next = b.end_day;
            }
            assert_eq!(next, total);
            assert_eq!(buckets.last().unwrap().end_age, years);
        }
    }

    #[test]
    fn test_short_life_single_bucket() {
        let buckets = group_decades(1826, 5);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].age_label(), "0 - 5");
    }

    #[test]
    fn test_empty() {
        assert!(group_decades(0, 0).is_empty());
    }
}
