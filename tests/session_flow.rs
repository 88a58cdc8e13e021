//! End-to-end session tests: submissions, debounce and marker edits.

use std::sync::Arc;
use std::time::{Duration, Instant};

use lifegrid_kernel::{
    init_tracing, CacheConfig, CalendarDate, DayCategory, EngineConfig, FixedClock, GridCache,
    KernelError, LifeSession, LogFormat, MarkerDraft,
};

fn clock() -> FixedClock {
    FixedClock::new(CalendarDate::parse("2024-01-01").unwrap())
}

fn session() -> LifeSession<FixedClock> {
    let _ = init_tracing(LogFormat::Pretty);
    LifeSession::new(EngineConfig::default(), clock())
}

#[test]
fn typing_eighty_five_recomputes_once_with_final_value() {
    let mut s = session();
    s.submit_profile("2000-01-01", 90).unwrap();
    let t0 = Instant::now();
    let step = Duration::from_millis(150);

    // "8", "85" typed 150ms apart; nothing fires while typing.
    s.set_life_expectancy(8, t0).unwrap();
    assert!(s.poll(t0 + step).is_none());
    s.set_life_expectancy(85, t0 + step).unwrap();

    let mut recomputes = 0;
    let mut last_years = None;
    for tick in 0..40 {
        let now = t0 + step + Duration::from_millis(50 * tick);
        if let Some(grid) = s.poll(now) {
            recomputes += 1;
            last_years = Some(grid.profile().life_expectancy_years);
        }
    }

    assert_eq!(recomputes, 1);
    assert_eq!(last_years, Some(85));
    assert_eq!(s.day_records().len(), 85 * 365 + 21);
    let stats = s.scheduler_stats();
    assert_eq!((stats.scheduled, stats.superseded, stats.fired), (2, 1, 1));
}

#[test]
fn markers_apply_without_debounce() {
    let mut s = session();
    s.submit_profile("1990-06-15", 80).unwrap();

    let draft = MarkerDraft::new("University", "2008-09-01", "#6366f1").ending("2012-07-01");
    let marker = s.submit_marker(draft).unwrap();

    let record = *s
        .grid()
        .unwrap()
        .record_for_date(CalendarDate::parse("2010-01-01").unwrap())
        .unwrap();
    assert_eq!(record.category, DayCategory::LivedMarked { marker: marker.id });

    let cell = s.grid().unwrap().cell(&record);
    assert_eq!(cell.color().unwrap().rgb(), [0x63, 0x66, 0xf1]);
    assert_eq!(cell.marker.unwrap().display_name(), "University");
}

#[test]
fn rejected_inputs_are_typed() {
    let mut s = session();
    assert!(matches!(s.submit_profile("not a date", 80), Err(KernelError::InvalidDate { .. })));
    assert!(matches!(s.submit_profile("2030-01-01", 80), Err(KernelError::InvalidProfile(_))));
    assert!(matches!(s.submit_profile("2000-01-01", -5), Err(KernelError::InvalidProfile(_))));
    assert!(s.grid().is_none());

    assert!(matches!(
        s.submit_marker(MarkerDraft::new("x", "2010-01-02", "#000").ending("2010-01-01")),
        Err(KernelError::InvalidMarkerRange { .. })
    ));
    assert!(matches!(
        s.submit_marker(MarkerDraft::new("x", "2010-01-01", "black")),
        Err(KernelError::InvalidMarker(_))
    ));
}

#[test]
fn sessions_can_share_a_cache() {
    let cache = GridCache::new(&CacheConfig { max_entries: 4, enabled: true });
    let mut first = LifeSession::new(EngineConfig::default(), clock()).with_cache(cache.clone());
    let mut second = LifeSession::new(EngineConfig::default(), clock()).with_cache(cache.clone());

    first.submit_profile("2000-01-01", 80).unwrap();
    second.submit_profile("2000-01-01", 80).unwrap();

    assert!(Arc::ptr_eq(&first.grid_handle().unwrap(), &second.grid_handle().unwrap()));
    assert_eq!(cache.stats().unwrap().hits, 1);
}

#[test]
fn custom_debounce_from_config() {
    let config = EngineConfig::default().with_debounce(Duration::from_millis(100));
    let mut s = LifeSession::new(config, clock());
    s.submit_profile("2000-01-01", 80).unwrap();

    let t0 = Instant::now();
    s.set_life_expectancy(70, t0).unwrap();
    assert_eq!(s.time_until_recompute(t0), Some(Duration::from_millis(100)));
    assert!(s.poll(t0 + Duration::from_millis(100)).is_some());
}
