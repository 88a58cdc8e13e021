//! Session state and the external interface of the kernel.
//!
//! A `LifeSession` owns the profile, the ordered marker collection, the
//! recompute scheduler and the grid cache. Derived grids are recomputed only
//! when an input they depend on changes.
//!
//! ## Recompute policy
//!
//! | Input | Trigger |
//! |-------|---------|
//! | Profile submission | Immediate; drops any pending expectancy edit |
//! | Marker add / replace / delete | Immediate |
//! | Life-expectancy edit | Debounced; released by [`LifeSession::poll`] |
//!
//! Rejected inputs never touch existing state.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::cache::{CacheStats, GridCache, GridKey};
use crate::clock::{Clock, SystemClock};
use crate::config::EngineConfig;
use crate::error::KernelError;
use crate::grid::LifeGrid;
use crate::index::MarkerRangeIndex;
use crate::scheduler::{RecomputeScheduler, SchedulerStats, TimerHandle};
use crate::types::{
    validate_expectancy, CalendarDate, DayRecord, DecadeBucket, LifeProfile, LifeSummary, Marker,
    MarkerDraft, MarkerId, MarkerRules,
};

/// In-memory session for one user.
pub struct LifeSession<C: Clock = SystemClock> {
    config: EngineConfig,
    clock: C,
    profile: Option<LifeProfile>,
    markers: Vec<Marker>,
    index: Arc<MarkerRangeIndex>,
    scheduler: RecomputeScheduler<u32>,
    cache: GridCache,
    current: Option<Arc<LifeGrid>>,
}

impl LifeSession<SystemClock> {
    /// Session on the system clock with configuration from the environment.
    pub fn from_env() -> Self {
        Self::new(EngineConfig::from_env(), SystemClock)
    }
}

impl<C: Clock> LifeSession<C> {
    /// Create an empty session.
    pub fn new(config: EngineConfig, clock: C) -> Self {
        let scheduler = RecomputeScheduler::new(config.debounce);
        let cache = GridCache::new(&config.cache);
        Self {
            config,
            clock,
            profile: None,
            markers: Vec::new(),
            index: Arc::new(MarkerRangeIndex::default()),
            scheduler,
            cache,
            current: None,
        }
    }

    /// Use a shared grid cache instead of the session's own.
    pub fn with_cache(mut self, cache: GridCache) -> Self {
        self.cache = cache;
        self
    }

    // ── Profile ──────────────────────────────────────────────────────

    /// Accept a new birth date and life expectancy and recompute immediately.
    ///
    /// Any pending debounced expectancy edit is dropped; the submitted
    /// expectancy supersedes it.
    ///
    /// # Errors
    /// - `InvalidDate` when `birth_date` does not parse.
    /// - `InvalidProfile` when the birth date is not strictly in the past, or
    ///   the expectancy is not positive or exceeds the configured maximum.
    pub fn submit_profile(&mut self, birth_date: &str, life_expectancy_years: i64) -> Result<&LifeGrid, KernelError> {
        let today = self.clock.today();
        let profile = CalendarDate::parse(birth_date)
            .map_err(KernelError::from)
            .and_then(|birth| {
                LifeProfile::new(birth, life_expectancy_years, today, self.config.max_life_expectancy_years)
            })
            .map_err(|e| rejected("profile", e))?;

        if let Some(dropped) = self.scheduler.cancel_pending() {
            tracing::debug!(dropped_years = dropped, "pending expectancy edit superseded by profile submission");
        }

        tracing::info!(
            birth_date = %profile.birth_date,
            life_expectancy_years = profile.life_expectancy_years,
            "profile accepted"
        );
        self.profile = Some(profile);
        Ok(self.recompute(profile, today))
    }

    /// Record a life-expectancy edit; recompute once edits settle.
    ///
    /// Each call restarts the settling window. The value is validated now, so
    /// a rejected keystroke leaves the previously pending value in place.
    ///
    /// # Errors
    /// - `InvalidProfile` when no profile has been submitted yet, or the value
    ///   is not positive or exceeds the configured maximum.
    pub fn set_life_expectancy(&mut self, life_expectancy_years: i64, now: Instant) -> Result<TimerHandle, KernelError> {
        if self.profile.is_none() {
            return Err(rejected(
                "life expectancy",
                KernelError::InvalidProfile("no profile submitted".to_string()),
            ));
        }
        let years = validate_expectancy(life_expectancy_years, self.config.max_life_expectancy_years)
            .map_err(|e| rejected("life expectancy", e))?;
        Ok(self.scheduler.schedule(years, now))
    }

    /// Run the debounced recompute if its window has elapsed at `now`.
    ///
    /// Returns the new grid when a recompute happened.
    pub fn poll(&mut self, now: Instant) -> Option<&LifeGrid> {
        let years = self.scheduler.poll(now)?;
        self.apply_expectancy(years)
    }

    /// Apply a pending expectancy edit immediately, skipping the wait.
    pub fn flush(&mut self) -> Option<&LifeGrid> {
        let years = self.scheduler.cancel_pending()?;
        self.apply_expectancy(years)
    }

    /// Cancel a pending expectancy edit by handle.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.scheduler.cancel(handle)
    }

    /// Time until the pending expectancy edit is applied.
    pub fn time_until_recompute(&self, now: Instant) -> Option<Duration> {
        self.scheduler.time_until_due(now)
    }

    /// Expectancy value waiting for its window to elapse.
    pub fn pending_life_expectancy(&self) -> Option<u32> {
        self.scheduler.pending().copied()
    }

    /// Recompute against the clock's current day, e.g. after midnight.
    pub fn refresh(&mut self) -> Option<&LifeGrid> {
        let profile = self.profile?;
        let today = self.clock.today();
        Some(self.recompute(profile, today))
    }

    fn apply_expectancy(&mut self, years: u32) -> Option<&LifeGrid> {
        let current = self.profile?;
        let today = self.clock.today();
        match current.with_expectancy(i64::from(years), today, self.config.max_life_expectancy_years) {
            Ok(profile) => {
                tracing::info!(life_expectancy_years = years, "life expectancy applied");
                self.profile = Some(profile);
                Some(self.recompute(profile, today))
            }
            Err(e) => {
                rejected("life expectancy", e);
                None
            }
        }
    }

    // ── Markers ──────────────────────────────────────────────────────

    /// Validate and append a marker; recompute immediately.
    ///
    /// # Errors
    /// - `InvalidDate`, `InvalidMarkerRange` or `InvalidMarker` from validation.
    pub fn submit_marker(&mut self, draft: MarkerDraft) -> Result<Marker, KernelError> {
        let marker = Marker::from_draft(MarkerId::random(), draft, self.marker_rules())
            .map_err(|e| rejected("marker", e))?;

        tracing::info!(
            marker_id = %marker.id,
            start = %marker.start_date,
            end = %marker.last_day(),
            "marker added"
        );
        self.markers.push(marker.clone());
        self.markers_changed();
        Ok(marker)
    }

    /// Replace a marker's fields, keeping its id and position.
    ///
    /// # Errors
    /// - `MarkerNotFound` when `id` is unknown.
    /// - Validation errors as for [`submit_marker`](Self::submit_marker).
    pub fn replace_marker(&mut self, id: MarkerId, draft: MarkerDraft) -> Result<Marker, KernelError> {
        let position = self
            .markers
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| rejected("marker", KernelError::MarkerNotFound(id)))?;
        let marker = Marker::from_draft(id, draft, self.marker_rules())
            .map_err(|e| rejected("marker", e))?;

        tracing::info!(marker_id = %id, "marker replaced");
        self.markers[position] = marker.clone();
        self.markers_changed();
        Ok(marker)
    }

    /// Remove a marker; recompute immediately. Returns the removed marker.
    pub fn delete_marker(&mut self, id: MarkerId) -> Option<Marker> {
        let position = self.markers.iter().position(|m| m.id == id)?;
        let removed = self.markers.remove(position);
        tracing::info!(marker_id = %id, "marker deleted");
        self.markers_changed();
        Some(removed)
    }

    /// Markers in insertion order.
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    fn marker_rules(&self) -> MarkerRules {
        MarkerRules {
            today: self.clock.today(),
            max_name_chars: self.config.max_marker_name_chars,
        }
    }

    fn markers_changed(&mut self) {
        self.index = Arc::new(MarkerRangeIndex::build(&self.markers));
        if let Some(profile) = self.profile {
            let today = self.clock.today();
            self.recompute(profile, today);
        }
    }

    // ── Outputs ──────────────────────────────────────────────────────

    /// Current profile.
    pub fn profile(&self) -> Option<&LifeProfile> {
        self.profile.as_ref()
    }

    /// Most recently computed grid.
    pub fn grid(&self) -> Option<&LifeGrid> {
        self.current.as_deref()
    }

    /// Shared handle to the most recent grid.
    pub fn grid_handle(&self) -> Option<Arc<LifeGrid>> {
        self.current.clone()
    }

    /// Day records of the current grid; empty before any profile.
    pub fn day_records(&self) -> &[DayRecord] {
        self.grid().map(LifeGrid::records).unwrap_or_default()
    }

    /// Decade buckets of the current grid; empty before any profile.
    pub fn decade_buckets(&self) -> &[DecadeBucket] {
        self.grid().map(LifeGrid::decades).unwrap_or_default()
    }

    /// Headline figures; `None` before any profile.
    pub fn summary(&self) -> Option<LifeSummary> {
        self.grid().map(LifeGrid::summary)
    }

    /// Scheduler counters.
    pub fn scheduler_stats(&self) -> SchedulerStats {
        self.scheduler.stats()
    }

    /// Grid cache statistics; `None` when caching is disabled.
    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.cache.stats()
    }

    /// Active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn recompute(&mut self, profile: LifeProfile, today: CalendarDate) -> &LifeGrid {
        let key = GridKey::compute(&profile, today, self.index.fingerprint());
        let grid = match self.cache.get(&key) {
            Some(grid) => {
                tracing::debug!(fingerprint = %grid.fingerprint(), "grid served from cache");
                grid
            }
            None => {
                let grid = Arc::new(LifeGrid::compute(profile, today, Arc::clone(&self.index)));
                self.cache.put(key, Arc::clone(&grid));
                grid
            }
        };
        self.current.insert(grid)
    }
}

fn rejected(input: &str, err: KernelError) -> KernelError {
    tracing::warn!(input, error = %err, "input rejected");
    err
}
