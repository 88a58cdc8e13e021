//! # lifegrid-kernel
//!
//! Deterministic day classification for lifespan grids.
//!
//! The kernel answers one question:
//!
//! > For every day of an estimated lifespan, is it lived or not, and which
//! > life-event marker (if any) governs how it looks?
//!
//! ## Core Contract
//!
//! 1. Estimate the lifespan as `years * 365 + floor(years / 4)` days from birth
//! 2. Classify each day offset as `Future`, `LivedPlain` or `LivedMarked`
//! 3. Resolve overlapping markers: the last-added matching marker wins
//! 4. Group offsets into 3650-day decade buckets for paged rendering
//!
//! ## Architecture
//!
//! ```text
//! Markers → MarkerRangeIndex ─┐
//!                             ├→ DayClassifier → DecadeGrouper → LifeGrid
//! LifeProfile ────────────────┘
//!      ↑
//! RecomputeScheduler (debounced life-expectancy edits)
//! ```
//!
//! ## Determinism Guarantees
//!
//! - Same profile + same markers (same order) + same "today" → identical grid fingerprint
//! - "Today" is sampled once per cycle
//! - Grids are recomputed wholesale, never patched

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod types;
pub mod calendar;
pub mod canonical;
pub mod index;
pub mod classifier;
pub mod decade;
pub mod scheduler;
pub mod grid;
pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod session;
pub mod telemetry;

// Re-exports
pub use types::{
    CalendarDate, LifeProfile, Marker, MarkerId, MarkerColor, MarkerDraft,
    DayCategory, DayRecord, DecadeBucket, LifeSummary,
    DAYS_PER_DECADE, UNNAMED_MARKER,
};
pub use calendar::{days_between, add_days, estimate_total_days, CalendarError};
pub use canonical::{to_canonical_bytes, canonical_hash, canonical_hash_hex};
pub use index::{MarkerRange, MarkerRangeIndex};
pub use classifier::{DayClassifier, CycleBounds};
pub use decade::{group_decades, decade_count};
pub use scheduler::{RecomputeScheduler, TimerHandle, SchedulerStats, DEFAULT_DEBOUNCE};
#[cfg(feature = "async")]
pub use scheduler::DebounceTimer;
pub use grid::{LifeGrid, DayCell};
pub use cache::{GridCache, GridKey, CacheConfig, CacheStats};
pub use clock::{Clock, SystemClock, FixedClock};
pub use config::EngineConfig;
pub use error::KernelError;
pub use session::LifeSession;
pub use telemetry::{init_tracing, LogFormat};

/// Schema version of serialized kernel output.
/// Increment on breaking changes to any exported type.
pub const LIFEGRID_SCHEMA_VERSION: &str = "1.0.0";
