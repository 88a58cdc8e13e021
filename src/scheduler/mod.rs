//! Recompute scheduler: a cancellable debounce timer.
//!
//! The scheduler owns at most one pending value. Scheduling a new value
//! cancels the previous one and restarts the delay window; only the value
//! still pending when its window elapses is released by [`poll`].
//!
//! It holds no threads and reads no clock. The caller passes `now` into every
//! call, which keeps the policy deterministic under test.
//!
//! ```text
//! schedule(81, t0)  schedule(80, t0+300ms)          poll(t0+1100ms) → Some(80)
//!      |------ 800ms (dropped) ------|
//!                                    |------ 800ms ------|
//! ```
//!
//! [`poll`]: RecomputeScheduler::poll

#[cfg(feature = "async")]
pub mod timer;

#[cfg(feature = "async")]
pub use timer::DebounceTimer;

use std::fmt;
use std::time::{Duration, Instant};

/// Default settling delay for life-expectancy edits.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(800);

/// Handle to one scheduled recompute.
///
/// Handles are never reused within a scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerHandle(u64);

impl TimerHandle {
    /// Sequence number of this handle.
    pub fn seq(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

#[derive(Debug, Clone)]
struct PendingRecompute<T> {
    handle: TimerHandle,
    value: T,
    due_at: Instant,
}

/// Scheduler counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchedulerStats {
    /// Values scheduled.
    pub scheduled: u64,
    /// Pending values replaced by a newer schedule.
    pub superseded: u64,
    /// Pending values cancelled explicitly.
    pub cancelled: u64,
    /// Values released by `poll`.
    pub fired: u64,
}

/// Debounce gate in front of an expensive recomputation.
#[derive(Debug, Clone)]
pub struct RecomputeScheduler<T> {
    delay: Duration,
    pending: Option<PendingRecompute<T>>,
    next_seq: u64,
    stats: SchedulerStats,
}

impl<T> RecomputeScheduler<T> {
    /// Create a scheduler with the given settling delay.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            next_seq: 0,
            stats: SchedulerStats::default(),
        }
    }

    /// Schedule `value`, cancelling any pending value and restarting the window.
    pub fn schedule(&mut self, value: T, now: Instant) -> TimerHandle {
        let handle = TimerHandle(self.next_seq);
        self.next_seq += 1;

        if let Some(prev) = self.pending.take() {
            self.stats.superseded += 1;
            tracing::trace!(superseded = %prev.handle, by = %handle, "debounced recompute superseded");
        }

        self.pending = Some(PendingRecompute {
            handle,
            value,
            due_at: now + self.delay,
        });
        self.stats.scheduled += 1;
        handle
    }

    /// Cancel the pending value if `handle` still identifies it.
    ///
    /// Returns `false` for stale handles.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        match &self.pending {
            Some(p) if p.handle == handle => {
                self.pending = None;
                self.stats.cancelled += 1;
                true
            }
            _ => false,
        }
    }

    /// Cancel whatever is pending. Returns the dropped value.
    pub fn cancel_pending(&mut self) -> Option<T> {
        let dropped = self.pending.take()?;
        self.stats.cancelled += 1;
        Some(dropped.value)
    }

    /// Release the pending value if its window has elapsed at `now`.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some(p) if now >= p.due_at => {
                let fired = self.pending.take()?;
                self.stats.fired += 1;
                tracing::trace!(handle = %fired.handle, "debounced recompute fired");
                Some(fired.value)
            }
            _ => None,
        }
    }

    /// Time left until the pending value is due; zero when overdue.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|p| p.due_at.saturating_duration_since(now))
    }

    /// The pending value, if any.
    pub fn pending(&self) -> Option<&T> {
        self.pending.as_ref().map(|p| &p.value)
    }

    /// Handle of the pending value, if any.
    pub fn pending_handle(&self) -> Option<TimerHandle> {
        self.pending.as_ref().map(|p| p.handle)
    }

    /// Whether a value is waiting.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Settling delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Counters since creation.
    pub fn stats(&self) -> SchedulerStats {
        self.stats
    }
}

impl<T> Default for RecomputeScheduler<T> {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}
