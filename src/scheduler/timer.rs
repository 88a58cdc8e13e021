//! Tokio-backed debounce timer.
//!
//! Same policy as [`RecomputeScheduler`](super::RecomputeScheduler), driven by
//! the runtime instead of explicit polling: each `schedule` call aborts the
//! previous task and starts a new delay.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use super::{TimerHandle, DEFAULT_DEBOUNCE};

/// Cancellable delayed callback owned by its caller.
///
/// Dropping the timer aborts the pending callback.
#[derive(Debug)]
pub struct DebounceTimer {
    delay: Duration,
    generation: Arc<AtomicU64>,
    task: Option<JoinHandle<()>>,
}

impl DebounceTimer {
    /// Create a timer with the given delay.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: Arc::new(AtomicU64::new(0)),
            task: None,
        }
    }

    /// Run `callback` after the delay unless another call supersedes it.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&mut self, callback: F) -> TimerHandle
    where
        F: FnOnce() + Send + 'static,
    {
        let seq = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(task) = self.task.take() {
            task.abort();
        }

        let generation = Arc::clone(&self.generation);
        let delay = self.delay;
        self.task = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // A task that woke just as it was superseded must not run.
            if generation.load(Ordering::SeqCst) == seq {
                callback();
            }
        }));

        TimerHandle(seq)
    }

    /// Cancel the pending callback if `handle` is still current.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        if self
            .generation
            .compare_exchange(handle.0, handle.0 + 1, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return false;
        }
        match self.task.take() {
            Some(task) => {
                let was_pending = !task.is_finished();
                task.abort();
                was_pending
            }
            None => false,
        }
    }

    /// Whether a callback is waiting to run.
    pub fn is_pending(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Configured delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for DebounceTimer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl Drop for DebounceTimer {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
