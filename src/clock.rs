//! Source of "today".
//!
//! A cycle samples the clock once; every day in that cycle is classified
//! against the same date.

use chrono::Local;
use parking_lot::RwLock;

use crate::types::CalendarDate;

/// Clock interface.
pub trait Clock: Send + Sync {
    /// The current calendar day.
    fn today(&self) -> CalendarDate;
}

/// Local wall-clock date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> CalendarDate {
        CalendarDate::new(Local::now().date_naive())
    }
}

/// Clock pinned to a settable date, for tests and replays.
#[derive(Debug)]
pub struct FixedClock {
    today: RwLock<CalendarDate>,
}

impl FixedClock {
    /// Create a clock reporting `today`.
    pub fn new(today: CalendarDate) -> Self {
        Self {
            today: RwLock::new(today),
        }
    }

    /// Move the clock to another day.
    pub fn set(&self, today: CalendarDate) {
        *self.today.write() = today;
    }
}

impl Clock for FixedClock {
    fn today(&self) -> CalendarDate {
        *self.today.read()
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn today(&self) -> CalendarDate {
        (**self).today()
    }
}
