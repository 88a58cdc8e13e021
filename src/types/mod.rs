//! Core types for the lifegrid kernel.

pub mod date;
pub mod profile;
pub mod marker;
pub mod day;

pub use date::{CalendarDate, ISO_DATE_FORMAT};
pub use profile::{LifeProfile, validate_expectancy};
pub use marker::{Marker, MarkerId, MarkerColor, MarkerDraft, MarkerRules, UNNAMED_MARKER};
pub use day::{
    DayCategory, DayRecord, DecadeBucket, LifeSummary,
    DAYS_PER_DECADE, YEARS_PER_DECADE,
};
