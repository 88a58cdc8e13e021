//! Engine configuration.
//!
//! ## Environment
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `LIFEGRID_DEBOUNCE_MS` | `800` | Settling delay for life-expectancy edits |
//! | `LIFEGRID_MAX_LIFE_EXPECTANCY` | `150` | Upper bound on accepted expectancy (years) |
//! | `LIFEGRID_CACHE_ENTRIES` | `16` | Grid cache capacity |
//! | `LIFEGRID_CACHE_ENABLED` | `true` | Enable the grid cache |
//!
//! Unparseable values fall back to the default with a warning.

use std::str::FromStr;
use std::time::Duration;

use crate::cache::CacheConfig;
use crate::scheduler::DEFAULT_DEBOUNCE;

/// Default upper bound on life expectancy, in years.
pub const DEFAULT_MAX_LIFE_EXPECTANCY_YEARS: u32 = 150;

/// Default marker name limit, in characters.
pub const DEFAULT_MAX_MARKER_NAME_CHARS: usize = 50;

/// Tunables for a [`LifeSession`](crate::LifeSession).
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Settling delay before a life-expectancy edit triggers recompute.
    pub debounce: Duration,
    /// Largest accepted life expectancy.
    pub max_life_expectancy_years: u32,
    /// Longest accepted marker name.
    pub max_marker_name_chars: usize,
    /// Grid cache settings.
    pub cache: CacheConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            max_life_expectancy_years: DEFAULT_MAX_LIFE_EXPECTANCY_YEARS,
            max_marker_name_chars: DEFAULT_MAX_MARKER_NAME_CHARS,
            cache: CacheConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Defaults overridden by `LIFEGRID_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by values from `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let debounce_ms = read_var(&lookup, "LIFEGRID_DEBOUNCE_MS", defaults.debounce.as_millis() as u64);
        let max_years = read_var(
            &lookup,
            "LIFEGRID_MAX_LIFE_EXPECTANCY",
            defaults.max_life_expectancy_years,
        );
        let max_entries = read_var(&lookup, "LIFEGRID_CACHE_ENTRIES", defaults.cache.max_entries);
        let cache_enabled = read_var(&lookup, "LIFEGRID_CACHE_ENABLED", defaults.cache.enabled);

        let max_life_expectancy_years = if max_years == 0 {
            tracing::warn!(
                "LIFEGRID_MAX_LIFE_EXPECTANCY must be positive, using {}",
                defaults.max_life_expectancy_years
            );
            defaults.max_life_expectancy_years
        } else {
            max_years
        };

        Self {
            debounce: Duration::from_millis(debounce_ms),
            max_life_expectancy_years,
            max_marker_name_chars: defaults.max_marker_name_chars,
            cache: CacheConfig {
                max_entries,
                enabled: cache_enabled,
            },
        }
    }

    /// Set the debounce delay.
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Set the cache configuration.
    pub fn with_cache(mut self, cache: CacheConfig) -> Self {
        self.cache = cache;
        self
    }
}

fn read_var<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "invalid value, using default {}", default);
            default
        }),
    }
}
