//! Memoization of computed grids.
//!
//! ## Purpose
//!
//! A full cycle costs O(total_days × markers). Editing the life expectancy
//! back to a value seen a moment ago, or re-adding a marker that was just
//! removed, should not pay that cost again.
//!
//! ## Cache Key Design
//!
//! The key is an xxh64 hash over every input a cycle reads:
//! - the `LifeProfile` (birth date and life expectancy)
//! - "today" as sampled for the cycle
//! - the marker index fingerprint (markers and their order)
//!
//! Any input change therefore yields a different key.

use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use parking_lot::RwLock;
use serde::Serialize;

use crate::canonical::canonical_hash;
use crate::grid::LifeGrid;
use crate::types::{CalendarDate, LifeProfile};

/// Configuration for the grid cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of grids kept.
    pub max_entries: usize,
    /// Whether to enable the cache.
    pub enabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 16,
            enabled: true,
        }
    }
}

/// Cache key for one computation cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridKey(u64);

impl GridKey {
    /// Compute the key from all cycle inputs.
    pub fn compute(profile: &LifeProfile, today: CalendarDate, index_fingerprint: &str) -> Self {
        Self(canonical_hash(&GridKeyInput {
            profile,
            today,
            index_fingerprint,
        }))
    }
}

#[derive(Serialize)]
struct GridKeyInput<'a> {
    profile: &'a LifeProfile,
    today: CalendarDate,
    index_fingerprint: &'a str,
}

/// Cache statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Current number of entries in the cache.
    pub len: usize,
    /// Maximum capacity of the cache.
    pub cap: usize,
    /// Lookups served from the cache.
    pub hits: u64,
    /// Lookups that missed.
    pub misses: u64,
}

#[derive(Debug)]
struct CacheInner {
    entries: LruCache<GridKey, Arc<LifeGrid>>,
    hits: u64,
    misses: u64,
}

/// LRU cache of computed grids.
///
/// Thread-safe; a host may share one cache between sessions.
#[derive(Debug, Clone)]
pub struct GridCache {
    inner: Option<Arc<RwLock<CacheInner>>>,
}

impl GridCache {
    /// Create a cache from configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let inner = if config.enabled {
            let size = NonZeroUsize::new(config.max_entries).unwrap_or(NonZeroUsize::MIN);
            Some(Arc::new(RwLock::new(CacheInner {
                entries: LruCache::new(size),
                hits: 0,
                misses: 0,
            })))
        } else {
            None
        };
        Self { inner }
    }

    /// A cache that never stores anything.
    pub fn disabled() -> Self {
        Self { inner: None }
    }

    /// Look up a grid, marking it most recently used.
    pub fn get(&self, key: &GridKey) -> Option<Arc<LifeGrid>> {
        let inner = self.inner.as_ref()?;
        let mut inner = inner.write();
        match inner.entries.get(key).cloned() {
            Some(grid) => {
                inner.hits += 1;
                Some(grid)
            }
            None => {
                inner.misses += 1;
                None
            }
        }
    }

    /// Store a grid.
    pub fn put(&self, key: GridKey, grid: Arc<LifeGrid>) {
        if let Some(inner) = &self.inner {
            inner.write().entries.put(key, grid);
        }
    }

    /// Get cache statistics.
    ///
    /// Returns `None` if caching is disabled.
    pub fn stats(&self) -> Option<CacheStats> {
        self.inner.as_ref().map(|inner| {
            let inner = inner.read();
            CacheStats {
                len: inner.entries.len(),
                cap: inner.entries.cap().get(),
                hits: inner.hits,
                misses: inner.misses,
            }
        })
    }

    /// Drop all cached grids.
    pub fn clear(&self) {
        if let Some(inner) = &self.inner {
            inner.write().entries.clear();
        }
    }
}

impl Default for GridCache {
    fn default() -> Self {
        Self::new(&CacheConfig::default())
    }
}
