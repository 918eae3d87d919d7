//! Analyte resolution caching.
//!
//! Dictated lines repeat the same handful of abbreviations, so resolved
//! tokens are kept in an LRU cache. Thread-safe using `Mutex` for LRU
//! operations.

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use lru::LruCache;

use crate::config::CacheConfig;
use crate::traits::AnalyteName;

/// Thread-safe LRU cache from typed token to resolved analyte.
///
/// Misses are cached too (`None`), so an unknown token is looked up once.
///
/// # Example
///
/// ```rust
/// use labtext_import::{AnalyteName, CacheConfig, ResolutionCache};
///
/// let cache = ResolutionCache::new(CacheConfig::default());
/// cache.set("tsh".to_string(), Some(AnalyteName::new("tireotropina", "TSH")));
///
/// assert_eq!(cache.get("tsh").flatten().map(|a| a.short_name), Some("TSH".to_string()));
/// assert!(cache.get("ft4").is_none());
/// ```
pub struct ResolutionCache {
    inner: Mutex<LruCache<String, Option<AnalyteName>>>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl ResolutionCache {
    /// Creates a new cache with the given configuration.
    pub fn new(config: CacheConfig) -> Self {
        Self::with_capacity(config.max_entries)
    }

    /// Creates a cache holding at most `max_entries` tokens.
    pub fn with_capacity(max_entries: usize) -> Self {
        let capacity = NonZeroUsize::new(max_entries.max(1)).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: Mutex::new(LruCache::new(capacity)),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
        }
    }

    /// Gets a cached resolution.
    ///
    /// The outer `Option` is the cache lookup, the inner one the resolution.
    /// On hit, the entry is promoted to most-recently-used.
    pub fn get(&self, token: &str) -> Option<Option<AnalyteName>> {
        let found = self
            .inner
            .lock()
            .ok()
            .and_then(|mut cache| cache.get(token).cloned());

        match found {
            Some(_) => self.hits.fetch_add(1, Ordering::Relaxed),
            None => self.misses.fetch_add(1, Ordering::Relaxed),
        };
        found
    }

    /// Stores a resolution, evicting the least recently used entry when full.
    pub fn set(&self, token: String, analyte: Option<AnalyteName>) {
        if let Ok(mut cache) = self.inner.lock() {
            cache.put(token, analyte);
        }
    }

    /// Returns the number of entries currently in the cache.
    pub fn len(&self) -> usize {
        match self.inner.lock() {
            Ok(cache) => cache.len(),
            _ => 0,
        }
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clears all entries and counters.
    pub fn clear(&self) {
        if let Ok(mut cache) = self.inner.lock() {
            cache.clear();
        }
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    /// Returns hit/miss counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

impl std::fmt::Debug for ResolutionCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolutionCache")
            .field("stats", &self.stats())
            .finish()
    }
}

/// Cache statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Entries currently cached.
    pub entries: usize,
    /// Lookups answered from the cache.
    pub hits: usize,
    /// Lookups that fell through to the directory.
    pub misses: usize,
}

impl CacheStats {
    /// Fraction of lookups answered from the cache.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
