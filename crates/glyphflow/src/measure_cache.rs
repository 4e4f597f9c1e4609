//! LRU cache over measurement-oracle results.
//!
//! Resize storms re-run full layout passes, and most of the text in a pass
//! is unchanged between runs. Caching `(text, size, font, bounds)` results
//! keeps repeated passes from hammering the oracle, which may be an
//! expensive host call.

use std::hash::{Hash, Hasher};
use std::num::NonZeroUsize;

use lru::LruCache;
use rustc_hash::FxHasher;

use glyphflow_core::{Font, MeasureOracle, Size};

/// Default cache capacity in entries.
pub const DEFAULT_CACHE_CAPACITY: usize = 4096;

/// Statistics about cache performance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    /// Number of cache hits.
    pub hits: u64,
    /// Number of cache misses.
    pub misses: u64,
    /// Current number of entries.
    pub size: usize,
    /// Maximum capacity.
    pub capacity: usize,
}

impl CacheStats {
    /// Hit rate in `0.0..=1.0`.
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// LRU cache keyed by the full measurement request.
///
/// Keys are pre-hashed with `FxHasher`; the text itself is not stored.
pub struct MeasureCache {
    cache: LruCache<u64, Size>,
    hits: u64,
    misses: u64,
}

impl MeasureCache {
    /// Create a cache holding up to `capacity` entries (minimum 1).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: LruCache::new(capacity),
            hits: 0,
            misses: 0,
        }
    }

    fn key(text: &str, font_size: u32, font: Font, bounds: Size) -> u64 {
        let mut hasher = FxHasher::default();
        text.hash(&mut hasher);
        font_size.hash(&mut hasher);
        font.hash(&mut hasher);
        bounds.width.to_bits().hash(&mut hasher);
        bounds.height.to_bits().hash(&mut hasher);
        hasher.finish()
    }

    /// Measure through the cache.
    pub fn measure(
        &mut self,
        oracle: &dyn MeasureOracle,
        text: &str,
        font_size: u32,
        font: Font,
        bounds: Size,
    ) -> Size {
        let key = Self::key(text, font_size, font, bounds);
        if let Some(&size) = self.cache.get(&key) {
            self.hits += 1;
            return size;
        }
        self.misses += 1;
        let size = oracle.measure(text, font_size, font, bounds);
        self.cache.put(key, size);
        size
    }

    /// Drop every entry, keeping the hit/miss counters.
    pub fn clear(&mut self) {
        self.cache.clear();
    }

    /// Current performance counters.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            size: self.cache.len(),
            capacity: self.cache.cap().get(),
        }
    }
}

impl Default for MeasureCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl std::fmt::Debug for MeasureCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MeasureCache")
            .field("stats", &self.stats())
            .finish()
    }
}
