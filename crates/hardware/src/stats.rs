//! Cache statistics collection and reporting.
//!
//! This module tracks per-cache access outcomes. It provides:
//! 1. **Counters:** Accesses, hits, misses, fills, evictions, write-backs, exhaustion.
//! 2. **Derived metrics:** Hit and miss rates.
//! 3. **Reporting:** A one-line summary through `Display`.

use std::fmt;

/// Access outcome counters for one cache.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Accesses issued to the cache.
    pub accesses: u64,
    /// Accesses that found their line resident.
    pub hits: u64,
    /// Accesses that did not.
    pub misses: u64,
    /// Lines installed after a miss.
    pub fills: u64,
    /// Fills that displaced a resident line.
    pub evictions: u64,
    /// Dirty lines written back, by eviction or flush.
    pub writebacks: u64,
    /// Misses that found every way pinned and could not be filled.
    pub exhausted: u64,
}

impl CacheStats {
    /// Fraction of accesses that hit; 0.0 before the first access.
    pub fn hit_rate(&self) -> f64 {
        if self.accesses == 0 {
            0.0
        } else {
            self.hits as f64 / self.accesses as f64
        }
    }

    /// Fraction of accesses that missed; 0.0 before the first access.
    pub fn miss_rate(&self) -> f64 {
        if self.accesses == 0 {
            0.0
        } else {
            self.misses as f64 / self.accesses as f64
        }
    }

    /// Adds another cache's counters into this one.
    pub const fn merge(&mut self, other: &Self) {
        self.accesses += other.accesses;
        self.hits += other.hits;
        self.misses += other.misses;
        self.fills += other.fills;
        self.evictions += other.evictions;
        self.writebacks += other.writebacks;
        self.exhausted += other.exhausted;
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "accesses {} hits {} misses {} ({:.2}% hit) evictions {} writebacks {} exhausted {}",
            self.accesses,
            self.hits,
            self.misses,
            self.hit_rate() * 100.0,
            self.evictions,
            self.writebacks,
            self.exhausted,
        )
    }
}
