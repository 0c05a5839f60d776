//! Least Recently Used (LRU) Replacement Policy.
//!
//! This policy evicts the way that has gone the longest without an access. Each
//! way carries a recency stamp taken from a logical clock owned by the policy; an
//! access stamps the way with the next clock value, and the victim is the evictable
//! way with the smallest stamp. Ways that were never touched keep stamp 0 and are
//! therefore chosen first. Ties go to the lowest way index.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `update()`: O(1)
//!   - `get_victim()`: O(W) where W is the number of ways (associativity)
//! - **Space Complexity:** O(W) per set
//! - **Hardware Cost:** High - one timestamp per way and a comparator tree
//! - **Best Case:** Accesses with good temporal locality
//! - **Worst Case:** Scanning patterns larger than the set (thrashing)

use super::{Evictability, ReplacementPolicy, exhausted};
use crate::common::data::AccessOutcome;
use crate::common::error::CacheError;

/// Per-way recency stamps driven by a private logical clock.
///
/// Shared by the LRU and MRU policies, which differ only in which end of the order
/// they evict from.
#[derive(Debug, Clone)]
pub(super) struct Recency {
    /// Clock value at each way's last access; 0 means never accessed.
    stamps: Vec<u64>,
    /// Last clock value handed out.
    clock: u64,
}

impl Recency {
    pub(super) fn new(ways: usize) -> Self {
        Self {
            stamps: vec![0; ways],
            clock: 0,
        }
    }

    pub(super) fn ways(&self) -> usize {
        self.stamps.len()
    }

    pub(super) fn touch(&mut self, way: usize) {
        if let Some(stamp) = self.stamps.get_mut(way) {
            self.clock += 1;
            *stamp = self.clock;
        }
    }

    pub(super) fn stamp(&self, way: usize) -> u64 {
        self.stamps[way]
    }

    /// Evictable way whose stamp wins against every other under `prefer`, lowest
    /// index on ties.
    pub(super) fn select<E, F>(&self, set: &E, prefer: F) -> Result<usize, CacheError>
    where
        E: Evictability + ?Sized,
        F: Fn(u64, u64) -> bool,
    {
        let mut victim: Option<usize> = None;
        for way in 0..self.stamps.len() {
            if !set.is_valid_replacement(way) {
                continue;
            }
            match victim {
                Some(best) if !prefer(self.stamps[way], self.stamps[best]) => {}
                _ => victim = Some(way),
            }
        }
        victim.ok_or_else(|| exhausted(self.stamps.len()))
    }
}

/// LRU policy state.
#[derive(Debug, Clone)]
pub struct LruPolicy {
    recency: Recency,
}

impl LruPolicy {
    /// Creates a new LRU policy instance with every way untouched.
    ///
    /// # Arguments
    ///
    /// * `ways` - The associativity (number of ways) of the set.
    pub fn new(ways: usize) -> Self {
        Self {
            recency: Recency::new(ways),
        }
    }

    /// Recency stamp of `way`; larger is more recent, 0 is never accessed.
    ///
    /// # Panics
    ///
    /// Panics if `way` is out of range.
    pub fn stamp(&self, way: usize) -> u64 {
        self.recency.stamp(way)
    }
}

impl ReplacementPolicy for LruPolicy {
    fn ways(&self) -> usize {
        self.recency.ways()
    }

    /// Stamps the accessed way with the next clock value (MRU position).
    fn update(&mut self, outcome: AccessOutcome) {
        self.recency.touch(outcome.way);
    }

    /// Returns the evictable way with the smallest stamp (LRU position).
    fn get_victim<E: Evictability + ?Sized>(&mut self, set: &E) -> Result<usize, CacheError> {
        self.recency.select(set, |candidate, best| candidate < best)
    }
}
