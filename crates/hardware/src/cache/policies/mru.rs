//! Most Recently Used (MRU) Replacement Policy.
//!
//! This policy evicts the way that was accessed most recently. While
//! counter-intuitive for standard workloads, MRU is optimal for cyclic access
//! patterns (loops) where the working set is larger than the set: the line just
//! used is the one needed furthest in the future.

use super::lru::Recency;
use super::{Evictability, ReplacementPolicy};
use crate::common::data::AccessOutcome;
use crate::common::error::CacheError;

/// MRU policy state.
#[derive(Debug, Clone)]
pub struct MruPolicy {
    recency: Recency,
}

impl MruPolicy {
    /// Creates a new MRU policy instance.
    ///
    /// # Arguments
    ///
    /// * `ways` - The associativity (number of ways) of the set.
    pub fn new(ways: usize) -> Self {
        Self {
            recency: Recency::new(ways),
        }
    }
}

impl ReplacementPolicy for MruPolicy {
    fn ways(&self) -> usize {
        self.recency.ways()
    }

    fn update(&mut self, outcome: AccessOutcome) {
        self.recency.touch(outcome.way);
    }

    /// Returns the evictable way with the largest stamp, lowest index on ties.
    fn get_victim<E: Evictability + ?Sized>(&mut self, set: &E) -> Result<usize, CacheError> {
        self.recency.select(set, |candidate, best| candidate > best)
    }
}
