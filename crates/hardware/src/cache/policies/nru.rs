//! Not Recently Used (NRU) Replacement Policy.
//!
//! Each way has a "used" bit, set whenever the way is hit or filled. The victim
//! is the first evictable way whose bit is clear. When every evictable way has been
//! used, all bits are cleared and the scan runs once more (second chance), which
//! then always succeeds unless nothing is evictable.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `update()`: O(1)
//!   - `get_victim()`: O(W), two scans at most
//! - **Space Complexity:** W bits per set

use tracing::trace;

use super::{Evictability, ReplacementPolicy, exhausted, first_evictable};
use crate::common::data::AccessOutcome;
use crate::common::error::CacheError;

/// NRU policy state.
#[derive(Debug, Clone)]
pub struct NruPolicy {
    /// Used bit per way, bit `i` for way `i`.
    used: u64,
    /// Number of ways in the set (at most 64).
    ways: usize,
}

impl NruPolicy {
    /// Creates a new NRU policy with every used bit clear.
    ///
    /// # Arguments
    ///
    /// * `ways` - The associativity (number of ways) of the set, at most 64.
    pub const fn new(ways: usize) -> Self {
        Self { used: 0, ways }
    }

    /// Returns `true` if `way` has been used since the last reset.
    pub const fn is_used(&self, way: usize) -> bool {
        way < self.ways && (self.used >> way) & 1 == 1
    }

    fn find_unused<E: Evictability + ?Sized>(&self, set: &E) -> Option<usize> {
        let used = self.used;
        first_evictable(set, self.ways, |way| (used >> way) & 1 == 0)
    }
}

impl ReplacementPolicy for NruPolicy {
    fn ways(&self) -> usize {
        self.ways
    }

    fn update(&mut self, outcome: AccessOutcome) {
        if outcome.way < self.ways {
            self.used |= 1u64 << outcome.way;
        }
    }

    fn get_victim<E: Evictability + ?Sized>(&mut self, set: &E) -> Result<usize, CacheError> {
        if let Some(way) = self.find_unused(set) {
            return Ok(way);
        }
        trace!(ways = self.ways, "nru: all evictable ways used, clearing bits");
        self.used = 0;
        self.find_unused(set).ok_or_else(|| exhausted(self.ways))
    }
}
