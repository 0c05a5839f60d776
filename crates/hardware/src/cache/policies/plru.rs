//! Pseudo-LRU (PLRU) Replacement Policy.
//!
//! Bit-PLRU approximates LRU with a single MRU bit per way. An access sets the
//! way's bit; when that would leave every bit set, all other bits are cleared so
//! the accessed way is the only one marked recent. The victim is the first
//! evictable way whose bit is clear.
//!
//! When every evictable way is marked recent (possible while other ways are
//! pinned) the first evictable way is chosen.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `update()`: O(1)
//!   - `get_victim()`: O(W)
//! - **Space Complexity:** W bits per set
//! - **Hardware Cost:** Low - simple bit operations
//! - **Worst Case:** Pathological cases can evict useful lines early

use super::{Evictability, ReplacementPolicy, exhausted, first_evictable};
use crate::common::data::AccessOutcome;
use crate::common::error::CacheError;

/// PLRU policy state.
#[derive(Debug, Clone)]
pub struct PlruPolicy {
    /// MRU bit per way, bit `i` for way `i`.
    mru_bits: u64,
    /// Number of ways in the set (at most 64).
    ways: usize,
}

impl PlruPolicy {
    /// Creates a new PLRU policy instance.
    ///
    /// # Arguments
    ///
    /// * `ways` - The associativity (number of ways) of the set, at most 64.
    pub const fn new(ways: usize) -> Self {
        Self { mru_bits: 0, ways }
    }

    /// Raw MRU bits, bit `i` for way `i`.
    pub const fn mru_bits(&self) -> u64 {
        self.mru_bits
    }

    const fn all_ones(&self) -> u64 {
        if self.ways >= 64 {
            u64::MAX
        } else {
            (1u64 << self.ways) - 1
        }
    }
}

impl ReplacementPolicy for PlruPolicy {
    fn ways(&self) -> usize {
        self.ways
    }

    /// Marks the accessed way recent, resetting the others once all are recent.
    fn update(&mut self, outcome: AccessOutcome) {
        if outcome.way >= self.ways {
            return;
        }
        let mask = 1u64 << outcome.way;
        self.mru_bits |= mask;

        let all_ones = self.all_ones();
        if self.mru_bits & all_ones == all_ones {
            self.mru_bits = mask;
        }
    }

    /// Returns the first evictable way not marked recent.
    fn get_victim<E: Evictability + ?Sized>(&mut self, set: &E) -> Result<usize, CacheError> {
        let bits = self.mru_bits;
        first_evictable(set, self.ways, |way| (bits >> way) & 1 == 0)
            .or_else(|| first_evictable(set, self.ways, |_| true))
            .ok_or_else(|| exhausted(self.ways))
    }
}
