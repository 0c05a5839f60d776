//! Round-Robin Replacement Policy.
//!
//! This policy keeps a single cursor per set and evicts the way it points at,
//! advancing the cursor on every selection. Hits and fills are ignored, which makes
//! the eviction sequence deterministic and independent of the access history. It is
//! the usual baseline when comparing policies.
//!
//! Ways that cannot be evicted are skipped. The skip is a bounded loop over at most
//! `ways` cursor positions, so a set with every way pinned reports exhaustion
//! instead of spinning.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `update()`: O(1)
//!   - `get_victim()`: O(1) when the cursor way is evictable, O(W) worst case
//! - **Space Complexity:** O(1) per set
//! - **Hardware Cost:** Minimal - one log2(W)-bit counter per set

use super::{Evictability, ReplacementPolicy, exhausted};
use crate::common::data::AccessOutcome;
use crate::common::error::CacheError;

/// Round-robin policy state.
#[derive(Debug, Clone)]
pub struct RoundRobinPolicy {
    /// Next way to try, always in `[0, ways)`.
    cursor: usize,
    /// Number of ways in the set.
    ways: usize,
}

impl RoundRobinPolicy {
    /// Creates a new round-robin policy with the cursor at way 0.
    ///
    /// # Arguments
    ///
    /// * `ways` - The associativity (number of ways) of the set.
    pub const fn new(ways: usize) -> Self {
        Self { cursor: 0, ways }
    }

    /// Way the next selection will try first.
    pub const fn cursor(&self) -> usize {
        self.cursor
    }
}

impl ReplacementPolicy for RoundRobinPolicy {
    fn ways(&self) -> usize {
        self.ways
    }

    /// Round robin does not react to accesses.
    fn update(&mut self, _outcome: AccessOutcome) {}

    /// Returns the cursor way and advances the cursor, skipping ways that are not
    /// evictable.
    fn get_victim<E: Evictability + ?Sized>(&mut self, set: &E) -> Result<usize, CacheError> {
        for _ in 0..self.ways {
            let way = self.cursor;
            self.cursor = (self.cursor + 1) % self.ways;
            if set.is_valid_replacement(way) {
                return Ok(way);
            }
        }
        Err(exhausted(self.ways))
    }
}
