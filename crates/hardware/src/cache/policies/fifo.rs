//! First-In, First-Out (FIFO) Replacement Policy.
//!
//! This policy evicts the line that was installed longest ago, regardless of how
//! recently it was hit. Unlike round robin, the order is driven by fills reported
//! through `update()`, so a way that is pinned while its turn comes up keeps its place
//! at the head of the queue and is evicted as soon as it is released.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `update()`: O(1)
//!   - `get_victim()`: O(W) where W is the number of ways
//! - **Space Complexity:** O(W) per set
//! - **Best Case:** Streaming accesses where all lines have equal importance
//! - **Worst Case:** Workloads with strong temporal locality

use super::{Evictability, ReplacementPolicy, exhausted, first_evictable};
use crate::common::data::{AccessKind, AccessOutcome};
use crate::common::error::CacheError;

/// FIFO policy state.
#[derive(Debug, Clone)]
pub struct FifoPolicy {
    /// Fill sequence number per way; 0 means never filled.
    filled_at: Vec<u64>,
    /// Last fill sequence number handed out.
    fills: u64,
}

impl FifoPolicy {
    /// Creates a new FIFO policy instance.
    ///
    /// # Arguments
    ///
    /// * `ways` - The associativity (number of ways) of the set.
    pub fn new(ways: usize) -> Self {
        Self {
            filled_at: vec![0; ways],
            fills: 0,
        }
    }
}

impl ReplacementPolicy for FifoPolicy {
    fn ways(&self) -> usize {
        self.filled_at.len()
    }

    /// Records the fill order. Hits do not change the queue.
    fn update(&mut self, outcome: AccessOutcome) {
        if outcome.kind != AccessKind::Fill {
            return;
        }
        if let Some(slot) = self.filled_at.get_mut(outcome.way) {
            self.fills += 1;
            *slot = self.fills;
        }
    }

    /// Returns the evictable way with the oldest fill, lowest index on ties.
    fn get_victim<E: Evictability + ?Sized>(&mut self, set: &E) -> Result<usize, CacheError> {
        let ways = self.ways();
        let mut victim = first_evictable(set, ways, |_| true).ok_or_else(|| exhausted(ways))?;
        for way in victim + 1..ways {
            if set.is_valid_replacement(way) && self.filled_at[way] < self.filled_at[victim] {
                victim = way;
            }
        }
        Ok(victim)
    }
}
