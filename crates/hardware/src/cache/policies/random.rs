//! Random Replacement Policy.
//!
//! This policy evicts a uniformly chosen evictable way. It uses a xorshift64
//! generator owned by the policy, seeded from configuration, so a run is
//! reproducible from its seed and access sequence and sets never share a stream.
//!
//! Selection first tries up to `ways` independent draws, accepting the first
//! evictable way. If all draws land on pinned or empty ways it ranks the evictable
//! ways and draws once among them, so exhaustion is only reported when nothing can
//! be evicted.

use super::{Evictability, ReplacementPolicy, exhausted};
use crate::common::constants::DEFAULT_SEED;
use crate::common::data::AccessOutcome;
use crate::common::error::CacheError;

/// Random policy state.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    /// Number of ways in the set.
    ways: usize,
    /// Internal state for the pseudo-random number generator; never zero.
    state: u64,
}

impl RandomPolicy {
    /// Creates a new Random policy instance.
    ///
    /// # Arguments
    ///
    /// * `ways` - The associativity (number of ways) of the set.
    /// * `seed` - Generator seed. Zero is a fixed point of xorshift and is replaced
    ///   by the default seed.
    pub const fn new(ways: usize, seed: u64) -> Self {
        Self {
            ways,
            state: if seed == 0 { DEFAULT_SEED } else { seed },
        }
    }

    /// Advances the generator and returns the next value.
    #[inline]
    const fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Draws an index in `[0, bound)`. `bound` must be non-zero.
    #[inline]
    const fn draw(&mut self, bound: usize) -> usize {
        (self.next_u64() % bound as u64) as usize
    }
}

impl ReplacementPolicy for RandomPolicy {
    fn ways(&self) -> usize {
        self.ways
    }

    /// Access patterns do not affect random replacement.
    fn update(&mut self, _outcome: AccessOutcome) {}

    fn get_victim<E: Evictability + ?Sized>(&mut self, set: &E) -> Result<usize, CacheError> {
        for _ in 0..self.ways {
            let way = self.draw(self.ways);
            if set.is_valid_replacement(way) {
                return Ok(way);
            }
        }

        let candidates = (0..self.ways)
            .filter(|&way| set.is_valid_replacement(way))
            .count();
        if candidates == 0 {
            return Err(exhausted(self.ways));
        }
        let rank = self.draw(candidates);
        (0..self.ways)
            .filter(|&way| set.is_valid_replacement(way))
            .nth(rank)
            .ok_or_else(|| exhausted(self.ways))
    }
}
