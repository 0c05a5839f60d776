//! Set-Associative Cache Simulator.
//!
//! This module implements the replacement core of a set-associative cache and a
//! reference controller that drives it. It models tags and the valid, dirty and
//! pinned bits of each line; line contents and timing belong to the enclosing
//! simulator.
//!
//! On every access the controller tests the addressed set for the tag. A hit is
//! reported to the set's policy. A miss fills a free way if the set has one,
//! otherwise asks the policy for a victim, installs the new tag there and reports
//! the fill.

/// Replacement policy factory.
pub mod factory;

/// Cache replacement policy implementations.
pub mod policies;

/// Cache set: way slots plus attached policy.
pub mod set;

pub use factory::PolicyFactory;
pub use policies::{Evictability, Policy, ReplacementPolicy};
pub use set::{CacheSet, EvictedLine, Way};

use tracing::{debug, warn};

use crate::common::constants::SEED_GAMMA;
use crate::common::data::AccessOutcome;
use crate::common::error::CacheError;
use crate::config::{CacheConfig, CacheType};
use crate::stats::CacheStats;

/// Result of a single cache access.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccessResult {
    /// The line was already resident.
    pub hit: bool,
    /// Set the address maps to.
    pub set: usize,
    /// Way that was hit or filled.
    pub way: usize,
    /// Line displaced by the fill, if the set was full.
    pub evicted: Option<EvictedLine>,
}

/// Cache simulator composed of independent sets, each with its own policy.
#[derive(Debug)]
pub struct CacheSim {
    cache_type: CacheType,
    sets: Vec<CacheSet>,
    line_bytes: usize,
    stats: CacheStats,
}

impl CacheSim {
    /// Creates a cache simulator from `config`.
    ///
    /// Each set receives its own random-policy seed derived from `config.seed`, so
    /// sets never share a generator.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Config`] if the geometry is invalid.
    pub fn new(config: &CacheConfig) -> Result<Self, CacheError> {
        let num_sets = config.num_sets()?;
        let sets = (0..num_sets)
            .map(|index| CacheSet::from_config(config, set_seed(config.seed, index)))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            cache = %config.cache_type,
            policy = %config.policy,
            sets = num_sets,
            ways = config.ways,
            line_bytes = config.line_bytes,
            "cache built"
        );

        Ok(Self {
            cache_type: config.cache_type,
            sets,
            line_bytes: config.line_bytes,
            stats: CacheStats::default(),
        })
    }

    /// Role of the cache.
    pub const fn cache_type(&self) -> CacheType {
        self.cache_type
    }

    /// Number of sets.
    pub fn num_sets(&self) -> usize {
        self.sets.len()
    }

    /// Line size in bytes.
    pub const fn line_bytes(&self) -> usize {
        self.line_bytes
    }

    /// Set at `index`, for inspection.
    pub fn set(&self, index: usize) -> Option<&CacheSet> {
        self.sets.get(index)
    }

    /// Counters accumulated since construction or the last reset.
    pub const fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Clears the counters without touching cache contents.
    pub fn reset_stats(&mut self) {
        self.stats = CacheStats::default();
    }

    /// Splits an address into its set index and tag.
    #[inline]
    pub fn locate(&self, addr: u64) -> (usize, u64) {
        let block = addr / self.line_bytes as u64;
        let sets = self.sets.len() as u64;
        ((block % sets) as usize, block / sets)
    }

    /// Checks if the cache holds the line containing `addr`.
    pub fn contains(&self, addr: u64) -> bool {
        let (index, tag) = self.locate(addr);
        self.sets[index].find(tag).is_some()
    }

    /// Accesses the line containing `addr`.
    ///
    /// On a hit the policy is told about the hit and a write marks the line dirty.
    /// On a miss the line is filled into a free way, or into the victim chosen by
    /// the policy when the set is full.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::PolicyExhausted`] when the set is full and every way
    /// is pinned. The access is counted as a miss and nothing is installed.
    pub fn access(&mut self, addr: u64, is_write: bool) -> Result<AccessResult, CacheError> {
        let (index, tag) = self.locate(addr);
        let set = &mut self.sets[index];
        self.stats.accesses += 1;

        if let Some(way) = set.find(tag) {
            self.stats.hits += 1;
            if is_write {
                let _ = set.mark_dirty(way);
            }
            set.update_replacement_index(AccessOutcome::hit(way))?;
            return Ok(AccessResult {
                hit: true,
                set: index,
                way,
                evicted: None,
            });
        }

        self.stats.misses += 1;
        let way = match set.free_way() {
            Some(way) => way,
            None => set.get_replacement_index().inspect_err(|err| {
                self.stats.exhausted += 1;
                warn!(set = index, addr, %err, "miss could not be filled");
            })?,
        };

        let evicted = set.install(way, tag, is_write)?;
        set.update_replacement_index(AccessOutcome::fill(way))?;
        self.stats.fills += 1;
        if let Some(line) = evicted {
            self.stats.evictions += 1;
            if line.dirty {
                self.stats.writebacks += 1;
            }
        }

        Ok(AccessResult {
            hit: false,
            set: index,
            way,
            evicted,
        })
    }

    /// Pins the line containing `addr`. Returns `false` if it is not resident.
    pub fn pin(&mut self, addr: u64) -> bool {
        let (index, tag) = self.locate(addr);
        let set = &mut self.sets[index];
        set.find(tag).is_some_and(|way| set.pin(way))
    }

    /// Unpins the line containing `addr`. Returns `false` if it is not resident.
    pub fn unpin(&mut self, addr: u64) -> bool {
        let (index, tag) = self.locate(addr);
        let set = &mut self.sets[index];
        set.find(tag).is_some_and(|way| set.unpin(way))
    }

    /// Drops the line containing `addr`, returning it if it was resident.
    ///
    /// A dirty line is counted as written back.
    pub fn invalidate(&mut self, addr: u64) -> Option<EvictedLine> {
        let (index, tag) = self.locate(addr);
        let set = &mut self.sets[index];
        let line = set.find(tag).and_then(|way| set.invalidate(way))?;
        if line.dirty {
            self.stats.writebacks += 1;
        }
        Some(line)
    }

    /// Writes back and invalidates every dirty line.
    ///
    /// Clean lines stay resident. Returns the number of lines written back.
    pub fn flush(&mut self) -> u64 {
        let mut written = 0;
        for set in &mut self.sets {
            for way in 0..set.associativity() {
                if set.way(way).is_some_and(|w| w.valid && w.dirty) {
                    let _ = set.invalidate(way);
                    written += 1;
                }
            }
        }
        self.stats.writebacks += written;
        written
    }
}

/// Seed for the set at `index`, spread so neighbouring sets get unrelated streams.
#[inline]
const fn set_seed(seed: u64, index: usize) -> u64 {
    seed ^ SEED_GAMMA.wrapping_mul(index as u64 + 1)
}
