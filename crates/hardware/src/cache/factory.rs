//! Replacement Policy Factory.
//!
//! Maps a configuration-time policy identifier to a freshly initialised [`Policy`].
//! The factory holds the seed handed to the random policy; every other variant is
//! fully determined by the set geometry.

use std::str::FromStr;

use tracing::debug;

use super::policies::{
    FifoPolicy, LruPolicy, MruPolicy, NruPolicy, PlruPolicy, Policy, RandomPolicy,
    RoundRobinPolicy,
};
use crate::common::constants::DEFAULT_SEED;
use crate::common::error::ConfigError;
use crate::config::{PolicyKind, validate_geometry};

/// Builds replacement policies from identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolicyFactory {
    seed: u64,
}

impl Default for PolicyFactory {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl PolicyFactory {
    /// Creates a factory whose random policies start from `seed`.
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed handed to random policies.
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Creates the policy named by `policy_id` for a set of the given geometry.
    ///
    /// # Arguments
    ///
    /// * `policy_id` - Policy identifier such as `"lru"`, `"rr"` or `"NRU"`
    /// * `associativity` - Number of ways in the set
    /// * `block_size` - Line size in bytes
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownPolicy`] for an unrecognised identifier, or a
    /// geometry error if `associativity` or `block_size` is invalid.
    pub fn create(
        &self,
        policy_id: &str,
        associativity: usize,
        block_size: usize,
    ) -> Result<Policy, ConfigError> {
        let kind = PolicyKind::from_str(policy_id)?;
        self.create_kind(kind, associativity, block_size)
    }

    /// Creates a policy of a known kind for a set of the given geometry.
    ///
    /// # Errors
    ///
    /// Returns a geometry error if `associativity` is zero or too large, or if
    /// `block_size` is not a positive power of two.
    pub fn create_kind(
        &self,
        kind: PolicyKind,
        associativity: usize,
        block_size: usize,
    ) -> Result<Policy, ConfigError> {
        validate_geometry(associativity, block_size)?;
        let ways = associativity;
        let policy = match kind {
            PolicyKind::RoundRobin => Policy::RoundRobin(RoundRobinPolicy::new(ways)),
            PolicyKind::Fifo => Policy::Fifo(FifoPolicy::new(ways)),
            PolicyKind::Lru => Policy::Lru(LruPolicy::new(ways)),
            PolicyKind::Mru => Policy::Mru(MruPolicy::new(ways)),
            PolicyKind::Plru => Policy::Plru(PlruPolicy::new(ways)),
            PolicyKind::Random => Policy::Random(RandomPolicy::new(ways, self.seed)),
            PolicyKind::Nru => Policy::Nru(NruPolicy::new(ways)),
        };
        debug!(policy = %kind, ways, block_size, "replacement policy created");
        Ok(policy)
    }
}
