//! Cache Replacement Policies.
//!
//! Implements the algorithms for selecting victim ways in a set-associative cache set.
//!
//! # Policies
//!
//! - `RoundRobin`: Cursor over the ways, oblivious to hits.
//! - `Fifo`: First-In, First-Out by fill order.
//! - `Lru`: Least Recently Used.
//! - `Mru`: Most Recently Used.
//! - `Plru`: Pseudo-LRU (one MRU bit per way).
//! - `Random`: Uniform among evictable ways.
//! - `Nru`: Not Recently Used with second-chance clearing.
//!
//! Every policy consults an [`Evictability`] view before returning a way and never
//! returns a pinned or empty way. Each selection is bounded by O(ways) steps and
//! reports [`CacheError::PolicyExhausted`] when no way can be evicted.

/// First-In, First-Out replacement policy.
pub mod fifo;

/// Least Recently Used replacement policy.
pub mod lru;

/// Most Recently Used replacement policy.
pub mod mru;

/// Not Recently Used replacement policy.
pub mod nru;

/// Pseudo-LRU (MRU bit) replacement policy.
pub mod plru;

/// Random replacement policy.
pub mod random;

/// Round-robin replacement policy.
pub mod round_robin;

pub use fifo::FifoPolicy;
pub use lru::LruPolicy;
pub use mru::MruPolicy;
pub use nru::NruPolicy;
pub use plru::PlruPolicy;
pub use random::RandomPolicy;
pub use round_robin::RoundRobinPolicy;

use crate::common::data::AccessOutcome;
use crate::common::error::CacheError;
use crate::config::PolicyKind;

/// Read-only view of which ways in a set may currently be evicted.
///
/// Implemented by the set's way array. Also implemented for `[bool]` so a policy can
/// be driven directly from a mask.
pub trait Evictability {
    /// Number of ways in the set.
    fn ways(&self) -> usize;

    /// Returns `true` if `way` holds a line that may be evicted right now.
    fn is_valid_replacement(&self, way: usize) -> bool;
}

impl Evictability for [bool] {
    #[inline]
    fn ways(&self) -> usize {
        self.len()
    }

    #[inline]
    fn is_valid_replacement(&self, way: usize) -> bool {
        self.get(way).copied().unwrap_or(false)
    }
}

/// Trait for cache replacement policies.
///
/// Defines the interface for updating usage state and selecting victim ways
/// within a single set.
pub trait ReplacementPolicy: Send + Sync {
    /// Number of ways this policy was built for.
    fn ways(&self) -> usize;

    /// Updates the policy state when a way is hit or filled.
    ///
    /// Callers guarantee `outcome.way < self.ways()`.
    fn update(&mut self, outcome: AccessOutcome);

    /// Selects a victim way among the evictable ways of `set`.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::PolicyExhausted`] if no way is evictable.
    fn get_victim<E: Evictability + ?Sized>(&mut self, set: &E) -> Result<usize, CacheError>;
}

/// Replacement policy selected at configuration time.
///
/// Closed over every supported algorithm so victim selection dispatches with a
/// `match` instead of a virtual call. Each variant carries only its own state.
#[derive(Debug, Clone)]
pub enum Policy {
    /// See [`RoundRobinPolicy`].
    RoundRobin(RoundRobinPolicy),
    /// See [`FifoPolicy`].
    Fifo(FifoPolicy),
    /// See [`LruPolicy`].
    Lru(LruPolicy),
    /// See [`MruPolicy`].
    Mru(MruPolicy),
    /// See [`PlruPolicy`].
    Plru(PlruPolicy),
    /// See [`RandomPolicy`].
    Random(RandomPolicy),
    /// See [`NruPolicy`].
    Nru(NruPolicy),
}

impl Policy {
    /// Identifier of the wrapped algorithm.
    pub const fn kind(&self) -> PolicyKind {
        match self {
            Self::RoundRobin(_) => PolicyKind::RoundRobin,
            Self::Fifo(_) => PolicyKind::Fifo,
            Self::Lru(_) => PolicyKind::Lru,
            Self::Mru(_) => PolicyKind::Mru,
            Self::Plru(_) => PolicyKind::Plru,
            Self::Random(_) => PolicyKind::Random,
            Self::Nru(_) => PolicyKind::Nru,
        }
    }
}

impl ReplacementPolicy for Policy {
    fn ways(&self) -> usize {
        match self {
            Self::RoundRobin(p) => p.ways(),
            Self::Fifo(p) => p.ways(),
            Self::Lru(p) => p.ways(),
            Self::Mru(p) => p.ways(),
            Self::Plru(p) => p.ways(),
            Self::Random(p) => p.ways(),
            Self::Nru(p) => p.ways(),
        }
    }

    #[inline]
    fn update(&mut self, outcome: AccessOutcome) {
        match self {
            Self::RoundRobin(p) => p.update(outcome),
            Self::Fifo(p) => p.update(outcome),
            Self::Lru(p) => p.update(outcome),
            Self::Mru(p) => p.update(outcome),
            Self::Plru(p) => p.update(outcome),
            Self::Random(p) => p.update(outcome),
            Self::Nru(p) => p.update(outcome),
        }
    }

    #[inline]
    fn get_victim<E: Evictability + ?Sized>(&mut self, set: &E) -> Result<usize, CacheError> {
        match self {
            Self::RoundRobin(p) => p.get_victim(set),
            Self::Fifo(p) => p.get_victim(set),
            Self::Lru(p) => p.get_victim(set),
            Self::Mru(p) => p.get_victim(set),
            Self::Plru(p) => p.get_victim(set),
            Self::Random(p) => p.get_victim(set),
            Self::Nru(p) => p.get_victim(set),
        }
    }
}

/// Error for a set of `ways` ways with nothing to evict.
#[inline]
fn exhausted(ways: usize) -> CacheError {
    CacheError::PolicyExhausted {
        associativity: ways,
    }
}

/// Returns the first way in index order that `set` reports as evictable and
/// `accept` admits, scanning at most `ways` entries.
#[inline]
fn first_evictable<E, F>(set: &E, ways: usize, mut accept: F) -> Option<usize>
where
    E: Evictability + ?Sized,
    F: FnMut(usize) -> bool,
{
    (0..ways).find(|&way| set.is_valid_replacement(way) && accept(way))
}
