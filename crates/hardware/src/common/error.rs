//! Configuration and replacement error definitions.
//!
//! This module defines the error taxonomy for the cache subsystem. It provides:
//! 1. **Configuration errors:** Invalid geometry or unknown policy identifiers, raised
//!    while a cache is being built. These are fatal to the build.
//! 2. **Runtime errors:** Policy exhaustion (no evictable way) and contract violations
//!    (out-of-range way reported by the controller).
//! 3. **Contract mode:** Selects whether contract violations are logged or surfaced.

use serde::Deserialize;
use thiserror::Error;

/// Invalid construction parameters for a cache, set, or policy.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A set must have at least one way.
    #[error("associativity must be at least 1")]
    ZeroAssociativity,

    /// Per-way bit vectors are stored in a single machine word.
    #[error("associativity {ways} exceeds the maximum of {max}")]
    AssociativityTooLarge {
        /// Requested number of ways.
        ways: usize,
        /// Largest supported associativity.
        max: usize,
    },

    /// Block (line) size must be a positive power of two.
    #[error("block size {0} is not a positive power of two")]
    BlockSizeNotPowerOfTwo(usize),

    /// The policy identifier did not match any known policy.
    #[error("unknown policy `{0}`")]
    UnknownPolicy(String),

    /// A policy was attached to a set with a different number of ways.
    #[error("policy built for {policy} ways attached to a {set}-way set")]
    PolicyGeometryMismatch {
        /// Associativity the policy was built for.
        policy: usize,
        /// Associativity of the receiving set.
        set: usize,
    },

    /// Total size does not divide into a whole, non-zero number of sets.
    #[error("cache size {size_bytes} is not a positive multiple of {set_bytes} bytes per set")]
    InvalidCacheSize {
        /// Configured capacity in bytes.
        size_bytes: usize,
        /// Bytes covered by one set (`line_bytes * ways`).
        set_bytes: usize,
    },

    /// The configuration document could not be parsed.
    #[error("malformed cache configuration: {0}")]
    Parse(String),
}

/// Errors surfaced by cache sets and the cache controller.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CacheError {
    /// The cache could not be built.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// No way in the set is currently a legal eviction target.
    ///
    /// Recoverable: the caller may retry once a pinned way is released.
    #[error("no evictable way among {associativity} ways")]
    PolicyExhausted {
        /// Associativity of the exhausted set.
        associativity: usize,
    },

    /// The controller reported an access to a way outside the set.
    #[error("way {way} is out of range for a {associativity}-way set")]
    ContractViolation {
        /// Offending way index.
        way: usize,
        /// Associativity of the set.
        associativity: usize,
    },
}

/// Handling of out-of-range way indices passed to
/// [`CacheSet::update_replacement_index`](crate::cache::CacheSet::update_replacement_index).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum ContractMode {
    /// Log the violation and continue.
    #[default]
    Lenient,
    /// Return [`CacheError::ContractViolation`] to the caller.
    Strict,
}
