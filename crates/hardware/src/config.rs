//! Configuration system for the cache simulator.
//!
//! This module defines the configuration structures and enums used to build caches:
//! 1. **Defaults:** Baseline cache geometry and replacement seed.
//! 2. **Enums:** Cache type, replacement policy identifier, contract mode.
//! 3. **Structures:** Per-cache configuration with serde defaults for every field.
//!
//! Configuration is supplied by the embedding simulator, either as a struct or as a
//! JSON document via [`CacheConfig::from_json`].

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::common::constants::{DEFAULT_SEED, MAX_ASSOCIATIVITY};
use crate::common::error::{ConfigError, ContractMode};

/// Default configuration constants for a cache.
mod defaults {
    /// Default cache size in bytes (4 KiB).
    pub const CACHE_SIZE: usize = 4096;

    /// Default cache line size in bytes (64 bytes).
    pub const CACHE_LINE: usize = 64;

    /// Default cache associativity (4 ways).
    pub const CACHE_WAYS: usize = 4;
}

/// Role of the cache in the hierarchy.
///
/// Carried for reporting; replacement behaves identically for every type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum CacheType {
    /// Instruction cache.
    Instruction,
    /// Data cache.
    Data,
    /// Unified instruction and data cache.
    #[default]
    Unified,
}

impl fmt::Display for CacheType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Instruction => "icache",
            Self::Data => "dcache",
            Self::Unified => "unified",
        };
        f.write_str(name)
    }
}

/// Cache replacement policy algorithms.
///
/// Specifies the algorithm used to select which cache line to evict
/// when a new line must be installed in a full cache set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PolicyKind {
    /// Round-robin cursor, oblivious to hits.
    #[serde(alias = "RoundRobin", alias = "rr")]
    RoundRobin,
    /// First In First Out, advanced by fills.
    #[serde(alias = "Fifo")]
    Fifo,
    /// Least Recently Used.
    #[default]
    #[serde(alias = "Lru")]
    Lru,
    /// Most Recently Used.
    ///
    /// Effective for cyclic access patterns larger than the cache.
    #[serde(alias = "Mru")]
    Mru,
    /// Bit pseudo-LRU (one MRU bit per way).
    #[serde(alias = "Plru")]
    Plru,
    /// Uniformly random among evictable ways.
    #[serde(alias = "Random")]
    Random,
    /// Not Recently Used with second-chance bit clearing.
    #[serde(alias = "Nru")]
    Nru,
}

impl PolicyKind {
    /// Every policy, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::RoundRobin,
        Self::Fifo,
        Self::Lru,
        Self::Mru,
        Self::Plru,
        Self::Random,
        Self::Nru,
    ];

    /// Canonical short identifier, accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            Self::RoundRobin => "rr",
            Self::Fifo => "fifo",
            Self::Lru => "lru",
            Self::Mru => "mru",
            Self::Plru => "plru",
            Self::Random => "random",
            Self::Nru => "nru",
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PolicyKind {
    type Err = ConfigError;

    /// Parses a policy identifier, ignoring ASCII case, `-` and `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match key.as_str() {
            "rr" | "roundrobin" => Ok(Self::RoundRobin),
            "fifo" => Ok(Self::Fifo),
            "lru" => Ok(Self::Lru),
            "mru" => Ok(Self::Mru),
            "plru" | "pseudolru" => Ok(Self::Plru),
            "random" | "rand" => Ok(Self::Random),
            "nru" | "notrecentlyused" => Ok(Self::Nru),
            _ => Err(ConfigError::UnknownPolicy(s.to_owned())),
        }
    }
}

/// Checks the per-set geometry shared by sets and policies.
///
/// # Errors
///
/// Returns [`ConfigError`] if `ways` is zero or above [`MAX_ASSOCIATIVITY`], or if
/// `block_size` is not a positive power of two.
pub fn validate_geometry(ways: usize, block_size: usize) -> Result<(), ConfigError> {
    if ways == 0 {
        return Err(ConfigError::ZeroAssociativity);
    }
    if ways > MAX_ASSOCIATIVITY {
        return Err(ConfigError::AssociativityTooLarge {
            ways,
            max: MAX_ASSOCIATIVITY,
        });
    }
    if !block_size.is_power_of_two() {
        return Err(ConfigError::BlockSizeNotPowerOfTwo(block_size));
    }
    Ok(())
}

/// Individual cache configuration.
///
/// # Examples
///
/// ```
/// use cachesim_core::config::{CacheConfig, CacheType, PolicyKind};
///
/// let json = r#"{
///     "cache_type": "Data",
///     "size_bytes": 32768,
///     "line_bytes": 64,
///     "ways": 8,
///     "policy": "Nru",
///     "seed": 42
/// }"#;
///
/// let config = CacheConfig::from_json(json).unwrap();
/// assert_eq!(config.cache_type, CacheType::Data);
/// assert_eq!(config.policy, PolicyKind::Nru);
/// assert_eq!(config.num_sets().unwrap(), 64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CacheConfig {
    /// Role of the cache
    #[serde(default)]
    pub cache_type: CacheType,

    /// Total cache size in bytes
    #[serde(default = "CacheConfig::default_size")]
    pub size_bytes: usize,

    /// Cache line (block) size in bytes
    #[serde(default = "CacheConfig::default_line")]
    pub line_bytes: usize,

    /// Associativity (number of ways)
    #[serde(default = "CacheConfig::default_ways")]
    pub ways: usize,

    /// Replacement policy
    #[serde(default)]
    pub policy: PolicyKind,

    /// Seed for the random policy; each set derives its own stream from it
    #[serde(default = "CacheConfig::default_seed")]
    pub seed: u64,

    /// Handling of out-of-range way reports
    #[serde(default)]
    pub contract: ContractMode,
}

impl CacheConfig {
    /// Returns the default cache size in bytes.
    fn default_size() -> usize {
        defaults::CACHE_SIZE
    }

    /// Returns the default cache line size in bytes.
    fn default_line() -> usize {
        defaults::CACHE_LINE
    }

    /// Returns the default cache associativity (number of ways).
    fn default_ways() -> usize {
        defaults::CACHE_WAYS
    }

    /// Returns the default replacement seed.
    fn default_seed() -> u64 {
        DEFAULT_SEED
    }

    /// Parses a configuration from a JSON document.
    ///
    /// Missing fields take their defaults. Geometry is not validated here; see
    /// [`CacheConfig::num_sets`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the document is malformed or names an
    /// unknown enum variant.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Validates the geometry and returns the number of sets.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the per-set geometry is invalid or `size_bytes`
    /// is not a positive multiple of `line_bytes * ways`.
    pub fn num_sets(&self) -> Result<usize, ConfigError> {
        validate_geometry(self.ways, self.line_bytes)?;
        let set_bytes = self.line_bytes.saturating_mul(self.ways);
        if self.size_bytes == 0 || self.size_bytes % set_bytes != 0 {
            return Err(ConfigError::InvalidCacheSize {
                size_bytes: self.size_bytes,
                set_bytes,
            });
        }
        Ok(self.size_bytes / set_bytes)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            cache_type: CacheType::default(),
            size_bytes: defaults::CACHE_SIZE,
            line_bytes: defaults::CACHE_LINE,
            ways: defaults::CACHE_WAYS,
            policy: PolicyKind::default(),
            seed: DEFAULT_SEED,
            contract: ContractMode::default(),
        }
    }
}
