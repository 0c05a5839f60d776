//! Set-associative cache replacement library.
//!
//! This crate implements the replacement-policy core of a cache simulator:
//! 1. **Sets:** Per-way tag, valid, dirty and pinned state with evictability queries.
//! 2. **Policies:** Round robin, FIFO, LRU, MRU, PLRU, random and NRU victim selection.
//! 3. **Factory:** Mapping configuration identifiers to policies.
//! 4. **Controller:** A reference cache that maps addresses to sets and drives them.
//! 5. **Configuration and statistics:** Serde-backed config and access counters.

/// Common types (access outcomes, constants, errors).
pub mod common;
/// Cache configuration (defaults, policy identifiers, geometry validation).
pub mod config;
/// Cache sets, replacement policies, factory and the reference controller.
pub mod cache;
/// Cache statistics collection and reporting.
pub mod stats;

/// Cache configuration; use `CacheConfig::default()` or parse from JSON.
pub use crate::config::{CacheConfig, PolicyKind};
/// Reference controller and the per-set replacement core.
pub use crate::cache::{CacheSet, CacheSim, PolicyFactory};
/// Error taxonomy.
pub use crate::common::{CacheError, ConfigError};
