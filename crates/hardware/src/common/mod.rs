//! Common types shared across the cache subsystem.
//!
//! This module provides the building blocks used by sets, policies, and the controller:
//! 1. **Constants:** Geometry limits and seed-mixing constants.
//! 2. **Access Outcomes:** How an access is reported back to a replacement policy.
//! 3. **Error Handling:** Configuration errors, policy exhaustion, and contract violations.

/// Geometry and randomness constants.
pub mod constants;

/// Access outcome definitions.
pub mod data;

/// Error types and contract mode.
pub mod error;

pub use constants::{DEFAULT_SEED, MAX_ASSOCIATIVITY, SEED_GAMMA};
pub use data::{AccessKind, AccessOutcome};
pub use error::{CacheError, ConfigError, ContractMode};
