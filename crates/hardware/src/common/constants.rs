//! Global Cache Constants.
//!
//! This module defines constants shared by cache sets, policies, and the controller:
//! 1. **Geometry Limits:** Bounds on associativity imposed by per-way bit vectors.
//! 2. **Randomness:** Seed mixing for per-set pseudo-random generators.

/// Largest supported associativity.
///
/// NRU and PLRU keep one bit per way in a `u64`.
pub const MAX_ASSOCIATIVITY: usize = 64;

/// Odd 64-bit constant (2^64 / phi) used to spread per-set seeds.
pub const SEED_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

/// Replacement seed used when none is configured.
pub const DEFAULT_SEED: u64 = 0x2545_F491_4F6C_DD1D;
