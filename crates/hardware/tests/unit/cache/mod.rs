//! Tests for the cache replacement core.


/// Set construction, slot management and contract handling.
pub mod cache_set;


/// Reference controller hit/miss and eviction accounting.
pub mod cache_sim;
