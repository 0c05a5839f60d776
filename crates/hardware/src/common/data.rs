//! Access Outcome Types.
//!
//! This module defines how the controller reports an access back to a replacement policy.
//! These types are used for the following:
//! 1. **Recency Tracking:** LRU, MRU, PLRU and NRU record every touched way.
//! 2. **Insertion Tracking:** FIFO advances only when a new line is installed.

/// Kind of access being reported to a replacement policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessKind {
    /// The requested tag was already resident in the way.
    Hit,

    /// A new line was installed in the way after a miss.
    Fill,
}

/// The way touched by the most recent access to a set.
///
/// Passed to [`CacheSet::update_replacement_index`](crate::cache::CacheSet::update_replacement_index)
/// and not retained beyond the call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccessOutcome {
    /// Way index within the set.
    pub way: usize,
    /// Whether the way was hit or freshly filled.
    pub kind: AccessKind,
}

impl AccessOutcome {
    /// Reports a hit on `way`.
    #[inline]
    pub const fn hit(way: usize) -> Self {
        Self {
            way,
            kind: AccessKind::Hit,
        }
    }

    /// Reports that a new line was installed in `way`.
    #[inline]
    pub const fn fill(way: usize) -> Self {
        Self {
            way,
            kind: AccessKind::Fill,
        }
    }
}
