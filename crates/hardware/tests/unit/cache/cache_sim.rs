//! Cache Simulator (CacheSim) Unit Tests.
//!
//! Verifies the reference controller: hit/miss detection, fills into free ways,
//! victim selection through the set's policy, write-backs, pinning and
//! statistics.

use cachesim_core::cache::{CacheSim, EvictedLine};
use cachesim_core::common::{CacheError, ConfigError};
use cachesim_core::config::{CacheConfig, CacheType, PolicyKind};

use crate::common::harness::init_tracing;

// ──────────────────────────────────────────────────────────
// Helper: build a small test cache
// ──────────────────────────────────────────────────────────

/// 256 bytes, 64-byte lines, 2-way, LRU.
///
/// With these parameters:
///   - num_sets  = 256 / (64 * 2) = 2
///   - set index = (addr / 64) % 2
///   - tag       = addr / 128
///
/// Addresses 0x000, 0x080, 0x100, 0x180 all map to set 0 with tags 0..=3.
fn test_config(policy: PolicyKind) -> CacheConfig {
    CacheConfig {
        cache_type: CacheType::Data,
        size_bytes: 256,
        line_bytes: 64,
        ways: 2,
        policy,
        ..CacheConfig::default()
    }
}

fn lru_cache() -> CacheSim {
    CacheSim::new(&test_config(PolicyKind::Lru)).unwrap()
}

const A: u64 = 0x000;
const B: u64 = 0x080;
const C: u64 = 0x100;
const D: u64 = 0x180;

// ══════════════════════════════════════════════════════════
// 1. Geometry
// ══════════════════════════════════════════════════════════

#[test]
fn geometry_from_config() {
    let cache = lru_cache();
    assert_eq!(cache.num_sets(), 2);
    assert_eq!(cache.line_bytes(), 64);
    assert_eq!(cache.cache_type(), CacheType::Data);
    assert_eq!(cache.locate(A), (0, 0));
    assert_eq!(cache.locate(0x40), (1, 0));
    assert_eq!(cache.locate(D + 0x3F), (0, 3));
    assert!(cache.set(1).is_some());
    assert!(cache.set(2).is_none());
}

#[test]
fn invalid_size_rejected() {
    let config = CacheConfig {
        size_bytes: 200,
        ..test_config(PolicyKind::Lru)
    };
    assert_eq!(
        CacheSim::new(&config).unwrap_err(),
        CacheError::Config(ConfigError::InvalidCacheSize {
            size_bytes: 200,
            set_bytes: 128,
        })
    );
}

#[test]
fn zero_ways_rejected() {
    let config = CacheConfig {
        ways: 0,
        ..test_config(PolicyKind::Lru)
    };
    assert_eq!(
        CacheSim::new(&config).unwrap_err(),
        CacheError::Config(ConfigError::ZeroAssociativity)
    );
}

// ══════════════════════════════════════════════════════════
// 2. Hits and misses
// ══════════════════════════════════════════════════════════

#[test]
fn cold_miss_then_hit() {
    let mut cache = lru_cache();
    let first = cache.access(A, false).unwrap();
    assert!(!first.hit);
    assert_eq!(first.set, 0);
    assert_eq!(first.way, 0);
    assert_eq!(first.evicted, None);

    let second = cache.access(A + 8, false).unwrap();
    assert!(second.hit);
    assert_eq!(second.way, 0);
    assert!(cache.contains(A));
}

#[test]
fn sets_are_independent() {
    let mut cache = lru_cache();
    let _ = cache.access(A, false).unwrap();
    let other = cache.access(0x40, false).unwrap();
    assert_eq!(other.set, 1);
    assert_eq!(other.way, 0);
}

#[test]
fn lru_evicts_least_recent_line() {
    let mut cache = lru_cache();
    let _ = cache.access(A, false).unwrap();
    let _ = cache.access(B, false).unwrap();
    let _ = cache.access(A, false).unwrap();

    let result = cache.access(C, false).unwrap();
    assert!(!result.hit);
    assert_eq!(
        result.evicted,
        Some(EvictedLine {
            way: 1,
            tag: 1,
            dirty: false,
        })
    );
    assert!(cache.contains(A));
    assert!(!cache.contains(B));
    assert!(cache.contains(C));
}

#[test]
fn round_robin_ignores_hits() {
    let mut cache = CacheSim::new(&test_config(PolicyKind::RoundRobin)).unwrap();
    let _ = cache.access(A, false).unwrap();
    let _ = cache.access(B, false).unwrap();
    let _ = cache.access(A, false).unwrap();

    let result = cache.access(C, false).unwrap();
    assert_eq!(result.way, 0);
    assert!(!cache.contains(A));
    assert!(cache.contains(B));
}

// ══════════════════════════════════════════════════════════
// 3. Write-back
// ══════════════════════════════════════════════════════════

#[test]
fn dirty_victim_counts_writeback() {
    let mut cache = lru_cache();
    let _ = cache.access(A, true).unwrap();
    let _ = cache.access(B, false).unwrap();
    let result = cache.access(C, false).unwrap();

    assert_eq!(result.evicted.map(|line| line.dirty), Some(true));
    assert_eq!(cache.stats().writebacks, 1);
    assert_eq!(cache.stats().evictions, 1);
}

#[test]
fn write_hit_marks_dirty() {
    let mut cache = lru_cache();
    let _ = cache.access(A, false).unwrap();
    let _ = cache.access(A, true).unwrap();
    let _ = cache.access(B, false).unwrap();
    let result = cache.access(C, false).unwrap();
    assert_eq!(result.evicted.map(|line| (line.tag, line.dirty)), Some((0, true)));
}

#[test]
fn flush_writes_back_dirty_lines_only() {
    let mut cache = lru_cache();
    let _ = cache.access(A, true).unwrap();
    let _ = cache.access(B, false).unwrap();
    let _ = cache.access(0x40, true).unwrap();

    assert_eq!(cache.flush(), 2);
    assert!(!cache.contains(A));
    assert!(cache.contains(B));
    assert!(!cache.contains(0x40));
    assert_eq!(cache.stats().writebacks, 2);
    assert_eq!(cache.flush(), 0);
}

#[test]
fn invalidate_returns_line() {
    let mut cache = lru_cache();
    let _ = cache.access(B, true).unwrap();
    assert_eq!(
        cache.invalidate(B),
        Some(EvictedLine {
            way: 0,
            tag: 1,
            dirty: true,
        })
    );
    assert_eq!(cache.invalidate(B), None);
    assert_eq!(cache.stats().writebacks, 1);
}

// ══════════════════════════════════════════════════════════
// 4. Pinning
// ══════════════════════════════════════════════════════════

#[test]
fn pinned_line_survives_eviction() {
    let mut cache = lru_cache();
    let _ = cache.access(A, false).unwrap();
    let _ = cache.access(B, false).unwrap();
    assert!(cache.pin(A));

    let result = cache.access(C, false).unwrap();
    assert_eq!(result.evicted.map(|line| line.tag), Some(1));
    assert!(cache.contains(A));
}

#[test]
fn fully_pinned_set_reports_exhaustion() {
    init_tracing();
    let mut cache = lru_cache();
    let _ = cache.access(A, false).unwrap();
    let _ = cache.access(B, false).unwrap();
    assert!(cache.pin(A));
    assert!(cache.pin(B));

    assert_eq!(
        cache.access(C, false),
        Err(CacheError::PolicyExhausted { associativity: 2 })
    );
    assert!(!cache.contains(C));
    assert_eq!(cache.stats().exhausted, 1);
    assert_eq!(cache.stats().misses, 1 + 2);

    assert!(cache.unpin(A));
    let result = cache.access(C, false).unwrap();
    assert_eq!(result.evicted.map(|line| line.tag), Some(0));
}

#[test]
fn pin_absent_line_fails() {
    let mut cache = lru_cache();
    assert!(!cache.pin(A));
    assert!(!cache.unpin(A));
}

#[test]
fn pinned_set_still_hits() {
    let mut cache = lru_cache();
    let _ = cache.access(A, false).unwrap();
    let _ = cache.access(B, false).unwrap();
    assert!(cache.pin(A));
    assert!(cache.pin(B));
    assert!(cache.access(A, false).unwrap().hit);
    assert!(cache.access(D, false).is_err());
}

// ══════════════════════════════════════════════════════════
// 5. Statistics and reproducibility
// ══════════════════════════════════════════════════════════

#[test]
fn stats_track_outcomes() {
    let mut cache = lru_cache();
    for addr in [A, B, A, C, A, D] {
        let _ = cache.access(addr, false).unwrap();
    }
    let stats = *cache.stats();
    assert_eq!(stats.accesses, 6);
    assert_eq!(stats.hits, 2);
    assert_eq!(stats.misses, 4);
    assert_eq!(stats.fills, 4);
    assert_eq!(stats.evictions, 2);
    assert!((stats.hit_rate() - 2.0 / 6.0).abs() < 1e-12);

    cache.reset_stats();
    assert_eq!(cache.stats().accesses, 0);
    assert!(cache.contains(A));
}

#[test]
fn random_cache_is_reproducible() {
    let config = CacheConfig {
        size_bytes: 1024,
        ways: 4,
        policy: PolicyKind::Random,
        seed: 1234,
        ..test_config(PolicyKind::Random)
    };
    let trace: Vec<u64> = (0..512u64).map(|i| (i * 0x2C0) % 0x4000).collect();

    let run = |config: &CacheConfig| {
        let mut cache = CacheSim::new(config).unwrap();
        trace
            .iter()
            .map(|&addr| cache.access(addr, addr % 3 == 0).unwrap())
            .collect::<Vec<_>>()
    };
    assert_eq!(run(&config), run(&config));
}

#[test]
fn sets_get_distinct_random_streams() {
    let config = CacheConfig {
        size_bytes: 512,
        ways: 4,
        ..test_config(PolicyKind::Random)
    };
    let mut cache = CacheSim::new(&config).unwrap();
    // Set 0 and set 1 see the same tag sequence.
    let mut ways = [Vec::new(), Vec::new()];
    for tag in 0..64u64 {
        for (set, picks) in ways.iter_mut().enumerate() {
            let addr = (tag * 2 + set as u64) * 64;
            picks.push(cache.access(addr, false).unwrap().way);
        }
    }
    assert_ne!(ways[0], ways[1]);
}
