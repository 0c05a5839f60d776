//! Cache Set Tests.
//!
//! Construction checks, evictability, slot management and out-of-range update
//! handling in lenient and strict contract modes.

use cachesim_core::cache::{CacheSet, EvictedLine, PolicyFactory};
use cachesim_core::common::{AccessOutcome, CacheError, ConfigError, ContractMode};
use cachesim_core::config::{CacheConfig, CacheType, PolicyKind};

use crate::common::harness::{BLOCK, empty_set, init_tracing, occupied_set, touch};

// ──────────────────────────────────────────────────────────
// Construction
// ──────────────────────────────────────────────────────────

#[test]
fn zero_associativity_rejected() {
    let config = CacheConfig {
        ways: 0,
        ..CacheConfig::default()
    };
    assert_eq!(
        CacheSet::from_config(&config, 1).unwrap_err(),
        ConfigError::ZeroAssociativity
    );
}

#[test]
fn non_power_of_two_block_rejected() {
    let config = CacheConfig {
        ways: 4,
        line_bytes: 3,
        ..CacheConfig::default()
    };
    assert_eq!(
        CacheSet::from_config(&config, 1).unwrap_err(),
        ConfigError::BlockSizeNotPowerOfTwo(3)
    );
}

#[test]
fn new_checks_block_size_itself() {
    let policy = PolicyFactory::default()
        .create_kind(PolicyKind::Lru, 4, BLOCK)
        .unwrap();
    assert_eq!(
        CacheSet::new(CacheType::Data, 4, 3, policy).unwrap_err(),
        ConfigError::BlockSizeNotPowerOfTwo(3)
    );
}

#[test]
fn policy_geometry_must_match() {
    let policy = PolicyFactory::default()
        .create_kind(PolicyKind::Nru, 4, BLOCK)
        .unwrap();
    assert_eq!(
        CacheSet::new(CacheType::Unified, 8, BLOCK, policy).unwrap_err(),
        ConfigError::PolicyGeometryMismatch { policy: 4, set: 8 }
    );
}

#[test]
fn from_config_carries_parameters() {
    let config = CacheConfig {
        cache_type: CacheType::Instruction,
        ways: 8,
        line_bytes: 32,
        policy: PolicyKind::Plru,
        contract: ContractMode::Strict,
        ..CacheConfig::default()
    };
    let set = CacheSet::from_config(&config, 3).unwrap();
    assert_eq!(set.associativity(), 8);
    assert_eq!(set.block_size(), 32);
    assert_eq!(set.cache_type(), CacheType::Instruction);
    assert_eq!(set.policy_kind(), PolicyKind::Plru);
    assert_eq!(set.contract(), ContractMode::Strict);
    assert!(!set.is_full());
    assert_eq!(set.ways().count(), 8);
}

// ──────────────────────────────────────────────────────────
// Evictability
// ──────────────────────────────────────────────────────────

#[test]
fn empty_ways_are_not_valid_replacements() {
    let set = empty_set(PolicyKind::Lru, 4);
    assert!((0..4).all(|way| !set.is_valid_replacement(way)));
}

#[test]
fn pinned_ways_are_not_valid_replacements() {
    let mut set = occupied_set(PolicyKind::Lru, 4);
    assert!(set.pin(1));
    assert!(set.is_valid_replacement(0));
    assert!(!set.is_valid_replacement(1));
    assert!(set.unpin(1));
    assert!(set.is_valid_replacement(1));
}

#[test]
fn out_of_range_way_is_not_valid_replacement() {
    let set = occupied_set(PolicyKind::Lru, 4);
    assert!(!set.is_valid_replacement(4));
    assert!(!set.is_valid_replacement(usize::MAX));
}

#[test]
fn pin_requires_resident_line() {
    let mut set = empty_set(PolicyKind::Lru, 2);
    assert!(!set.pin(0));
    assert!(!set.unpin(0));
    assert!(!set.mark_dirty(0));
    assert!(!set.pin(7));
}

// ──────────────────────────────────────────────────────────
// Slot management
// ──────────────────────────────────────────────────────────

#[test]
fn install_fills_free_ways_in_order() {
    let mut set = empty_set(PolicyKind::Lru, 2);
    assert_eq!(set.free_way(), Some(0));
    assert_eq!(set.install(0, 0xAA, false), Ok(None));
    assert_eq!(set.free_way(), Some(1));
    assert_eq!(set.install(1, 0xBB, true), Ok(None));
    assert_eq!(set.free_way(), None);
    assert!(set.is_full());
    assert_eq!(set.find(0xBB), Some(1));
    assert_eq!(set.find(0xCC), None);
    assert_eq!(set.tag(0), Some(0xAA));
}

#[test]
fn install_over_line_returns_victim() {
    let mut set = empty_set(PolicyKind::Lru, 2);
    assert_eq!(set.install(1, 0x10, true), Ok(None));
    assert_eq!(
        set.install(1, 0x20, false),
        Ok(Some(EvictedLine {
            way: 1,
            tag: 0x10,
            dirty: true,
        }))
    );
    assert_eq!(set.tag(1), Some(0x20));
}

#[test]
fn install_clears_pin() {
    let mut set = occupied_set(PolicyKind::Lru, 2);
    assert!(set.pin(0));
    let _ = set.install(0, 0x99, false).unwrap();
    assert!(set.is_valid_replacement(0));
}

#[test]
fn install_out_of_range_is_contract_violation() {
    let mut set = empty_set(PolicyKind::Lru, 2);
    assert_eq!(
        set.install(2, 0, false),
        Err(CacheError::ContractViolation {
            way: 2,
            associativity: 2,
        })
    );
}

#[test]
fn invalidate_frees_way() {
    let mut set = occupied_set(PolicyKind::Lru, 4);
    assert!(set.mark_dirty(2));
    assert_eq!(
        set.invalidate(2),
        Some(EvictedLine {
            way: 2,
            tag: 2,
            dirty: true,
        })
    );
    assert_eq!(set.invalidate(2), None);
    assert_eq!(set.free_way(), Some(2));
    assert_eq!(set.tag(2), None);
}

// ──────────────────────────────────────────────────────────
// Contract handling
// ──────────────────────────────────────────────────────────

#[test]
fn lenient_mode_ignores_out_of_range_update() {
    init_tracing();
    let mut set = occupied_set(PolicyKind::Lru, 4);
    touch(&mut set, &[0, 1, 2, 3]);
    assert_eq!(
        set.update_replacement_index(AccessOutcome::hit(4)),
        Ok(())
    );
    assert_eq!(set.get_replacement_index(), Ok(0));
}

#[test]
fn strict_mode_reports_out_of_range_update() {
    let mut set = occupied_set(PolicyKind::Nru, 4).with_contract(ContractMode::Strict);
    assert_eq!(
        set.update_replacement_index(AccessOutcome::fill(9)),
        Err(CacheError::ContractViolation {
            way: 9,
            associativity: 4,
        })
    );
    assert_eq!(set.get_replacement_index(), Ok(0));
}

#[test]
fn strict_mode_accepts_in_range_update() {
    let mut set = occupied_set(PolicyKind::Lru, 2).with_contract(ContractMode::Strict);
    assert_eq!(set.update_replacement_index(AccessOutcome::hit(0)), Ok(()));
    assert_eq!(set.get_replacement_index(), Ok(1));
}

#[test]
fn update_never_touches_slots() {
    let mut set = occupied_set(PolicyKind::Lru, 4);
    let before: Vec<_> = set.ways().copied().collect();
    touch(&mut set, &[3, 2, 1]);
    let after: Vec<_> = set.ways().copied().collect();
    assert_eq!(before, after);
}
