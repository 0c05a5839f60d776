//! Cache Set.
//!
//! A single set of a set-associative cache: a fixed array of way slots plus the
//! replacement policy attached to it. The set answers which ways may be evicted,
//! asks its policy for a victim, and forwards access outcomes to the policy.
//!
//! Slots are allocated once at construction and indexed directly; nothing on the
//! access path allocates.

use tracing::{trace, warn};

use super::factory::PolicyFactory;
use super::policies::{Evictability, Policy, ReplacementPolicy};
use crate::common::data::AccessOutcome;
use crate::common::error::{CacheError, ConfigError, ContractMode};
use crate::config::{CacheConfig, CacheType, PolicyKind, validate_geometry};

/// State of one way: tag plus valid, dirty and pinned bits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Way {
    /// Address-derived tag of the resident line.
    pub tag: u64,
    /// The way holds a live line.
    pub valid: bool,
    /// The resident line was written since it was installed.
    pub dirty: bool,
    /// The controller has locked the line in place.
    pub pinned: bool,
}

impl Way {
    /// A way may be evicted when it holds a line that is not pinned.
    #[inline]
    pub const fn is_evictable(&self) -> bool {
        self.valid && !self.pinned
    }
}

/// Line removed from a way by an install or invalidation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EvictedLine {
    /// Way the line occupied.
    pub way: usize,
    /// Tag of the removed line.
    pub tag: u64,
    /// The line must be written back.
    pub dirty: bool,
}

/// Fixed array of way slots owned by a set.
#[derive(Clone, Debug)]
struct WaySlots(Vec<Way>);

impl Evictability for WaySlots {
    #[inline]
    fn ways(&self) -> usize {
        self.0.len()
    }

    #[inline]
    fn is_valid_replacement(&self, way: usize) -> bool {
        self.0.get(way).is_some_and(Way::is_evictable)
    }
}

/// One set of a set-associative cache with its replacement policy.
#[derive(Clone, Debug)]
pub struct CacheSet {
    cache_type: CacheType,
    block_size: usize,
    slots: WaySlots,
    policy: Policy,
    contract: ContractMode,
}

impl CacheSet {
    /// Creates an empty set with `policy` attached.
    ///
    /// # Arguments
    ///
    /// * `cache_type` - Role of the enclosing cache
    /// * `associativity` - Number of ways
    /// * `block_size` - Line size in bytes, a power of two
    /// * `policy` - Replacement policy built for `associativity` ways
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for invalid geometry or if `policy` was built for a
    /// different number of ways.
    pub fn new(
        cache_type: CacheType,
        associativity: usize,
        block_size: usize,
        policy: Policy,
    ) -> Result<Self, ConfigError> {
        validate_geometry(associativity, block_size)?;
        if policy.ways() != associativity {
            return Err(ConfigError::PolicyGeometryMismatch {
                policy: policy.ways(),
                set: associativity,
            });
        }
        Ok(Self {
            cache_type,
            block_size,
            slots: WaySlots(vec![Way::default(); associativity]),
            policy,
            contract: ContractMode::default(),
        })
    }

    /// Builds a set and its policy from a cache configuration.
    ///
    /// `seed` is the random-policy seed for this particular set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configured geometry is invalid.
    pub fn from_config(config: &CacheConfig, seed: u64) -> Result<Self, ConfigError> {
        let policy =
            PolicyFactory::new(seed).create_kind(config.policy, config.ways, config.line_bytes)?;
        Ok(Self::new(config.cache_type, config.ways, config.line_bytes, policy)?
            .with_contract(config.contract))
    }

    /// Sets how out-of-range way reports are handled.
    #[must_use]
    pub fn with_contract(mut self, contract: ContractMode) -> Self {
        self.contract = contract;
        self
    }

    /// Number of ways.
    #[inline]
    pub fn associativity(&self) -> usize {
        self.slots.ways()
    }

    /// Line size in bytes.
    pub const fn block_size(&self) -> usize {
        self.block_size
    }

    /// Role of the enclosing cache.
    pub const fn cache_type(&self) -> CacheType {
        self.cache_type
    }

    /// Identifier of the attached policy.
    pub const fn policy_kind(&self) -> PolicyKind {
        self.policy.kind()
    }

    /// Attached policy, for inspection.
    pub const fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Contract mode in effect.
    pub const fn contract(&self) -> ContractMode {
        self.contract
    }

    /// Slot state of `way`, or `None` if out of range.
    pub fn way(&self, way: usize) -> Option<&Way> {
        self.slots.0.get(way)
    }

    /// Returns `true` if `way` currently holds a line that may be evicted.
    ///
    /// Empty, pinned and out-of-range ways are not valid replacements.
    #[inline]
    pub fn is_valid_replacement(&self, way: usize) -> bool {
        self.slots.is_valid_replacement(way)
    }

    /// Asks the policy for the way to evict.
    ///
    /// The returned index is always below [`associativity`](Self::associativity)
    /// and refers to an evictable way.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::PolicyExhausted`] if no way is evictable.
    #[inline]
    pub fn get_replacement_index(&mut self) -> Result<usize, CacheError> {
        let way = self.policy.get_victim(&self.slots)?;
        trace!(way, policy = %self.policy.kind(), "victim selected");
        Ok(way)
    }

    /// Reports that `outcome.way` was just hit or filled.
    ///
    /// Only policy state changes; slot contents are untouched.
    ///
    /// # Errors
    ///
    /// In [`ContractMode::Strict`], returns [`CacheError::ContractViolation`] when
    /// the way is out of range. In lenient mode the violation is logged and
    /// ignored. The policy is left unchanged either way.
    #[inline]
    pub fn update_replacement_index(&mut self, outcome: AccessOutcome) -> Result<(), CacheError> {
        let associativity = self.associativity();
        if outcome.way >= associativity {
            let err = CacheError::ContractViolation {
                way: outcome.way,
                associativity,
            };
            return match self.contract {
                ContractMode::Lenient => {
                    warn!(%err, "ignoring replacement update");
                    Ok(())
                }
                ContractMode::Strict => Err(err),
            };
        }
        self.policy.update(outcome);
        Ok(())
    }

    /// Way holding a valid line with `tag`, if any.
    #[inline]
    pub fn find(&self, tag: u64) -> Option<usize> {
        self.slots.0.iter().position(|w| w.valid && w.tag == tag)
    }

    /// First way that holds no line, if any.
    #[inline]
    pub fn free_way(&self) -> Option<usize> {
        self.slots.0.iter().position(|w| !w.valid)
    }

    /// Returns `true` when every way holds a line.
    pub fn is_full(&self) -> bool {
        self.slots.0.iter().all(|w| w.valid)
    }

    /// Tag resident in `way`, or `None` if the way is empty or out of range.
    pub fn tag(&self, way: usize) -> Option<u64> {
        self.way(way).filter(|w| w.valid).map(|w| w.tag)
    }

    /// Installs `tag` in `way`, returning the line it replaced.
    ///
    /// The new line starts unpinned. The policy is not notified; report the fill
    /// through [`update_replacement_index`](Self::update_replacement_index).
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ContractViolation`] if `way` is out of range.
    pub fn install(
        &mut self,
        way: usize,
        tag: u64,
        dirty: bool,
    ) -> Result<Option<EvictedLine>, CacheError> {
        let associativity = self.associativity();
        let slot = self
            .slots
            .0
            .get_mut(way)
            .ok_or(CacheError::ContractViolation { way, associativity })?;
        let evicted = slot.valid.then_some(EvictedLine {
            way,
            tag: slot.tag,
            dirty: slot.dirty,
        });
        *slot = Way {
            tag,
            valid: true,
            dirty,
            pinned: false,
        };
        Ok(evicted)
    }

    /// Marks the line in `way` as written. Returns `false` if the way is empty.
    pub fn mark_dirty(&mut self, way: usize) -> bool {
        self.set_flag(way, |w| w.dirty = true)
    }

    /// Locks the line in `way` against eviction. Returns `false` if the way is empty.
    pub fn pin(&mut self, way: usize) -> bool {
        self.set_flag(way, |w| w.pinned = true)
    }

    /// Releases a pinned line. Returns `false` if the way is empty.
    pub fn unpin(&mut self, way: usize) -> bool {
        self.set_flag(way, |w| w.pinned = false)
    }

    /// Drops the line in `way`, returning it if one was resident.
    pub fn invalidate(&mut self, way: usize) -> Option<EvictedLine> {
        let slot = self.slots.0.get_mut(way).filter(|w| w.valid)?;
        let evicted = EvictedLine {
            way,
            tag: slot.tag,
            dirty: slot.dirty,
        };
        *slot = Way::default();
        Some(evicted)
    }

    /// Iterates over every way slot in index order.
    pub fn ways(&self) -> impl Iterator<Item = &Way> {
        self.slots.0.iter()
    }

    fn set_flag(&mut self, way: usize, apply: impl FnOnce(&mut Way)) -> bool {
        match self.slots.0.get_mut(way) {
            Some(slot) if slot.valid => {
                apply(slot);
                true
            }
            _ => false,
        }
    }
}
