//! # Removal Shortcut Registry
//!
//! Reverse index: for each entity, which pools currently hold a component
//! for it. Destroying an entity then visits exactly those pools instead of
//! every registered pool.
//!
//! The [`World`](super::World) owns the registry and lends it to pools for the
//! duration of an add or remove, so there is exactly one mutable path to it.

use std::fmt;

use smallvec::SmallVec;

use super::entity::Entity;
use crate::contract;
use crate::error::ContractViolation;

/// Identity of a component pool inside a world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct PoolId(u32);

impl PoolId {
    /// Wraps a raw pool index.
    ///
    /// # Panics
    ///
    /// Panics if `index` does not fit in a `u32`.
    #[inline]
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        match u32::try_from(index) {
            Ok(raw) => Self(raw),
            Err(_) => panic!("pool index {index} exceeds u32::MAX"),
        }
    }

    /// Index into the owning world's pool list.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pool{}", self.0)
    }
}

/// Pools holding one entity; rarely more than a handful.
pub type PoolList = SmallVec<[PoolId; 4]>;

/// Entity → pools holding a component for it.
#[derive(Clone, Debug, Default)]
pub struct RemovalRegistry {
    holders: Vec<PoolList>,
}

impl RemovalRegistry {
    /// Creates a registry with entries preallocated for ids `[0, entities)`.
    #[must_use]
    pub fn with_capacity(entities: usize) -> Self {
        let mut holders = Vec::with_capacity(entities);
        holders.resize_with(entities, PoolList::new);
        Self { holders }
    }

    /// Number of entity entries allocated.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.holders.len()
    }

    /// Whether no entry is allocated.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.holders.is_empty()
    }

    /// Makes sure `entity` has an entry.
    #[inline]
    pub fn ensure_covers(&mut self, entity: Entity) {
        let needed = entity.index() + 1;
        if self.holders.len() < needed {
            self.holders.resize_with(needed, PoolList::new);
        }
    }

    /// Whether `pool` is recorded for `entity`.
    #[inline]
    #[must_use]
    pub fn contains(&self, entity: Entity, pool: PoolId) -> bool {
        self.entries_for(entity).contains(&pool)
    }

    /// Records that `pool` now holds a component for `entity`.
    ///
    /// # Panics
    ///
    /// Contract violation if `pool` is already recorded for `entity`.
    pub fn register(&mut self, entity: Entity, pool: PoolId) {
        contract!(
            !self.contains(entity, pool),
            ContractViolation::DuplicateRegistration { entity, pool }
        );
        self.ensure_covers(entity);
        self.holders[entity.index()].push(pool);
    }

    /// Forgets that `pool` holds a component for `entity`, keeping the order
    /// of the remaining entries.
    ///
    /// # Panics
    ///
    /// Contract violation if `pool` is not recorded for `entity`.
    pub fn unregister(&mut self, entity: Entity, pool: PoolId) {
        let position = self
            .holders
            .get(entity.index())
            .and_then(|pools| pools.iter().position(|&p| p == pool));
        match position {
            Some(position) => {
                self.holders[entity.index()].remove(position);
            }
            None => contract!(false, ContractViolation::MissingRegistration { entity, pool }),
        }
    }

    /// Pools currently holding `entity`, in registration order.
    #[inline]
    #[must_use]
    pub fn entries_for(&self, entity: Entity) -> &[PoolId] {
        match self.holders.get(entity.index()) {
            Some(pools) => pools.as_slice(),
            None => &[],
        }
    }

    /// Empties the entry for `entity`, keeping its allocation.
    #[inline]
    pub fn clear(&mut self, entity: Entity) {
        if let Some(pools) = self.holders.get_mut(entity.index()) {
            pools.clear();
        }
    }

    /// Empties every entry.
    pub fn clear_all(&mut self) {
        for pools in &mut self.holders {
            pools.clear();
        }
    }
}
