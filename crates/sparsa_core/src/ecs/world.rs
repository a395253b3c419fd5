//! # ECS World
//!
//! Owns the entity lifecycle and every component pool.
//!
//! - Ids come from a FIFO free list first, otherwise from a monotonic counter
//! - Id 0 is the null entity: issued at construction, never valid
//! - Destroy visits only the pools the removal registry lists for the entity

use std::any::{type_name, TypeId};
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::fmt;
use std::ops::Deref;

use super::annotations::{EntityAnnotations, WorldId};
use super::component::{Component, DefaultFill, SlotFill};
use super::entity::Entity;
use super::registry::{PoolId, RemovalRegistry};
use super::storage::{ComponentPool, ErasedPool, PoolDump};
use crate::config::WorldConfig;
use crate::contract;
use crate::diagnostics::violated;
use crate::error::ContractViolation;

/// Name given to every entity when annotations are enabled.
const DEFAULT_ENTITY_NAME: &str = "entity";

/// The entity/component container.
///
/// # Example
///
/// ```rust,ignore
/// let mut world = World::default();
/// world.register_pool::<Position>();
///
/// let entity = world.create_entity();
/// world.insert(entity, Position::new(1.0, 2.0, 3.0));
/// world.get_mut::<Position>(entity).x += 1.0;
///
/// world.destroy(entity);
/// assert!(!world.is_valid(entity));
/// ```
pub struct World {
    id: WorldId,
    config: WorldConfig,
    /// One flag per issued id.
    validity: Vec<bool>,
    /// Destroyed ids, reissued oldest first.
    free_ids: VecDeque<Entity>,
    /// Number of `true` flags.
    alive_count: usize,
    /// Pools indexed by [`PoolId`].
    pools: Vec<Box<dyn ErasedPool>>,
    pool_ids: HashMap<TypeId, PoolId>,
    registry: RemovalRegistry,
    annotations: EntityAnnotations,
    null: Entity,
}

impl World {
    /// Creates a world with the given capacities and issues the null entity.
    #[must_use]
    pub fn new(config: WorldConfig) -> Self {
        let mut world = Self {
            id: WorldId::next(),
            validity: Vec::with_capacity(config.entities_capacity),
            free_ids: VecDeque::new(),
            alive_count: 0,
            pools: Vec::with_capacity(config.pools_capacity),
            pool_ids: HashMap::with_capacity(config.groups_capacity),
            registry: RemovalRegistry::with_capacity(config.entities_capacity),
            annotations: EntityAnnotations::new(),
            null: Entity::NULL,
            config,
        };
        world.null = world.create_null();
        world
    }

    /// This world's identity.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> WorldId {
        self.id
    }

    /// The configuration this world was built from.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// The reserved null entity.
    #[inline]
    #[must_use]
    pub const fn null_entity(&self) -> Entity {
        self.null
    }

    /// Number of valid entities.
    #[inline]
    #[must_use]
    pub const fn alive_count(&self) -> usize {
        self.alive_count
    }

    /// Number of ids ever issued, valid or not, including the null entity.
    #[inline]
    #[must_use]
    pub fn issued_count(&self) -> usize {
        self.validity.len()
    }

    /// The removal registry.
    #[inline]
    #[must_use]
    pub const fn registry(&self) -> &RemovalRegistry {
        &self.registry
    }

    // =========================================================================
    // Entity Lifecycle
    // =========================================================================

    /// Issues an entity, recycling the oldest destroyed id if there is one.
    ///
    /// # Panics
    ///
    /// Panics if the `u32` id space is exhausted.
    pub fn create_entity(&mut self) -> Entity {
        let entity = match self.free_ids.pop_front() {
            Some(entity) => {
                contract!(
                    !self.validity[entity.index()],
                    ContractViolation::EntityAlreadyValid(entity)
                );
                self.validity[entity.index()] = true;
                entity
            }
            None => {
                let next = self.validity.len();
                let Ok(id) = u32::try_from(next) else {
                    panic!("entity id space exhausted at {next}");
                };
                self.validity.push(true);
                Entity::from_id(id)
            }
        };
        self.alive_count += 1;

        if cfg!(feature = "diagnostics") {
            self.annotations.attach(entity, self.id);
            self.annotations.set_name(entity, DEFAULT_ENTITY_NAME);
        }
        entity
    }

    /// Whether `entity` is issued and not destroyed. Always false for the
    /// null entity.
    #[inline]
    #[must_use]
    pub fn is_valid(&self, entity: Entity) -> bool {
        entity != self.null && self.validity.get(entity.index()).copied().unwrap_or(false)
    }

    /// Removes every component of `entity` and queues its id for reuse.
    ///
    /// Costs one removal per component the entity holds, independent of how
    /// many pools the world has.
    ///
    /// # Panics
    ///
    /// Contract violation if `entity` is not valid.
    pub fn destroy(&mut self, entity: Entity) {
        contract!(self.is_valid(entity), ContractViolation::InvalidEntity(entity));

        let Self { pools, registry, .. } = &mut *self;
        for &pool in registry.entries_for(entity) {
            pools[pool.index()].remove_without_registry(entity);
        }
        registry.clear(entity);

        if let Some(flag) = self.validity.get_mut(entity.index()) {
            if *flag {
                *flag = false;
                self.alive_count -= 1;
            }
        }
        self.free_ids.push_back(entity);
        self.annotations.forget(entity);
    }

    /// Drops every entity and component, keeping the registered pools and
    /// their allocations, then reissues the null entity.
    pub fn reset(&mut self) {
        let dropped: usize = self.pools.iter().map(|pool| pool.len()).sum();

        self.registry.clear_all();
        self.validity.clear();
        self.free_ids.clear();
        self.alive_count = 0;
        for pool in &mut self.pools {
            pool.reset();
        }
        self.annotations.clear();
        self.null = self.create_null();

        tracing::debug!(world = %self.id, pools = self.pools.len(), dropped, "world reset");
    }

    fn create_null(&mut self) -> Entity {
        let null = self.create_entity();
        self.validity[null.index()] = false;
        self.alive_count -= 1;
        if cfg!(feature = "diagnostics") {
            self.annotations.set_name(null, "null");
        }
        null
    }

    // =========================================================================
    // Pool Management
    // =========================================================================

    /// Registers a pool for `T` whose new slots hold `T::default()`.
    ///
    /// Returns the existing id if `T` is already registered.
    pub fn register_pool<T: Component + Default>(&mut self) -> PoolId {
        if let Some(id) = self.pool_id::<T>() {
            return id;
        }
        let capacity = self.config.pool_capacity;
        self.register_pool_with::<T>(capacity, DefaultFill)
    }

    /// Registers a pool for `T` with an explicit dense capacity and fill
    /// strategy.
    ///
    /// Returns the existing id, and ignores the arguments with a warning, if
    /// `T` is already registered.
    pub fn register_pool_with<T: Component>(
        &mut self,
        capacity: usize,
        fill: impl SlotFill<T> + 'static,
    ) -> PoolId {
        if let Some(&id) = self.pool_ids.get(&TypeId::of::<T>()) {
            tracing::warn!(
                world = %self.id,
                pool = %id,
                component = type_name::<T>(),
                capacity,
                "pool already registered; capacity and fill ignored"
            );
            return id;
        }

        let id = PoolId::from_index(self.pools.len());
        let link_capacity = self.config.entities_capacity.max(self.validity.len());
        self.pools.push(Box::new(ComponentPool::with_fill(
            id,
            capacity,
            link_capacity,
            fill,
        )));
        self.pool_ids.insert(TypeId::of::<T>(), id);

        tracing::debug!(
            world = %self.id,
            pool = %id,
            component = type_name::<T>(),
            capacity,
            "registered component pool"
        );
        id
    }

    /// Number of registered pools.
    #[inline]
    #[must_use]
    pub fn pool_count(&self) -> usize {
        self.pools.len()
    }

    /// Id of `T`'s pool, if registered.
    #[inline]
    #[must_use]
    pub fn pool_id<T: Component>(&self) -> Option<PoolId> {
        self.pool_ids.get(&TypeId::of::<T>()).copied()
    }

    /// Component type name of a pool.
    #[must_use]
    pub fn pool_type_name(&self, pool: PoolId) -> Option<&'static str> {
        self.pools.get(pool.index()).map(|pool| pool.type_name())
    }

    /// `T`'s pool, if registered.
    #[must_use]
    pub fn try_pool<T: Component>(&self) -> Option<&ComponentPool<T>> {
        let id = self.pool_id::<T>()?;
        self.pools[id.index()].as_any().downcast_ref()
    }

    /// `T`'s pool.
    ///
    /// # Panics
    ///
    /// Panics if no pool is registered for `T`.
    #[must_use]
    pub fn pool<T: Component>(&self) -> &ComponentPool<T> {
        match self.try_pool::<T>() {
            Some(pool) => pool,
            None => violated(ContractViolation::UnknownComponentType(type_name::<T>())),
        }
    }

    /// Mutable access to `T`'s pool together with the registry it reports to.
    ///
    /// # Panics
    ///
    /// Panics if no pool is registered for `T`.
    pub fn pool_mut<T: Component>(&mut self) -> PoolMut<'_, T> {
        let (pool, registry) = self.pool_parts::<T>();
        PoolMut { pool, registry }
    }

    fn pool_parts<T: Component>(&mut self) -> (&mut ComponentPool<T>, &mut RemovalRegistry) {
        let Some(id) = self.pool_id::<T>() else {
            violated(ContractViolation::UnknownComponentType(type_name::<T>()));
        };
        let Self { pools, registry, .. } = &mut *self;
        match pools[id.index()].as_any_mut().downcast_mut() {
            Some(pool) => (pool, registry),
            None => violated(ContractViolation::UnknownComponentType(type_name::<T>())),
        }
    }

    // =========================================================================
    // Component Access
    // =========================================================================

    /// Adds a `T` slot for `entity`; see [`ComponentPool::new_component`].
    ///
    /// # Panics
    ///
    /// Contract violation if `entity` is not valid or already has a `T`.
    /// Panics if `T` has no pool.
    pub fn add_component<T: Component>(&mut self, entity: Entity) -> &mut T {
        contract!(self.is_valid(entity), ContractViolation::InvalidEntity(entity));
        let (pool, registry) = self.pool_parts::<T>();
        pool.new_component(entity, registry)
    }

    /// Adds `value` as `entity`'s `T`.
    ///
    /// # Panics
    ///
    /// Contract violation if `entity` is not valid or already has a `T`.
    /// Panics if `T` has no pool.
    pub fn insert<T: Component>(&mut self, entity: Entity, value: T) {
        *self.add_component::<T>(entity) = value;
    }

    /// Removes `entity`'s `T`.
    ///
    /// # Panics
    ///
    /// Contract violation if `entity` is not valid. Panics if it has no `T`.
    pub fn remove_component<T: Component>(&mut self, entity: Entity) {
        contract!(self.is_valid(entity), ContractViolation::InvalidEntity(entity));
        let (pool, registry) = self.pool_parts::<T>();
        pool.remove_component(entity, registry);
    }

    /// Whether `entity` has a `T`. Never fails: false for invalid entities
    /// and when `T` has no pool.
    #[must_use]
    pub fn has<T: Component>(&self, entity: Entity) -> bool {
        self.is_valid(entity) && self.try_pool::<T>().is_some_and(|pool| pool.has(entity))
    }

    /// `entity`'s `T`.
    ///
    /// # Panics
    ///
    /// Contract violation if `entity` is not valid. Panics if it has no `T`.
    #[must_use]
    pub fn get<T: Component>(&self, entity: Entity) -> &T {
        contract!(self.is_valid(entity), ContractViolation::InvalidEntity(entity));
        self.pool::<T>().get(entity)
    }

    /// `entity`'s `T`, mutable in place.
    ///
    /// # Panics
    ///
    /// Contract violation if `entity` is not valid. Panics if it has no `T`.
    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> &mut T {
        contract!(self.is_valid(entity), ContractViolation::InvalidEntity(entity));
        let (pool, _) = self.pool_parts::<T>();
        pool.get_mut(entity)
    }

    /// Type names of the components `entity` holds, in the order they were
    /// added.
    #[must_use]
    pub fn components_of(&self, entity: Entity) -> Vec<&'static str> {
        self.registry
            .entries_for(entity)
            .iter()
            .filter_map(|&pool| self.pool_type_name(pool))
            .collect()
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    /// Sets `entity`'s debug name.
    pub fn set_debug_name(&mut self, entity: Entity, name: impl Into<String>) {
        self.annotations.set_name(entity, name);
    }

    /// `entity`'s debug name, or `""` if it has none.
    #[must_use]
    pub fn debug_name(&self, entity: Entity) -> &str {
        self.annotations.name(entity)
    }

    /// The world that created `entity`, if recorded.
    #[must_use]
    pub fn debug_owner(&self, entity: Entity) -> Option<WorldId> {
        self.annotations.owner(entity)
    }

    /// The annotation table.
    #[inline]
    #[must_use]
    pub const fn annotations(&self) -> &EntityAnnotations {
        &self.annotations
    }

    /// One-line description: name, id and held component types.
    #[must_use]
    pub fn describe_entity(&self, entity: Entity) -> String {
        let description = format!(
            "{} ({entity}) [{}]",
            self.debug_name(entity),
            self.components_of(entity).join(", ")
        );
        tracing::debug!(world = %self.id, %description, "entity description");
        description
    }

    /// Snapshot of every pool, keyed by component type name.
    #[must_use]
    pub fn dumps(&self) -> BTreeMap<&'static str, PoolDump> {
        self.pools
            .iter()
            .map(|pool| (pool.type_name(), pool.dump()))
            .collect()
    }

    /// Checks every pool's sparse set and that the registry lists exactly the
    /// pools holding each entity.
    ///
    /// # Errors
    ///
    /// Returns the first disagreement found.
    pub fn verify_integrity(&self) -> Result<(), ContractViolation> {
        for pool in &self.pools {
            pool.verify_integrity()?;
        }
        for raw in 0..self.validity.len() {
            let entity = Entity::from_id(u32::try_from(raw).unwrap_or(u32::MAX));
            for (index, pool) in self.pools.iter().enumerate() {
                let listed = self.registry.contains(entity, PoolId::from_index(index));
                if listed != pool.has(entity) {
                    return Err(ContractViolation::Corrupted {
                        entity,
                        detail: "registry disagrees with pool",
                    });
                }
            }
            if !self.is_valid(entity) && !self.registry.entries_for(entity).is_empty() {
                return Err(ContractViolation::Corrupted {
                    entity,
                    detail: "invalid entity still holds components",
                });
            }
        }
        Ok(())
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(WorldConfig::default())
    }
}

impl fmt::Debug for World {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("World")
            .field("id", &self.id)
            .field("alive_count", &self.alive_count)
            .field("issued", &self.validity.len())
            .field("free_ids", &self.free_ids.len())
            .field("pools", &self.pools.iter().map(|p| p.type_name()).collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

/// Typed handle on one pool plus the world's registry.
///
/// Skips the per-call type lookup of the [`World`] convenience methods.
/// Read access goes through `Deref`; anything that touches the registry
/// goes through the methods here.
pub struct PoolMut<'w, T: Component> {
    pool: &'w mut ComponentPool<T>,
    registry: &'w mut RemovalRegistry,
}

impl<T: Component> PoolMut<'_, T> {
    /// See [`ComponentPool::new_component`].
    pub fn new_component(&mut self, entity: Entity) -> &mut T {
        self.pool.new_component(entity, self.registry)
    }

    /// See [`ComponentPool::insert`].
    pub fn insert(&mut self, entity: Entity, value: T) {
        self.pool.insert(entity, value, self.registry);
    }

    /// See [`ComponentPool::remove_component`].
    pub fn remove_component(&mut self, entity: Entity) {
        self.pool.remove_component(entity, self.registry);
    }

    /// See [`ComponentPool::get_mut`].
    pub fn get_mut(&mut self, entity: Entity) -> &mut T {
        self.pool.get_mut(entity)
    }

    /// See [`ComponentPool::components_mut`].
    pub fn components_mut(&mut self) -> &mut [T] {
        self.pool.components_mut()
    }

    /// See [`ComponentPool::iter_mut`].
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Entity, &mut T)> + '_ {
        self.pool.iter_mut()
    }

    /// See [`ComponentPool::reserve_capacity`].
    pub fn reserve_capacity(&mut self, desired: usize) {
        self.pool.reserve_capacity(desired);
    }

    /// See [`ComponentPool::trim_capacity`].
    pub fn trim_capacity(&mut self) {
        self.pool.trim_capacity();
    }
}

impl<T: Component> Deref for PoolMut<'_, T> {
    type Target = ComponentPool<T>;

    fn deref(&self) -> &ComponentPool<T> {
        self.pool
    }
}
