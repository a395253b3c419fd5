//! # Component Storage
//!
//! One sparse set per component type.
//!
//! ```text
//! link (sparse, by entity id):   [ - ,  1 , - ,  0 , - ]
//!                                         \       |
//! entities (dense):               [ E3 , E1 ]  <--+
//! components (dense):             [ C3 , C1 ]
//! presence (bitset):              0b01010
//! ```
//!
//! - Add appends to the dense arrays: O(1) amortized
//! - Remove swaps the last dense entry into the hole: O(1)
//! - Lookup and `has` go through the link table and bitset: O(1)
//!
//! Removal reorders the dense arrays; iteration order is not insertion order.

use std::any::{type_name, Any};

use super::component::{Component, DefaultFill, SlotFill, ZeroFill};
use super::entity::Entity;
use super::registry::{PoolId, RemovalRegistry};
use crate::contract;
use crate::diagnostics::violated;
use crate::error::ContractViolation;
use crate::memory::{EntityLink, PackedArray, PresenceBitset};

/// Smallest multiple of `current` strictly above `index`.
///
/// An empty (trimmed) array grows one slot at a time until it has a step.
#[inline]
const fn grown_capacity(current: usize, index: usize) -> usize {
    let step = if current == 0 { 1 } else { current };
    (index / step + 1) * step
}

/// Dense storage for a single component type.
///
/// # Example
///
/// ```rust,ignore
/// let mut registry = RemovalRegistry::with_capacity(128);
/// let mut pool: ComponentPool<Position> = ComponentPool::new(PoolId::from_index(0), 32, 128);
///
/// pool.insert(entity, Position::new(1.0, 2.0, 3.0), &mut registry);
/// pool.get_mut(entity).x += 1.0;
/// pool.remove_component(entity, &mut registry);
/// ```
pub struct ComponentPool<T: Component> {
    id: PoolId,
    /// Dense entities; `entities[i]` owns `components[i]`.
    entities: PackedArray<Entity>,
    /// Dense component values, same length as `entities`.
    components: PackedArray<T>,
    /// Entity id → dense index.
    links: EntityLink,
    /// Entity id → present. Always agrees with `links`.
    presence: PresenceBitset,
    /// Produces values for new component slots.
    fill: Box<dyn SlotFill<T>>,
}

impl<T: Component + Default> ComponentPool<T> {
    /// Creates a pool whose new slots hold `T::default()`.
    ///
    /// # Arguments
    ///
    /// * `id` - This pool's identity in the removal registry. Must be unique
    ///   among the pools sharing a registry, or their registrations collide.
    ///   [`World`](super::World) assigns ids itself.
    /// * `capacity` - Initial dense capacity
    /// * `link_capacity` - Initial number of entity ids covered
    #[must_use]
    pub fn new(id: PoolId, capacity: usize, link_capacity: usize) -> Self {
        Self::with_fill(id, capacity, link_capacity, DefaultFill)
    }
}

impl<T: Component + bytemuck::Zeroable> ComponentPool<T> {
    /// Creates a pool whose new slots are zeroed bytes.
    ///
    /// `id` must be unique among the pools sharing a registry; see
    /// [`new`](Self::new).
    #[must_use]
    pub fn zeroed(id: PoolId, capacity: usize, link_capacity: usize) -> Self {
        Self::with_fill(id, capacity, link_capacity, ZeroFill)
    }
}

impl<T: Component> ComponentPool<T> {
    /// Creates a pool with an explicit fill strategy for new slots.
    ///
    /// `id` must be unique among the pools sharing a registry; see
    /// [`new`](ComponentPool::new).
    #[must_use]
    pub fn with_fill(
        id: PoolId,
        capacity: usize,
        link_capacity: usize,
        fill: impl SlotFill<T> + 'static,
    ) -> Self {
        let mut fill: Box<dyn SlotFill<T>> = Box::new(fill);
        let components = PackedArray::with_fill(capacity, || fill.fill());
        Self {
            id,
            entities: PackedArray::new(capacity),
            components,
            links: EntityLink::new(link_capacity),
            presence: PresenceBitset::with_capacity(link_capacity),
            fill,
        }
    }

    /// This pool's identity in the removal registry.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> PoolId {
        self.id
    }

    /// Name of the stored component type.
    #[inline]
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        type_name::<T>()
    }

    /// Number of components stored.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether no component is stored.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Dense capacity.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.components.capacity()
    }

    /// Number of entity ids the link table covers.
    #[inline]
    #[must_use]
    pub fn link_capacity(&self) -> usize {
        self.links.capacity()
    }

    /// Whether `entity` has a component in this pool. Never fails.
    #[inline]
    #[must_use]
    pub fn has(&self, entity: Entity) -> bool {
        let id = entity.index();
        id < self.links.capacity() && self.presence.contains(id)
    }

    /// Dense position of `entity`, if present.
    #[inline]
    #[must_use]
    pub fn dense_index(&self, entity: Entity) -> Option<usize> {
        self.links.dense_index(entity.index())
    }

    /// Adds a component slot for `entity` and records this pool in the
    /// registry.
    ///
    /// The returned slot is not reinitialized: it holds either a fill value or
    /// a component recycled from an earlier removal. Use [`insert`](Self::insert)
    /// to write a value.
    ///
    /// # Panics
    ///
    /// Contract violation if `entity` already has a component here.
    pub fn new_component(&mut self, entity: Entity, registry: &mut RemovalRegistry) -> &mut T {
        contract!(
            !registry.contains(entity, self.id),
            ContractViolation::DuplicateComponent { entity, pool: self.type_name() }
        );
        self.link_entity(entity);

        let dense_capacity = self.entities.capacity();
        if dense_capacity != self.components.capacity() {
            self.grow_components(dense_capacity);
        }
        registry.register(entity, self.id);
        self.components.claim()
    }

    /// Adds `value` as `entity`'s component.
    ///
    /// # Panics
    ///
    /// Contract violation if `entity` already has a component here.
    pub fn insert(&mut self, entity: Entity, value: T, registry: &mut RemovalRegistry) {
        *self.new_component(entity, registry) = value;
    }

    /// `entity`'s component.
    ///
    /// # Panics
    ///
    /// Panics if `entity` has no component here.
    #[inline]
    #[must_use]
    pub fn get(&self, entity: Entity) -> &T {
        let index = self.expect_index(entity);
        &self.components[index]
    }

    /// `entity`'s component, mutable in place.
    ///
    /// # Panics
    ///
    /// Panics if `entity` has no component here.
    #[inline]
    pub fn get_mut(&mut self, entity: Entity) -> &mut T {
        let index = self.expect_index(entity);
        &mut self.components[index]
    }

    /// `entity`'s component, if present.
    #[inline]
    #[must_use]
    pub fn try_get(&self, entity: Entity) -> Option<&T> {
        self.dense_index(entity).map(|index| &self.components[index])
    }

    /// Removes `entity`'s component and its registry record.
    ///
    /// # Panics
    ///
    /// Panics if `entity` has no component here.
    pub fn remove_component(&mut self, entity: Entity, registry: &mut RemovalRegistry) {
        self.remove_without_registry(entity);
        registry.unregister(entity, self.id);
    }

    /// Removes `entity`'s component but leaves the registry untouched.
    ///
    /// Only for callers that clear the entity's whole registry entry
    /// afterwards, as [`World::destroy`](super::World::destroy) does.
    ///
    /// # Panics
    ///
    /// Panics if `entity` has no component here.
    pub fn remove_without_registry(&mut self, entity: Entity) {
        contract!(
            !self.components.is_empty(),
            ContractViolation::EmptyPool(self.type_name())
        );
        let position = self.expect_index(entity);
        let id = entity.index();

        self.links.clear(id);
        self.presence.remove(id);

        let last = self.entities.len() - 1;
        self.entities.swap_remove(position);
        self.components.swap_remove(position);
        if position != last {
            let moved = self.entities[position];
            self.links.set(moved.index(), position);
        }
    }

    /// Sets the dense capacity to exactly `desired`, growing the link table
    /// and bitset if they cover fewer ids.
    ///
    /// # Panics
    ///
    /// Contract violation if `desired` is below the current length.
    pub fn reserve_capacity(&mut self, desired: usize) {
        let capacity = self.components.capacity();
        if desired == capacity {
            return;
        }
        if desired > capacity {
            self.grow_links(desired);
            self.grow_entities(desired);
            self.grow_components(desired);
        } else {
            self.components.reduce_capacity(desired);
            self.entities.reduce_capacity(desired);
        }
    }

    /// Shrinks the dense capacity to the current length.
    pub fn trim_capacity(&mut self) {
        let len = self.components.len();
        self.components.reduce_capacity(len);
        self.entities.reduce_capacity(len);
    }

    /// Drops every component, keeping all allocations.
    pub fn reset(&mut self) {
        self.components.reset_length();
        self.entities.reset_length();
        self.links.reset();
        self.presence.clear();
    }

    /// Entities holding a component, in dense order.
    #[inline]
    #[must_use]
    pub fn entities(&self) -> &[Entity] {
        self.entities.as_slice()
    }

    /// Raw ids of [`entities`](Self::entities).
    #[inline]
    #[must_use]
    pub fn entity_ids(&self) -> &[u32] {
        bytemuck::cast_slice(self.entities.as_slice())
    }

    /// Components in dense order.
    #[inline]
    #[must_use]
    pub fn components(&self) -> &[T] {
        self.components.as_slice()
    }

    /// Components in dense order, mutably.
    #[inline]
    pub fn components_mut(&mut self) -> &mut [T] {
        self.components.as_mut_slice()
    }

    /// Iterates `(entity, component)` pairs in dense order.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> + '_ {
        self.entities.iter().copied().zip(self.components.iter())
    }

    /// Iterates `(entity, component)` pairs in dense order, mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Entity, &mut T)> + '_ {
        self.entities
            .as_slice()
            .iter()
            .copied()
            .zip(self.components.as_mut_slice().iter_mut())
    }

    /// The link table.
    #[inline]
    #[must_use]
    pub fn links(&self) -> &EntityLink {
        &self.links
    }

    /// The presence bitset.
    #[inline]
    #[must_use]
    pub fn presence(&self) -> &PresenceBitset {
        &self.presence
    }

    /// Point-in-time copy of every `(entity, component)` pair.
    #[must_use]
    pub fn dump(&self) -> Vec<(Entity, T)> {
        self.iter().map(|(entity, value)| (entity, value.clone())).collect()
    }

    /// Checks that the dense arrays, link table and bitset agree.
    ///
    /// # Errors
    ///
    /// Returns the first disagreement found.
    pub fn verify_integrity(&self) -> Result<(), ContractViolation> {
        let corrupted = |entity, detail| Err(ContractViolation::Corrupted { entity, detail });

        if self.entities.len() != self.components.len() {
            return corrupted(Entity::NULL, "dense arrays differ in length");
        }
        for (position, &entity) in self.entities.iter().enumerate() {
            let id = entity.index();
            if self.links.dense_index(id) != Some(position) {
                return corrupted(entity, "link does not point back at dense slot");
            }
            if id >= self.presence.capacity() || !self.presence.contains(id) {
                return corrupted(entity, "linked entity missing from bitset");
            }
        }
        if self.presence.count() != self.entities.len() {
            return corrupted(Entity::NULL, "bitset population differs from dense length");
        }
        for id in 0..self.links.capacity() {
            if let Some(position) = self.links.dense_index(id) {
                let owner = self.entities.get(position).copied();
                if owner.map(Entity::index) != Some(id) {
                    let raw = u32::try_from(id).unwrap_or(u32::MAX);
                    return corrupted(Entity::from_id(raw), "link points at foreign slot");
                }
            }
        }
        Ok(())
    }

    fn expect_index(&self, entity: Entity) -> usize {
        match self.links.dense_index(entity.index()) {
            Some(index) => index,
            None => violated(ContractViolation::MissingComponent {
                entity,
                pool: self.type_name(),
            }),
        }
    }

    fn link_entity(&mut self, entity: Entity) {
        let id = entity.index();
        if id >= self.links.capacity() {
            self.grow_links(grown_capacity(self.links.capacity(), id));
        }

        let position = self.entities.len();
        if position >= self.entities.capacity() {
            self.grow_entities(grown_capacity(self.entities.capacity(), position));
        }

        contract!(
            !self.presence.contains(id),
            ContractViolation::DuplicateComponent { entity, pool: self.type_name() }
        );
        self.links.set(id, position);
        self.entities.push(entity);
        self.presence.insert(id);
    }

    fn grow_links(&mut self, desired: usize) {
        if desired > self.links.capacity() {
            self.links.grow(desired);
        }
        if desired > self.presence.capacity() {
            self.presence.grow_capacity(desired);
        }
    }

    fn grow_entities(&mut self, desired: usize) {
        let current = self.entities.capacity();
        if desired < current {
            tracing::warn!(
                desired,
                current,
                pool = self.type_name(),
                "entity capacity request below current capacity"
            );
            return;
        }
        if desired > current {
            self.entities.increase_capacity(desired);
        }
    }

    fn grow_components(&mut self, desired: usize) {
        contract!(
            desired == self.entities.capacity(),
            ContractViolation::CapacityNotIncreased {
                current: self.entities.capacity(),
                requested: desired,
            }
        );
        let fill = &mut self.fill;
        self.components.increase_capacity_with(desired, || fill.fill());
    }
}

/// One pool's snapshot inside a [`World::dumps`](super::World::dumps).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolDump {
    /// Component type name.
    pub type_name: &'static str,
    /// `(entity, Debug-formatted component)` pairs in dense order.
    pub entries: Vec<(Entity, String)>,
}

/// Type-erased view of a pool, used by the world for destroy, reset and dumps.
pub(crate) trait ErasedPool {
    fn type_name(&self) -> &'static str;
    fn len(&self) -> usize;
    fn has(&self, entity: Entity) -> bool;
    fn verify_integrity(&self) -> Result<(), ContractViolation>;
    fn remove_without_registry(&mut self, entity: Entity);
    fn reset(&mut self);
    fn dump(&self) -> PoolDump;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Component> ErasedPool for ComponentPool<T> {
    fn type_name(&self) -> &'static str {
        ComponentPool::type_name(self)
    }

    fn len(&self) -> usize {
        ComponentPool::len(self)
    }

    fn has(&self, entity: Entity) -> bool {
        ComponentPool::has(self, entity)
    }

    fn verify_integrity(&self) -> Result<(), ContractViolation> {
        ComponentPool::verify_integrity(self)
    }

    fn remove_without_registry(&mut self, entity: Entity) {
        ComponentPool::remove_without_registry(self, entity);
    }

    fn reset(&mut self) {
        ComponentPool::reset(self);
    }

    fn dump(&self) -> PoolDump {
        PoolDump {
            type_name: ComponentPool::type_name(self),
            entries: self
                .iter()
                .map(|(entity, value)| (entity, format!("{value:?}")))
                .collect(),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Zeroable)]
    #[repr(C)]
    struct Position {
        x: f32,
        y: f32,
    }

    fn e(id: u32) -> Entity {
        Entity::from_id(id)
    }

    fn pool(capacity: usize, links: usize) -> (ComponentPool<Position>, RemovalRegistry) {
        (
            ComponentPool::new(PoolId::from_index(0), capacity, links),
            RemovalRegistry::with_capacity(links),
        )
    }

    #[test]
    fn test_grown_capacity() {
        assert_eq!(grown_capacity(32, 32), 64);
        assert_eq!(grown_capacity(32, 100), 128);
        assert_eq!(grown_capacity(32, 5), 32);
        assert_eq!(grown_capacity(0, 0), 1);
    }

    #[test]
    fn test_insert_get_has() {
        let (mut pool, mut registry) = pool(4, 8);
        pool.insert(e(2), Position { x: 1.0, y: 2.0 }, &mut registry);

        assert!(pool.has(e(2)));
        assert!(!pool.has(e(3)));
        assert!(!pool.has(e(1000)));
        assert_eq!(pool.len(), 1);
        assert_eq!(*pool.get(e(2)), Position { x: 1.0, y: 2.0 });
        assert_eq!(registry.entries_for(e(2)), &[pool.id()]);
    }

    #[test]
    fn test_get_mut_is_in_place() {
        let (mut pool, mut registry) = pool(4, 8);
        pool.insert(e(1), Position::default(), &mut registry);
        pool.get_mut(e(1)).x = 9.0;
        assert!((pool.get(e(1)).x - 9.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_swap_remove_relocates_last() {
        let (mut pool, mut registry) = pool(8, 8);
        for id in 1..=4u16 {
            pool.insert(e(id.into()), Position { x: id.into(), y: 0.0 }, &mut registry);
        }
        assert_eq!(pool.entity_ids(), &[1, 2, 3, 4]);

        pool.remove_component(e(2), &mut registry);
        assert_eq!(pool.entity_ids(), &[1, 4, 3]);
        assert_eq!(pool.dense_index(e(4)), Some(1));
        assert_eq!(pool.dense_index(e(2)), None);
        assert!(!pool.has(e(2)));
        assert!((pool.get(e(4)).x - 4.0).abs() < f32::EPSILON);
        assert!(registry.entries_for(e(2)).is_empty());
        pool.verify_integrity().unwrap();
    }

    #[test]
    fn test_remove_last_moves_nothing() {
        let (mut pool, mut registry) = pool(8, 8);
        pool.insert(e(1), Position::default(), &mut registry);
        pool.insert(e(2), Position::default(), &mut registry);
        pool.remove_component(e(2), &mut registry);
        assert_eq!(pool.entity_ids(), &[1]);
        assert_eq!(pool.dense_index(e(1)), Some(0));
        pool.verify_integrity().unwrap();
    }

    #[test]
    fn test_dense_growth_doubles() {
        let (mut pool, mut registry) = pool(2, 8);
        for id in 0..3 {
            pool.insert(e(id), Position::default(), &mut registry);
        }
        assert_eq!(pool.capacity(), 4);
        assert_eq!(pool.len(), 3);
    }

    #[test]
    fn test_link_growth_covers_far_ids() {
        let (mut pool, mut registry) = pool(2, 8);
        pool.insert(e(21), Position::default(), &mut registry);
        assert_eq!(pool.link_capacity(), 24);
        assert!(pool.presence().capacity() >= 24);
        assert!(pool.has(e(21)));
        pool.verify_integrity().unwrap();
    }

    #[test]
    fn test_new_component_recycles_removed_value() {
        let mut registry = RemovalRegistry::with_capacity(8);
        let mut pool: ComponentPool<Vec<u8>> = ComponentPool::new(PoolId::from_index(0), 2, 8);
        pool.insert(e(1), vec![7, 7], &mut registry);
        pool.remove_component(e(1), &mut registry);

        let slot = pool.new_component(e(3), &mut registry);
        assert_eq!(*slot, vec![7, 7]);
    }

    #[test]
    fn test_factory_fill_populates_growth() {
        let mut registry = RemovalRegistry::with_capacity(8);
        let mut pool = ComponentPool::with_fill(
            PoolId::from_index(0),
            1,
            8,
            crate::ecs::FactoryFill(|| String::from("unset")),
        );
        pool.new_component(e(1), &mut registry);
        let second = pool.new_component(e(2), &mut registry);
        assert_eq!(second, "unset");
        assert_eq!(pool.capacity(), 2);
    }

    #[test]
    fn test_zeroed_pool() {
        let mut registry = RemovalRegistry::with_capacity(8);
        let mut pool: ComponentPool<Position> = ComponentPool::zeroed(PoolId::from_index(0), 1, 8);
        let slot = pool.new_component(e(5), &mut registry);
        assert_eq!(*slot, Position { x: 0.0, y: 0.0 });
    }

    #[test]
    fn test_reserve_and_trim() {
        let (mut pool, mut registry) = pool(4, 8);
        pool.reserve_capacity(16);
        assert_eq!(pool.capacity(), 16);
        assert_eq!(pool.link_capacity(), 16);

        pool.reserve_capacity(16);
        assert_eq!(pool.capacity(), 16);

        pool.insert(e(1), Position::default(), &mut registry);
        pool.insert(e(2), Position::default(), &mut registry);
        pool.reserve_capacity(8);
        assert_eq!(pool.capacity(), 8);

        pool.trim_capacity();
        assert_eq!(pool.capacity(), 2);
        assert_eq!(pool.entity_ids(), &[1, 2]);

        pool.insert(e(3), Position::default(), &mut registry);
        assert_eq!(pool.capacity(), 4);
        pool.verify_integrity().unwrap();
    }

    #[test]
    fn test_trim_empty_pool_then_grow() {
        let (mut pool, mut registry) = pool(4, 8);
        pool.trim_capacity();
        assert_eq!(pool.capacity(), 0);

        pool.insert(e(1), Position::default(), &mut registry);
        assert_eq!(pool.capacity(), 1);
        assert!(pool.has(e(1)));
    }

    #[test]
    fn test_reset_keeps_capacity() {
        let (mut pool, mut registry) = pool(4, 8);
        pool.insert(e(1), Position::default(), &mut registry);
        pool.insert(e(6), Position::default(), &mut registry);
        pool.reset();

        assert!(pool.is_empty());
        assert!(!pool.has(e(1)));
        assert!(!pool.has(e(6)));
        assert_eq!(pool.capacity(), 4);
        assert_eq!(pool.presence().count(), 0);
        pool.verify_integrity().unwrap();
    }

    #[test]
    fn test_dump_is_a_copy() {
        let (mut pool, mut registry) = pool(4, 8);
        pool.insert(e(1), Position { x: 1.0, y: 1.0 }, &mut registry);
        let dump = pool.dump();
        pool.get_mut(e(1)).x = 5.0;
        assert_eq!(dump, vec![(e(1), Position { x: 1.0, y: 1.0 })]);
    }

    #[test]
    fn test_iter_mut_pairs_entities() {
        let (mut pool, mut registry) = pool(4, 8);
        pool.insert(e(1), Position::default(), &mut registry);
        pool.insert(e(2), Position::default(), &mut registry);
        for (entity, position) in pool.iter_mut() {
            position.y = if entity == e(2) { 2.0 } else { 1.0 };
        }
        assert!((pool.get(e(2)).y - 2.0).abs() < f32::EPSILON);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "already holds a component for Entity1")]
    fn test_double_add_panics() {
        let (mut pool, mut registry) = pool(4, 8);
        pool.new_component(e(1), &mut registry);
        pool.new_component(e(1), &mut registry);
    }

    #[test]
    #[should_panic(expected = "holds no component for Entity3")]
    fn test_get_absent_panics() {
        let (pool, _registry) = pool(4, 8);
        let _ = pool.get(e(3));
    }

    #[test]
    #[should_panic(expected = "holds no component for Entity2")]
    fn test_remove_absent_panics() {
        let (mut pool, mut registry) = pool(4, 8);
        pool.insert(e(1), Position::default(), &mut registry);
        pool.remove_component(e(2), &mut registry);
    }

    #[test]
    fn test_pools_with_distinct_ids_share_registry() {
        let mut registry = RemovalRegistry::with_capacity(8);
        let mut positions: ComponentPool<Position> = ComponentPool::new(PoolId::from_index(0), 4, 8);
        let mut labels: ComponentPool<String> = ComponentPool::new(PoolId::from_index(1), 4, 8);

        positions.insert(e(1), Position::default(), &mut registry);
        labels.insert(e(1), "one".to_owned(), &mut registry);
        assert_eq!(registry.entries_for(e(1)), &[positions.id(), labels.id()]);

        positions.remove_component(e(1), &mut registry);
        assert_eq!(registry.entries_for(e(1)), &[labels.id()]);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "already holds a component for Entity1")]
    fn test_colliding_pool_ids_are_detected() {
        let mut registry = RemovalRegistry::with_capacity(8);
        let mut positions: ComponentPool<Position> = ComponentPool::new(PoolId::from_index(0), 4, 8);
        let mut labels: ComponentPool<String> = ComponentPool::new(PoolId::from_index(0), 4, 8);

        positions.insert(e(1), Position::default(), &mut registry);
        labels.insert(e(1), "one".to_owned(), &mut registry);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "below the live length")]
    fn test_reserve_below_length_panics() {
        let (mut pool, mut registry) = pool(4, 8);
        pool.insert(e(1), Position::default(), &mut registry);
        pool.insert(e(2), Position::default(), &mut registry);
        pool.reserve_capacity(1);
    }
}
