//! Random add/remove/destroy interleavings checked against a simple model.

use std::collections::{HashMap, VecDeque};

use proptest::prelude::*;
use sparsa_core::{ComponentPool, Entity, PoolId, RemovalRegistry, World, WorldConfig};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Tag(u32);

#[derive(Clone, Debug, Default, PartialEq)]
struct Label(String);

#[derive(Clone, Debug)]
enum Op {
    Create,
    Destroy(usize),
    AddTag(usize),
    RemoveTag(usize),
    AddLabel(usize),
    RemoveLabel(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => Just(Op::Create),
        1 => any::<usize>().prop_map(Op::Destroy),
        3 => any::<usize>().prop_map(Op::AddTag),
        2 => any::<usize>().prop_map(Op::RemoveTag),
        2 => any::<usize>().prop_map(Op::AddLabel),
        1 => any::<usize>().prop_map(Op::RemoveLabel),
    ]
}

/// What the world should contain.
#[derive(Default)]
struct Model {
    alive: Vec<Entity>,
    free: VecDeque<Entity>,
    next_id: u32,
    tags: HashMap<Entity, u32>,
    labels: HashMap<Entity, String>,
}

impl Model {
    fn new() -> Self {
        Self { next_id: 1, ..Self::default() }
    }

    fn pick(&self, index: usize) -> Option<Entity> {
        if self.alive.is_empty() {
            None
        } else {
            Some(self.alive[index % self.alive.len()])
        }
    }
}

fn apply(world: &mut World, model: &mut Model, op: &Op) {
    match *op {
        Op::Create => {
            let entity = world.create_entity();
            let expected = model.free.pop_front().unwrap_or_else(|| {
                model.next_id += 1;
                Entity::from_id(model.next_id - 1)
            });
            assert_eq!(entity, expected);
            model.alive.push(entity);
        }
        Op::Destroy(index) => {
            if let Some(entity) = model.pick(index) {
                world.destroy(entity);
                model.alive.retain(|&e| e != entity);
                model.free.push_back(entity);
                model.tags.remove(&entity);
                model.labels.remove(&entity);
            }
        }
        Op::AddTag(index) => {
            if let Some(entity) = model.pick(index) {
                if !model.tags.contains_key(&entity) {
                    world.insert(entity, Tag(entity.id()));
                    model.tags.insert(entity, entity.id());
                }
            }
        }
        Op::RemoveTag(index) => {
            if let Some(entity) = model.pick(index) {
                if model.tags.remove(&entity).is_some() {
                    world.remove_component::<Tag>(entity);
                }
            }
        }
        Op::AddLabel(index) => {
            if let Some(entity) = model.pick(index) {
                if !model.labels.contains_key(&entity) {
                    let label = format!("e{}", entity.id());
                    world.insert(entity, Label(label.clone()));
                    model.labels.insert(entity, label);
                }
            }
        }
        Op::RemoveLabel(index) => {
            if let Some(entity) = model.pick(index) {
                if model.labels.remove(&entity).is_some() {
                    world.remove_component::<Label>(entity);
                }
            }
        }
    }
}

fn small_world() -> World {
    let mut world = World::new(WorldConfig {
        entities_capacity: 4,
        pool_capacity: 2,
        ..WorldConfig::default()
    });
    world.register_pool::<Tag>();
    world.register_pool::<Label>();
    world
}

proptest! {
    #[test]
    fn world_matches_model(ops in proptest::collection::vec(op(), 1..200)) {
        let mut world = small_world();
        let mut model = Model::new();

        for op in &ops {
            apply(&mut world, &mut model, op);
            prop_assert!(world.verify_integrity().is_ok(), "after {:?}", op);
        }

        prop_assert_eq!(world.alive_count(), model.alive.len());
        prop_assert_eq!(world.pool::<Tag>().len(), model.tags.len());
        prop_assert_eq!(world.pool::<Label>().len(), model.labels.len());

        for &entity in &model.alive {
            prop_assert!(world.is_valid(entity));
            prop_assert_eq!(world.has::<Tag>(entity), model.tags.contains_key(&entity));
            prop_assert_eq!(world.has::<Label>(entity), model.labels.contains_key(&entity));
            if let Some(&tag) = model.tags.get(&entity) {
                prop_assert_eq!(*world.get::<Tag>(entity), Tag(tag));
            }
            if let Some(label) = model.labels.get(&entity) {
                prop_assert_eq!(&world.get::<Label>(entity).0, label);
            }
        }
        for entity in &model.free {
            prop_assert!(!world.is_valid(*entity));
        }
    }

    #[test]
    fn links_and_bitset_agree(
        adds in proptest::collection::vec(0u32..300, 1..100),
        removals in proptest::collection::vec(any::<usize>(), 0..100),
    ) {
        let mut registry = RemovalRegistry::with_capacity(8);
        let mut pool: ComponentPool<Tag> = ComponentPool::new(PoolId::from_index(0), 2, 8);

        let mut present = Vec::new();
        for id in adds {
            let entity = Entity::from_id(id);
            if !pool.has(entity) {
                pool.insert(entity, Tag(id), &mut registry);
                present.push(entity);
            }
        }
        for index in removals {
            if present.is_empty() {
                break;
            }
            let entity = present.swap_remove(index % present.len());
            let len = pool.len();
            pool.remove_component(entity, &mut registry);
            prop_assert_eq!(pool.len(), len - 1);
        }

        prop_assert!(pool.verify_integrity().is_ok());
        for id in 0..pool.link_capacity() {
            let entity = Entity::from_id(u32::try_from(id).unwrap());
            let linked = pool.links().dense_index(id);
            prop_assert_eq!(pool.has(entity), linked.is_some());
            prop_assert_eq!(pool.presence().contains(id), linked.is_some());
            if let Some(position) = linked {
                prop_assert_eq!(pool.entities()[position], entity);
                prop_assert_eq!(pool.components()[position], Tag(entity.id()));
            }
        }
        prop_assert_eq!(pool.presence().count(), present.len());
    }

    #[test]
    fn reserve_capacity_is_idempotent(first in 0usize..512, extra in 0usize..4) {
        let mut registry = RemovalRegistry::with_capacity(8);
        let mut pool: ComponentPool<Tag> = ComponentPool::new(PoolId::from_index(0), 4, 8);
        for id in 0..extra {
            let id = u32::try_from(id).unwrap();
            pool.insert(Entity::from_id(id), Tag(id), &mut registry);
        }

        let desired = first.max(extra);
        pool.reserve_capacity(desired);
        let capacity = pool.capacity();
        pool.reserve_capacity(desired);

        prop_assert_eq!(capacity, desired);
        prop_assert_eq!(pool.capacity(), capacity);
        prop_assert_eq!(pool.len(), extra);
        prop_assert!(pool.verify_integrity().is_ok());
    }
}
