//! # Entity Annotations
//!
//! Debug-only side table: a human-readable name and the owning world for
//! each entity. Nothing in the storage engine reads it.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

use super::entity::Entity;

static NEXT_WORLD_ID: AtomicU32 = AtomicU32::new(1);

/// Process-unique identity of a [`World`](super::World).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WorldId(u32);

impl WorldId {
    pub(crate) fn next() -> Self {
        Self(NEXT_WORLD_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw id.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for WorldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "World{}", self.0)
    }
}

#[derive(Clone, Debug, Default)]
struct Annotation {
    name: Option<String>,
    owner: Option<WorldId>,
}

/// Entity → name and owner.
#[derive(Clone, Debug, Default)]
pub struct EntityAnnotations {
    entries: HashMap<Entity, Annotation>,
}

impl EntityAnnotations {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `owner` for `entity`, clearing any stale name from a previous
    /// holder of the same id.
    pub fn attach(&mut self, entity: Entity, owner: WorldId) {
        self.entries.insert(entity, Annotation { name: None, owner: Some(owner) });
    }

    /// Sets `entity`'s name.
    pub fn set_name(&mut self, entity: Entity, name: impl Into<String>) {
        self.entries.entry(entity).or_default().name = Some(name.into());
    }

    /// `entity`'s name, or `""` if none was set.
    #[must_use]
    pub fn name(&self, entity: Entity) -> &str {
        self.entries
            .get(&entity)
            .and_then(|a| a.name.as_deref())
            .unwrap_or_default()
    }

    /// World that created `entity`.
    #[must_use]
    pub fn owner(&self, entity: Entity) -> Option<WorldId> {
        self.entries.get(&entity).and_then(|a| a.owner)
    }

    /// Drops everything recorded for `entity`.
    pub fn forget(&mut self, entity: Entity) {
        self.entries.remove(&entity);
    }

    /// Drops everything.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of annotated entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is annotated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
