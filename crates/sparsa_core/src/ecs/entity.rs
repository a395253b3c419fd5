//! # Entity Identifiers
//!
//! An entity is nothing but a `u32`. There is no generation counter: a
//! destroyed id goes back to the free list and is reissued as a brand-new
//! entity, so handles must not be held across a destroy.

use std::fmt;

use bytemuck::{Pod, Zeroable};

/// Opaque entity identifier.
///
/// Id 0 is the world's reserved null entity and is never valid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Pod, Zeroable)]
#[repr(transparent)]
pub struct Entity(u32);

impl Entity {
    /// The reserved null entity.
    pub const NULL: Self = Self(0);

    /// Wraps a raw id.
    #[inline]
    #[must_use]
    pub const fn from_id(id: u32) -> Self {
        Self(id)
    }

    /// Raw id.
    #[inline]
    #[must_use]
    pub const fn id(self) -> u32 {
        self.0
    }

    /// Id as a slot index into link tables and validity flags.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_roundtrip() {
        let entity = Entity::from_id(12345);
        assert_eq!(entity.id(), 12345);
        assert_eq!(entity.index(), 12345);
        assert_eq!(entity.to_string(), "Entity12345");
    }

    #[test]
    fn test_entity_is_plain_u32() {
        let entities = [Entity::from_id(3), Entity::from_id(9)];
        let ids: &[u32] = bytemuck::cast_slice(&entities);
        assert_eq!(ids, &[3, 9]);
        assert_eq!(Entity::default(), Entity::NULL);
    }
}
