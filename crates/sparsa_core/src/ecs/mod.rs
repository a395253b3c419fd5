//! # Entity Component System
//!
//! Sparse-set component storage.
//!
//! ## Design Philosophy
//!
//! - One pool per component type, packed densely for iteration
//! - Entities are bare `u32` ids, recycled through a FIFO free list
//! - A reverse registry makes destroying an entity cost only its own components
//! - No dynamic dispatch on the add/remove/lookup path

mod annotations;
mod component;
mod entity;
mod registry;
mod storage;
mod world;

pub use annotations::{EntityAnnotations, WorldId};
pub use component::{Component, DefaultFill, FactoryFill, SlotFill, ZeroFill};
pub use entity::Entity;
pub use registry::{PoolId, PoolList, RemovalRegistry};
pub use storage::{ComponentPool, PoolDump};
pub use world::{PoolMut, World};
