//! # SPARSA Core
//!
//! In-memory entity/component storage built on sparse sets:
//! - O(1) amortized add, remove, lookup and existence check per (entity, type)
//! - O(k) entity destruction, where k is the number of components it holds
//! - Densely packed component arrays with slot reuse after removal
//!
//! ## Architecture Rules
//!
//! 1. **No implicit growth** - Every reallocation is an explicit, logged decision
//! 2. **Contracts over errors** - Misuse is a programmer error and panics in checked builds
//! 3. **Single-threaded** - The world and its pools are owned, never shared
//!
//! ## Example
//!
//! ```rust,ignore
//! use sparsa_core::{World, WorldConfig};
//!
//! let mut world = World::new(WorldConfig::load("world.toml")?);
//! world.register_pool::<Position>();
//!
//! let entity = world.create_entity();
//! world.insert(entity, Position::default());
//! world.destroy(entity);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod diagnostics;
pub mod ecs;
pub mod error;
pub mod memory;

pub use config::WorldConfig;
pub use ecs::{
    Component, ComponentPool, DefaultFill, Entity, EntityAnnotations, FactoryFill, PoolDump,
    PoolId, PoolMut, RemovalRegistry, SlotFill, World, WorldId, ZeroFill,
};
pub use error::{ConfigError, ConfigResult, ContractViolation};
pub use memory::{EntityLink, PackedArray, PresenceBitset};
