//! # Error Types
//!
//! Core operations never return errors: a broken precondition is a
//! [`ContractViolation`] and ends the process. The only fallible surface is
//! loading a [`WorldConfig`](crate::WorldConfig), which reports a [`ConfigError`].

use std::path::PathBuf;

use thiserror::Error;

use crate::ecs::{Entity, PoolId};

/// A broken precondition inside the storage engine.
///
/// Raised through [`contract!`](crate::contract) (debug builds, or the
/// `contracts` feature) and returned by the integrity checks.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContractViolation {
    /// A pool was asked to add a component the entity already has.
    #[error("{pool} already holds a component for {entity}")]
    DuplicateComponent {
        /// The entity being added.
        entity: Entity,
        /// Type name of the pool.
        pool: &'static str,
    },

    /// A pool was asked for a component the entity does not have.
    #[error("{pool} holds no component for {entity}")]
    MissingComponent {
        /// The entity being looked up.
        entity: Entity,
        /// Type name of the pool.
        pool: &'static str,
    },

    /// Removal on a pool with no components.
    #[error("{0} is empty")]
    EmptyPool(&'static str),

    /// No pool is registered for a component type.
    #[error("no pool registered for {0}")]
    UnknownComponentType(&'static str),

    /// A bit was inserted twice.
    #[error("bit {0} is already set")]
    BitAlreadySet(usize),

    /// A bit was removed while clear.
    #[error("bit {0} is not set")]
    BitNotSet(usize),

    /// A bit or block index past the covered range.
    #[error("bit index {index} is outside the covered range of {capacity}")]
    BitOutOfRange {
        /// The offending index.
        index: usize,
        /// Bits currently covered.
        capacity: usize,
    },

    /// An indexed access past the logical length.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Logical length at the time.
        len: usize,
    },

    /// A write into a packed array that is already full.
    #[error("packed array is full at capacity {0}")]
    ArrayFull(usize),

    /// `increase_capacity` called with a target that does not grow.
    #[error("capacity {requested} does not increase current capacity {current}")]
    CapacityNotIncreased {
        /// Current capacity.
        current: usize,
        /// Requested capacity.
        requested: usize,
    },

    /// `reduce_capacity` called with a target above the current capacity.
    #[error("capacity {requested} does not reduce current capacity {current}")]
    CapacityNotReduced {
        /// Current capacity.
        current: usize,
        /// Requested capacity.
        requested: usize,
    },

    /// A shrink that would drop live elements.
    #[error("capacity {requested} is below the live length {len}")]
    CapacityBelowLength {
        /// Live length.
        len: usize,
        /// Requested capacity.
        requested: usize,
    },

    /// Destroying (or touching) an entity that is not valid.
    #[error("{0} is not a valid entity")]
    InvalidEntity(Entity),

    /// A recycled id came off the free list still flagged valid.
    #[error("{0} was already valid when reissued")]
    EntityAlreadyValid(Entity),

    /// The same pool registered twice for one entity.
    #[error("{pool} is already registered for {entity}")]
    DuplicateRegistration {
        /// The entity.
        entity: Entity,
        /// The pool.
        pool: PoolId,
    },

    /// Unregistering a pool that was never registered.
    #[error("{pool} is not registered for {entity}")]
    MissingRegistration {
        /// The entity.
        entity: Entity,
        /// The pool.
        pool: PoolId,
    },

    /// The link table, bitset and dense arrays disagree.
    #[error("sparse set corrupted at {entity}: {detail}")]
    Corrupted {
        /// The entity whose bookkeeping disagrees.
        entity: Entity,
        /// What disagreed.
        detail: &'static str,
    },
}

/// Errors that can occur while loading a [`WorldConfig`](crate::WorldConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for this schema.
    #[error("invalid config syntax: {0}")]
    Parse(#[from] toml::de::Error),

    /// A field holds a value the engine cannot run with.
    #[error("invalid config field `{field}`: {reason}")]
    Invalid {
        /// Field name.
        field: &'static str,
        /// Why it was rejected.
        reason: &'static str,
    },
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;
