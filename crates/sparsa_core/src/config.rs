//! # World Configuration
//!
//! Initial capacities for a [`World`](crate::ecs::World), loadable from TOML:
//!
//! ```toml
//! entities_capacity = 4096
//! pool_capacity = 256
//! ```
//!
//! Missing keys take their defaults; unknown keys are rejected.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Default number of entity ids preallocated.
pub const DEFAULT_ENTITIES_CAPACITY: usize = 128;
/// Default reservation for the pool list.
pub const DEFAULT_POOLS_CAPACITY: usize = 64;
/// Default reservation for the component-type lookup table.
pub const DEFAULT_GROUPS_CAPACITY: usize = 32;
/// Default dense capacity of a newly registered pool.
pub const DEFAULT_POOL_CAPACITY: usize = 32;

/// Capacity settings for a world.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorldConfig {
    /// Entity ids covered by the validity flags and every new pool's link table.
    pub entities_capacity: usize,
    /// Pools the world reserves room for.
    pub pools_capacity: usize,
    /// Component types the type lookup table reserves room for.
    pub groups_capacity: usize,
    /// Initial dense capacity of each new pool.
    pub pool_capacity: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            entities_capacity: DEFAULT_ENTITIES_CAPACITY,
            pools_capacity: DEFAULT_POOLS_CAPACITY,
            groups_capacity: DEFAULT_GROUPS_CAPACITY,
            pool_capacity: DEFAULT_POOL_CAPACITY,
        }
    }
}

impl WorldConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown keys, and
    /// [`ConfigError::Invalid`] if validation fails.
    pub fn from_toml_str(source: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`from_toml_str`](Self::from_toml_str).
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Checks that the capacities can back a working world.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad field.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.entities_capacity == 0 {
            return Err(ConfigError::Invalid {
                field: "entities_capacity",
                reason: "must cover at least the null entity",
            });
        }
        if self.pool_capacity == 0 {
            return Err(ConfigError::Invalid {
                field: "pool_capacity",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }
}
