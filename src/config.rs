//! Configuration for BuddyKV
//!
//! Centralized configuration with sensible defaults.

use crate::error::{BuddyError, Result};
use crate::memory::MIN_BLOCK_SIZE;

/// Main configuration for a BuddyKV instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Memory Pool Configuration
    // -------------------------------------------------------------------------
    /// Initial size of the byte arena (power of two)
    pub initial_pool_size: usize,

    /// Upper bound the arena may grow to by doubling.
    /// An allocation that would need a larger pool fails with `OutOfMemory`.
    pub max_pool_size: usize,

    // -------------------------------------------------------------------------
    // Hash Index Configuration
    // -------------------------------------------------------------------------
    /// Initial number of slots in the hash index (power of two, at least 2)
    pub initial_hash_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_pool_size: 512,
            max_pool_size: 1 << 30, // 1 GB
            initial_hash_size: 16,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check sizes before any structure is built from them
    pub fn validate(&self) -> Result<()> {
        if !self.initial_pool_size.is_power_of_two() || self.initial_pool_size < MIN_BLOCK_SIZE {
            return Err(BuddyError::Config(format!(
                "initial pool size must be a power of two >= {}, got {}",
                MIN_BLOCK_SIZE, self.initial_pool_size
            )));
        }

        if !self.max_pool_size.is_power_of_two() || self.max_pool_size < self.initial_pool_size {
            return Err(BuddyError::Config(format!(
                "max pool size must be a power of two >= initial pool size ({}), got {}",
                self.initial_pool_size, self.max_pool_size
            )));
        }

        if !self.initial_hash_size.is_power_of_two() || self.initial_hash_size < 2 {
            return Err(BuddyError::Config(format!(
                "initial hash size must be a power of two >= 2, got {}",
                self.initial_hash_size
            )));
        }

        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the initial arena size (in bytes)
    pub fn initial_pool_size(mut self, size: usize) -> Self {
        self.config.initial_pool_size = size;
        self
    }

    /// Set the maximum arena size (in bytes)
    pub fn max_pool_size(mut self, size: usize) -> Self {
        self.config.max_pool_size = size;
        self
    }

    /// Set the initial number of hash slots
    pub fn initial_hash_size(mut self, size: usize) -> Self {
        self.config.initial_hash_size = size;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
