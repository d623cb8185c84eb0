//! Error types for BuddyKV
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using BuddyError
pub type Result<T> = std::result::Result<T, BuddyError>;

/// Unified error type for BuddyKV operations
#[derive(Debug, Error)]
pub enum BuddyError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Memory Pool Errors
    // -------------------------------------------------------------------------
    #[error("Out of memory: cannot place {requested} bytes (pool size {pool_size})")]
    OutOfMemory { requested: usize, pool_size: usize },

    #[error("Invalid handle: {0}")]
    InvalidHandle(String),

    // -------------------------------------------------------------------------
    // Index Errors
    // -------------------------------------------------------------------------
    #[error("Duplicate key: {0}")]
    DuplicateKey(i64),

    #[error("Invalid capacity: {0}")]
    InvalidCapacity(String),

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(String),

    // -------------------------------------------------------------------------
    // Command File Errors
    // -------------------------------------------------------------------------
    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<bincode::Error> for BuddyError {
    fn from(err: bincode::Error) -> Self {
        BuddyError::Serialization(err.to_string())
    }
}
