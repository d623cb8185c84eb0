//! # BuddyKV
//!
//! An in-process record store for fixed-format records:
//! - Buddy-system byte arena with power-of-two size classes
//! - Generation-checked handles to stored payloads
//! - Open-addressing hash index with double hashing and tombstones
//! - Line-oriented command files for the seminar manager
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Command File Parser                       │
//! │            (insert / search / delete / print)                │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                         Engine                               │
//! │               (key → handle → payload bytes)                 │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │  HashTable  │          │   MemPool   │
//!   │ (key→handle)│          │   (buddy)   │
//!   └─────────────┘          └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod memory;
pub mod hashtable;
pub mod seminar;
pub mod protocol;
pub mod engine;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{BuddyError, Result};
pub use config::Config;
pub use engine::Engine;
pub use hashtable::HashTable;
pub use memory::{MemHandle, MemPool};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of BuddyKV
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
