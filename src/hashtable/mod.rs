//! Hash Index Module
//!
//! Open-addressing hash table from integer keys to small `Copy`-able values
//! (memory handles, in the engine).
//!
//! ## Responsibilities
//! - Insert / search / delete by key
//! - Double hashing for collision resolution
//! - Tombstones for deletion, reclaimed on resize
//! - Eager doubling once half the slots are live
//!
//! ## Probe Sequence
//! ```text
//! start = key mod capacity
//! step  = ((key / capacity) mod (capacity / 2)) * 2 + 1     (always odd)
//! slot_i = (start + i * step) mod capacity
//! ```
//! Capacity is a power of two and the step is odd, so the sequence visits
//! every slot exactly once before repeating.

mod report;
mod table;

pub use report::{HashTableReport, SlotStatus};
pub use table::{double_hash, hash, HashTable};

/// Key type of the index
pub type Key = i64;

/// A key/value pair stored in a slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record<V> {
    pub key: Key,
    pub value: V,
}

impl<V> Record<V> {
    pub fn new(key: Key, value: V) -> Self {
        Self { key, value }
    }
}

/// State of one slot in the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot<V> {
    /// Never used since the last resize; ends every probe chain
    Empty,

    /// Held a record that was deleted; probe chains pass through it
    Tombstone,

    /// Holds a live record
    Occupied(Record<V>),
}

impl<V> Slot<V> {
    /// Whether an insert may claim this slot
    pub fn is_vacant(&self) -> bool {
        !matches!(self, Slot::Occupied(_))
    }
}
