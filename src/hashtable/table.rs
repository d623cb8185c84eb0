//! Hash table implementation
//!
//! Closed hashing with double-hash probing and tombstone deletion.

use std::iter;

use crate::error::{BuddyError, Result};

use super::{HashTableReport, Key, Record, Slot, SlotStatus};

/// Open-addressing table keyed by integers
///
/// The table doubles as soon as the live count reaches half its capacity,
/// before the triggering record is placed. Doubling rehashes live records
/// only, which drops every tombstone.
pub struct HashTable<V> {
    /// Slot array, length is a power of two
    slots: Vec<Slot<V>>,

    /// Live (occupied) slot count
    len: usize,

    /// Live count that triggers a resize (`capacity / 2`)
    threshold: usize,

    /// Capacities reached by resizing since the last `take_expansions`
    expansions: Vec<usize>,
}

impl<V> HashTable<V> {
    /// Create a table with `capacity` slots (power of two, at least 2)
    pub fn new(capacity: usize) -> Result<Self> {
        if !capacity.is_power_of_two() || capacity < 2 {
            return Err(BuddyError::InvalidCapacity(format!(
                "hash table size must be a power of two >= 2, got {}",
                capacity
            )));
        }

        Ok(Self {
            slots: empty_slots(capacity),
            len: 0,
            threshold: capacity / 2,
            expansions: Vec::new(),
        })
    }

    /// Insert a record
    ///
    /// Returns `false` without touching the table if `key` is already present.
    pub fn insert(&mut self, key: Key, value: V) -> bool {
        if self.contains_key(key) {
            return false;
        }

        if self.len == self.threshold {
            self.resize();
        }

        // A vacant slot always exists below the threshold; resizing again
        // covers the impossible case instead of panicking.
        let index = loop {
            if let Some(index) = self.find_vacant(key) {
                break index;
            }
            self.resize();
        };

        self.slots[index] = Slot::Occupied(Record::new(key, value));
        self.len += 1;
        true
    }

    /// Look up the value stored for `key`
    pub fn search(&self, key: Key) -> Option<&V> {
        self.find_occupied(key).and_then(|index| match &self.slots[index] {
            Slot::Occupied(record) => Some(&record.value),
            _ => None,
        })
    }

    /// Remove `key`, leaving a tombstone in its slot
    pub fn delete(&mut self, key: Key) -> Option<V> {
        let index = self.find_occupied(key)?;

        if let Slot::Occupied(record) = std::mem::replace(&mut self.slots[index], Slot::Tombstone) {
            self.len -= 1;
            return Some(record.value);
        }
        None
    }

    pub fn contains_key(&self, key: Key) -> bool {
        self.find_occupied(key).is_some()
    }

    /// Slot-by-slot status report
    pub fn dump(&self) -> HashTableReport {
        let slots = self
            .slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| match slot {
                Slot::Empty => None,
                Slot::Tombstone => Some((index, SlotStatus::Tombstone)),
                Slot::Occupied(record) => Some((index, SlotStatus::Occupied(record.key))),
            })
            .collect();

        HashTableReport {
            slots,
            total_records: self.len,
            capacity: self.capacity(),
        }
    }

    /// Iterate over live records in slot order
    pub fn iter(&self) -> impl Iterator<Item = (Key, &V)> {
        self.slots.iter().filter_map(|slot| match slot {
            Slot::Occupied(record) => Some((record.key, &record.value)),
            _ => None,
        })
    }

    /// Drain the capacities reached by resizing, oldest first
    pub fn take_expansions(&mut self) -> Vec<usize> {
        std::mem::take(&mut self.expansions)
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Number of live records
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Live count at which the next insert resizes
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Number of tombstoned slots
    pub fn tombstones(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| matches!(slot, Slot::Tombstone))
            .count()
    }

    /// Raw slot state
    pub fn slot(&self, index: usize) -> Option<&Slot<V>> {
        self.slots.get(index)
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Slot holding `key`, if any
    ///
    /// Stops at the first empty slot; tombstones do not end the chain.
    fn find_occupied(&self, key: Key) -> Option<usize> {
        for index in probe_sequence(key, self.capacity()) {
            match &self.slots[index] {
                Slot::Empty => return None,
                Slot::Occupied(record) if record.key == key => return Some(index),
                _ => {}
            }
        }
        None
    }

    /// First empty or tombstoned slot on `key`'s probe chain
    fn find_vacant(&self, key: Key) -> Option<usize> {
        probe_sequence(key, self.capacity()).find(|&index| self.slots[index].is_vacant())
    }

    /// Double the slot array and rehash live records
    fn resize(&mut self) {
        let new_capacity = self.capacity() * 2;
        let old_slots = std::mem::replace(&mut self.slots, empty_slots(new_capacity));
        self.threshold = new_capacity / 2;

        for slot in old_slots {
            if let Slot::Occupied(record) = slot {
                // The new table has no tombstones and is at most half full
                if let Some(index) = probe_sequence(record.key, new_capacity)
                    .find(|&index| matches!(self.slots[index], Slot::Empty))
                {
                    self.slots[index] = Slot::Occupied(record);
                }
            }
        }

        self.expansions.push(new_capacity);
        tracing::info!("Hash table expanded to {} records", new_capacity);
    }
}

/// Home slot of a key
pub fn hash(key: Key, capacity: usize) -> usize {
    key.rem_euclid(capacity as Key) as usize
}

/// Probe step of a key; always odd, hence coprime with a power-of-two capacity
pub fn double_hash(key: Key, capacity: usize) -> usize {
    let capacity = capacity as Key;
    (key.div_euclid(capacity).rem_euclid(capacity / 2) * 2 + 1) as usize
}

/// Slots visited by `key`, each exactly once
fn probe_sequence(key: Key, capacity: usize) -> impl Iterator<Item = usize> {
    let step = double_hash(key, capacity);
    iter::successors(Some(hash(key, capacity)), move |&index| {
        Some((index + step) % capacity)
    })
    .take(capacity)
}

fn empty_slots<V>(capacity: usize) -> Vec<Slot<V>> {
    iter::repeat_with(|| Slot::Empty).take(capacity).collect()
}
