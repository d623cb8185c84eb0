//! Hash table dump

use std::fmt;

use super::Key;

/// Reported state of a non-empty slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotStatus {
    Tombstone,
    Occupied(Key),
}

/// Slot-by-slot snapshot of the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashTableReport {
    /// Non-empty slots as `(slot index, status)`, ascending by index
    pub slots: Vec<(usize, SlotStatus)>,

    /// Number of live records
    pub total_records: usize,

    /// Slot count at the time of the dump
    pub capacity: usize,
}

impl HashTableReport {
    /// Status of a given slot, `None` when it is empty
    pub fn status(&self, index: usize) -> Option<SlotStatus> {
        self.slots
            .iter()
            .find(|(slot, _)| *slot == index)
            .map(|(_, status)| *status)
    }
}

impl fmt::Display for HashTableReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Hashtable:")?;
        for (index, status) in &self.slots {
            match status {
                SlotStatus::Tombstone => writeln!(f, "{}: TOMBSTONE", index)?,
                SlotStatus::Occupied(key) => writeln!(f, "{}: {}", index, key)?,
            }
        }
        write!(f, "total records: {}", self.total_records)
    }
}
