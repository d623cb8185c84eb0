//! Response definitions
//!
//! The outcome of one command, rendered as the text the seminar manager
//! prints for it.

use std::fmt;

use crate::hashtable::{HashTableReport, Key};
use crate::memory::FreeBlockReport;
use crate::seminar::Seminar;

/// Growth of one of the two structures while a command ran
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expansion {
    /// Memory pool doubled to this many bytes
    MemoryPool(usize),

    /// Hash table doubled to this many slots
    HashTable(usize),
}

impl fmt::Display for Expansion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expansion::MemoryPool(size) => write!(f, "Memory pool expanded to {} bytes", size),
            Expansion::HashTable(size) => write!(f, "Hash table expanded to {} records", size),
        }
    }
}

/// Result of executing a command
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// Seminar stored; `size` is its encoded length in bytes
    ///
    /// `expansions` lists the growth the insert caused, pool first.
    Inserted {
        seminar: Seminar,
        size: usize,
        expansions: Vec<Expansion>,
    },

    /// A record with this id already exists
    DuplicateId { id: Key },

    /// Record removed
    Deleted { id: Key },

    /// Nothing to delete
    DeleteMissing { id: Key },

    /// Search hit
    Found { seminar: Seminar },

    /// Search miss
    SearchMissing { id: Key },

    /// `print hashtable`
    HashTable(HashTableReport),

    /// `print blocks`
    Blocks(FreeBlockReport),
}

impl Response {
    /// False for the reported-but-non-fatal failures (duplicate, missing)
    pub fn is_success(&self) -> bool {
        !matches!(
            self,
            Response::DuplicateId { .. }
                | Response::DeleteMissing { .. }
                | Response::SearchMissing { .. }
        )
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Inserted {
                seminar,
                size,
                expansions,
            } => {
                for expansion in expansions {
                    writeln!(f, "{}", expansion)?;
                }
                writeln!(f, "Successfully inserted record with ID {}", seminar.id)?;
                writeln!(f, "{}", seminar)?;
                write!(f, "Size: {}", size)
            }
            Response::DuplicateId { id } => {
                write!(f, "Insert FAILED - There is already a record with ID {}", id)
            }
            Response::Deleted { id } => {
                write!(f, "Record with ID {} successfully deleted from the database", id)
            }
            Response::DeleteMissing { id } => {
                write!(f, "Delete Failed -- There is no record with ID {}", id)
            }
            Response::Found { seminar } => write!(f, "{}", seminar),
            Response::SearchMissing { id } => {
                write!(f, "Search FAILED -- There is no record with ID {}", id)
            }
            Response::HashTable(report) => write!(f, "{}", report),
            Response::Blocks(report) => write!(f, "{}", report),
        }
    }
}
