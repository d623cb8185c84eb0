//! Command definitions
//!
//! Represents commands read from a command file.

use std::fmt;

use crate::hashtable::Key;
use crate::seminar::Seminar;

/// Command types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    Insert,
    Delete,
    Search,
    Print,
}

/// What a `print` command dumps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintTarget {
    /// Slot-by-slot view of the hash index
    HashTable,

    /// Free lists of the memory pool
    Blocks,
}

/// A parsed command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Store a seminar under its id
    Insert { seminar: Seminar },

    /// Remove a seminar by id
    Delete { id: Key },

    /// Look up a seminar by id
    Search { id: Key },

    /// Dump an internal structure
    Print { target: PrintTarget },
}

impl Command {
    /// Get the command type
    pub fn command_type(&self) -> CommandType {
        match self {
            Command::Insert { .. } => CommandType::Insert,
            Command::Delete { .. } => CommandType::Delete,
            Command::Search { .. } => CommandType::Search,
            Command::Print { .. } => CommandType::Print,
        }
    }
}

impl fmt::Display for PrintTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrintTarget::HashTable => write!(f, "hashtable"),
            PrintTarget::Blocks => write!(f, "blocks"),
        }
    }
}
