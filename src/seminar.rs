//! Seminar records
//!
//! The domain record stored by the seminar manager. The engine never looks
//! inside it: a seminar is encoded to bytes before insertion and decoded
//! after lookup.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One seminar as described in a command file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seminar {
    pub id: i64,
    pub title: String,

    /// Date/time stamp, kept as written (e.g. `0610051600`)
    pub date: String,

    /// Length in minutes
    pub length: i32,

    /// Venue coordinates
    pub x: i16,
    pub y: i16,

    pub cost: i32,
    pub keywords: Vec<String>,
    pub description: String,
}

impl Seminar {
    /// Encode to the opaque payload stored in the memory pool
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a payload produced by [`Seminar::to_bytes`]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}

impl fmt::Display for Seminar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ID: {}, Title: {}", self.id, self.title)?;
        writeln!(
            f,
            "Date: {}, Length: {}, X: {}, Y: {}, Cost: {}",
            self.date, self.length, self.x, self.y, self.cost
        )?;
        writeln!(f, "Description: {}", self.description)?;
        write!(f, "Keywords: {}", self.keywords.join(", "))
    }
}
