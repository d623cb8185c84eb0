//! Memory handles
//!
//! A handle names one live allocation. The pool stamps every allocation with
//! a fresh generation; freeing it retires that generation, so a stale copy of
//! the handle is rejected instead of touching bytes now owned by someone else.

use std::fmt;

use super::true_block_size;

/// Capability for the bytes of one allocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemHandle {
    position: usize,
    size: usize,
    generation: u64,
}

impl MemHandle {
    pub(crate) fn new(position: usize, size: usize, generation: u64) -> Self {
        Self {
            position,
            size,
            generation,
        }
    }

    /// Offset of the first payload byte
    pub fn position(&self) -> usize {
        self.position
    }

    /// Logical payload length, as requested by the caller
    pub fn size(&self) -> usize {
        self.size
    }

    /// Allocation stamp checked on every access
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Size of the power-of-two block reserved for this payload
    pub fn block_size(&self) -> usize {
        true_block_size(self.size)
    }
}

impl fmt::Display for MemHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Handle(pos={}, size={}, gen={})",
            self.position, self.size, self.generation
        )
    }
}
