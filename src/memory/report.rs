//! Free-block dump
//!
//! Snapshot of the free lists for the reporting layer.

use std::fmt;

/// Free blocks of one size class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreeTier {
    /// Block size served by the class
    pub block_size: usize,

    /// Offsets of the free blocks, ascending
    pub positions: Vec<usize>,
}

/// All non-empty free lists at the time of the dump
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreeBlockReport {
    pub tiers: Vec<FreeTier>,
}

impl FreeBlockReport {
    /// True when the arena has no free block at all
    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// Free offsets for a block size, if that class has any
    pub fn positions(&self, block_size: usize) -> Option<&[usize]> {
        self.tiers
            .iter()
            .find(|tier| tier.block_size == block_size)
            .map(|tier| tier.positions.as_slice())
    }
}

impl fmt::Display for FreeBlockReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Freeblock List:")?;
        if self.is_empty() {
            return write!(f, "There are no freeblocks in the memory pool");
        }

        let mut first = true;
        for tier in &self.tiers {
            if !first {
                writeln!(f)?;
            }
            first = false;

            write!(f, "{}:", tier.block_size)?;
            for position in &tier.positions {
                write!(f, " {}", position)?;
            }
        }
        Ok(())
    }
}
