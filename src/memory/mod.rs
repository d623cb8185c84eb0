//! Memory Pool Module
//!
//! A growable byte arena managed with the buddy system.
//!
//! ## Responsibilities
//! - Place opaque payloads into power-of-two blocks
//! - Hand out generation-checked handles to those blocks
//! - Split large blocks on demand, coalesce buddies on free
//! - Double the arena when no free block is large enough
//!
//! ## Size Classes
//! ```text
//! class:  0    1    2    3    ...   k
//! size:   2    4    8    16   ...   2^(k+1)
//! ```
//! Each class owns one free list ordered by ascending position. A block of
//! size `s` always starts at a multiple of `s`, so its buddy lives at
//! `position ^ s`.

mod free_list;
mod handle;
mod pool;
mod report;

pub use free_list::{ClassIter, FreeBlock, FreeLists, NodeId};
pub use handle::MemHandle;
pub use pool::MemPool;
pub use report::{FreeBlockReport, FreeTier};

/// Smallest block the arena hands out (size class 0)
pub const MIN_BLOCK_SIZE: usize = 2;

/// Round a payload length up to the block size that will hold it
///
/// Zero-length payloads still reserve a minimum block.
pub fn true_block_size(length: usize) -> usize {
    length.next_power_of_two().max(MIN_BLOCK_SIZE)
}

/// Size class index for a power-of-two block size
///
/// `2 → 0`, `4 → 1`, `8 → 2`, ...
pub fn class_index(block_size: usize) -> usize {
    debug_assert!(block_size.is_power_of_two() && block_size >= MIN_BLOCK_SIZE);
    block_size.trailing_zeros() as usize - 1
}

/// Block size served by a size class index
pub fn class_size(index: usize) -> usize {
    MIN_BLOCK_SIZE << index
}

/// Whether two equally sized free blocks can merge into one of double size
///
/// Buddies differ only in the bit selected by their size, so OR-ing that bit
/// in maps both to the same value.
pub fn is_buddy(a: &FreeBlock, b: &FreeBlock) -> bool {
    a.size == b.size
        && a.position != b.position
        && (a.position | a.size) == (b.position | b.size)
}
