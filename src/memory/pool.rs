//! Memory pool implementation
//!
//! Buddy allocator over a single growable byte buffer.

use std::collections::HashMap;

use bytes::Bytes;

use crate::config::Config;
use crate::error::{BuddyError, Result};

use super::{
    class_index, is_buddy, true_block_size, FreeBlock, FreeBlockReport, FreeLists, FreeTier,
    MemHandle, MIN_BLOCK_SIZE,
};

/// Byte arena with power-of-two block classes
///
/// ## Invariants
/// - `pool.len()` is a power of two
/// - every free or allocated block has a power-of-two size and starts at a
///   multiple of that size
/// - free blocks and live allocations partition `0..pool.len()`
/// - no two free blocks of the same class are buddies
pub struct MemPool {
    /// The arena itself
    pool: Vec<u8>,

    /// One position-ordered free list per size class
    free_lists: FreeLists,

    /// Live allocations keyed by position
    live: HashMap<usize, MemHandle>,

    /// Stamp for the next allocation
    next_generation: u64,

    /// Growth stops here
    max_pool_size: usize,

    /// Sizes reached by growth since the last `take_expansions`
    expansions: Vec<usize>,
}

impl MemPool {
    /// Create a pool of `pool_size` bytes that may grow without practical bound
    pub fn new(pool_size: usize) -> Result<Self> {
        Self::with_limit(pool_size, Config::default().max_pool_size.max(pool_size))
    }

    /// Create a pool of `pool_size` bytes that never grows past `max_pool_size`
    pub fn with_limit(pool_size: usize, max_pool_size: usize) -> Result<Self> {
        if !pool_size.is_power_of_two() || pool_size < MIN_BLOCK_SIZE {
            return Err(BuddyError::InvalidCapacity(format!(
                "memory pool size must be a power of two >= {}, got {}",
                MIN_BLOCK_SIZE, pool_size
            )));
        }
        if max_pool_size < pool_size {
            return Err(BuddyError::InvalidCapacity(format!(
                "max pool size {} is smaller than pool size {}",
                max_pool_size, pool_size
            )));
        }

        let mut free_lists = FreeLists::new(class_index(pool_size) + 1);
        free_lists.insert(FreeBlock::new(0, pool_size));

        Ok(Self {
            pool: vec![0; pool_size],
            free_lists,
            live: HashMap::new(),
            next_generation: 1,
            max_pool_size,
            expansions: Vec::new(),
        })
    }

    /// Create a pool sized by the config
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::with_limit(config.initial_pool_size, config.max_pool_size)
    }

    /// Copy a payload into the arena
    ///
    /// Steps:
    /// 1. Round the length up to a block size
    /// 2. Take the head of the smallest non-empty class that fits,
    ///    doubling the arena until one exists
    /// 3. Split the block down to the required size
    /// 4. Copy the payload and stamp a handle
    pub fn insert(&mut self, payload: &[u8]) -> Result<MemHandle> {
        let required = true_block_size(payload.len());
        let block = self.allocate_block(required)?;

        let start = block.position;
        self.pool[start..start + payload.len()].copy_from_slice(payload);

        let handle = MemHandle::new(start, payload.len(), self.next_generation);
        self.next_generation += 1;
        self.live.insert(start, handle);

        tracing::debug!(
            "Allocated {} bytes at {} (block {})",
            payload.len(),
            start,
            block.size
        );
        Ok(handle)
    }

    /// Copy out the payload a handle names
    pub fn get(&self, handle: &MemHandle) -> Result<Bytes> {
        self.check_live(handle)?;

        let start = handle.position();
        Ok(Bytes::copy_from_slice(&self.pool[start..start + handle.size()]))
    }

    /// Return a handle's block to the free lists
    ///
    /// The handle (and every copy of it) is dead afterwards.
    pub fn delete(&mut self, handle: MemHandle) -> Result<()> {
        self.check_live(&handle)?;
        self.live.remove(&handle.position());

        tracing::debug!(
            "Freed {} bytes at {} (block {})",
            handle.size(),
            handle.position(),
            handle.block_size()
        );
        self.release(FreeBlock::new(handle.position(), handle.block_size()));
        Ok(())
    }

    /// Snapshot of every non-empty free list
    pub fn dump(&self) -> FreeBlockReport {
        let tiers = self
            .free_lists
            .tiers()
            .filter_map(|(block_size, blocks)| {
                let positions: Vec<usize> = blocks.map(|block| block.position).collect();
                (!positions.is_empty()).then_some(FreeTier {
                    block_size,
                    positions,
                })
            })
            .collect();

        FreeBlockReport { tiers }
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Current arena size in bytes
    pub fn pool_size(&self) -> usize {
        self.pool.len()
    }

    /// Upper bound for growth
    pub fn max_pool_size(&self) -> usize {
        self.max_pool_size
    }

    /// Number of size classes (grows by one per doubling)
    pub fn class_count(&self) -> usize {
        self.free_lists.class_count()
    }

    /// Bytes held by free blocks
    pub fn free_bytes(&self) -> usize {
        self.free_lists.iter().map(|block| block.size).sum()
    }

    /// Bytes reserved by live allocations, padding included
    pub fn allocated_bytes(&self) -> usize {
        self.live.values().map(MemHandle::block_size).sum()
    }

    /// Number of live allocations
    pub fn live_allocations(&self) -> usize {
        self.live.len()
    }

    /// Every free block, smallest class first, each class in position order
    pub fn free_blocks(&self) -> Vec<FreeBlock> {
        self.free_lists.iter().collect()
    }

    /// Every live handle, in no particular order
    pub fn handles(&self) -> impl Iterator<Item = &MemHandle> {
        self.live.values()
    }

    /// Drain the pool sizes reached by growth, oldest first
    pub fn take_expansions(&mut self) -> Vec<usize> {
        std::mem::take(&mut self.expansions)
    }

    /// Whether the handle still names a live allocation
    pub fn is_live(&self, handle: &MemHandle) -> bool {
        self.live.get(&handle.position()) == Some(handle)
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Find or make a free block of exactly `required` bytes and unlink it
    fn allocate_block(&mut self, required: usize) -> Result<FreeBlock> {
        let class = class_index(required);

        let id = loop {
            if let Some(id) = self.free_lists.first_fit(class) {
                break id;
            }
            self.grow(required)?;
        };

        let mut block = self.free_lists.remove(id);
        while block.size > required {
            block = self.split_block(block);
        }
        Ok(block)
    }

    /// Halve a block: the high half goes back on its free list,
    /// the low half is returned to the caller
    fn split_block(&mut self, block: FreeBlock) -> FreeBlock {
        let half = block.size / 2;
        let high = FreeBlock::new(block.position + half, half);
        self.free_lists.insert(high);

        tracing::trace!("Split block {}+{} into two of {}", block.position, block.size, half);
        FreeBlock::new(block.position, half)
    }

    /// Double the arena; the new high half becomes one free block
    fn grow(&mut self, requested: usize) -> Result<()> {
        let old_size = self.pool.len();
        let new_size = match old_size.checked_mul(2) {
            Some(size) if size <= self.max_pool_size => size,
            _ => {
                return Err(BuddyError::OutOfMemory {
                    requested,
                    pool_size: old_size,
                })
            }
        };

        self.pool.resize(new_size, 0);
        self.free_lists.add_tier();
        self.release(FreeBlock::new(old_size, old_size));

        self.expansions.push(new_size);
        tracing::info!("Memory pool expanded to {} bytes", new_size);
        Ok(())
    }

    /// Link a free block and merge it with its buddy for as long as possible
    ///
    /// Lists are position-ordered and blocks are aligned, so a block's buddy,
    /// when free, is always its immediate neighbour.
    fn release(&mut self, block: FreeBlock) {
        let mut block = block;
        loop {
            let id = self.free_lists.insert(block);

            let buddy = [self.free_lists.prev(id), self.free_lists.next(id)]
                .into_iter()
                .flatten()
                .find(|&neighbour| is_buddy(&block, &self.free_lists.block(neighbour)));

            let Some(buddy_id) = buddy else {
                break;
            };

            let buddy = self.free_lists.remove(buddy_id);
            self.free_lists.remove(id);

            let merged = FreeBlock::new(block.position.min(buddy.position), block.size * 2);
            tracing::debug!(
                "Merged buddies {} and {} into block {}+{}",
                block.position,
                buddy.position,
                merged.position,
                merged.size
            );
            block = merged;
        }
    }

    /// Reject handles that are stale, forged, or already freed
    fn check_live(&self, handle: &MemHandle) -> Result<()> {
        match self.live.get(&handle.position()) {
            Some(live) if live == handle => Ok(()),
            Some(live) => {
                tracing::warn!("Stale handle {} (live: {})", handle, live);
                Err(BuddyError::InvalidHandle(format!(
                    "{} does not match live allocation {}",
                    handle, live
                )))
            }
            None => {
                tracing::warn!("Handle {} names no live allocation", handle);
                Err(BuddyError::InvalidHandle(format!(
                    "{} names no live allocation",
                    handle
                )))
            }
        }
    }
}
