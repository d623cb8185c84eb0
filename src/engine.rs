//! Engine Module
//!
//! The storage facade that ties the hash index to the memory pool.
//!
//! ## Responsibilities
//! - Place payloads in the memory pool and index their handles by key
//! - Resolve key → handle → bytes on lookup
//! - Free a record's block when its key is deleted
//! - Execute parsed commands and stream their responses

use std::io::{BufRead, Write};

use bytes::Bytes;

use crate::config::Config;
use crate::error::{BuddyError, Result};
use crate::hashtable::{HashTable, HashTableReport, Key};
use crate::memory::{FreeBlockReport, MemHandle, MemPool};
use crate::protocol::{Command, CommandParser, Expansion, PrintTarget, Response};
use crate::seminar::Seminar;

/// The record store
///
/// ## Ownership
/// - `pool` owns every payload byte and all free-list bookkeeping
/// - `table` owns the key → handle mapping; handles are plain copies
///
/// The engine is single-writer: every method runs to completion, including
/// any growth of the pool or the index, before returning.
pub struct Engine {
    /// Engine configuration
    config: Config,

    /// Key → handle index
    table: HashTable<MemHandle>,

    /// Byte arena holding payloads
    pool: MemPool,
}

impl Engine {
    /// Create an empty engine with the given config
    pub fn open(config: Config) -> Result<Self> {
        config.validate()?;

        let pool = MemPool::from_config(&config)?;
        let table = HashTable::new(config.initial_hash_size)?;

        tracing::debug!(
            "Engine opened: pool={} bytes, hash table={} slots",
            config.initial_pool_size,
            config.initial_hash_size
        );

        Ok(Self {
            config,
            table,
            pool,
        })
    }

    /// Open with explicit sizes (convenience method)
    pub fn with_sizes(pool_size: usize, hash_size: usize) -> Result<Self> {
        Self::open(
            Config::builder()
                .initial_pool_size(pool_size)
                .initial_hash_size(hash_size)
                .build(),
        )
    }

    /// Store a payload under `key`
    ///
    /// Steps:
    /// 1. Reject duplicates before touching the pool
    /// 2. Copy the payload into the pool
    /// 3. Index the handle, freeing the block again if the index refuses it
    pub fn insert(&mut self, key: Key, payload: &[u8]) -> Result<MemHandle> {
        if self.table.contains_key(key) {
            return Err(BuddyError::DuplicateKey(key));
        }

        let handle = self.pool.insert(payload)?;
        if !self.table.insert(key, handle) {
            self.pool.delete(handle)?;
            return Err(BuddyError::DuplicateKey(key));
        }

        tracing::debug!("Inserted key {} as {}", key, handle);
        Ok(handle)
    }

    /// Copy out the payload stored under `key`
    pub fn search(&self, key: Key) -> Result<Option<Bytes>> {
        match self.table.search(key) {
            Some(handle) => self.pool.get(handle).map(Some),
            None => Ok(None),
        }
    }

    /// Remove `key` and free its block
    ///
    /// Returns the (now dead) handle that was removed. The block is freed
    /// before the key is tombstoned, so a rejected handle leaves both
    /// structures untouched.
    pub fn delete(&mut self, key: Key) -> Result<Option<MemHandle>> {
        let Some(&handle) = self.table.search(key) else {
            return Ok(None);
        };

        self.pool.delete(handle)?;
        self.table.delete(key);
        tracing::debug!("Deleted key {} ({})", key, handle);
        Ok(Some(handle))
    }

    /// Slot-by-slot view of the index
    pub fn dump_hashtable(&self) -> HashTableReport {
        self.table.dump()
    }

    /// Free lists of the memory pool
    pub fn dump_blocks(&self) -> FreeBlockReport {
        self.pool.dump()
    }

    /// Drain growth of both structures since the last call, pool first
    pub fn take_expansions(&mut self) -> Vec<Expansion> {
        let pool = self.pool.take_expansions().into_iter().map(Expansion::MemoryPool);
        let table = self.table.take_expansions().into_iter().map(Expansion::HashTable);
        pool.chain(table).collect()
    }

    /// Execute a command
    ///
    /// Duplicate ids and missing records are reported through the response;
    /// only real failures (allocation, decoding, handle misuse) are errors.
    pub fn execute(&mut self, command: Command) -> Result<Response> {
        tracing::trace!("Executing {:?}", command.command_type());

        // Growth from earlier direct calls belongs to no command
        self.take_expansions();

        match command {
            Command::Insert { seminar } => {
                let payload = seminar.to_bytes()?;
                match self.insert(seminar.id, &payload) {
                    Ok(handle) => Ok(Response::Inserted {
                        seminar,
                        size: handle.size(),
                        expansions: self.take_expansions(),
                    }),
                    Err(BuddyError::DuplicateKey(id)) => Ok(Response::DuplicateId { id }),
                    Err(e) => Err(e),
                }
            }
            Command::Delete { id } => Ok(match self.delete(id)? {
                Some(_) => Response::Deleted { id },
                None => Response::DeleteMissing { id },
            }),
            Command::Search { id } => Ok(match self.search(id)? {
                Some(payload) => Response::Found {
                    seminar: Seminar::from_bytes(&payload)?,
                },
                None => Response::SearchMissing { id },
            }),
            Command::Print { target } => Ok(match target {
                PrintTarget::HashTable => Response::HashTable(self.dump_hashtable()),
                PrintTarget::Blocks => Response::Blocks(self.dump_blocks()),
            }),
        }
    }

    /// Run every command from `input`, writing each response to `output`
    ///
    /// Stops at the first parse or execution error. Returns the number of
    /// commands executed.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, output: &mut W) -> Result<usize> {
        let mut executed = 0;

        for command in CommandParser::new(input) {
            let response = self.execute(command?)?;
            writeln!(output, "{}", response)?;
            executed += 1;
        }

        tracing::debug!("Executed {} commands", executed);
        Ok(executed)
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Number of live records
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Handle currently indexed under `key`
    pub fn handle(&self, key: Key) -> Option<MemHandle> {
        self.table.search(key).copied()
    }

    /// The hash index
    pub fn table(&self) -> &HashTable<MemHandle> {
        &self.table
    }

    /// The memory pool
    pub fn pool(&self) -> &MemPool {
        &self.pool
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
