//! Store Module
//!
//! The key-value capability the cache façade delegates persistence to, and
//! an in-process implementation with TTL expiry and LRU eviction.

mod entry;
mod lru;
mod memory;
mod stats;
mod table;

#[cfg(test)]
mod property_tests;

use std::time::Duration;

use async_trait::async_trait;

use crate::error::StoreError;

// Re-export public types
pub use entry::StoredEntry;
pub use lru::LruTracker;
pub use memory::MemoryStore;
pub use stats::StoreStats;
pub use table::MemoryTable;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Maximum allowed value size in bytes
pub const MAX_VALUE_SIZE: usize = 1024 * 1024; // 1 MB

// == Expiry ==
/// Remaining lifetime of a stored key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiry {
    /// Key has no expiry
    Never,
    /// Key expires after the given duration
    In(Duration),
}

impl Expiry {
    /// Returns the remaining duration, or `None` for keys that never expire.
    pub fn remaining(self) -> Option<Duration> {
        match self {
            Expiry::Never => None,
            Expiry::In(remaining) => Some(remaining),
        }
    }
}

// == KvStore Trait ==
/// String-keyed, string-valued store with per-key expiry.
///
/// Implementations own connection handling and retries; callers see each
/// method as a single request/response. Dropping a returned future cancels
/// the call.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Writes `value` under `key`. A zero `ttl` stores the key without expiry.
    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), StoreError>;

    /// Reads the value under `key`, `None` when absent.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Reads the remaining lifetime of `key`, `None` when absent.
    async fn ttl(&self, key: &str) -> Result<Option<Expiry>, StoreError>;

    /// Returns 1 if `key` exists, 0 otherwise.
    async fn exists(&self, key: &str) -> Result<u64, StoreError>;

    /// Removes `key`. Removing an absent key succeeds.
    async fn delete(&self, key: &str) -> Result<(), StoreError>;
}
