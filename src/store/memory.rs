//! Memory Store Module
//!
//! In-process [`KvStore`] backed by a [`MemoryTable`] behind a tokio
//! `RwLock`. Clones share the same table.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::StoreError;
use crate::store::{Expiry, KvStore, MemoryTable, StoreStats};

// == Memory Store ==
#[derive(Debug, Clone)]
pub struct MemoryStore {
    table: Arc<RwLock<MemoryTable>>,
}

impl MemoryStore {
    /// Creates a store holding at most `max_entries` keys.
    pub fn new(max_entries: usize) -> Self {
        Self {
            table: Arc::new(RwLock::new(MemoryTable::new(max_entries))),
        }
    }

    /// Removes every expired key, returning how many were dropped.
    pub async fn cleanup_expired(&self) -> usize {
        self.table.write().await.cleanup_expired()
    }

    /// Snapshot of the store counters.
    pub async fn stats(&self) -> StoreStats {
        self.table.read().await.stats()
    }

    pub async fn len(&self) -> usize {
        self.table.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.table.read().await.is_empty()
    }
}

// Reads take the write lock: expired keys are purged and LRU order updated.
#[async_trait]
impl KvStore for MemoryStore {
    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), StoreError> {
        debug!(key, bytes = value.len(), ttl_ms = ttl.as_millis() as u64, "store set");
        self.table.write().await.set(key, value, ttl)
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let value = self.table.write().await.get(key);
        debug!(key, hit = value.is_some(), "store get");
        Ok(value)
    }

    async fn ttl(&self, key: &str) -> Result<Option<Expiry>, StoreError> {
        Ok(self.table.write().await.ttl(key))
    }

    async fn exists(&self, key: &str) -> Result<u64, StoreError> {
        Ok(u64::from(self.table.write().await.contains(key)))
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let removed = self.table.write().await.delete(key);
        debug!(key, removed, "store delete");
        Ok(())
    }
}
