//! Memory Table Module
//!
//! Synchronous storage engine behind [`MemoryStore`](crate::store::MemoryStore):
//! a HashMap of wire strings with lazy TTL expiry and LRU eviction.

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;

use crate::error::StoreError;
use crate::store::{Expiry, LruTracker, StoreStats, StoredEntry, MAX_KEY_LENGTH, MAX_VALUE_SIZE};

// == Memory Table ==
#[derive(Debug)]
pub struct MemoryTable {
    entries: HashMap<String, StoredEntry>,
    lru: LruTracker,
    stats: StoreStats,
    max_entries: usize,
}

impl MemoryTable {
    /// Creates a table holding at most `max_entries` keys.
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: StoreStats::new(),
            max_entries,
        }
    }

    // == Set ==
    /// Stores `value` under `key`, replacing any previous value and expiry.
    ///
    /// When full, the least recently used key is evicted first.
    pub fn set(&mut self, key: &str, value: String, ttl: Duration) -> Result<(), StoreError> {
        if key.len() > MAX_KEY_LENGTH {
            return Err(StoreError::InvalidKey(format!(
                "Key exceeds maximum length of {} bytes",
                MAX_KEY_LENGTH
            )));
        }

        if value.len() > MAX_VALUE_SIZE {
            return Err(StoreError::InvalidValue(format!(
                "Value exceeds maximum size of {} bytes",
                MAX_VALUE_SIZE
            )));
        }

        let is_overwrite = self.entries.contains_key(key);

        if !is_overwrite && self.entries.len() >= self.max_entries {
            match self.lru.evict_oldest() {
                Some(evicted_key) => {
                    self.entries.remove(&evicted_key);
                    self.stats.record_eviction();
                }
                None => {
                    return Err(StoreError::Full(
                        "Store is full and eviction failed".to_string(),
                    ));
                }
            }
        }

        self.entries
            .insert(key.to_string(), StoredEntry::new(value, ttl));
        self.lru.touch(key);
        self.stats.set_total_entries(self.entries.len());

        Ok(())
    }

    // == Get ==
    /// Returns the live value under `key`, dropping it if expired.
    pub fn get(&mut self, key: &str) -> Option<String> {
        if !self.purge_if_expired(key) {
            if let Some(entry) = self.entries.get(key) {
                let value = entry.value.clone();
                self.stats.record_hit();
                self.lru.touch(key);
                return Some(value);
            }
        }

        self.stats.record_miss();
        None
    }

    // == TTL ==
    /// Returns the remaining lifetime of a live key.
    pub fn ttl(&mut self, key: &str) -> Option<Expiry> {
        if self.purge_if_expired(key) {
            return None;
        }
        self.entries.get(key).map(StoredEntry::expiry)
    }

    // == Contains ==
    pub fn contains(&mut self, key: &str) -> bool {
        !self.purge_if_expired(key) && self.entries.contains_key(key)
    }

    // == Delete ==
    /// Removes `key`, returning whether it was present.
    pub fn delete(&mut self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        if removed {
            self.lru.remove(key);
            self.stats.set_total_entries(self.entries.len());
        }
        removed
    }

    // == Cleanup Expired ==
    /// Removes every expired entry, returning how many were dropped.
    pub fn cleanup_expired(&mut self) -> usize {
        let now = Instant::now();
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.entries.remove(key);
            self.lru.remove(key);
        }

        self.stats.record_expirations(expired_keys.len());
        self.stats.set_total_entries(self.entries.len());
        expired_keys.len()
    }

    // == Stats ==
    pub fn stats(&self) -> StoreStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops `key` if its TTL has elapsed. Returns true if it was dropped.
    fn purge_if_expired(&mut self, key: &str) -> bool {
        let expired = self
            .entries
            .get(key)
            .is_some_and(StoredEntry::is_expired);

        if expired {
            self.entries.remove(key);
            self.lru.remove(key);
            self.stats.record_expirations(1);
            self.stats.set_total_entries(self.entries.len());
        }
        expired
    }
}
