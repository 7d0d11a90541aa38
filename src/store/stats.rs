//! Store Statistics Module
//!
//! Counters kept by the memory store.

use serde::Serialize;

// == Store Stats ==
/// Counters kept by a memory table, reported by `GET /stats`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StoreStats {
    /// Reads that found a live key
    pub hits: u64,
    /// Reads that found nothing (absent or expired)
    pub misses: u64,
    /// Keys dropped to make room
    pub evictions: u64,
    /// Keys dropped because their TTL elapsed
    pub expirations: u64,
    /// Live keys currently held
    pub total_entries: usize,
}

impl StoreStats {
    // == Constructor ==
    /// Starts every counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// hits / (hits + misses), or 0.0 before any read.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Record Hit ==
    /// Counts a read that found a live key.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    /// Counts a read that came back empty.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Eviction ==
    /// Counts a key dropped to make room.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    // == Record Expirations ==
    /// Adds `count` keys dropped because their TTL elapsed.
    pub fn record_expirations(&mut self, count: usize) {
        self.expirations += count as u64;
    }

    // == Update Entry Count ==
    /// Replaces the live key count.
    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
