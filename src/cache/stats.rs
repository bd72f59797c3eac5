//! Cache Statistics Module
//!
//! Tracks lookups, writes and evictions for a single cache instance.

use serde::Serialize;

// == Cache Stats ==
/// Counters describing what a cache has done since construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Lookups that found the key
    pub hits: u64,
    /// Lookups for a key that was not stored
    pub misses: u64,
    /// Entries displaced to respect capacity
    pub evictions: u64,
    /// Puts that created a new entry
    pub insertions: u64,
    /// Puts that replaced the value of an existing entry
    pub updates: u64,
    /// Current number of entries in the cache
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    // == Record Write ==
    /// Counts a put as an update when the key was already stored, otherwise
    /// as an insertion.
    pub fn record_write(&mut self, replaced: bool) {
        if replaced {
            self.updates += 1;
        } else {
            self.insertions += 1;
        }
    }

    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
