//! Bounded Store Module
//!
//! The storage half shared by every policy: a key/value map with an optional
//! capacity limit, statistics, and the eviction listener. Policies own one
//! store each and keep their ordering metadata next to it.

use std::collections::HashMap;
use std::hash::Hash;

use tracing::debug;

use crate::cache::{CacheStats, EvictionListener, DEFAULT_CAPACITY};
use crate::error::{CacheError, Result};

// == Bounded Store ==
/// Key/value storage with a fixed maximum entry count.
///
/// The store never chooses a victim itself. A policy checks [`is_full`]
/// before inserting a new key and hands the victim to [`evict`].
///
/// [`is_full`]: BoundedStore::is_full
/// [`evict`]: BoundedStore::evict
pub struct BoundedStore<K, V> {
    /// Key-value storage
    entries: HashMap<K, V>,
    /// Maximum number of entries, None = unlimited
    capacity: Option<usize>,
    stats: CacheStats,
    listener: Box<dyn EvictionListener<K, V>>,
}

impl<K: Hash + Eq, V> BoundedStore<K, V> {
    // == Constructors ==
    /// Creates an empty store holding at most `capacity` entries.
    ///
    /// Returns `CacheError::InvalidCapacity` when `capacity` is zero.
    pub fn bounded<L>(capacity: usize, listener: L) -> Result<Self>
    where
        L: EvictionListener<K, V> + 'static,
    {
        if capacity == 0 {
            return Err(CacheError::InvalidCapacity(capacity));
        }
        Ok(Self::build(Some(capacity), Box::new(listener)))
    }

    /// Creates an empty store holding [`DEFAULT_CAPACITY`] entries.
    pub fn with_default_capacity<L>(listener: L) -> Self
    where
        L: EvictionListener<K, V> + 'static,
    {
        Self::build(Some(DEFAULT_CAPACITY), Box::new(listener))
    }

    /// Creates an empty store with no capacity limit.
    pub fn unbounded<L>(listener: L) -> Self
    where
        L: EvictionListener<K, V> + 'static,
    {
        Self::build(None, Box::new(listener))
    }

    fn build(capacity: Option<usize>, listener: Box<dyn EvictionListener<K, V>>) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity.unwrap_or(0)),
            capacity,
            stats: CacheStats::new(),
            listener,
        }
    }

    // == Lookup ==
    /// Returns the stored value and records a hit or a miss.
    pub fn lookup(&mut self, key: &K) -> Option<&V> {
        match self.entries.get(key) {
            Some(value) => {
                self.stats.record_hit();
                Some(value)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    /// Returns the stored value without touching statistics.
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    // == Insert ==
    /// Inserts or overwrites an entry. Returns the replaced value, if any.
    ///
    /// Capacity is not checked here; the owning policy evicts first.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let previous = self.entries.insert(key, value);
        self.stats.record_write(previous.is_some());
        self.stats.set_total_entries(self.entries.len());
        previous
    }

    // == Evict ==
    /// Removes a victim chosen by the policy and notifies the listener.
    ///
    /// Returns the evicted value, or None if the key was not stored.
    pub fn evict(&mut self, key: K) -> Option<V> {
        let value = self.entries.remove(&key)?;
        self.stats.record_eviction();
        self.stats.set_total_entries(self.entries.len());
        debug!(
            evictions = self.stats.evictions,
            remaining = self.entries.len(),
            "Evicted entry to respect capacity"
        );
        self.listener.on_evict(&key, &value);
        Some(value)
    }

    // == Capacity ==
    /// True when a new key cannot be stored without evicting first.
    pub fn is_full(&self) -> bool {
        self.capacity
            .map_or(false, |capacity| self.entries.len() >= capacity)
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns a copy of the statistics with the current entry count.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Length ==
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{EvictionLog, NoopListener};

    #[test]
    fn test_store_new() {
        let store: BoundedStore<&str, i32> = BoundedStore::bounded(4, NoopListener).unwrap();
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        assert_eq!(store.capacity(), Some(4));
        assert!(!store.is_full());
    }

    #[test]
    fn test_store_default_capacity() {
        let store: BoundedStore<&str, i32> = BoundedStore::with_default_capacity(NoopListener);
        assert_eq!(store.capacity(), Some(DEFAULT_CAPACITY));
    }

    #[test]
    fn test_store_zero_capacity_rejected() {
        let result: Result<BoundedStore<&str, i32>> = BoundedStore::bounded(0, NoopListener);
        assert!(matches!(result, Err(CacheError::InvalidCapacity(0))));
    }

    #[test]
    fn test_store_insert_and_lookup() {
        let mut store = BoundedStore::bounded(4, NoopListener).unwrap();

        assert_eq!(store.insert("key1", "value1"), None);
        assert_eq!(store.lookup(&"key1"), Some(&"value1"));
        assert_eq!(store.lookup(&"missing"), None);

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.insertions, 1);
        assert_eq!(stats.total_entries, 1);
    }

    #[test]
    fn test_store_overwrite() {
        let mut store = BoundedStore::bounded(4, NoopListener).unwrap();

        store.insert("key1", "value1");
        assert_eq!(store.insert("key1", "value2"), Some("value1"));

        assert_eq!(store.peek(&"key1"), Some(&"value2"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.stats().updates, 1);
        // peek records nothing
        assert_eq!(store.stats().hits, 0);
    }

    #[test]
    fn test_store_is_full_at_capacity() {
        let mut store = BoundedStore::bounded(2, NoopListener).unwrap();

        store.insert("a", 1);
        assert!(!store.is_full());
        store.insert("b", 2);
        assert!(store.is_full());
    }

    #[test]
    fn test_store_evict_notifies_listener() {
        let log = EvictionLog::new();
        let mut store = BoundedStore::bounded(2, log.clone()).unwrap();

        store.insert("a", 1);
        store.insert("b", 2);

        assert_eq!(store.evict("a"), Some(1));
        assert_eq!(store.evict("missing"), None);

        assert_eq!(log.keys(), vec!["a"]);
        assert_eq!(store.len(), 1);
        assert_eq!(store.stats().evictions, 1);
    }

    #[test]
    fn test_unbounded_store_never_full() {
        let mut store = BoundedStore::unbounded(NoopListener);

        for i in 0..1000 {
            store.insert(i, i * 2);
        }

        assert!(!store.is_full());
        assert_eq!(store.capacity(), None);
        assert_eq!(store.len(), 1000);
    }
}
