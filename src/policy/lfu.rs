//! LFU policy: evicts the least frequently used key, and among keys tied at
//! the lowest frequency, the one used least recently.
//!
//! Keys are grouped into buckets by use count. Each bucket is an
//! [`OrderList`] ordered by last use, so the victim is always the front of
//! the bucket holding the minimum count, found without scanning.

use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;

use tracing::trace;

use crate::cache::{BoundedStore, CacheStats, DiscardPrinter, EvictionListener, OrderList};
use crate::error::Result;
use crate::policy::{CachePolicy, PolicyKind};

/// Least-frequently-used cache with least-recently-used tie-break.
///
/// Frequency rules:
/// - a new key starts at 1
/// - a successful `get` adds 1 and marks the key most recently used
/// - `put` on an existing key replaces the value and marks the key most
///   recently used, leaving its frequency unchanged
///
/// A key's counter is dropped together with its entry on eviction.
pub struct LfuCache<K, V> {
    store: BoundedStore<K, V>,
    counts: HashMap<K, u64>,
    /// Keys per use count, least recently used at the front
    buckets: HashMap<u64, OrderList<K>>,
    /// Lowest count with a non-empty bucket (0 while empty)
    min_count: u64,
}

impl<K, V> LfuCache<K, V>
where
    K: Hash + Eq + Clone + Display,
{
    /// Creates an empty cache holding
    /// [`DEFAULT_CAPACITY`](crate::cache::DEFAULT_CAPACITY) entries that
    /// prints `DISCARD: <key>` on eviction.
    pub fn new() -> Self {
        Self::from_store(BoundedStore::with_default_capacity(DiscardPrinter))
    }

    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::with_listener(capacity, DiscardPrinter)
    }
}

impl<K, V> LfuCache<K, V>
where
    K: Hash + Eq + Clone,
{
    pub fn with_listener<L>(capacity: usize, listener: L) -> Result<Self>
    where
        L: EvictionListener<K, V> + 'static,
    {
        Ok(Self::from_store(BoundedStore::bounded(capacity, listener)?))
    }

    fn from_store(store: BoundedStore<K, V>) -> Self {
        Self {
            store,
            counts: HashMap::new(),
            buckets: HashMap::new(),
            min_count: 0,
        }
    }

    /// Use count of a stored key.
    pub fn frequency(&self, key: &K) -> Option<u64> {
        self.counts.get(key).copied()
    }

    // == Bump ==
    /// Moves a key from its bucket to the next one, as most recently used.
    fn bump(&mut self, key: &K) {
        let Some(count) = self.counts.get_mut(key) else {
            return;
        };
        let old = *count;
        *count += 1;

        if let Some(bucket) = self.buckets.get_mut(&old) {
            bucket.remove(key);
            if bucket.is_empty() {
                self.buckets.remove(&old);
                if self.min_count == old {
                    self.min_count = old + 1;
                }
            }
        }
        self.buckets
            .entry(old + 1)
            .or_default()
            .push_back(key.clone());
    }

    // == Evict ==
    /// Evicts the least recently used key among those with the lowest count.
    fn evict_one(&mut self) {
        let min_count = self.min_count;
        let Some(bucket) = self.buckets.get_mut(&min_count) else {
            return;
        };
        let Some(victim) = bucket.pop_front() else {
            return;
        };
        if bucket.is_empty() {
            self.buckets.remove(&min_count);
        }
        trace!(policy = "lfu", frequency = min_count, "Discarding least frequently used");
        self.counts.remove(&victim);
        self.store.evict(victim);
    }
}

impl<K, V> Default for LfuCache<K, V>
where
    K: Hash + Eq + Clone + Display,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq + Clone, V> CachePolicy<K, V> for LfuCache<K, V> {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Lfu
    }

    fn put(&mut self, key: K, value: V) {
        match self.counts.get(&key) {
            Some(count) => {
                if let Some(bucket) = self.buckets.get_mut(count) {
                    bucket.move_to_back(&key);
                }
            }
            None => {
                if self.store.is_full() {
                    self.evict_one();
                }
                self.counts.insert(key.clone(), 1);
                self.buckets.entry(1).or_default().push_back(key.clone());
                self.min_count = 1;
            }
        }
        self.store.insert(key, value);
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        self.bump(key);
        self.store.lookup(key)
    }

    fn contains(&self, key: &K) -> bool {
        self.store.contains_key(key)
    }

    fn len(&self) -> usize {
        self.store.len()
    }

    fn capacity(&self) -> Option<usize> {
        self.store.capacity()
    }

    /// Lists entries by ascending frequency, least recently used first
    /// within a frequency.
    fn snapshot(&self) -> Vec<(&K, &V)> {
        let mut counts: Vec<&u64> = self.buckets.keys().collect();
        counts.sort_unstable();
        counts
            .into_iter()
            .filter_map(|count| self.buckets.get(count))
            .flat_map(|bucket| bucket.iter())
            .filter_map(|key| self.store.peek(key).map(|value| (key, value)))
            .collect()
    }

    fn stats(&self) -> CacheStats {
        self.store.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::EvictionLog;

    fn lfu(capacity: usize) -> (LfuCache<&'static str, i32>, EvictionLog<&'static str>) {
        let log = EvictionLog::new();
        let cache = LfuCache::with_listener(capacity, log.clone()).unwrap();
        (cache, log)
    }

    #[test]
    fn test_lfu_frequency_counting() {
        let (mut cache, _log) = lfu(4);

        cache.put("A", 1);
        assert_eq!(cache.frequency(&"A"), Some(1));

        cache.get(&"A");
        cache.get(&"A");
        assert_eq!(cache.frequency(&"A"), Some(3));

        // Overwrite keeps the count flat
        cache.put("A", 2);
        assert_eq!(cache.frequency(&"A"), Some(3));
        assert_eq!(cache.frequency(&"missing"), None);
    }

    #[test]
    fn test_lfu_evicts_lru_among_ties() {
        let (mut cache, log) = lfu(4);

        cache.put("A", 1);
        cache.put("B", 2);
        cache.put("C", 3);
        cache.put("D", 4);
        cache.get(&"A");
        cache.get(&"A");
        cache.put("E", 5);

        assert_eq!(log.lines(), vec!["DISCARD: B"]);
        assert!(cache.contains(&"A"));
        assert_eq!(cache.len(), 4);
    }

    #[test]
    fn test_lfu_evicts_single_least_frequent() {
        let (mut cache, log) = lfu(3);

        cache.put("A", 1);
        cache.put("B", 2);
        cache.put("C", 3);
        cache.get(&"A");
        cache.get(&"C");
        // B is the only key at frequency 1, despite not being the oldest
        cache.put("D", 4);

        assert_eq!(log.keys(), vec!["B"]);
    }

    #[test]
    fn test_lfu_new_key_is_next_victim_when_alone_at_minimum() {
        let (mut cache, log) = lfu(2);

        cache.put("A", 1);
        cache.put("B", 2);
        cache.get(&"A");
        cache.get(&"B");
        cache.put("C", 3);
        // A and B tie at 2, A was used least recently
        assert_eq!(log.keys(), vec!["A"]);

        // C sits alone at frequency 1
        cache.put("D", 4);
        assert_eq!(log.keys(), vec!["A", "C"]);
    }

    #[test]
    fn test_lfu_overwrite_refreshes_recency_within_frequency() {
        let (mut cache, log) = lfu(3);

        cache.put("A", 1);
        cache.put("B", 2);
        cache.put("C", 3);
        cache.put("A", 10);
        cache.put("D", 4);

        assert_eq!(log.keys(), vec!["B"]);
        assert_eq!(cache.get(&"A"), Some(&10));
    }

    #[test]
    fn test_lfu_counter_dropped_with_evicted_entry() {
        let (mut cache, log) = lfu(1);

        cache.put("A", 1);
        cache.get(&"A");
        cache.get(&"A");
        cache.put("B", 2);
        assert_eq!(log.keys(), vec!["A"]);
        assert_eq!(cache.frequency(&"A"), None);

        // A comes back as a fresh key
        cache.put("A", 3);
        assert_eq!(cache.frequency(&"A"), Some(1));
    }

    #[test]
    fn test_lfu_get_missing_key() {
        let (mut cache, _log) = lfu(2);

        assert_eq!(cache.get(&"missing"), None);
        assert_eq!(cache.frequency(&"missing"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_lfu_snapshot_orders_by_frequency_then_recency() {
        let (mut cache, _log) = lfu(4);

        cache.put("A", 1);
        cache.put("B", 2);
        cache.put("C", 3);
        cache.get(&"A");
        cache.get(&"B");
        cache.get(&"A");

        let keys: Vec<_> = cache.snapshot().into_iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["C", "B", "A"]);
    }
}
