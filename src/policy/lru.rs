//! LRU policy: evicts the least recently inserted, updated or read key.

use std::fmt::Display;
use std::hash::Hash;

use tracing::trace;

use crate::cache::{BoundedStore, CacheStats, DiscardPrinter, EvictionListener, OrderList};
use crate::error::Result;
use crate::policy::{CachePolicy, PolicyKind};

/// Least-recently-used cache.
///
/// Keys are kept in an [`OrderList`] where:
/// - Front = least recently used (next victim)
/// - Back = most recently used
///
/// Both `put` (insert or overwrite) and a successful `get` move the key to
/// the back.
pub struct LruCache<K, V> {
    store: BoundedStore<K, V>,
    recency: OrderList<K>,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone + Display,
{
    /// Creates an empty cache holding
    /// [`DEFAULT_CAPACITY`](crate::cache::DEFAULT_CAPACITY) entries that
    /// prints `DISCARD: <key>` on eviction.
    pub fn new() -> Self {
        Self {
            store: BoundedStore::with_default_capacity(DiscardPrinter),
            recency: OrderList::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::with_listener(capacity, DiscardPrinter)
    }
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    pub fn with_listener<L>(capacity: usize, listener: L) -> Result<Self>
    where
        L: EvictionListener<K, V> + 'static,
    {
        Ok(Self {
            store: BoundedStore::bounded(capacity, listener)?,
            recency: OrderList::new(),
        })
    }

    /// The key that the next capacity-driven eviction would remove.
    pub fn peek_lru(&self) -> Option<&K> {
        self.recency.front()
    }
}

impl<K, V> Default for LruCache<K, V>
where
    K: Hash + Eq + Clone + Display,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq + Clone, V> CachePolicy<K, V> for LruCache<K, V> {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Lru
    }

    fn put(&mut self, key: K, value: V) {
        if self.recency.move_to_back(&key) {
            trace!(policy = "lru", "Refreshed recency on overwrite");
        } else {
            if self.store.is_full() {
                if let Some(victim) = self.recency.pop_front() {
                    self.store.evict(victim);
                }
            }
            self.recency.push_back(key.clone());
        }
        self.store.insert(key, value);
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        self.recency.move_to_back(key);
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

    fn snapshot(&self) -> Vec<(&K, &V)> {
        self.recency
            .iter()
            .filter_map(|key| self.store.peek(key).map(|value| (key, value)))
            .collect()
    }

    fn stats(&self) -> CacheStats {
        self.store.stats()
    }
}
