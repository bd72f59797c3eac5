//! FIFO policy: evicts the oldest inserted key that is still present.

use std::fmt::Display;
use std::hash::Hash;

use tracing::trace;

use crate::cache::{BoundedStore, CacheStats, DiscardPrinter, EvictionListener, OrderList};
use crate::error::Result;
use crate::policy::{CachePolicy, PolicyKind};

/// First-in-first-out cache.
///
/// Overwriting an existing key replaces its value in place; the key keeps its
/// original insertion position. Reads never change the order.
pub struct FifoCache<K, V> {
    store: BoundedStore<K, V>,
    /// Insertion order, oldest at the front
    queue: OrderList<K>,
}

impl<K, V> FifoCache<K, V>
where
    K: Hash + Eq + Clone + Display,
{
    /// Creates an empty cache holding
    /// [`DEFAULT_CAPACITY`](crate::cache::DEFAULT_CAPACITY) entries that
    /// prints `DISCARD: <key>` on eviction.
    pub fn new() -> Self {
        Self {
            store: BoundedStore::with_default_capacity(DiscardPrinter),
            queue: OrderList::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::with_listener(capacity, DiscardPrinter)
    }
}

impl<K, V> FifoCache<K, V>
where
    K: Hash + Eq + Clone,
{
    pub fn with_listener<L>(capacity: usize, listener: L) -> Result<Self>
    where
        L: EvictionListener<K, V> + 'static,
    {
        Ok(Self {
            store: BoundedStore::bounded(capacity, listener)?,
            queue: OrderList::new(),
        })
    }
}

impl<K, V> Default for FifoCache<K, V>
where
    K: Hash + Eq + Clone + Display,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq + Clone, V> CachePolicy<K, V> for FifoCache<K, V> {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Fifo
    }

    fn put(&mut self, key: K, value: V) {
        if !self.store.contains_key(&key) {
            if self.store.is_full() {
                if let Some(oldest) = self.queue.pop_front() {
                    trace!(policy = "fifo", "Discarding oldest insertion");
                    self.store.evict(oldest);
                }
            }
            self.queue.push_back(key.clone());
        }
        self.store.insert(key, value);
    }

    fn get(&mut self, key: &K) -> Option<&V> {
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
        self.queue
            .iter()
            .filter_map(|key| self.store.peek(key).map(|value| (key, value)))
            .collect()
    }

    fn stats(&self) -> CacheStats {
        self.store.stats()
    }
}
