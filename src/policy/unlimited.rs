//! Unlimited policy: a plain key/value store that never evicts.

use std::fmt::Display;
use std::hash::Hash;

use crate::cache::{BoundedStore, CacheStats, DiscardPrinter, EvictionListener, OrderList};
use crate::policy::{CachePolicy, PolicyKind};

/// Cache without a capacity limit.
///
/// Serves as the correctness baseline for the bounded policies. Insertion
/// order is kept only so [`snapshot`](CachePolicy::snapshot) is stable.
pub struct UnlimitedCache<K, V> {
    store: BoundedStore<K, V>,
    inserted: OrderList<K>,
}

impl<K, V> UnlimitedCache<K, V>
where
    K: Hash + Eq + Clone + Display,
{
    pub fn new() -> Self {
        Self::with_listener(DiscardPrinter)
    }
}

impl<K, V> UnlimitedCache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// The listener is never called; it is accepted so every policy can be
    /// built the same way.
    pub fn with_listener<L>(listener: L) -> Self
    where
        L: EvictionListener<K, V> + 'static,
    {
        Self {
            store: BoundedStore::unbounded(listener),
            inserted: OrderList::new(),
        }
    }
}

impl<K, V> Default for UnlimitedCache<K, V>
where
    K: Hash + Eq + Clone + Display,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq + Clone, V> CachePolicy<K, V> for UnlimitedCache<K, V> {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Unlimited
    }

    fn put(&mut self, key: K, value: V) {
        if !self.store.contains_key(&key) {
            self.inserted.push_back(key.clone());
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
        None
    }

    fn snapshot(&self) -> Vec<(&K, &V)> {
        self.inserted
            .iter()
            .filter_map(|key| self.store.peek(key).map(|value| (key, value)))
            .collect()
    }

    fn stats(&self) -> CacheStats {
        self.store.stats()
    }
}
