//! Shared Cache Module
//!
//! Policies are single-threaded. `SharedCache` puts one exclusive lock around
//! a cache instance so several threads can use it; every operation holds the
//! lock for its whole duration.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::cache::CacheStats;
use crate::policy::{CachePolicy, DynCache, PolicyKind};

/// Thread-safe handle to a cache. Clones share the same instance.
pub struct SharedCache<K, V> {
    inner: Arc<Mutex<DynCache<K, V>>>,
}

impl<K, V> SharedCache<K, V> {
    pub fn new(cache: DynCache<K, V>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
        }
    }

    pub fn put(&self, key: K, value: V) {
        self.inner.lock().put(key, value);
    }

    /// Looks up a key and clones the value out of the lock.
    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.inner.lock().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn kind(&self) -> PolicyKind {
        self.inner.lock().kind()
    }

    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats()
    }

    /// Runs `f` with the lock held, for sequences that must not interleave
    /// with other threads.
    pub fn with<R>(&self, f: impl FnOnce(&mut (dyn CachePolicy<K, V> + Send)) -> R) -> R {
        let mut guard = self.inner.lock();
        f(&mut **guard)
    }
}

impl<K, V> Clone for SharedCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
