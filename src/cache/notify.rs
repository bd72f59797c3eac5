//! Eviction notification: a side channel reporting which key was displaced.
//!
//! The default listener prints `DISCARD: <key>` on stdout. Tests usually
//! install an [`EvictionLog`] instead and read the keys back.
//!
//! # Example
//! ```
//! use policy_cache::cache::EvictionLog;
//! use policy_cache::policy::{CachePolicy, FifoCache};
//!
//! let log = EvictionLog::new();
//! let mut cache = FifoCache::with_listener(1, log.clone()).unwrap();
//! cache.put("A", 1);
//! cache.put("B", 2);
//! assert_eq!(log.lines(), vec!["DISCARD: A".to_string()]);
//! ```

use std::fmt::Display;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

// == Eviction Listener ==
/// Callback invoked once for every entry a policy displaces.
///
/// Listeners run synchronously inside `put`, after the victim has left the
/// store and before the new entry is written.
pub trait EvictionListener<K, V>: Send {
    fn on_evict(&mut self, key: &K, value: &V);
}

/// Renders the notification line for an evicted key.
pub fn discard_line<K: Display>(key: &K) -> String {
    format!("DISCARD: {}", key)
}

// == Discard Printer ==
/// Writes `DISCARD: <key>` to stdout for every eviction.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardPrinter;

impl<K: Display, V> EvictionListener<K, V> for DiscardPrinter {
    fn on_evict(&mut self, key: &K, _value: &V) {
        let line = discard_line(key);
        debug!("{}", line);
        println!("{}", line);
    }
}

// == Eviction Log ==
/// Records evicted keys in order. Clones share the same log.
#[derive(Debug)]
pub struct EvictionLog<K> {
    keys: Arc<Mutex<Vec<K>>>,
}

impl<K> EvictionLog<K> {
    pub fn new() -> Self {
        Self {
            keys: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of evictions recorded so far.
    pub fn len(&self) -> usize {
        self.keys.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.lock().is_empty()
    }

    pub fn clear(&self) {
        self.keys.lock().clear();
    }
}

impl<K: Clone> EvictionLog<K> {
    /// Evicted keys, oldest eviction first.
    pub fn keys(&self) -> Vec<K> {
        self.keys.lock().clone()
    }
}

impl<K: Display> EvictionLog<K> {
    /// The `DISCARD: <key>` lines the default listener would have printed.
    pub fn lines(&self) -> Vec<String> {
        self.keys.lock().iter().map(discard_line).collect()
    }
}

impl<K> Clone for EvictionLog<K> {
    fn clone(&self) -> Self {
        Self {
            keys: Arc::clone(&self.keys),
        }
    }
}

impl<K> Default for EvictionLog<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone + Send, V> EvictionListener<K, V> for EvictionLog<K> {
    fn on_evict(&mut self, key: &K, _value: &V) {
        self.keys.lock().push(key.clone());
    }
}

// == Closure Adapter ==
/// An [`EvictionListener`] backed by a closure.
pub struct FnListener<F>(pub F);

impl<K, V, F> EvictionListener<K, V> for FnListener<F>
where
    F: FnMut(&K, &V) + Send,
{
    fn on_evict(&mut self, key: &K, value: &V) {
        (self.0)(key, value)
    }
}

/// Ignores every eviction.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopListener;

impl<K, V> EvictionListener<K, V> for NoopListener {
    fn on_evict(&mut self, _key: &K, _value: &V) {}
}
