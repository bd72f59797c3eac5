//! Policy Module
//!
//! The [`CachePolicy`] capability interface and its four implementations.
//! Every policy owns a [`BoundedStore`](crate::cache::BoundedStore) plus the
//! ordering metadata it needs to pick a victim in O(1).

mod fifo;
mod lfu;
mod lru;
mod unlimited;

use std::fmt;
use std::fmt::Display;
use std::hash::Hash;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cache::{CacheStats, DiscardPrinter, EvictionListener};
use crate::config::Config;
use crate::error::{CacheError, Result};

pub use fifo::FifoCache;
pub use lfu::LfuCache;
pub use lru::LruCache;
pub use unlimited::UnlimitedCache;

// == Cache Policy ==
/// Operations every eviction policy offers.
///
/// `None` plays the role of the absence-marker: `get` returns it for a
/// missing key, and the `*_opt` variants treat a `None` argument as a no-op.
pub trait CachePolicy<K, V> {
    /// Which eviction strategy this cache applies.
    fn kind(&self) -> PolicyKind;

    /// Inserts or overwrites an entry, evicting one entry first if the key is
    /// new and the cache is at capacity.
    fn put(&mut self, key: K, value: V);

    /// Returns the stored value and refreshes the policy's metadata.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Checks membership without counting as a use.
    fn contains(&self, key: &K) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of entries, `None` for an unlimited cache.
    fn capacity(&self) -> Option<usize>;

    /// Read-only view of the stored entries.
    ///
    /// Bounded policies list the next eviction victim first.
    fn snapshot(&self) -> Vec<(&K, &V)>;

    fn stats(&self) -> CacheStats;

    /// `put` that ignores a missing key or value.
    fn put_opt(&mut self, key: Option<K>, value: Option<V>) {
        if let (Some(key), Some(value)) = (key, value) {
            self.put(key, value);
        }
    }

    /// `get` that answers `None` for a missing key without recording a miss.
    fn get_opt(&mut self, key: Option<&K>) -> Option<&V> {
        match key {
            Some(key) => self.get(key),
            None => None,
        }
    }
}

// == Policy Kind ==
/// Names the eviction strategies this crate implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    /// No eviction, the store grows without bound
    Unlimited,
    /// Evicts the oldest inserted key
    Fifo,
    /// Evicts the least recently used key
    Lru,
    /// Evicts the least frequently used key, oldest use first among ties
    Lfu,
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 4] = [
        PolicyKind::Unlimited,
        PolicyKind::Fifo,
        PolicyKind::Lru,
        PolicyKind::Lfu,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyKind::Unlimited => "unlimited",
            PolicyKind::Fifo => "fifo",
            PolicyKind::Lru => "lru",
            PolicyKind::Lfu => "lfu",
        }
    }

    pub fn is_bounded(&self) -> bool {
        !matches!(self, PolicyKind::Unlimited)
    }
}

impl Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyKind {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unlimited" | "basic" | "none" => Ok(PolicyKind::Unlimited),
            "fifo" => Ok(PolicyKind::Fifo),
            "lru" => Ok(PolicyKind::Lru),
            "lfu" => Ok(PolicyKind::Lfu),
            other => Err(CacheError::UnknownPolicy(other.to_string())),
        }
    }
}

/// A policy chosen at runtime.
pub type DynCache<K, V> = Box<dyn CachePolicy<K, V> + Send>;

// == Factory ==
/// Builds a cache of the given kind that prints `DISCARD: <key>` on eviction.
///
/// `capacity` is ignored for [`PolicyKind::Unlimited`].
pub fn build<K, V>(kind: PolicyKind, capacity: usize) -> Result<DynCache<K, V>>
where
    K: Hash + Eq + Clone + Display + Send + 'static,
    V: Send + 'static,
{
    build_with_listener(kind, capacity, DiscardPrinter)
}

/// Builds a cache of the given kind reporting evictions to `listener`.
pub fn build_with_listener<K, V, L>(
    kind: PolicyKind,
    capacity: usize,
    listener: L,
) -> Result<DynCache<K, V>>
where
    K: Hash + Eq + Clone + Send + 'static,
    V: Send + 'static,
    L: EvictionListener<K, V> + 'static,
{
    let cache: DynCache<K, V> = match kind {
        PolicyKind::Unlimited => Box::new(UnlimitedCache::with_listener(listener)),
        PolicyKind::Fifo => Box::new(FifoCache::with_listener(capacity, listener)?),
        PolicyKind::Lru => Box::new(LruCache::with_listener(capacity, listener)?),
        PolicyKind::Lfu => Box::new(LfuCache::with_listener(capacity, listener)?),
    };
    info!(policy = %kind, capacity = ?cache.capacity(), "Cache created");
    Ok(cache)
}

/// Builds the cache described by a [`Config`].
pub fn from_config<K, V>(config: &Config) -> Result<DynCache<K, V>>
where
    K: Hash + Eq + Clone + Display + Send + 'static,
    V: Send + 'static,
{
    build(config.policy, config.capacity)
}
