//! Policy Cache - A bounded in-memory key/value cache
//!
//! Provides interchangeable eviction policies (unlimited, FIFO, LRU and LFU
//! with LRU tie-break) behind a single [`CachePolicy`] interface.
//!
//! # Example
//! ```
//! use policy_cache::{CachePolicy, LruCache};
//!
//! let mut cache = LruCache::new();
//! cache.put("A", "Hello");
//! assert_eq!(cache.get(&"A"), Some(&"Hello"));
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod policy;
pub mod shared;

pub use cache::{CacheStats, EvictionListener, EvictionLog, DEFAULT_CAPACITY};
pub use config::Config;
pub use error::{CacheError, Result};
pub use policy::{
    build, build_with_listener, CachePolicy, DynCache, FifoCache, LfuCache, LruCache, PolicyKind,
    UnlimitedCache,
};
pub use shared::SharedCache;
