//! Cache Module
//!
//! Building blocks shared by every eviction policy: bounded storage,
//! O(1) key ordering, statistics and eviction notification.

mod notify;
mod order;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use notify::{
    discard_line, DiscardPrinter, EvictionListener, EvictionLog, FnListener, NoopListener,
};
pub use order::OrderList;
pub use stats::CacheStats;
pub use store::BoundedStore;

// == Public Constants ==
/// Capacity used by the zero-argument constructors of bounded policies
pub const DEFAULT_CAPACITY: usize = 4;
