//! Error types for the cache library
//!
//! Provides unified error handling using thiserror.
//!
//! `put` and `get` never fail: a missing key is reported through `Option`.
//! Only construction and configuration can produce a `CacheError`.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for cache construction and configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// A bounded policy was asked to hold zero entries
    #[error("Invalid capacity: {0} (a bounded cache must hold at least 1 entry)")]
    InvalidCapacity(usize),

    /// Policy name did not match any known eviction policy
    #[error("Unknown eviction policy: {0}")]
    UnknownPolicy(String),

    /// A configuration value could not be parsed
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

// == Result Type Alias ==
/// Convenience Result type for the cache library.
pub type Result<T> = std::result::Result<T, CacheError>;
