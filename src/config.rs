//! Configuration Module
//!
//! Selects the eviction policy and capacity from environment variables.

use std::env;

use serde::{Deserialize, Serialize};

use crate::cache::DEFAULT_CAPACITY;
use crate::error::{CacheError, Result};
use crate::policy::PolicyKind;

/// Environment variable naming the eviction policy
pub const POLICY_VAR: &str = "CACHE_POLICY";
/// Environment variable holding the maximum entry count
pub const CAPACITY_VAR: &str = "CACHE_CAPACITY";

/// Cache construction parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Eviction policy to build
    pub policy: PolicyKind,
    /// Maximum number of entries (ignored by the unlimited policy)
    pub capacity: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_POLICY` - `unlimited`, `fifo`, `lru` or `lfu` (default: lru)
    /// - `CACHE_CAPACITY` - Maximum cache entries (default: 4)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a Config from any variable source.
    ///
    /// Unset variables fall back to defaults. Set but unparseable values are
    /// errors rather than silently replaced.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let policy = match lookup(POLICY_VAR) {
            Some(raw) => raw.parse()?,
            None => defaults.policy,
        };

        let capacity = match lookup(CAPACITY_VAR) {
            Some(raw) => raw.trim().parse().map_err(|_| {
                CacheError::InvalidConfig(format!("{}={} is not a number", CAPACITY_VAR, raw))
            })?,
            None => defaults.capacity,
        };

        if policy.is_bounded() && capacity == 0 {
            return Err(CacheError::InvalidCapacity(capacity));
        }

        Ok(Self { policy, capacity })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            policy: PolicyKind::Lru,
            capacity: DEFAULT_CAPACITY,
        }
    }
}
