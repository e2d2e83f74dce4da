//! Configuration Module
//!
//! Handles cache configuration, validated at construction so a zero
//! capacity or zero TTL fails fast instead of silently behaving as an
//! unbounded or always-expired cache.

use std::env;
use std::time::Duration;

use crate::error::{ConfigError, Result};

// == Defaults ==
/// Default maximum number of entries.
pub const DEFAULT_CAPACITY: usize = 100;

/// Default entry TTL in seconds.
pub const DEFAULT_TTL_SECS: u64 = 300;

/// Cache configuration parameters.
///
/// Values can also be loaded from environment variables with sensible
/// defaults.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of entries the cache can hold
    capacity: usize,
    /// Time-to-live applied uniformly to all entries
    ttl: Duration,
}

impl CacheConfig {
    /// Creates a validated configuration.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidCapacity`] when `capacity` is zero and
    /// [`ConfigError::InvalidTtl`] when `ttl` is zero.
    pub fn new(capacity: usize, ttl: Duration) -> Result<Self> {
        if capacity == 0 {
            return Err(ConfigError::InvalidCapacity(capacity));
        }
        if ttl.is_zero() {
            return Err(ConfigError::InvalidTtl);
        }
        Ok(Self { capacity, ttl })
    }

    /// Creates a CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum cache entries (default: 100)
    /// - `CACHE_TTL_SECS` - Entry TTL in seconds (default: 300)
    ///
    /// Unparseable values fall back to the defaults; zero values are
    /// rejected like any other construction.
    pub fn from_env() -> Result<Self> {
        let capacity = env::var("CACHE_CAPACITY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_CAPACITY);
        let ttl_secs = env::var("CACHE_TTL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TTL_SECS);

        Self::new(capacity, Duration::from_secs(ttl_secs))
    }

    /// Maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Entry time-to-live.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// TTL in milliseconds, the unit the clock and entries work in.
    pub(crate) fn ttl_ms(&self) -> u64 {
        self.ttl.as_millis() as u64
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            ttl: Duration::from_secs(DEFAULT_TTL_SECS),
        }
    }
}
