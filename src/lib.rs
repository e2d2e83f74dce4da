//! Request Cache - In-memory request caching and coalescing
//!
//! Provides a capacity-bounded, TTL-expiring key/value store with FIFO
//! eviction, single-flight deduplication of concurrent asynchronous
//! producers, and named operation timing.
//!
//! The usual composition: ask [`CacheStore`] for a key; on a miss, run the
//! producer through [`RequestCoalescer`] so concurrent misses for the same
//! key share one fetch, then store the result back.

pub mod cache;
pub mod clock;
pub mod coalesce;
pub mod config;
pub mod error;
pub mod timing;

pub use cache::{CacheEntry, CacheStats, CacheStore};
pub use clock::{Clock, ManualClock, SystemClock};
pub use coalesce::RequestCoalescer;
pub use config::CacheConfig;
pub use error::ConfigError;
pub use timing::{OperationTimer, TimingRecord};
