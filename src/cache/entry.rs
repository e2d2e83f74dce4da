//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

// == Cache Entry ==
/// A stored value stamped with its insertion time.
///
/// Entries carry no TTL of their own; the owning store applies one uniform
/// TTL at read time, against an injected clock.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    /// The stored value
    pub value: T,
    /// Insertion timestamp in clock milliseconds
    pub inserted_at: u64,
}

impl<T> CacheEntry<T> {
    // == Constructor ==
    /// Creates a new cache entry stamped at `now_ms`.
    pub fn new(value: T, now_ms: u64) -> Self {
        Self {
            value,
            inserted_at: now_ms,
        }
    }

    // == Is Expired ==
    /// Checks whether the entry has outlived `ttl_ms` as of `now_ms`.
    ///
    /// Boundary condition: an entry is expired once the elapsed time is
    /// greater than or equal to the TTL, so it is stale the instant the
    /// full TTL has passed.
    pub fn is_expired(&self, now_ms: u64, ttl_ms: u64) -> bool {
        now_ms.saturating_sub(self.inserted_at) >= ttl_ms
    }

    // == Age ==
    /// Milliseconds since insertion as of `now_ms`.
    pub fn age_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.inserted_at)
    }
}
