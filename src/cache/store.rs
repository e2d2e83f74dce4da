//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with FIFO insertion-order
//! tracking and lazy TTL expiration.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, FifoTracker};
use crate::clock::{Clock, SystemClock};
use crate::config::CacheConfig;

// == Cache Store ==
/// Capacity-bounded, TTL-expiring key/value store with FIFO eviction.
///
/// Eviction is lazy: the oldest-inserted entry is dropped when a write
/// would exceed capacity, and expired entries are dropped by the read that
/// observes them. There is no background sweep, so [`len`](Self::len) is a
/// storage count that may include expired-but-unread entries.
pub struct CacheStore<T> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<T>>,
    /// Insertion-order tracker
    order: FifoTracker,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
    /// TTL in milliseconds applied uniformly to all entries
    ttl_ms: u64,
    /// Time source for insertion stamps and expiry checks
    clock: Arc<dyn Clock>,
}

impl<T> std::fmt::Debug for CacheStore<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheStore")
            .field("len", &self.entries.len())
            .field("capacity", &self.capacity)
            .field("ttl_ms", &self.ttl_ms)
            .finish()
    }
}

impl<T: Clone> CacheStore<T> {
    // == Constructors ==
    /// Creates a new CacheStore on the system clock.
    pub fn new(config: CacheConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Creates a new CacheStore reading time from the supplied clock.
    pub fn with_clock(config: CacheConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            order: FifoTracker::new(),
            stats: CacheStats::new(),
            capacity: config.capacity(),
            ttl_ms: config.ttl_ms(),
            clock,
        }
    }

    // == Set ==
    /// Stores a key-value pair, stamping it with the current time.
    ///
    /// If the key already exists, the value is replaced and its insertion
    /// order is refreshed. If a brand-new key would exceed capacity, the
    /// oldest-inserted entry is evicted first, so the capacity bound holds
    /// after every call. Replacing an existing key never evicts.
    pub fn set(&mut self, key: impl Into<String>, value: T) {
        let key = key.into();
        let is_replace = self.entries.contains_key(&key);

        if !is_replace && self.entries.len() >= self.capacity {
            if let Some(victim) = self.order.evict_oldest() {
                self.entries.remove(&victim);
                self.stats.record_eviction();
                debug!(evicted = %victim, "capacity reached, evicted oldest entry");
            }
        }

        let now = self.clock.now_ms();
        self.entries.insert(key.clone(), CacheEntry::new(value, now));
        self.order.record(&key);
        self.stats.set_total_entries(self.entries.len());
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// Returns the value only if the entry exists and is fresh. An entry
    /// found expired is removed as a side effect of the read; a stale value
    /// is never returned. Expiry is judged on every read against the clock,
    /// never by a background task.
    pub fn get(&mut self, key: &str) -> Option<T> {
        let now = self.clock.now_ms();

        let expired = match self.entries.get(key) {
            None => {
                self.stats.record_miss();
                return None;
            }
            Some(entry) => entry.is_expired(now, self.ttl_ms),
        };

        if expired {
            self.entries.remove(key);
            self.order.remove(key);
            self.stats.set_total_entries(self.entries.len());
            self.stats.record_expired();
            self.stats.record_miss();
            debug!(key, "expired entry removed on read");
            return None;
        }

        let value = self.entries.get(key).map(|entry| entry.value.clone());
        if value.is_some() {
            self.stats.record_hit();
        }
        value
    }

    // == Has ==
    /// Checks whether a fresh value exists for `key`.
    ///
    /// Applies the same expiry check as [`get`](Self::get), including the
    /// removal side effect, so a `true` answer always means a subsequent
    /// read within the TTL would succeed. Counts toward hit/miss stats
    /// like any read.
    pub fn has(&mut self, key: &str) -> bool {
        self.get(key).is_some()
    }

    // == Clear ==
    /// Removes all entries unconditionally.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
        self.stats.set_total_entries(0);
        debug!("cache cleared");
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Length ==
    /// Returns the current number of stored entries.
    ///
    /// This is a storage count: entries past their TTL that no read has
    /// touched yet are still included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries the store will hold.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::clock::ManualClock;

    fn test_config(capacity: usize, ttl_ms: u64) -> CacheConfig {
        CacheConfig::new(capacity, Duration::from_millis(ttl_ms)).unwrap()
    }

    fn test_store(capacity: usize, ttl_ms: u64) -> (CacheStore<String>, Arc<ManualClock>) {
        let clock = ManualClock::new(0);
        let store = CacheStore::with_clock(test_config(capacity, ttl_ms), clock.clone());
        (store, clock)
    }

    #[test]
    fn test_store_new() {
        let store: CacheStore<String> = CacheStore::new(test_config(100, 300_000));
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        assert_eq!(store.capacity(), 100);
    }

    #[test]
    fn test_store_set_and_get() {
        let (mut store, _clock) = test_store(100, 300_000);

        store.set("key1", "value1".to_string());
        let value = store.get("key1");

        assert_eq!(value, Some("value1".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let (mut store, _clock) = test_store(100, 300_000);

        assert_eq!(store.get("nonexistent"), None);
    }

    #[test]
    fn test_store_overwrite() {
        let (mut store, _clock) = test_store(100, 300_000);

        store.set("key1", "value1".to_string());
        store.set("key1", "value2".to_string());

        assert_eq!(store.get("key1"), Some("value2".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_has_applies_freshness() {
        let (mut store, clock) = test_store(100, 1_000);

        store.set("key1", "value1".to_string());
        assert!(store.has("key1"));
        assert!(!store.has("missing"));

        clock.advance(Duration::from_millis(1_000));
        assert!(!store.has("key1"));
    }

    #[test]
    fn test_store_ttl_expiration_on_read() {
        let (mut store, clock) = test_store(100, 1_000);

        store.set("key1", "value1".to_string());
        assert_eq!(store.get("key1"), Some("value1".to_string()));

        // One millisecond short of the TTL the entry is still fresh
        clock.advance(Duration::from_millis(999));
        assert_eq!(store.get("key1"), Some("value1".to_string()));

        // At the TTL boundary the entry is stale and removed by the read
        clock.advance(Duration::from_millis(1));
        assert_eq!(store.get("key1"), None);
        assert_eq!(store.len(), 0, "expired read should remove the entry");
    }

    #[test]
    fn test_store_len_counts_unread_expired_entries() {
        let (mut store, clock) = test_store(100, 1_000);

        store.set("key1", "value1".to_string());
        store.set("key2", "value2".to_string());
        clock.advance(Duration::from_millis(2_000));

        // No read has touched the expired entries yet
        assert_eq!(store.len(), 2);

        // A read of key1 removes only key1
        assert_eq!(store.get("key1"), None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_fifo_eviction() {
        let (mut store, _clock) = test_store(3, 300_000);

        store.set("key1", "value1".to_string());
        store.set("key2", "value2".to_string());
        store.set("key3", "value3".to_string());

        // Cache is full, adding key4 should evict key1 (oldest insertion)
        store.set("key4", "value4".to_string());

        assert_eq!(store.len(), 3);
        assert_eq!(store.get("key1"), None);
        assert!(store.get("key2").is_some());
        assert!(store.get("key3").is_some());
        assert!(store.get("key4").is_some());
    }

    #[test]
    fn test_store_get_does_not_refresh_order() {
        let (mut store, _clock) = test_store(3, 300_000);

        store.set("key1", "value1".to_string());
        store.set("key2", "value2".to_string());
        store.set("key3", "value3".to_string());

        // FIFO, not LRU: reading key1 does not protect it
        store.get("key1");
        store.set("key4", "value4".to_string());

        assert_eq!(store.get("key1"), None);
        assert!(store.get("key2").is_some());
    }

    #[test]
    fn test_store_reinsert_refreshes_order() {
        let (mut store, _clock) = test_store(3, 300_000);

        store.set("key1", "value1".to_string());
        store.set("key2", "value2".to_string());
        store.set("key3", "value3".to_string());

        // Re-inserting key1 counts as a new insertion, so key2 is now oldest
        store.set("key1", "value1b".to_string());
        store.set("key4", "value4".to_string());

        assert_eq!(store.get("key2"), None);
        assert_eq!(store.get("key1"), Some("value1b".to_string()));
    }

    #[test]
    fn test_store_replace_at_capacity_does_not_evict() {
        let (mut store, _clock) = test_store(2, 300_000);

        store.set("key1", "value1".to_string());
        store.set("key2", "value2".to_string());

        // Replacement, not a brand-new key: nothing should be evicted
        store.set("key2", "value2b".to_string());

        assert_eq!(store.len(), 2);
        assert!(store.get("key1").is_some());
        assert_eq!(store.get("key2"), Some("value2b".to_string()));
        assert_eq!(store.stats().evictions, 0);
    }

    #[test]
    fn test_store_capacity_two_scenario() {
        let clock = ManualClock::new(0);
        let mut store: CacheStore<i32> = CacheStore::with_clock(test_config(2, 1_000), clock);

        store.set("a", 1);
        store.set("b", 2);
        store.set("c", 3);

        assert_eq!(store.get("a"), None);
        assert_eq!(store.get("b"), Some(2));
        assert_eq!(store.get("c"), Some(3));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_store_clear() {
        let (mut store, _clock) = test_store(100, 300_000);

        store.set("key1", "value1".to_string());
        store.set("key2", "value2".to_string());
        store.clear();

        assert!(store.is_empty());
        assert_eq!(store.get("key1"), None);
        assert_eq!(store.get("key2"), None);
    }

    #[test]
    fn test_store_stats() {
        let (mut store, clock) = test_store(100, 1_000);

        store.set("key1", "value1".to_string());
        store.get("key1"); // hit
        store.get("nonexistent"); // miss

        clock.advance(Duration::from_millis(1_000));
        store.get("key1"); // miss via expiry

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 2);
        assert_eq!(stats.expired, 1);
        assert_eq!(stats.total_entries, 0);
        assert!((stats.hit_rate() - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_store_eviction_stats() {
        let (mut store, _clock) = test_store(1, 300_000);

        store.set("key1", "value1".to_string());
        store.set("key2", "value2".to_string());

        assert_eq!(store.stats().evictions, 1);
        assert_eq!(store.stats().total_entries, 1);
    }

    #[test]
    fn test_store_non_clone_friendly_values() {
        // Arbitrary payload types, not just strings
        let clock = ManualClock::new(0);
        let mut store: CacheStore<Vec<u64>> =
            CacheStore::with_clock(test_config(10, 1_000), clock);

        store.set("nums", vec![1, 2, 3]);
        assert_eq!(store.get("nums"), Some(vec![1, 2, 3]));
    }
}
