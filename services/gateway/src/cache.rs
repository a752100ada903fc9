//! Bounded TTL cache with FIFO eviction
//!
//! Fixed capacity, fixed time-to-live, lazy expiry on read. Eviction is true
//! FIFO by insertion order: refreshing an existing key updates its value and
//! timestamp but never its eviction priority. Capacity and FIFO order are
//! cross-key invariants, so every call runs as one critical section behind a
//! single mutex.

use std::collections::HashMap;
use std::sync::Mutex;

use tracing::debug;

/// Default time-to-live: one hour.
pub const DEFAULT_TTL_MS: i64 = 3_600_000;

/// Default maximum entry count.
pub const DEFAULT_CAPACITY: usize = 100;

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    inserted_at_ms: i64,
    /// Monotonic insertion counter; smallest goes first on eviction.
    order: u64,
}

#[derive(Debug)]
struct CacheInner<V> {
    entries: HashMap<String, CacheEntry<V>>,
    next_order: u64,
}

/// Fixed-capacity TTL cache keyed by string.
///
/// Values are opaque to the cache; presence is tracked independently of
/// value truthiness, so falsy values (zero, false, empty) round-trip
/// faithfully.
#[derive(Debug)]
pub struct TtlCache<V> {
    inner: Mutex<CacheInner<V>>,
    ttl_ms: i64,
    capacity: usize,
}

impl<V: Clone> TtlCache<V> {
    /// Create a cache with the default one-hour TTL and 100-entry capacity.
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_TTL_MS, DEFAULT_CAPACITY)
    }

    /// Create a cache with explicit TTL and capacity.
    pub fn with_limits(ttl_ms: i64, capacity: usize) -> Self {
        Self {
            inner: Mutex::new(CacheInner {
                entries: HashMap::new(),
                next_order: 0,
            }),
            ttl_ms,
            capacity,
        }
    }

    /// Look up a key at time `now_ms`.
    ///
    /// An entry older than the TTL is treated as absent and evicted lazily.
    pub fn get(&self, key: &str, now_ms: i64) -> Option<V> {
        let mut inner = self.inner.lock().expect("cache lock poisoned");

        let expired = match inner.entries.get(key) {
            Some(entry) => now_ms - entry.inserted_at_ms > self.ttl_ms,
            None => return None,
        };

        if expired {
            inner.entries.remove(key);
            debug!(key, "cache entry expired");
            return None;
        }

        inner.entries.get(key).map(|entry| entry.value.clone())
    }

    /// Insert or refresh a key at time `now_ms`.
    ///
    /// A new key at capacity first evicts the entry with the smallest
    /// insertion-order counter. Refreshing an existing key replaces value
    /// and timestamp only; its insertion order is unchanged.
    pub fn set(&self, key: &str, value: V, now_ms: i64) {
        let mut inner = self.inner.lock().expect("cache lock poisoned");

        if let Some(entry) = inner.entries.get_mut(key) {
            entry.value = value;
            entry.inserted_at_ms = now_ms;
            return;
        }

        if inner.entries.len() >= self.capacity {
            let oldest = inner
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.order)
                .map(|(key, _)| key.clone());
            if let Some(oldest_key) = oldest {
                inner.entries.remove(&oldest_key);
                debug!(key = %oldest_key, "cache at capacity, evicted oldest entry");
            }
        }

        let order = inner.next_order;
        inner.next_order += 1;
        inner.entries.insert(
            key.to_owned(),
            CacheEntry {
                value,
                inserted_at_ms: now_ms,
                order,
            },
        );
    }

    /// Number of live entries (including not-yet-swept expired ones).
    pub fn len(&self) -> usize {
        self.inner.lock().expect("cache lock poisoned").entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<V: Clone> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new()
    }
}
