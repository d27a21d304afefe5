//! Memoization primitives for selectors.
//!
//! [`RevCache`] memoizes one derived value against a slice revision: the
//! cached value is reused as long as the slice revision it was computed from
//! is still current. [`LruCache`] bounds parametrized selector families so a
//! stream of distinct reference keys cannot grow a cache without limit.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Single-slot cache keyed by a slice revision.
pub(crate) struct RevCache<T> {
    slot: Mutex<Option<(u64, Arc<T>)>>,
}

impl<T> RevCache<T> {
    pub(crate) fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    /// Return the cached value if it was computed at `rev`, otherwise
    /// compute, cache, and return a fresh one.
    pub(crate) fn get_or_compute(&self, rev: u64, compute: impl FnOnce() -> T) -> Arc<T> {
        let mut slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        if let Some((cached_rev, value)) = slot.as_ref() {
            if *cached_rev == rev {
                return Arc::clone(value);
            }
        }
        let value = Arc::new(compute());
        *slot = Some((rev, Arc::clone(&value)));
        value
    }
}

/// Bounded least-recently-used cache keyed by canonical reference strings.
///
/// Eviction uses a monotonic access tick: when the cache is full, the entry
/// with the oldest tick is dropped before inserting.
pub(crate) struct LruCache<V> {
    capacity: usize,
    tick: u64,
    entries: HashMap<String, (V, u64)>,
}

impl<V: Clone> LruCache<V> {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            tick: 0,
            entries: HashMap::new(),
        }
    }

    /// Return the value under `key`, creating it with `make` on a miss.
    /// Both hits and misses refresh the entry's recency.
    pub(crate) fn get_or_insert_with(&mut self, key: &str, make: impl FnOnce() -> V) -> V {
        self.tick += 1;
        if let Some((value, stamp)) = self.entries.get_mut(key) {
            *stamp = self.tick;
            return value.clone();
        }
        if self.entries.len() >= self.capacity {
            self.evict_oldest();
        }
        let value = make();
        self.entries
            .insert(key.to_string(), (value.clone(), self.tick));
        value
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    fn evict_oldest(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, (_, stamp))| *stamp)
            .map(|(key, _)| key.clone());
        if let Some(key) = oldest {
            self.entries.remove(&key);
        }
    }
}
