//! Load-once cache backed by `DashMap` for concurrent access.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use dashmap::DashMap;

/// Thread-safe cache of values loaded from files.
///
/// A value is loaded on the first `get_or_try_load` for its path and then
/// served from memory until `invalidate` (or `clear`) drops it. There is no
/// time-based expiry: writers are expected to invalidate after every write.
pub struct LoadOnceCache<V> {
    store: DashMap<PathBuf, Arc<V>>,
}

impl<V> Default for LoadOnceCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> LoadOnceCache<V> {
    pub fn new() -> Self {
        Self {
            store: DashMap::new(),
        }
    }

    /// Returns the cached value for `key`, running `load` on a miss.
    ///
    /// A failed load is not cached; the next call retries.
    pub fn get_or_try_load<E, F>(&self, key: &Path, load: F) -> Result<Arc<V>, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        if let Some(entry) = self.store.get(key) {
            return Ok(Arc::clone(entry.value()));
        }
        let value = Arc::new(load()?);
        self.store.insert(key.to_path_buf(), Arc::clone(&value));
        Ok(value)
    }

    /// Returns the cached value without loading.
    pub fn get(&self, key: &Path) -> Option<Arc<V>> {
        self.store.get(key).map(|entry| Arc::clone(entry.value()))
    }

    /// Drops the cached value for `key`, forcing a reload on next access.
    pub fn invalidate(&self, key: &Path) {
        self.store.remove(key);
    }

    /// Removes all entries from the cache.
    pub fn clear(&self) {
        self.store.clear();
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}
