//! Write-once memoization map.
use std::{collections::HashMap, fmt, hash::Hash, sync::Mutex};


/// Map from a key to a lazily computed value.
///
/// The value for a key is computed at most once and then returned on every
/// subsequent lookup with an equal key. Entries are never evicted: they live
/// as long as the cache itself.
pub struct Cache<K, V> {
    entries: Mutex<HashMap<K, V>>,
}

impl<K, V> Default for Cache<K, V> {
    fn default() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl<K, V> fmt::Debug for Cache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cache").field("len", &self.len()).finish()
    }
}

impl<K: Hash + Eq, V: Clone> Cache<K, V> {
    /// Constructs an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value stored under `key`, computing and storing it first if
    /// the key has not been seen before. `compute` is called at most once per
    /// distinct key, also under concurrent access: the lookup and the insertion
    /// happen under a single lock.
    pub fn fetch(&self, key: K, compute: impl FnOnce() -> V) -> V {
        self.entries
            .lock()
            .unwrap()
            .entry(key)
            .or_insert_with(compute)
            .clone()
    }

    /// Returns the value stored under `key`, without computing anything.
    pub fn get(&self, key: &K) -> Option<V> {
        self.entries.lock().unwrap().get(key).cloned()
    }
}

impl<K, V> Cache<K, V> {
    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    /// Whether nothing has been stored yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
