use std::{
    num::NonZeroUsize,
    sync::{Arc, Mutex, MutexGuard},
    time::{Duration, Instant},
};

use lru::LruCache;

use crate::names;

/// Process-local cache of serialized responses with per-entry expiry.
///
/// Entries are opaque payloads: they are replaced or deleted, never patched.
/// When full, the least recently used entry is evicted.
#[derive(Clone)]
pub struct MemoryCache {
    entries: Arc<Mutex<LruCache<String, Entry>>>,
}

struct Entry {
    payload: String,
    expires_at: Instant,
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::with_capacity(names::CACHE_CAPACITY)
    }
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Arc::new(Mutex::new(LruCache::new(cap))),
        }
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<String, Entry>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        let mut entries = self.lock();
        let expired = match entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => return Some(entry.payload.clone()),
            Some(_) => true,
            None => false,
        };
        if expired {
            entries.pop(key);
        }
        None
    }

    pub fn set(&self, key: &str, payload: String, ttl: Duration) {
        let entry = Entry {
            payload,
            expires_at: Instant::now() + ttl,
        };
        if let Some((evicted, _)) = self.lock().push(key.to_string(), entry) {
            if evicted != key {
                tracing::debug!("cache entry {evicted} evicted");
            }
        }
    }

    pub fn delete(&self, key: &str) {
        if self.lock().pop(key).is_some() {
            tracing::debug!("cache entry {key} deleted");
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
