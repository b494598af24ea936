//! Cache store implementations.

use super::key::CacheKey;
use crate::Result;
use async_trait::async_trait;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

#[derive(Clone)]
struct StoredEntry {
    data: Vec<u8>,
    expires_at: Instant,
}

impl StoredEntry {
    fn new(data: Vec<u8>, ttl: Duration) -> Self {
        Self {
            data,
            expires_at: Instant::now() + ttl,
        }
    }

    /// Visible iff now < expiry.
    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Key/value store reached by the caches. Single-key get/put only.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &CacheKey) -> Result<Option<Vec<u8>>>;
    async fn put(&self, key: &CacheKey, value: &[u8], ttl: Duration) -> Result<()>;
    fn name(&self) -> &'static str;
}

/// In-process store with TTL expiry and LRU bounding.
pub struct MemoryStore {
    entries: Mutex<LruCache<String, StoredEntry>>,
}

impl MemoryStore {
    pub fn new(max_entries: usize) -> Self {
        let cap = NonZeroUsize::new(max_entries).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(cap)),
        }
    }

    /// Number of entries still visible to readers.
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .lock()
            .await
            .iter()
            .filter(|(_, e)| e.is_live(now))
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(10_000)
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn get(&self, key: &CacheKey) -> Result<Option<Vec<u8>>> {
        let mut entries = self.entries.lock().await;
        let now = Instant::now();
        match entries.get(key.as_str()) {
            Some(entry) if entry.is_live(now) => return Ok(Some(entry.data.clone())),
            Some(_) => {}
            None => return Ok(None),
        }
        entries.pop(key.as_str());
        Ok(None)
    }

    async fn put(&self, key: &CacheKey, value: &[u8], ttl: Duration) -> Result<()> {
        self.entries
            .lock()
            .await
            .put(key.as_str().to_string(), StoredEntry::new(value.to_vec(), ttl));
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

/// Store that never retains anything; every read is a miss.
pub struct NullStore;

impl NullStore {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NullStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheStore for NullStore {
    async fn get(&self, _: &CacheKey) -> Result<Option<Vec<u8>>> {
        Ok(None)
    }
    async fn put(&self, _: &CacheKey, _: &[u8], _: Duration) -> Result<()> {
        Ok(())
    }
    fn name(&self) -> &'static str {
        "null"
    }
}
