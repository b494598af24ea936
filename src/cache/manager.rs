//! Cache manager.

use serde::{de::DeserializeOwned, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use super::backend::CacheStore;
use super::key::CacheKey;
use crate::Result;

#[derive(Debug, Clone)]
pub struct CacheConfig { pub enabled: bool, pub max_entry_size: usize, pub key_prefix: Option<String> }

impl Default for CacheConfig {
    fn default() -> Self { Self { enabled: true, max_entry_size: 10 * 1024 * 1024, key_prefix: None } }
}

impl CacheConfig {
    pub fn new() -> Self { Self::default() }
    pub fn with_enabled(mut self, enabled: bool) -> Self { self.enabled = enabled; self }
    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self { self.key_prefix = Some(prefix.into()); self }
    pub fn with_max_entry_size(mut self, bytes: usize) -> Self { self.max_entry_size = bytes; self }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats { pub hits: u64, pub misses: u64, pub writes: u64, pub skipped_writes: u64, pub errors: u64 }

impl CacheStats {
    pub fn hit_ratio(&self) -> f64 { let total = self.hits + self.misses; if total == 0 { 0.0 } else { self.hits as f64 / total as f64 } }
}

struct AtomicStats { hits: AtomicU64, misses: AtomicU64, writes: AtomicU64, skipped_writes: AtomicU64, errors: AtomicU64 }
impl AtomicStats {
    fn new() -> Self { Self { hits: AtomicU64::new(0), misses: AtomicU64::new(0), writes: AtomicU64::new(0), skipped_writes: AtomicU64::new(0), errors: AtomicU64::new(0) } }
    fn to_stats(&self) -> CacheStats { CacheStats { hits: self.hits.load(Ordering::Relaxed), misses: self.misses.load(Ordering::Relaxed), writes: self.writes.load(Ordering::Relaxed), skipped_writes: self.skipped_writes.load(Ordering::Relaxed), errors: self.errors.load(Ordering::Relaxed) } }
}

/// Typed JSON access to a [`CacheStore`].
///
/// Reads fail open: a store error or an undecodable payload is reported as a miss. Writes
/// return the store error so the caller can log it.
pub struct CacheManager { config: CacheConfig, store: Arc<dyn CacheStore>, stats: AtomicStats }

impl CacheManager {
    pub fn new(config: CacheConfig, store: Arc<dyn CacheStore>) -> Self { Self { config, store, stats: AtomicStats::new() } }

    pub async fn get<T: DeserializeOwned>(&self, key: &CacheKey) -> Option<T> {
        if !self.config.enabled { return None; }
        let prefixed = self.prefix_key(key);
        match self.store.get(&prefixed).await {
            Ok(Some(data)) => match serde_json::from_slice(&data) {
                Ok(val) => {
                    self.stats.hits.fetch_add(1, Ordering::Relaxed);
                    tracing::debug!(key = %prefixed, store = self.store.name(), "cache hit");
                    Some(val)
                }
                Err(e) => {
                    self.stats.errors.fetch_add(1, Ordering::Relaxed);
                    self.stats.misses.fetch_add(1, Ordering::Relaxed);
                    tracing::warn!(key = %prefixed, error = %e, "undecodable cache payload, treating as miss");
                    None
                }
            },
            Ok(None) => {
                self.stats.misses.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(key = %prefixed, store = self.store.name(), "cache miss");
                None
            }
            Err(e) => {
                self.stats.errors.fetch_add(1, Ordering::Relaxed);
                self.stats.misses.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(key = %prefixed, error = %e, "cache read failed, treating as miss");
                None
            }
        }
    }

    pub async fn put<T: Serialize>(&self, key: &CacheKey, value: &T, ttl: Duration) -> Result<()> {
        if !self.config.enabled { return Ok(()); }
        let data = serde_json::to_vec(value)?;
        let prefixed = self.prefix_key(key);
        if data.len() > self.config.max_entry_size {
            self.stats.skipped_writes.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(key = %prefixed, bytes = data.len(), "entry exceeds max size, not cached");
            return Ok(());
        }
        match self.store.put(&prefixed, &data, ttl).await {
            Ok(()) => {
                self.stats.writes.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(key = %prefixed, store = self.store_name(), ttl_secs = ttl.as_secs(), "cache write");
                Ok(())
            }
            Err(e) => { self.stats.errors.fetch_add(1, Ordering::Relaxed); Err(e) }
        }
    }

    pub fn stats(&self) -> CacheStats { self.stats.to_stats() }
    pub fn store_name(&self) -> &'static str { self.store.name() }

    fn prefix_key(&self, key: &CacheKey) -> CacheKey {
        if let Some(ref p) = self.config.key_prefix { CacheKey::new(format!("{}:{}", p, key.hash)) } else { key.clone() }
    }
}
