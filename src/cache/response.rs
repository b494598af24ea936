//! Content-addressed cache of inference text.

use std::sync::Arc;
use std::time::Duration;

use super::key::Fingerprint;
use super::manager::CacheManager;
use crate::Result;

pub const DEFAULT_RESPONSE_TTL: Duration = Duration::from_secs(20 * 60);

/// Maps a request [`Fingerprint`] to the text previously produced for it.
///
/// Performs no network I/O of its own; on a miss the caller runs inference and calls `put`.
#[derive(Clone)]
pub struct ResponseCache {
    manager: Arc<CacheManager>,
    ttl: Duration,
}

impl ResponseCache {
    pub fn new(manager: Arc<CacheManager>) -> Self {
        Self {
            manager,
            ttl: DEFAULT_RESPONSE_TTL,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub async fn get(&self, fingerprint: &Fingerprint) -> Option<String> {
        self.manager.get(&fingerprint.cache_key()).await
    }

    pub async fn put(&self, fingerprint: &Fingerprint, text: &str) -> Result<()> {
        self.manager
            .put(&fingerprint.cache_key(), &text, self.ttl)
            .await
    }
}
