//! Single-entry cache for the ranked feed.

use std::sync::Arc;
use std::time::Duration;

use super::key::CacheKey;
use super::manager::CacheManager;
use crate::types::RankedFeed;
use crate::Result;

/// The one key the top feed lives under.
pub const FEED_CACHE_KEY: &str = "feed:top:v1";

pub const DEFAULT_FEED_TTL: Duration = Duration::from_secs(30);

/// Holds at most one [`RankedFeed`]; expiry is the only eviction.
#[derive(Clone)]
pub struct FeedCache {
    manager: Arc<CacheManager>,
    ttl: Duration,
}

impl FeedCache {
    pub fn new(manager: Arc<CacheManager>) -> Self {
        Self {
            manager,
            ttl: DEFAULT_FEED_TTL,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub async fn get(&self) -> Option<RankedFeed> {
        self.manager.get(&CacheKey::new(FEED_CACHE_KEY)).await
    }

    /// Store `feed`, replacing whatever was there, valid for one TTL from now.
    pub async fn put(&self, feed: &RankedFeed) -> Result<()> {
        self.manager
            .put(&CacheKey::new(FEED_CACHE_KEY), feed, self.ttl)
            .await
    }
}
