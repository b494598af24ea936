//! # Service Module
//!
//! The two request flows, wired from injected collaborators.
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`FeedService`] | Feed cache → aggregate → rank → scheduled cache write |
//! | [`AiService`] | Fingerprint → response cache → inference → scheduled cache write |
//! | [`Services`] | Both flows sharing one cache store and one background scheduler |

mod ai;
mod feed;

pub use ai::{AiReply, AiService};
pub use feed::{FeedOutcome, FeedService};

use std::sync::Arc;

use crate::background::BackgroundWork;
use crate::cache::{CacheConfig, CacheManager, CacheStore, FeedCache, MemoryStore, ResponseCache};
use crate::config::ServiceConfig;
use crate::inference::InferenceBackend;
use crate::source::DataSource;
use crate::Result;

/// Both request flows over one shared cache store.
pub struct Services {
    pub feed: FeedService,
    pub ai: AiService,
    pub cache: Arc<CacheManager>,
    pub background: BackgroundWork,
}

impl Services {
    /// Wire both flows from explicit collaborators.
    pub fn assemble(
        config: &ServiceConfig,
        store: Arc<dyn CacheStore>,
        source: Arc<dyn DataSource>,
        inference: Arc<dyn InferenceBackend>,
    ) -> Self {
        let mut cache_config = CacheConfig::new();
        if let Some(prefix) = &config.cache_key_prefix {
            cache_config = cache_config.with_key_prefix(prefix.clone());
        }
        let cache = Arc::new(CacheManager::new(cache_config, store));
        let background = BackgroundWork::new();

        let feed = FeedService::new(
            source,
            FeedCache::new(cache.clone()).with_ttl(config.feed_ttl),
            background.clone(),
        )
        .with_limits(config.limits);
        let ai = AiService::new(
            inference,
            ResponseCache::new(cache.clone()).with_ttl(config.response_ttl),
            background.clone(),
        )
        .with_timeout(config.inference_timeout);

        Self {
            feed,
            ai,
            cache,
            background,
        }
    }

    /// Wire both flows against the HTTP collaborators and an in-process store.
    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        let store = Arc::new(MemoryStore::new(config.cache_capacity));
        let source = Arc::new(config.rest_source()?);
        let inference = Arc::new(config.http_inference()?);
        Ok(Self::assemble(config, store, source, inference))
    }

    /// Wait for scheduled cache writes to finish.
    pub async fn shutdown(&self) {
        self.background.wait_idle().await;
    }
}
