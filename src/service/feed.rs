//! The ranked-feed request flow.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::Instrument;

use crate::background::BackgroundWork;
use crate::cache::FeedCache;
use crate::feed::{RecordAggregator, ScoreEngine};
use crate::source::{fetch_page, DataSource, FetchLimits};
use crate::types::RankedFeed;
use crate::Result;

#[derive(Debug, Clone, Serialize)]
pub struct FeedOutcome {
    pub feed: RankedFeed,
    /// True when served from the feed cache without touching the data source.
    pub cached: bool,
}

/// Serves the top feed, recomputing it only when the cached copy is absent or expired.
///
/// Concurrent misses are not coalesced: each computes and schedules its own write, and the
/// last write wins.
pub struct FeedService {
    source: Arc<dyn DataSource>,
    cache: FeedCache,
    background: BackgroundWork,
    aggregator: RecordAggregator,
    engine: ScoreEngine,
    limits: FetchLimits,
}

impl FeedService {
    pub fn new(source: Arc<dyn DataSource>, cache: FeedCache, background: BackgroundWork) -> Self {
        Self {
            source,
            cache,
            background,
            aggregator: RecordAggregator::new(),
            engine: ScoreEngine::new(),
            limits: FetchLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: FetchLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_engine(mut self, engine: ScoreEngine) -> Self {
        self.engine = engine;
        self
    }

    pub async fn top_feed(&self) -> Result<FeedOutcome> {
        self.top_feed_at(Utc::now()).await
    }

    /// Serve the feed, scoring any recomputation at `now`.
    pub async fn top_feed_at(&self, now: DateTime<Utc>) -> Result<FeedOutcome> {
        if let Some(feed) = self.cache.get().await {
            return Ok(FeedOutcome { feed, cached: true });
        }

        let page = fetch_page(self.source.as_ref(), self.limits)
            .instrument(tracing::debug_span!("fetch_page", source = self.source.name()))
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "feed recomputation aborted");
                e
            })?;

        let joined = self
            .aggregator
            .join(page.posts, &page.reactions, &page.comments);
        let feed = self.engine.rank(joined, now);
        tracing::info!(items = feed.len(), "recomputed top feed");

        let cache = self.cache.clone();
        let to_store = feed.clone();
        self.background.schedule("feed_cache_write", async move {
            if let Err(e) = cache.put(&to_store).await {
                tracing::warn!(error = %e, "feed cache write failed");
            }
        });

        Ok(FeedOutcome {
            feed,
            cached: false,
        })
    }
}
