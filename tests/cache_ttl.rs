//! Expiry of the typed caches, driven by tokio's paused clock.

mod common;

use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use common::{harness, FakeInference, FakeSource, UnreachableStore};
use pulseboard::cache::{
    CacheConfig, CacheManager, FeedCache, MemoryStore, RequestFingerprinter, ResponseCache,
};
use pulseboard::types::{Post, RankedFeed};
use pulseboard::AiRequest;

const EPSILON: Duration = Duration::from_millis(1);

fn manager() -> Arc<CacheManager> {
    Arc::new(CacheManager::new(CacheConfig::new(), Arc::new(MemoryStore::new(16))))
}

fn feed() -> RankedFeed {
    RankedFeed::empty(Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap())
}

#[tokio::test(start_paused = true)]
async fn feed_entry_lives_thirty_seconds() {
    let cache = FeedCache::new(manager());
    cache.put(&feed()).await.unwrap();

    tokio::time::advance(Duration::from_secs(30) - EPSILON).await;
    assert_eq!(cache.get().await, Some(feed()));

    tokio::time::advance(EPSILON).await;
    assert_eq!(cache.get().await, None);
}

#[tokio::test(start_paused = true)]
async fn response_entry_lives_twenty_minutes() {
    let cache = ResponseCache::new(manager());
    let fp = RequestFingerprinter::new().fingerprint(&AiRequest::prompt("hi")).unwrap();
    cache.put(&fp, "hello").await.unwrap();

    tokio::time::advance(Duration::from_secs(1200) - EPSILON).await;
    assert_eq!(cache.get(&fp).await.as_deref(), Some("hello"));

    tokio::time::advance(Duration::from_secs(2)).await;
    assert_eq!(cache.get(&fp).await, None);
}

#[tokio::test(start_paused = true)]
async fn write_after_expiry_makes_entry_visible_again() {
    let cache = FeedCache::new(manager()).with_ttl(Duration::from_secs(5));
    cache.put(&feed()).await.unwrap();
    tokio::time::advance(Duration::from_secs(6)).await;
    assert!(cache.get().await.is_none());

    cache.put(&feed()).await.unwrap();
    assert!(cache.get().await.is_some());
}

#[tokio::test(start_paused = true)]
async fn expired_feed_triggers_recomputation() {
    let now = Utc::now();
    let source = FakeSource::new(vec![Post::new("p1", now)], vec![], vec![]);
    let h = harness(source, FakeInference::answering("unused"));

    assert!(!h.services.feed.top_feed_at(now).await.unwrap().cached);
    h.services.background.wait_idle().await;
    assert!(h.services.feed.top_feed_at(now).await.unwrap().cached);

    tokio::time::advance(Duration::from_secs(31)).await;
    assert!(!h.services.feed.top_feed_at(now).await.unwrap().cached);
    assert_eq!(h.source.passes(), 2);
}

#[tokio::test]
async fn unreachable_store_reads_as_miss_and_write_is_reported() {
    let manager = Arc::new(CacheManager::new(CacheConfig::new(), Arc::new(UnreachableStore)));
    let cache = ResponseCache::new(manager.clone());
    let fp = RequestFingerprinter::new().fingerprint(&AiRequest::default()).unwrap();

    assert_eq!(cache.get(&fp).await, None);
    assert!(cache.put(&fp, "text").await.is_err());

    let stats = manager.stats();
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.errors, 2);
    assert_eq!(stats.writes, 0);
}
