//! # Cache Module
//!
//! Short-lived caches in front of the two expensive upstreams, over an injected key/value
//! store.
//!
//! ## Key Components
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`CacheStore`] | Trait for the key/value store (get / put with TTL) |
//! | [`MemoryStore`] | In-process store with TTL expiry and LRU bounding |
//! | [`NullStore`] | Store that never retains anything |
//! | [`CacheManager`] | JSON encoding, key prefixing, fail-open reads, statistics |
//! | [`FeedCache`] | Single-key cache of the ranked feed (30 s) |
//! | [`ResponseCache`] | Fingerprint → inference text (20 min) |
//! | [`RequestFingerprinter`] | Canonical request string → SHA-256 [`Fingerprint`] |
//!
//! ## Entry lifecycle
//!
//! An entry is absent until `put`, then valid until its expiry instant, after which reads
//! treat it exactly like an absent entry. A later `put` makes it valid again. Nothing
//! deletes entries explicitly.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use pulseboard::cache::{CacheConfig, CacheManager, MemoryStore, RequestFingerprinter, ResponseCache};
//! use pulseboard::types::AiRequest;
//!
//! # tokio_test::block_on(async {
//! let manager = Arc::new(CacheManager::new(CacheConfig::default(), Arc::new(MemoryStore::new(1000))));
//! let responses = ResponseCache::new(manager);
//!
//! let fp = RequestFingerprinter::new().fingerprint(&AiRequest::prompt("hi")).unwrap();
//! assert!(responses.get(&fp).await.is_none());
//! responses.put(&fp, "hello!").await.unwrap();
//! assert_eq!(responses.get(&fp).await.as_deref(), Some("hello!"));
//! # });
//! ```

mod backend;
mod feed;
mod key;
mod manager;
mod response;

pub use backend::{CacheStore, MemoryStore, NullStore};
pub use feed::{FeedCache, DEFAULT_FEED_TTL, FEED_CACHE_KEY};
pub use key::{
    CacheKey, Fingerprint, RequestFingerprinter, DEFAULT_INSTRUCTION, FINGERPRINT_VERSION,
};
pub use manager::{CacheConfig, CacheManager, CacheStats};
pub use response::{ResponseCache, DEFAULT_RESPONSE_TTL};
