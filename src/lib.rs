//! # pulseboard
//!
//! Trending-feed ranking and content-addressed AI response caching in front of slow,
//! expensive upstreams.
//!
//! ## Overview
//!
//! Two request flows share one short-lived cache store:
//!
//! - **Feed**: the top feed is served from a single-key cache. On a miss the posts,
//!   reactions and comments of the data source are joined, scored, ranked and capped,
//!   and the result is written back in the background.
//! - **AI**: a request (prompt or message sequence) is canonicalized and hashed into a
//!   fingerprint. The inference backend is called only when no text is cached for that
//!   fingerprint, and its output is written back in the background.
//!
//! Concurrent misses are not coalesced. Two handlers that miss together both compute and
//! both write; the cache ends valid either way.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pulseboard::{AiRequest, ServiceConfig, Services};
//!
//! #[tokio::main]
//! async fn main() -> pulseboard::Result<()> {
//!     let config = ServiceConfig::from_env()?;
//!     let services = Services::from_config(&config)?;
//!
//!     let feed = services.feed.top_feed().await?;
//!     println!("{} items (cached: {})", feed.feed.len(), feed.cached);
//!
//!     let reply = services.ai.respond(&AiRequest::prompt("Summarize in 3 points.")).await?;
//!     println!("{}", reply.text);
//!
//!     services.shutdown().await;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`types`] | Records, engagement tallies, ranked feeds, AI requests |
//! | [`feed`] | Record aggregation and trending score engine |
//! | [`cache`] | Cache store, typed caches, request fingerprinting |
//! | [`source`] | Data-source trait and REST implementation |
//! | [`inference`] | Inference trait, output normalization, HTTP implementation |
//! | [`background`] | Detached, tracked cache writes |
//! | [`service`] | The feed and AI request flows |
//! | [`config`] | Service configuration from defaults and environment |

pub mod background;
pub mod cache;
pub mod config;
pub mod feed;
pub mod inference;
pub mod service;
pub mod source;
pub mod types;

pub use background::BackgroundWork;
pub use config::ServiceConfig;
pub use service::{AiReply, AiService, FeedOutcome, FeedService, Services};
pub use types::{AiRequest, Message, MessageRole, RankedFeed};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext, ErrorKind};
