//! # Source Module
//!
//! Read-only access to the record store the feed is built from.
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`DataSource`] | Trait for the three list queries |
//! | [`RestDataSource`] | PostgREST-style HTTP implementation |
//! | [`FetchLimits`] | Page sizes for one aggregation pass |

mod rest;

pub use rest::{RestDataSource, RestDataSourceBuilder, DEFAULT_DATA_TIMEOUT};

use async_trait::async_trait;

use crate::types::{Comment, Post, Reaction};
use crate::Result;

/// Three read-only list queries. Any failure is an `UpstreamRead` error.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Most recent posts first.
    async fn posts(&self, limit: usize) -> Result<Vec<Post>>;
    async fn reactions(&self, limit: usize) -> Result<Vec<Reaction>>;
    async fn comments(&self, limit: usize) -> Result<Vec<Comment>>;
    fn name(&self) -> &'static str;
}

/// Page sizes requested from the data source per aggregation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchLimits {
    pub posts: usize,
    pub reactions: usize,
    pub comments: usize,
}

impl Default for FetchLimits {
    fn default() -> Self {
        Self {
            posts: 200,
            reactions: 10_000,
            comments: 10_000,
        }
    }
}

/// The raw records of one aggregation pass.
#[derive(Debug, Clone, Default)]
pub struct RecordPage {
    pub posts: Vec<Post>,
    pub reactions: Vec<Reaction>,
    pub comments: Vec<Comment>,
}

/// Issue the three list queries together. All must succeed.
pub async fn fetch_page(source: &dyn DataSource, limits: FetchLimits) -> Result<RecordPage> {
    let (posts, reactions, comments) = futures::try_join!(
        source.posts(limits.posts),
        source.reactions(limits.reactions),
        source.comments(limits.comments),
    )?;
    tracing::debug!(
        source = source.name(),
        posts = posts.len(),
        reactions = reactions.len(),
        comments = comments.len(),
        "fetched record page"
    );
    Ok(RecordPage {
        posts,
        reactions,
        comments,
    })
}
