//! Derived engagement and ranking types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::record::Post;

/// Per-post engagement tally, rebuilt on every aggregation pass.
///
/// `comment_reaction_count` tallies reactions of kind `comment`. It is kept apart from
/// `comment_count` (rows of the comments collection) and does not feed the score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricBundle {
    pub like_count: u64,
    pub share_count: u64,
    pub comment_count: u64,
    #[serde(default)]
    pub comment_reaction_count: u64,
}

impl MetricBundle {
    pub fn new(like_count: u64, share_count: u64, comment_count: u64) -> Self {
        Self {
            like_count,
            share_count,
            comment_count,
            comment_reaction_count: 0,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredPost {
    pub post: Post,
    pub metrics: MetricBundle,
    pub score: f64,
}

/// Top-N scored posts, sorted by descending score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedFeed {
    pub items: Vec<ScoredPost>,
    /// The evaluation instant the scores were computed at.
    pub computed_at: DateTime<Utc>,
}

impl RankedFeed {
    pub fn empty(computed_at: DateTime<Utc>) -> Self {
        Self {
            items: Vec::new(),
            computed_at,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.items.iter().map(|s| s.post.id.as_str()).collect()
    }

    /// Keep only the first `n` items.
    pub fn top(mut self, n: usize) -> Self {
        self.items.truncate(n);
        self
    }
}
