//! Trending score and ranking.

use chrono::{DateTime, Utc};

use crate::types::{MetricBundle, Post, RankedFeed, ScoredPost};

const MS_PER_HOUR: f64 = 3_600_000.0;

/// Weights and limits of the trending formula.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreWeights {
    pub like: f64,
    pub comment: f64,
    pub share: f64,
    /// Recency bonus for a brand-new post; it decays by one point per hour of age.
    pub recency_window_hours: f64,
    /// Maximum number of items in a ranked feed.
    pub max_items: usize,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            like: 1.0,
            comment: 2.0,
            share: 3.0,
            recency_window_hours: 100.0,
            max_items: 100,
        }
    }
}

/// Computes trending scores and produces a [`RankedFeed`].
#[derive(Debug, Clone, Default)]
pub struct ScoreEngine {
    weights: ScoreWeights,
}

impl ScoreEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weights(weights: ScoreWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    /// Age of `post` at `now`, in fractional hours. Negative for future timestamps.
    pub fn age_hours(post: &Post, now: DateTime<Utc>) -> f64 {
        (now - post.created_at).num_milliseconds() as f64 / MS_PER_HOUR
    }

    /// Linear recency bonus, clamped to `[0, recency_window_hours]`. A non-positive window
    /// gives no bonus.
    pub fn recency(&self, age_hours: f64) -> f64 {
        let window = self.weights.recency_window_hours.max(0.0);
        (window - age_hours).max(0.0).min(window)
    }

    pub fn score(&self, metrics: &MetricBundle, age_hours: f64) -> f64 {
        let w = &self.weights;
        metrics.like_count as f64 * w.like
            + metrics.comment_count as f64 * w.comment
            + metrics.share_count as f64 * w.share
            + self.recency(age_hours)
    }

    /// Score, stable-sort descending and cap the joined view.
    pub fn rank(&self, joined: Vec<(Post, MetricBundle)>, now: DateTime<Utc>) -> RankedFeed {
        let mut items: Vec<ScoredPost> = joined
            .into_iter()
            .map(|(post, metrics)| {
                let score = self.score(&metrics, Self::age_hours(&post, now));
                ScoredPost {
                    post,
                    metrics,
                    score,
                }
            })
            .collect();

        // sort_by is stable: equal scores keep their input order.
        items.sort_by(|a, b| b.score.total_cmp(&a.score));
        items.truncate(self.weights.max_items);

        RankedFeed {
            items,
            computed_at: now,
        }
    }
}
