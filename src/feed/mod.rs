//! # Feed Module
//!
//! The trending-score engine: joins the three record streams of a data-source page and
//! ranks the result.
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`RecordAggregator`] | Posts + reactions + comments → `(Post, MetricBundle)` pairs |
//! | [`ScoreEngine`] | Trending score, stable descending sort, top-N cap |
//! | [`ScoreWeights`] | Formula weights and the feed cap |
//!
//! ## Example
//!
//! ```rust
//! use chrono::{Duration, Utc};
//! use pulseboard::feed::{RecordAggregator, ScoreEngine};
//! use pulseboard::types::{Post, Reaction};
//!
//! let now = Utc::now();
//! let posts = vec![Post::new("p1", now - Duration::hours(1))];
//! let joined = RecordAggregator::new().join(posts, &[Reaction::like("p1")], &[]);
//! let feed = ScoreEngine::new().rank(joined, now);
//! assert_eq!(feed.items[0].score, 100.0);
//! ```

mod aggregate;
mod score;

pub use aggregate::RecordAggregator;
pub use score::{ScoreEngine, ScoreWeights};
