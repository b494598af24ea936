//! # Types Module
//!
//! Strongly-typed records shared by the feed and AI flows.
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Post`] | A content item fetched from the data source |
//! | [`Reaction`] | A like/share/comment signal attached to a post |
//! | [`Comment`] | A comment attached to a post |
//! | [`MetricBundle`] | Per-post engagement tally |
//! | [`ScoredPost`] | A post with its tally and trending score |
//! | [`RankedFeed`] | Top-N scored posts, best first |
//! | [`AiRequest`] | Inbound AI request (prompt or message sequence) |
//!
//! ## Submodules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`record`] | Raw data-source records |
//! | [`metrics`] | Derived engagement and ranking types |
//! | [`message`] | AI request and message types |

pub mod message;
pub mod metrics;
pub mod record;

pub use message::{AiRequest, Message, MessageRole};
pub use metrics::{MetricBundle, RankedFeed, ScoredPost};
pub use record::{Comment, Post, Reaction, ReactionKind};
