//! Joins posts, reactions and comments into per-post engagement tallies.

use std::collections::HashMap;

use crate::types::{Comment, MetricBundle, Post, Reaction, ReactionKind};

/// Stateless joiner for the three record streams of one aggregation pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordAggregator;

impl RecordAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Tally reactions and comments per post id.
    ///
    /// Only ids that appear in `posts` get an entry; records pointing at posts outside the
    /// page are ignored.
    pub fn tally(
        &self,
        posts: &[Post],
        reactions: &[Reaction],
        comments: &[Comment],
    ) -> HashMap<String, MetricBundle> {
        let mut bundles: HashMap<String, MetricBundle> = posts
            .iter()
            .map(|p| (p.id.clone(), MetricBundle::default()))
            .collect();

        let mut skipped = 0usize;
        for reaction in reactions {
            let Some(bundle) = bundles.get_mut(&reaction.post_id) else {
                skipped += 1;
                continue;
            };
            match reaction.kind {
                ReactionKind::Like => bundle.like_count += 1,
                ReactionKind::Share => bundle.share_count += 1,
                ReactionKind::Comment => bundle.comment_reaction_count += 1,
                ReactionKind::Other => {}
            }
        }

        for comment in comments {
            match bundles.get_mut(&comment.post_id) {
                Some(bundle) => bundle.comment_count += 1,
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            tracing::debug!(skipped, "engagement records reference posts outside the page");
        }
        bundles
    }

    /// Pair every post with its tally, preserving the input order of `posts`.
    ///
    /// Posts with no engagement get a zero bundle; no post is dropped.
    pub fn join(
        &self,
        posts: Vec<Post>,
        reactions: &[Reaction],
        comments: &[Comment],
    ) -> Vec<(Post, MetricBundle)> {
        let bundles = self.tally(&posts, reactions, comments);

        let diverging = bundles
            .values()
            .filter(|b| b.comment_reaction_count > 0)
            .count();
        if diverging > 0 {
            tracing::debug!(
                posts = diverging,
                "comment-kind reactions tallied separately from comment rows"
            );
        }

        posts
            .into_iter()
            .map(|post| {
                let bundle = bundles.get(&post.id).copied().unwrap_or_default();
                (post, bundle)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn post(id: &str) -> Post {
        Post::new(id, Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap())
    }

    #[test]
    fn posts_without_engagement_get_zero_bundle() {
        let joined = RecordAggregator::new().join(vec![post("a"), post("b")], &[], &[]);
        assert_eq!(joined.len(), 2);
        assert!(joined.iter().all(|(_, m)| m.is_zero()));
        assert_eq!(joined[0].0.id, "a");
        assert_eq!(joined[1].0.id, "b");
    }

    #[test]
    fn counts_each_kind() {
        let reactions = vec![
            Reaction::like("a"),
            Reaction::like("a"),
            Reaction::share("a"),
            Reaction::like("b"),
        ];
        let comments = vec![Comment::on("a"), Comment::on("b"), Comment::on("b")];
        let joined = RecordAggregator::new().join(vec![post("a"), post("b")], &reactions, &comments);

        assert_eq!(joined[0].1, MetricBundle::new(2, 1, 1));
        assert_eq!(joined[1].1, MetricBundle::new(1, 0, 2));
    }

    #[test]
    fn comment_reactions_are_a_separate_tally() {
        let reactions = vec![
            Reaction::new("a", ReactionKind::Comment),
            Reaction::new("a", ReactionKind::Comment),
        ];
        let comments = vec![Comment::on("a")];
        let joined = RecordAggregator::new().join(vec![post("a")], &reactions, &comments);

        let bundle = joined[0].1;
        assert_eq!(bundle.comment_count, 1);
        assert_eq!(bundle.comment_reaction_count, 2);
    }

    #[test]
    fn records_for_unknown_posts_are_ignored() {
        let reactions = vec![Reaction::like("ghost"), Reaction::new("a", ReactionKind::Other)];
        let comments = vec![Comment::on("ghost")];
        let agg = RecordAggregator::new();
        let tally = agg.tally(&[post("a")], &reactions, &comments);

        assert_eq!(tally.len(), 1);
        assert!(tally["a"].is_zero());
    }
}
