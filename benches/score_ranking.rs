//! Benchmarks for feed recomputation
//!
//! This benchmark measures:
//! - Joining reactions and comments onto posts
//! - Scoring and ranking the joined records
//! - Request fingerprinting for the response cache

use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use pulseboard::cache::RequestFingerprinter;
use pulseboard::feed::{RecordAggregator, ScoreEngine};
use pulseboard::types::{Comment, Post, Reaction};
use pulseboard::{AiRequest, Message};

fn records(posts: usize) -> (Vec<Post>, Vec<Reaction>, Vec<Comment>) {
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
    let posts: Vec<Post> = (0..posts)
        .map(|i| Post::new(format!("post-{}", i), now - Duration::minutes((i * 37 % 6000) as i64)))
        .collect();
    let mut reactions = Vec::new();
    let mut comments = Vec::new();
    for (i, post) in posts.iter().enumerate() {
        for _ in 0..(i % 7) {
            reactions.push(Reaction::like(post.id.clone()));
        }
        if i % 3 == 0 {
            reactions.push(Reaction::share(post.id.clone()));
        }
        for _ in 0..(i % 4) {
            comments.push(Comment::on(post.id.clone()));
        }
    }
    (posts, reactions, comments)
}

fn bench_recompute(c: &mut Criterion) {
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
    let aggregator = RecordAggregator::new();
    let engine = ScoreEngine::new();
    let mut group = c.benchmark_group("feed_recompute");

    for size in [50usize, 200, 1000] {
        let (posts, reactions, comments) = records(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("join", size), &size, |b, _| {
            b.iter(|| aggregator.join(black_box(posts.clone()), &reactions, &comments))
        });

        let joined = aggregator.join(posts.clone(), &reactions, &comments);
        group.bench_with_input(BenchmarkId::new("rank", size), &size, |b, _| {
            b.iter(|| engine.rank(black_box(joined.clone()), now))
        });
    }

    group.finish();
}

fn bench_fingerprint(c: &mut Criterion) {
    let fingerprinter = RequestFingerprinter::new();
    let prompt = AiRequest::prompt("Summarize in 3 points.");
    let mut messages = vec![Message::system("You are a helpful assistant.")];
    for i in 0..50 {
        messages.push(Message::user(format!("User message number {}", i)));
        messages.push(Message::assistant(format!("Assistant response number {}", i)));
    }
    let conversation = AiRequest::messages(messages);

    let mut group = c.benchmark_group("fingerprint");
    group.bench_function("prompt", |b| {
        b.iter(|| fingerprinter.fingerprint(black_box(&prompt)).unwrap())
    });
    group.bench_function("conversation_101_messages", |b| {
        b.iter(|| fingerprinter.fingerprint(black_box(&conversation)).unwrap())
    });
    group.finish();
}

criterion_group!(benches, bench_recompute, bench_fingerprint);
criterion_main!(benches);
