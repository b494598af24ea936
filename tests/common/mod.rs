//! Shared fakes for the integration tests.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use pulseboard::cache::{CacheKey, CacheStore, MemoryStore};
use pulseboard::inference::{InferenceBackend, InferenceOutput};
use pulseboard::source::DataSource;
use pulseboard::types::{Comment, Post, Reaction};
use pulseboard::{Error, Result, ServiceConfig, Services};

/// In-memory data source that counts how many aggregation passes it served.
#[derive(Default)]
pub struct FakeSource {
    pub posts: Vec<Post>,
    pub reactions: Vec<Reaction>,
    pub comments: Vec<Comment>,
    pub fail_reactions: bool,
    pub delay: Option<Duration>,
    pub post_calls: AtomicUsize,
    pub seen_limits: Mutex<Vec<usize>>,
}

impl FakeSource {
    pub fn new(posts: Vec<Post>, reactions: Vec<Reaction>, comments: Vec<Comment>) -> Self {
        Self {
            posts,
            reactions,
            comments,
            ..Self::default()
        }
    }

    pub fn passes(&self) -> usize {
        self.post_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DataSource for FakeSource {
    async fn posts(&self, limit: usize) -> Result<Vec<Post>> {
        self.post_calls.fetch_add(1, Ordering::SeqCst);
        self.seen_limits.lock().unwrap().push(limit);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self.posts.iter().take(limit).cloned().collect())
    }

    async fn reactions(&self, limit: usize) -> Result<Vec<Reaction>> {
        self.seen_limits.lock().unwrap().push(limit);
        if self.fail_reactions {
            return Err(Error::upstream("reactions query returned HTTP 500"));
        }
        Ok(self.reactions.iter().take(limit).cloned().collect())
    }

    async fn comments(&self, limit: usize) -> Result<Vec<Comment>> {
        self.seen_limits.lock().unwrap().push(limit);
        Ok(self.comments.iter().take(limit).cloned().collect())
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}

/// Inference backend that answers with a fixed output and counts its invocations.
pub struct FakeInference {
    pub output: InferenceOutput,
    pub fail_status: Option<u16>,
    pub delay: Option<Duration>,
    pub calls: AtomicUsize,
    pub prompts: Mutex<Vec<String>>,
}

impl FakeInference {
    pub fn answering(output: impl Into<InferenceOutput>) -> Self {
        Self {
            output: output.into(),
            fail_status: None,
            delay: None,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            fail_status: Some(status),
            ..Self::answering("")
        }
    }

    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::answering("late")
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InferenceBackend for FakeInference {
    async fn run(&self, prompt: &str) -> Result<InferenceOutput> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(status) = self.fail_status {
            return Err(Error::inference(Some(status), "model overloaded"));
        }
        Ok(self.output.clone())
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}

/// Store whose every operation fails, as if unreachable.
pub struct UnreachableStore;

#[async_trait]
impl CacheStore for UnreachableStore {
    async fn get(&self, _: &CacheKey) -> Result<Option<Vec<u8>>> {
        Err(Error::cache_store("unreachable", "connection refused"))
    }
    async fn put(&self, _: &CacheKey, _: &[u8], _: Duration) -> Result<()> {
        Err(Error::cache_store("unreachable", "connection refused"))
    }
    fn name(&self) -> &'static str {
        "unreachable"
    }
}

pub struct Harness {
    pub services: Services,
    pub store: Arc<MemoryStore>,
    pub source: Arc<FakeSource>,
    pub inference: Arc<FakeInference>,
}

pub fn harness(source: FakeSource, inference: FakeInference) -> Harness {
    let store = Arc::new(MemoryStore::new(64));
    let source = Arc::new(source);
    let inference = Arc::new(inference);
    let services = Services::assemble(
        &ServiceConfig::default(),
        store.clone(),
        source.clone(),
        inference.clone(),
    );
    Harness {
        services,
        store,
        source,
        inference,
    }
}
