//! Detached work that must outlive the request that scheduled it.
//!
//! Cache writes are scheduled here so a response can be returned before the write lands,
//! and so the write still completes if the caller goes away.

use std::future::Future;

use tokio_util::task::TaskTracker;
use tracing::Instrument;

/// Spawns tracked, detached tasks on the current tokio runtime.
#[derive(Clone, Default)]
pub struct BackgroundWork {
    tracker: TaskTracker,
}

impl BackgroundWork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` independently of the caller. The caller never observes its outcome.
    pub fn schedule<F>(&self, label: &'static str, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let span = tracing::debug_span!("background", task = label);
        self.tracker.spawn(task.instrument(span));
    }

    /// Number of scheduled tasks that have not finished yet.
    pub fn pending(&self) -> usize {
        self.tracker.len()
    }

    /// Wait until every task scheduled so far has finished.
    ///
    /// Tasks scheduled while waiting are waited for too. Scheduling keeps working afterwards.
    pub async fn wait_idle(&self) {
        self.tracker.close();
        self.tracker.wait().await;
        self.tracker.reopen();
    }
}
