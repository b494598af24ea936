//! The cached AI request flow.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::background::BackgroundWork;
use crate::cache::{Fingerprint, RequestFingerprinter, ResponseCache};
use crate::inference::{InferenceBackend, DEFAULT_INFERENCE_TIMEOUT};
use crate::types::AiRequest;
use crate::{Error, Result};

#[derive(Debug, Clone, Serialize)]
pub struct AiReply {
    pub text: String,
    pub fingerprint: Fingerprint,
    /// True when no inference call was made.
    pub cached: bool,
}

/// Answers AI requests, calling the inference backend only on a response-cache miss.
pub struct AiService {
    backend: Arc<dyn InferenceBackend>,
    cache: ResponseCache,
    background: BackgroundWork,
    fingerprinter: RequestFingerprinter,
    timeout: Duration,
}

impl AiService {
    pub fn new(
        backend: Arc<dyn InferenceBackend>,
        cache: ResponseCache,
        background: BackgroundWork,
    ) -> Self {
        Self {
            backend,
            cache,
            background,
            fingerprinter: RequestFingerprinter::new(),
            timeout: DEFAULT_INFERENCE_TIMEOUT,
        }
    }

    pub fn with_fingerprinter(mut self, fingerprinter: RequestFingerprinter) -> Self {
        self.fingerprinter = fingerprinter;
        self
    }

    /// Upper bound on one inference call. Exceeding it fails the request; there is no retry.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn fingerprinter(&self) -> &RequestFingerprinter {
        &self.fingerprinter
    }

    pub async fn respond(&self, request: &AiRequest) -> Result<AiReply> {
        let canonical = self.fingerprinter.canonicalize(request)?;
        let fingerprint = self.fingerprinter.fingerprint_canonical(&canonical);

        if let Some(text) = self.cache.get(&fingerprint).await {
            return Ok(AiReply {
                text,
                fingerprint,
                cached: true,
            });
        }

        let started = Instant::now();
        let output = tokio::time::timeout(self.timeout, self.backend.run(&canonical))
            .await
            .map_err(|_| {
                Error::inference_timeout(format!(
                    "{} gave no answer within {}s",
                    self.backend.name(),
                    self.timeout.as_secs()
                ))
            })??;
        let text = output.into_text();
        tracing::info!(
            fingerprint = %fingerprint,
            backend = self.backend.name(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "inference completed"
        );

        let cache = self.cache.clone();
        let key = fingerprint.clone();
        let to_store = text.clone();
        self.background.schedule("response_cache_write", async move {
            if let Err(e) = cache.put(&key, &to_store).await {
                tracing::warn!(fingerprint = %key, error = %e, "response cache write failed");
            }
        });

        Ok(AiReply {
            text,
            fingerprint,
            cached: false,
        })
    }
}
