//! # Inference Module
//!
//! The hosted text-generation call the AI flow protects with [`crate::cache::ResponseCache`].
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`InferenceBackend`] | Trait for one prompt-in, output-out call |
//! | [`InferenceOutput`] | The three output shapes a backend may return |
//! | [`HttpInference`] | HTTP implementation with a bounded wait |

mod client;

pub use client::{HttpInference, HttpInferenceBuilder, DEFAULT_INFERENCE_TIMEOUT, DEFAULT_MODEL};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;

#[async_trait]
pub trait InferenceBackend: Send + Sync {
    async fn run(&self, prompt: &str) -> Result<InferenceOutput>;
    fn name(&self) -> &'static str;
}

/// Output shapes returned by inference backends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InferenceOutput {
    Text(String),
    /// Fragments to be concatenated in order.
    Fragments(Vec<String>),
    Object {
        #[serde(alias = "response")]
        text: String,
    },
}

impl InferenceOutput {
    /// Normalize any shape into plain text.
    pub fn into_text(self) -> String {
        match self {
            InferenceOutput::Text(text) => text,
            InferenceOutput::Fragments(parts) => parts.concat(),
            InferenceOutput::Object { text } => text,
        }
    }
}

impl From<&str> for InferenceOutput {
    fn from(s: &str) -> Self {
        InferenceOutput::Text(s.to_string())
    }
}

impl From<String> for InferenceOutput {
    fn from(s: String) -> Self {
        InferenceOutput::Text(s)
    }
}
