//! HTTP inference client.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use super::{InferenceBackend, InferenceOutput};
use crate::{Error, Result};

pub const DEFAULT_MODEL: &str = "@cf/meta/llama-3.1-8b-instruct";
pub const DEFAULT_INFERENCE_TIMEOUT: Duration = Duration::from_secs(30);

/// `POST {base_url}/run/{model}` with `{"prompt": ...}`.
pub struct HttpInference {
    http_client: reqwest::Client,
    base_url: String,
    model: String,
    api_token: Option<String>,
    timeout: Duration,
}

impl HttpInference {
    pub fn builder() -> HttpInferenceBuilder {
        HttpInferenceBuilder::new()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/run/{}", self.base_url.trim_end_matches('/'), self.model)
    }
}

/// Decode a response body into an [`InferenceOutput`], unwrapping a `{"result": ...}` envelope.
fn parse_output(body: &str) -> Result<InferenceOutput> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| Error::inference(None, format!("response is not JSON: {}", e)))?;
    let value = match value {
        serde_json::Value::Object(mut obj) if obj.contains_key("result") => {
            obj.remove("result").unwrap_or_default()
        }
        other => other,
    };
    serde_json::from_value(value)
        .map_err(|_| Error::inference(None, "unrecognized inference output shape"))
}

#[async_trait]
impl InferenceBackend for HttpInference {
    async fn run(&self, prompt: &str) -> Result<InferenceOutput> {
        let request_id = uuid::Uuid::new_v4().to_string();
        let mut req = self
            .http_client
            .post(self.endpoint())
            .header("x-request-id", &request_id)
            .json(&json!({ "prompt": prompt }));
        if let Some(token) = &self.api_token {
            req = req.bearer_auth(token);
        }

        let response = req.send().await.map_err(|e| {
            if e.is_timeout() {
                Error::inference_timeout(format!(
                    "no response within {}s",
                    self.timeout.as_secs()
                ))
            } else {
                Error::inference(None, format!("inference request failed: {}", e))
            }
        })?;
        let status = response.status();
        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                Error::inference_timeout(format!("body not received within {}s", self.timeout.as_secs()))
            } else {
                Error::inference(Some(status.as_u16()), format!("failed to read response: {}", e))
            }
        })?;
        if !status.is_success() {
            tracing::warn!(%request_id, status = status.as_u16(), "inference call failed");
            return Err(Error::inference(Some(status.as_u16()), body));
        }
        parse_output(&body)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

pub struct HttpInferenceBuilder {
    base_url: Option<String>,
    model: Option<String>,
    api_token: Option<String>,
    timeout: Duration,
}

impl HttpInferenceBuilder {
    pub fn new() -> Self {
        Self {
            base_url: None,
            model: None,
            api_token: None,
            timeout: DEFAULT_INFERENCE_TIMEOUT,
        }
    }
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<HttpInference> {
        let base_url = self
            .base_url
            .ok_or_else(|| Error::configuration("inference url must be specified"))?;
        let http_client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| Error::configuration(format!("Failed to create HTTP client: {}", e)))?;
        Ok(HttpInference {
            http_client,
            base_url,
            model: self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_token: self.api_token,
            timeout: self.timeout,
        })
    }
}

impl Default for HttpInferenceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_and_enveloped_outputs() {
        assert_eq!(parse_output(r#""hi""#).unwrap().into_text(), "hi");
        assert_eq!(
            parse_output(r#"{"result":{"response":"hello"},"success":true}"#)
                .unwrap()
                .into_text(),
            "hello"
        );
        assert_eq!(parse_output(r#"{"result":["a","b"]}"#).unwrap().into_text(), "ab");
    }

    #[test]
    fn unusable_bodies_are_inference_errors() {
        for body in ["<html>", r#"{"result":{"choices":[]}}"#, "17"] {
            let err = parse_output(body).unwrap_err();
            assert_eq!(err.kind(), crate::error::ErrorKind::Inference, "{}", body);
        }
    }

    #[test]
    fn endpoint_joins_model() {
        let client = HttpInference::builder()
            .base_url("https://ai.example.com/v1/")
            .build()
            .unwrap();
        assert_eq!(
            client.endpoint(),
            "https://ai.example.com/v1/run/@cf/meta/llama-3.1-8b-instruct"
        );
    }
}
