//! Service configuration.
//!
//! Defaults are production-friendly; every field can be overridden from the environment
//! (`PULSEBOARD_*`) or with the builder-style setters.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::{DEFAULT_FEED_TTL, DEFAULT_RESPONSE_TTL};
use crate::inference::{HttpInference, DEFAULT_INFERENCE_TIMEOUT, DEFAULT_MODEL};
use crate::source::{FetchLimits, RestDataSource, DEFAULT_DATA_TIMEOUT};
use crate::{Error, ErrorContext, Result};

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub data_url: Option<String>,
    pub data_key: Option<String>,
    pub data_timeout: Duration,
    pub inference_url: Option<String>,
    pub inference_token: Option<String>,
    pub model: String,
    pub inference_timeout: Duration,
    pub feed_ttl: Duration,
    pub response_ttl: Duration,
    pub limits: FetchLimits,
    pub cache_key_prefix: Option<String>,
    pub cache_capacity: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            data_url: None,
            data_key: None,
            data_timeout: DEFAULT_DATA_TIMEOUT,
            inference_url: None,
            inference_token: None,
            model: DEFAULT_MODEL.to_string(),
            inference_timeout: DEFAULT_INFERENCE_TIMEOUT,
            feed_ttl: DEFAULT_FEED_TTL,
            response_ttl: DEFAULT_RESPONSE_TTL,
            limits: FetchLimits::default(),
            cache_key_prefix: None,
            cache_capacity: 10_000,
        }
    }
}

impl ServiceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by whatever `PULSEBOARD_*` variables are set.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) with an injectable variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        cfg.data_url = var("PULSEBOARD_DATA_URL");
        cfg.data_key = var("PULSEBOARD_DATA_KEY");
        if let Some(secs) = parse_var::<u64>(&var, "PULSEBOARD_DATA_TIMEOUT_SECS")? {
            cfg.data_timeout = Duration::from_secs(secs);
        }
        cfg.inference_url = var("PULSEBOARD_INFERENCE_URL");
        cfg.inference_token = var("PULSEBOARD_INFERENCE_TOKEN");
        if let Some(model) = var("PULSEBOARD_MODEL") {
            cfg.model = model;
        }
        if let Some(secs) = parse_var::<u64>(&var, "PULSEBOARD_INFERENCE_TIMEOUT_SECS")? {
            cfg.inference_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = parse_var::<u64>(&var, "PULSEBOARD_FEED_TTL_SECS")? {
            cfg.feed_ttl = Duration::from_secs(secs);
        }
        if let Some(secs) = parse_var::<u64>(&var, "PULSEBOARD_RESPONSE_TTL_SECS")? {
            cfg.response_ttl = Duration::from_secs(secs);
        }
        if let Some(n) = parse_var::<usize>(&var, "PULSEBOARD_POST_LIMIT")? {
            cfg.limits.posts = n;
        }
        if let Some(n) = parse_var::<usize>(&var, "PULSEBOARD_REACTION_LIMIT")? {
            cfg.limits.reactions = n;
        }
        if let Some(n) = parse_var::<usize>(&var, "PULSEBOARD_COMMENT_LIMIT")? {
            cfg.limits.comments = n;
        }
        cfg.cache_key_prefix = var("PULSEBOARD_CACHE_PREFIX");
        if let Some(n) = parse_var::<usize>(&var, "PULSEBOARD_CACHE_CAPACITY")? {
            cfg.cache_capacity = n;
        }
        Ok(cfg)
    }

    pub fn with_data_url(mut self, url: impl Into<String>) -> Self {
        self.data_url = Some(url.into());
        self
    }

    pub fn with_data_key(mut self, key: impl Into<String>) -> Self {
        self.data_key = Some(key.into());
        self
    }

    pub fn with_data_timeout(mut self, timeout: Duration) -> Self {
        self.data_timeout = timeout;
        self
    }

    pub fn with_inference_url(mut self, url: impl Into<String>) -> Self {
        self.inference_url = Some(url.into());
        self
    }

    pub fn with_inference_token(mut self, token: impl Into<String>) -> Self {
        self.inference_token = Some(token.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_inference_timeout(mut self, timeout: Duration) -> Self {
        self.inference_timeout = timeout;
        self
    }

    pub fn with_feed_ttl(mut self, ttl: Duration) -> Self {
        self.feed_ttl = ttl;
        self
    }

    pub fn with_response_ttl(mut self, ttl: Duration) -> Self {
        self.response_ttl = ttl;
        self
    }

    pub fn with_limits(mut self, limits: FetchLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_cache_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.cache_key_prefix = Some(prefix.into());
        self
    }

    /// Build the REST data source described by this config.
    pub fn rest_source(&self) -> Result<RestDataSource> {
        let url = self.data_url.clone().ok_or_else(|| {
            Error::configuration_with_context(
                "data source url is not configured",
                ErrorContext::new().with_field_path("PULSEBOARD_DATA_URL"),
            )
        })?;
        let mut builder = RestDataSource::builder()
            .base_url(url)
            .timeout(self.data_timeout);
        if let Some(key) = &self.data_key {
            builder = builder.api_key(key.clone());
        }
        builder.build()
    }

    /// Build the HTTP inference backend described by this config.
    pub fn http_inference(&self) -> Result<HttpInference> {
        let url = self.inference_url.clone().ok_or_else(|| {
            Error::configuration_with_context(
                "inference url is not configured",
                ErrorContext::new().with_field_path("PULSEBOARD_INFERENCE_URL"),
            )
        })?;
        let mut builder = HttpInference::builder()
            .base_url(url)
            .model(self.model.clone())
            .timeout(self.inference_timeout);
        if let Some(token) = &self.inference_token {
            builder = builder.api_token(token.clone());
        }
        builder.build()
    }
}

fn parse_var<T>(var: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match var(key) {
        None => Ok(None),
        Some(raw) => raw.trim().parse::<T>().map(Some).map_err(|e| {
            Error::configuration_with_context(
                format!("cannot parse {:?}: {}", raw, e),
                ErrorContext::new().with_field_path(key),
            )
        }),
    }
}
