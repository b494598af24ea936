//! PostgREST-style data source over HTTP.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use url::Url;

use super::DataSource;
use crate::types::{Comment, Post, Reaction};
use crate::{Error, ErrorContext, Result};

const POST_FIELDS: &str = "id,text,region,profession,created_at";
const REACTION_FIELDS: &str = "post_id,kind";
const COMMENT_FIELDS: &str = "post_id";

pub const DEFAULT_DATA_TIMEOUT: Duration = Duration::from_secs(15);

pub struct RestDataSource {
    http_client: reqwest::Client,
    base_url: Url,
    api_key: Option<String>,
    timeout: Duration,
}

impl RestDataSource {
    pub fn builder() -> RestDataSourceBuilder {
        RestDataSourceBuilder::new()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn table_url(&self, table: &str) -> Result<Url> {
        self.base_url.join(&format!("rest/v1/{}", table)).map_err(|e| {
            Error::configuration_with_context(
                format!("invalid data source url: {}", e),
                ErrorContext::new().with_field_path("data_url"),
            )
        })
    }

    async fn list<T: DeserializeOwned>(
        &self,
        table: &str,
        select: &str,
        limit: usize,
        order: Option<&str>,
    ) -> Result<Vec<T>> {
        let url = self.table_url(table)?;
        let limit = limit.to_string();
        let mut query: Vec<(&str, &str)> = vec![("select", select), ("limit", &limit)];
        if let Some(order) = order {
            query.push(("order", order));
        }

        let mut request = self.http_client.get(url).query(&query);
        if let Some(key) = &self.api_key {
            request = request.header("apikey", key).bearer_auth(key);
        }

        let ctx = || ErrorContext::new().with_source("rest_source").with_field_path(table);
        let response = request.send().await.map_err(|e| {
            Error::upstream_with_context(format!("{} query failed: {}", table, e), ctx())
        })?;
        let status = response.status();
        let body = response.text().await.map_err(|e| {
            Error::upstream_with_context(format!("failed to read {} response: {}", table, e), ctx())
        })?;
        if !status.is_success() {
            tracing::warn!(table, status = status.as_u16(), "data source returned error status");
            return Err(Error::upstream_with_context(
                format!("{} query returned HTTP {}", table, status.as_u16()),
                ctx().with_details(truncate(&body, 256)),
            ));
        }
        serde_json::from_str(&body).map_err(|e| {
            Error::upstream_with_context(format!("malformed {} records: {}", table, e), ctx())
        })
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…", &s[..end])
}

#[async_trait]
impl DataSource for RestDataSource {
    async fn posts(&self, limit: usize) -> Result<Vec<Post>> {
        self.list("posts", POST_FIELDS, limit, Some("created_at.desc"))
            .await
    }

    async fn reactions(&self, limit: usize) -> Result<Vec<Reaction>> {
        self.list("reactions", REACTION_FIELDS, limit, None).await
    }

    async fn comments(&self, limit: usize) -> Result<Vec<Comment>> {
        self.list("comments", COMMENT_FIELDS, limit, None).await
    }

    fn name(&self) -> &'static str {
        "rest"
    }
}

pub struct RestDataSourceBuilder {
    base_url: Option<String>,
    api_key: Option<String>,
    timeout: Duration,
}

impl RestDataSourceBuilder {
    pub fn new() -> Self {
        Self {
            base_url: None,
            api_key: None,
            timeout: DEFAULT_DATA_TIMEOUT,
        }
    }
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<RestDataSource> {
        let raw = self
            .base_url
            .ok_or_else(|| Error::configuration("data source url must be specified"))?;
        // a trailing slash keeps Url::join from dropping the last path segment
        let normalized = if raw.ends_with('/') { raw } else { format!("{}/", raw) };
        let base_url = Url::parse(&normalized).map_err(|e| {
            Error::configuration_with_context(
                format!("invalid data source url: {}", e),
                ErrorContext::new().with_field_path("data_url"),
            )
        })?;
        let http_client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| Error::configuration(format!("Failed to create HTTP client: {}", e)))?;
        Ok(RestDataSource {
            http_client,
            base_url,
            api_key: self.api_key,
            timeout: self.timeout,
        })
    }
}

impl Default for RestDataSourceBuilder {
    fn default() -> Self {
        Self::new()
    }
}
