//! Authenticated JSON fetching with an optional response cache

use crate::core::{ChangelogError, ChangelogResult};
use crate::di::{JsonFetcher, ResponseCache};
use async_trait::async_trait;
use reqwest::{header, Client as HttpClient};
use std::sync::Arc;
use std::time::Duration;

const USER_AGENT: &str = "lerna-changelog";

/// HTTP fetcher that sends a caller-supplied `Authorization` header
///
/// Successful responses are stored in the cache, when one is configured, and
/// served from it on later requests for the same URL. Error responses are
/// never cached.
#[derive(Clone)]
pub struct CachingFetcher {
    http_client: HttpClient,
    cache: Option<Arc<dyn ResponseCache>>,
}

impl CachingFetcher {
    /// Create a fetcher, optionally backed by `cache`
    pub fn new(cache: Option<Arc<dyn ResponseCache>>) -> ChangelogResult<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::USER_AGENT, header::HeaderValue::from_static(USER_AGENT));
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let http_client = HttpClient::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ChangelogError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { http_client, cache })
    }

    pub fn is_cached(&self) -> bool {
        self.cache.is_some()
    }

    /// GET `url` and parse the body as JSON
    pub async fn fetch(&self, url: &str, auth_header: &str) -> ChangelogResult<serde_json::Value> {
        if let Some(cache) = &self.cache {
            if let Some(body) = cache_get(cache, url).await {
                tracing::debug!("cache hit: {}", url);
                return Ok(body);
            }
            tracing::debug!("cache miss: {}", url);
        }

        let auth = header::HeaderValue::from_str(auth_header)
            .map_err(|e| ChangelogError::Config(format!("Invalid auth token: {}", e)))?;

        let response = self
            .http_client
            .get(url)
            .header(header::AUTHORIZATION, auth)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let body = serde_json::from_str::<serde_json::Value>(&text)
                .unwrap_or_else(|_| serde_json::Value::String(text));
            tracing::debug!("fetch failed: {} {}", status.as_u16(), url);
            return Err(ChangelogError::Fetch {
                url: url.to_string(),
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("").to_string(),
                body,
            });
        }

        let body: serde_json::Value =
            serde_json::from_str(&text).map_err(|e| ChangelogError::MalformedResponse {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        if let Some(cache) = &self.cache {
            cache_put(cache, url, &body).await;
        }

        Ok(body)
    }
}

/// Read `url` from the cache on the blocking pool; a failed read is a miss
async fn cache_get(cache: &Arc<dyn ResponseCache>, url: &str) -> Option<serde_json::Value> {
    let cache = Arc::clone(cache);
    let key = url.to_string();
    let result = tokio::task::spawn_blocking(move || cache.get(&key))
        .await
        .map_err(|e| ChangelogError::Cache(format!("Cache lookup task failed: {}", e)))
        .and_then(|lookup| lookup);

    match result {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!("cache read failed for {}: {}", url, e);
            None
        }
    }
}

/// Store a fetched body; a failed write is logged and the body still returned
async fn cache_put(cache: &Arc<dyn ResponseCache>, url: &str, body: &serde_json::Value) {
    let cache = Arc::clone(cache);
    let key = url.to_string();
    let value = body.clone();
    let result = tokio::task::spawn_blocking(move || cache.put(&key, &value))
        .await
        .map_err(|e| ChangelogError::Cache(format!("Cache store task failed: {}", e)))
        .and_then(|stored| stored);

    if let Err(e) = result {
        tracing::warn!("cache write failed for {}: {}", url, e);
    }
}

#[async_trait]
impl JsonFetcher for CachingFetcher {
    async fn get_json(&self, url: &str, auth_header: &str) -> ChangelogResult<serde_json::Value> {
        self.fetch(url, auth_header).await
    }
}
