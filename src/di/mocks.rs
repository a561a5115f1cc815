//! Mock implementations of service traits for testing

use super::traits::{JsonFetcher, ResponseCache};
use crate::core::{ChangelogError, ChangelogResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock response cache for testing
///
/// Stores bodies in memory instead of on disk.
///
/// # Example
///
/// ```
/// use lerna_changelog::di::mocks::MockResponseCache;
/// use lerna_changelog::di::ResponseCache;
///
/// let cache = MockResponseCache::new();
/// cache.put("https://example.com/a", &serde_json::json!({ "ok": true })).unwrap();
///
/// assert!(cache.get("https://example.com/a").unwrap().is_some());
/// ```
#[derive(Clone, Default)]
pub struct MockResponseCache {
    entries: Arc<Mutex<HashMap<String, serde_json::Value>>>,
}

impl MockResponseCache {
    /// Create a new mock cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ResponseCache for MockResponseCache {
    fn get(&self, url: &str) -> ChangelogResult<Option<serde_json::Value>> {
        Ok(self.entries.lock().unwrap().get(url).cloned())
    }

    fn put(&self, url: &str, body: &serde_json::Value) -> ChangelogResult<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(url.to_string(), body.clone());
        Ok(())
    }
}

/// A request recorded by [`MockFetcher`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub url: String,
    pub auth_header: String,
}

/// Mock fetcher for testing
///
/// Serves canned JSON bodies by URL and records every request it sees.
/// Unknown URLs answer with a 404 fetch error.
///
/// # Example
///
/// ```
/// use lerna_changelog::di::mocks::MockFetcher;
///
/// let fetcher = MockFetcher::new();
/// fetcher.add_response("https://api.github.com/users/octocat", serde_json::json!({
///     "login": "octocat", "name": "The Octocat", "html_url": "https://github.com/octocat"
/// }));
/// assert!(fetcher.requests().is_empty());
/// ```
#[derive(Clone, Default)]
pub struct MockFetcher {
    responses: Arc<Mutex<HashMap<String, serde_json::Value>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockFetcher {
    /// Create a new mock fetcher
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the body returned for `url`
    pub fn add_response(&self, url: &str, body: serde_json::Value) {
        self.responses
            .lock()
            .unwrap()
            .insert(url.to_string(), body);
    }

    /// Requests seen so far, in order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl JsonFetcher for MockFetcher {
    async fn get_json(&self, url: &str, auth_header: &str) -> ChangelogResult<serde_json::Value> {
        self.requests.lock().unwrap().push(RecordedRequest {
            url: url.to_string(),
            auth_header: auth_header.to_string(),
        });

        self.responses
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| ChangelogError::Fetch {
                url: url.to_string(),
                status: 404,
                status_text: "Not Found".to_string(),
                body: serde_json::json!({ "message": "Not Found" }),
            })
    }
}
