//! Trait definitions for dependency injection

use crate::core::ChangelogResult;
use async_trait::async_trait;

/// Trait for response cache operations
///
/// A key→response store keyed by request URL. Implementations must tolerate
/// concurrent access from several in-flight fetches.
pub trait ResponseCache: Send + Sync {
    /// Look up a stored response body
    fn get(&self, url: &str) -> ChangelogResult<Option<serde_json::Value>>;

    /// Store a successful response body
    fn put(&self, url: &str, body: &serde_json::Value) -> ChangelogResult<()>;
}

/// Trait for authenticated JSON fetches
///
/// Provider adapters build URLs and auth headers; implementations perform the
/// GET and classify failures.
#[async_trait]
pub trait JsonFetcher: Send + Sync {
    /// GET `url` with `Authorization: <auth_header>` and parse the body as JSON
    async fn get_json(&self, url: &str, auth_header: &str) -> ChangelogResult<serde_json::Value>;
}
