//! Host API facade used by changelog generation

use crate::cache::DiskCache;
use crate::config::{Configuration, RepoDescriptor};
use crate::core::{ChangelogResult, CredentialStore, AUTH_ENV_VAR};
use crate::di::{JsonFetcher, ResponseCache};
use crate::fetch::CachingFetcher;
use crate::hosts::{CanonicalIssue, CanonicalUser, Provider};
use std::path::PathBuf;
use std::sync::Arc;

/// Issue and user lookups for the configured repository
///
/// Holds the API token and the response cache location, both fixed at
/// construction. Cheap to clone and safe to share across tasks.
#[derive(Clone)]
pub struct GitHostApi {
    repo: RepoDescriptor,
    provider: Provider,
    credential: String,
    cache_dir: Option<PathBuf>,
    fetcher: Arc<dyn JsonFetcher>,
}

impl std::fmt::Debug for GitHostApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHostApi")
            .field("repo", &self.repo)
            .field("provider", &self.provider)
            .field("cache_dir", &self.cache_dir)
            .finish_non_exhaustive()
    }
}

impl GitHostApi {
    /// Create the API, reading the token from `GITHUB_AUTH`
    pub fn new(config: &Configuration) -> ChangelogResult<Self> {
        Self::with_credential(config, CredentialStore::retrieve()?)
    }

    /// Create the API with an explicit token
    ///
    /// Responses are cached under `root_path/cache_dir/github` when the
    /// configuration names a cache directory.
    pub fn with_credential(config: &Configuration, credential: String) -> ChangelogResult<Self> {
        let cache_dir = config.github_cache_dir();
        let cache: Option<Arc<dyn ResponseCache>> = match &cache_dir {
            Some(dir) => Some(Arc::new(DiskCache::new(dir.clone())?)),
            None => None,
        };
        let fetcher = Arc::new(CachingFetcher::new(cache)?);
        Self::build(config, credential, cache_dir, fetcher)
    }

    /// Create the API around any fetcher implementation
    pub fn with_fetcher(
        config: &Configuration,
        credential: String,
        fetcher: Arc<dyn JsonFetcher>,
    ) -> ChangelogResult<Self> {
        Self::build(config, credential, config.github_cache_dir(), fetcher)
    }

    fn build(
        config: &Configuration,
        credential: String,
        cache_dir: Option<PathBuf>,
        fetcher: Arc<dyn JsonFetcher>,
    ) -> ChangelogResult<Self> {
        let credential = CredentialStore::validate(AUTH_ENV_VAR, credential)?;
        Ok(Self {
            repo: config.repo.clone(),
            provider: Provider::for_repo(&config.repo),
            credential,
            cache_dir,
            fetcher,
        })
    }

    /// Replace the adapter, e.g. to point GitHub at a different API host
    pub fn with_provider(mut self, provider: Provider) -> Self {
        self.provider = provider;
        self
    }

    pub fn repo(&self) -> &RepoDescriptor {
        &self.repo
    }

    pub fn provider(&self) -> &Provider {
        &self.provider
    }

    pub fn cache_dir(&self) -> Option<&PathBuf> {
        self.cache_dir.as_ref()
    }

    /// Base URL of the repository's issue list
    pub fn issue_page_url(&self) -> String {
        self.provider.issue_page_url(&self.repo)
    }

    /// Fetch an issue or pull request by number
    pub async fn issue_data(&self, issue: &str) -> ChangelogResult<CanonicalIssue> {
        self.provider
            .fetch_issue(self.fetcher.as_ref(), &self.credential, &self.repo, issue)
            .await
            .inspect_err(|e| tracing::warn!("failed to fetch issue #{}: {}", issue, e))
    }

    /// Fetch a user by login
    pub async fn user_data(&self, login: &str) -> ChangelogResult<CanonicalUser> {
        self.provider
            .fetch_user(self.fetcher.as_ref(), &self.credential, &self.repo, login)
            .await
            .inspect_err(|e| tracing::warn!("failed to fetch user {}: {}", login, e))
    }
}
