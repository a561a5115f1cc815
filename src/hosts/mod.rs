//! Hosting provider adapters
//!
//! Each adapter turns the three logical lookups (issue page URL, issue data,
//! user data) into provider-specific requests and normalizes the responses
//! into [`CanonicalIssue`] and [`CanonicalUser`]:
//! - GitHub: REST v3, `token` auth
//! - GitLab: API v4, `bearer` auth, self-hosted instances supported

pub mod github;
pub mod gitlab;
pub mod types;

pub use github::GitHub;
pub use gitlab::GitLab;
pub use types::{CanonicalIssue, CanonicalUser, IssueAuthor, Label};

use crate::config::{RepoDescriptor, RepoType};
use crate::core::{ChangelogError, ChangelogResult};
use crate::di::JsonFetcher;
use serde::de::DeserializeOwned;

/// Decode a raw response into a provider payload type
fn decode<T: DeserializeOwned>(url: &str, raw: serde_json::Value) -> ChangelogResult<T> {
    serde_json::from_value(raw).map_err(|e| ChangelogError::MalformedResponse {
        url: url.to_string(),
        message: e.to_string(),
    })
}

/// Provider adapter, selected once from the repo type
#[derive(Debug, Clone)]
pub enum Provider {
    GitHub(GitHub),
    GitLab(GitLab),
}

impl Provider {
    pub fn for_repo(repo: &RepoDescriptor) -> Self {
        match repo.kind {
            RepoType::GitHub => Provider::GitHub(GitHub::new()),
            RepoType::GitLab => Provider::GitLab(GitLab::new()),
        }
    }

    pub fn kind(&self) -> RepoType {
        match self {
            Provider::GitHub(_) => RepoType::GitHub,
            Provider::GitLab(_) => RepoType::GitLab,
        }
    }

    /// `Authorization` header value for `credential`
    pub fn auth_header(&self, credential: &str) -> String {
        match self {
            Provider::GitHub(github) => github.auth_header(credential),
            Provider::GitLab(gitlab) => gitlab.auth_header(credential),
        }
    }

    pub fn issue_page_url(&self, repo: &RepoDescriptor) -> String {
        match self {
            Provider::GitHub(github) => github.issue_page_url(repo),
            Provider::GitLab(gitlab) => gitlab.issue_page_url(repo),
        }
    }

    pub async fn fetch_issue(
        &self,
        fetcher: &dyn JsonFetcher,
        credential: &str,
        repo: &RepoDescriptor,
        issue: &str,
    ) -> ChangelogResult<CanonicalIssue> {
        match self {
            Provider::GitHub(github) => github.fetch_issue(fetcher, credential, repo, issue).await,
            Provider::GitLab(gitlab) => gitlab.fetch_issue(fetcher, credential, repo, issue).await,
        }
    }

    pub async fn fetch_user(
        &self,
        fetcher: &dyn JsonFetcher,
        credential: &str,
        repo: &RepoDescriptor,
        login: &str,
    ) -> ChangelogResult<CanonicalUser> {
        match self {
            Provider::GitHub(github) => github.fetch_user(fetcher, credential, login).await,
            Provider::GitLab(gitlab) => gitlab.fetch_user(fetcher, credential, repo, login).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Protocol;

    #[test]
    fn test_for_repo_selects_provider() {
        let github = Provider::for_repo(&RepoDescriptor::github("a/b"));
        assert_eq!(github.kind(), RepoType::GitHub);
        assert_eq!(github.auth_header("t"), "token t");

        let gitlab_repo = RepoDescriptor::new(RepoType::GitLab, "a/b", Protocol::Https, "gitlab.com");
        let gitlab = Provider::for_repo(&gitlab_repo);
        assert_eq!(gitlab.kind(), RepoType::GitLab);
        assert_eq!(gitlab.auth_header("t"), "bearer t");
        assert_eq!(
            gitlab.issue_page_url(&gitlab_repo),
            "https://gitlab.com/a/b/-/issues/"
        );
    }

    #[test]
    fn test_decode_error_carries_url() {
        let err = decode::<Vec<String>>("https://x/y", serde_json::json!({})).unwrap_err();
        match err {
            ChangelogError::MalformedResponse { url, .. } => assert_eq!(url, "https://x/y"),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
