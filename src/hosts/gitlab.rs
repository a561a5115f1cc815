//! GitLab v4 adapter

use super::decode;
use super::types::{CanonicalIssue, CanonicalUser, IssueAuthor, Label};
use crate::config::RepoDescriptor;
use crate::core::ChangelogResult;
use crate::di::JsonFetcher;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct GitLabIssueResponse {
    iid: u64,
    #[serde(default)]
    title: String,
    #[serde(default)]
    labels: Vec<String>,
    author: GitLabAuthor,
}

#[derive(Debug, Deserialize)]
struct GitLabAuthor {
    username: String,
    web_url: String,
}

#[derive(Debug, Deserialize)]
struct GitLabUserResponse {
    username: String,
    #[serde(default)]
    name: Option<String>,
    web_url: String,
}

impl From<GitLabIssueResponse> for CanonicalIssue {
    fn from(raw: GitLabIssueResponse) -> Self {
        Self {
            number: raw.iid,
            title: raw.title,
            pull_request_url: None,
            labels: raw.labels.into_iter().map(|name| Label { name }).collect(),
            author: IssueAuthor {
                login: raw.author.username,
                url: raw.author.web_url,
            },
        }
    }
}

impl From<GitLabUserResponse> for CanonicalUser {
    fn from(raw: GitLabUserResponse) -> Self {
        let name = raw
            .name
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| raw.username.clone());
        Self {
            login: raw.username,
            name,
            url: raw.web_url,
        }
    }
}

/// GitLab provider adapter
///
/// All URLs are derived from the repo's own protocol and domain, so
/// self-hosted instances work without extra configuration.
#[derive(Debug, Clone, Default)]
pub struct GitLab;

impl GitLab {
    pub fn new() -> Self {
        Self
    }

    pub fn auth_header(&self, credential: &str) -> String {
        format!("bearer {}", credential)
    }

    pub fn issue_page_url(&self, repo: &RepoDescriptor) -> String {
        format!("{}/{}/-/issues/", repo.base_url(), repo.name)
    }

    /// The project path is passed as a single URL-encoded id (`group%2Fproject`)
    pub fn issue_api_url(&self, repo: &RepoDescriptor, issue: &str) -> String {
        format!(
            "{}/api/v4/projects/{}/issues/{}",
            repo.base_url(),
            urlencoding::encode(&repo.name),
            urlencoding::encode(issue)
        )
    }

    pub fn user_api_url(&self, repo: &RepoDescriptor, login: &str) -> String {
        format!(
            "{}/api/v4/users?username={}",
            repo.base_url(),
            urlencoding::encode(login)
        )
    }

    pub async fn fetch_issue(
        &self,
        fetcher: &dyn JsonFetcher,
        credential: &str,
        repo: &RepoDescriptor,
        issue: &str,
    ) -> ChangelogResult<CanonicalIssue> {
        let url = self.issue_api_url(repo, issue);
        let raw = fetcher.get_json(&url, &self.auth_header(credential)).await?;
        let issue: GitLabIssueResponse = decode(&url, raw)?;
        Ok(issue.into())
    }

    /// Look up a user by username
    ///
    /// The users search may legitimately come back empty for a valid
    /// historical author; a placeholder pointing at the profile URL is
    /// returned in that case.
    pub async fn fetch_user(
        &self,
        fetcher: &dyn JsonFetcher,
        credential: &str,
        repo: &RepoDescriptor,
        login: &str,
    ) -> ChangelogResult<CanonicalUser> {
        let url = self.user_api_url(repo, login);
        let raw = fetcher.get_json(&url, &self.auth_header(credential)).await?;
        let users: Vec<GitLabUserResponse> = decode(&url, raw)?;

        match users.into_iter().next() {
            Some(user) => Ok(user.into()),
            None => {
                tracing::debug!("no GitLab user named {}, using placeholder", login);
                Ok(CanonicalUser {
                    login: login.to_string(),
                    name: login.to_string(),
                    url: format!("{}/{}", repo.base_url(), login),
                })
            }
        }
    }
}
