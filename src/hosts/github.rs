//! GitHub REST v3 adapter
//!
//! GitHub's issue and user payloads already have the canonical shape, so the
//! mapping is field-for-field.

use super::decode;
use super::types::{CanonicalIssue, CanonicalUser, IssueAuthor, Label};
use crate::config::RepoDescriptor;
use crate::core::ChangelogResult;
use crate::di::JsonFetcher;
use serde::Deserialize;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_WEB_URL: &str = "https://github.com";

#[derive(Debug, Deserialize)]
struct GitHubIssueResponse {
    number: u64,
    title: String,
    #[serde(default)]
    pull_request: Option<GitHubPullRequestRef>,
    #[serde(default)]
    labels: Vec<Label>,
    user: GitHubIssueUser,
}

#[derive(Debug, Deserialize)]
struct GitHubPullRequestRef {
    html_url: String,
}

#[derive(Debug, Deserialize)]
struct GitHubIssueUser {
    login: String,
    html_url: String,
}

#[derive(Debug, Deserialize)]
struct GitHubUserResponse {
    login: String,
    #[serde(default)]
    name: Option<String>,
    html_url: String,
}

impl From<GitHubIssueResponse> for CanonicalIssue {
    fn from(raw: GitHubIssueResponse) -> Self {
        Self {
            number: raw.number,
            title: raw.title,
            pull_request_url: raw.pull_request.map(|pr| pr.html_url),
            labels: raw.labels,
            author: IssueAuthor {
                login: raw.user.login,
                url: raw.user.html_url,
            },
        }
    }
}

impl From<GitHubUserResponse> for CanonicalUser {
    fn from(raw: GitHubUserResponse) -> Self {
        // Users without a display name come back with `name: null`
        let name = raw
            .name
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| raw.login.clone());
        Self {
            login: raw.login,
            name,
            url: raw.html_url,
        }
    }
}

/// GitHub provider adapter
#[derive(Debug, Clone)]
pub struct GitHub {
    pub api_url: String,
    pub web_url: String,
}

impl Default for GitHub {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            web_url: DEFAULT_WEB_URL.to_string(),
        }
    }
}

impl GitHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn auth_header(&self, credential: &str) -> String {
        format!("token {}", credential)
    }

    pub fn issue_page_url(&self, repo: &RepoDescriptor) -> String {
        format!("{}/{}/issues", self.web_url, repo.name)
    }

    pub fn issue_api_url(&self, repo: &RepoDescriptor, issue: &str) -> String {
        format!(
            "{}/repos/{}/issues/{}",
            self.api_url,
            repo.name,
            urlencoding::encode(issue)
        )
    }

    pub fn user_api_url(&self, login: &str) -> String {
        format!("{}/users/{}", self.api_url, urlencoding::encode(login))
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
        let issue: GitHubIssueResponse = decode(&url, raw)?;
        Ok(issue.into())
    }

    pub async fn fetch_user(
        &self,
        fetcher: &dyn JsonFetcher,
        credential: &str,
        login: &str,
    ) -> ChangelogResult<CanonicalUser> {
        let url = self.user_api_url(login);
        let raw = fetcher.get_json(&url, &self.auth_header(credential)).await?;
        let user: GitHubUserResponse = decode(&url, raw)?;
        Ok(user.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ChangelogError;
    use crate::di::mocks::MockFetcher;

    fn repo() -> RepoDescriptor {
        RepoDescriptor::github("lerna/lerna-changelog")
    }

    #[test]
    fn test_urls() {
        let github = GitHub::new();
        assert_eq!(
            github.issue_page_url(&repo()),
            "https://github.com/lerna/lerna-changelog/issues"
        );
        assert_eq!(
            github.issue_api_url(&repo(), "42"),
            "https://api.github.com/repos/lerna/lerna-changelog/issues/42"
        );
        assert_eq!(
            github.user_api_url("octocat"),
            "https://api.github.com/users/octocat"
        );
        assert_eq!(github.auth_header("abc"), "token abc");
    }

    #[test]
    fn test_urls_encode_path_segments() {
        let github = GitHub::new();
        assert_eq!(
            github.user_api_url("../repos/x"),
            "https://api.github.com/users/..%2Frepos%2Fx"
        );
        assert_eq!(
            github.user_api_url("dependabot[bot]"),
            "https://api.github.com/users/dependabot%5Bbot%5D"
        );
        assert_eq!(
            github.issue_api_url(&repo(), "1?x=2"),
            "https://api.github.com/repos/lerna/lerna-changelog/issues/1%3Fx%3D2"
        );
    }

    #[tokio::test]
    async fn test_fetch_issue() {
        let fetcher = MockFetcher::new();
        fetcher.add_response(
            "https://api.github.com/repos/lerna/lerna-changelog/issues/42",
            serde_json::json!({
                "number": 42,
                "title": "Add GitLab support",
                "pull_request": { "html_url": "https://github.com/lerna/lerna-changelog/pull/42" },
                "labels": [{ "name": "enhancement", "color": "84b6eb" }],
                "user": { "login": "al", "html_url": "https://github.com/al", "id": 7 }
            }),
        );

        let issue = GitHub::new()
            .fetch_issue(&fetcher, "abc", &repo(), "42")
            .await
            .unwrap();

        assert_eq!(issue.number, 42);
        assert_eq!(issue.title, "Add GitLab support");
        assert_eq!(
            issue.pull_request_url.as_deref(),
            Some("https://github.com/lerna/lerna-changelog/pull/42")
        );
        assert_eq!(issue.labels, vec![Label { name: "enhancement".into() }]);
        assert_eq!(issue.author.login, "al");
        assert_eq!(issue.author.url, "https://github.com/al");
        assert_eq!(fetcher.requests()[0].auth_header, "token abc");
    }

    #[tokio::test]
    async fn test_fetch_plain_issue() {
        let fetcher = MockFetcher::new();
        fetcher.add_response(
            "https://api.github.com/repos/lerna/lerna-changelog/issues/3",
            serde_json::json!({
                "number": 3,
                "title": "Bug",
                "labels": [],
                "user": { "login": "al", "html_url": "https://github.com/al" }
            }),
        );

        let issue = GitHub::new()
            .fetch_issue(&fetcher, "abc", &repo(), "3")
            .await
            .unwrap();
        assert!(!issue.is_pull_request());
    }

    #[tokio::test]
    async fn test_fetch_user() {
        let fetcher = MockFetcher::new();
        fetcher.add_response(
            "https://api.github.com/users/octocat",
            serde_json::json!({
                "login": "octocat",
                "name": "The Octocat",
                "html_url": "https://github.com/octocat"
            }),
        );

        let user = GitHub::new()
            .fetch_user(&fetcher, "abc", "octocat")
            .await
            .unwrap();
        assert_eq!(
            user,
            CanonicalUser {
                login: "octocat".into(),
                name: "The Octocat".into(),
                url: "https://github.com/octocat".into(),
            }
        );
    }

    #[tokio::test]
    async fn test_fetch_user_without_name() {
        let fetcher = MockFetcher::new();
        fetcher.add_response(
            "https://api.github.com/users/ghost",
            serde_json::json!({ "login": "ghost", "name": null, "html_url": "https://github.com/ghost" }),
        );

        let user = GitHub::new().fetch_user(&fetcher, "abc", "ghost").await.unwrap();
        assert_eq!(user.name, "ghost");
    }

    #[tokio::test]
    async fn test_fetch_issue_wrong_shape() {
        let fetcher = MockFetcher::new();
        fetcher.add_response(
            "https://api.github.com/repos/lerna/lerna-changelog/issues/9",
            serde_json::json!({ "message": "moved" }),
        );

        let err = GitHub::new()
            .fetch_issue(&fetcher, "abc", &repo(), "9")
            .await
            .unwrap_err();
        assert!(matches!(err, ChangelogError::MalformedResponse { .. }));
    }

    #[tokio::test]
    async fn test_fetch_issue_not_found() {
        let fetcher = MockFetcher::new();
        let err = GitHub::new()
            .fetch_issue(&fetcher, "abc", &repo(), "1000")
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(404));
    }
}
