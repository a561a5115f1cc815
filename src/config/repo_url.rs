//! Extraction of `owner/repo` from git remote URLs
//!
//! Only GitHub remotes are recognized. GitLab (and every other host) must be
//! configured explicitly with a structured `repo` object.

use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;

/// Matches GitHub remotes in the shapes npm manifests carry:
/// `git+https://`, `https://`, `http://`, `git://`, `ssh://[user@]` and the
/// scp-like `git@github.com:` form. Host is case-insensitive, path is not.
const GITHUB_REMOTE_PATTERN: &str = r"^(?:(?:git\+)?(?:https?|git|ssh)://(?:[^@/\s]+@)?(?i:github\.com)/|git@(?i:github\.com):)([^/\s]+)/([^/\s]+?)(?:\.git)?/?$";

fn github_remote() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(GITHUB_REMOTE_PATTERN).ok())
        .as_ref()
}

/// The `repository` field of a `package.json`
///
/// npm accepts either `{ "type": "git", "url": "..." }` or the URL string
/// itself as shorthand.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RepositoryField {
    Url(String),
    Object {
        #[serde(rename = "type", default)]
        kind: Option<String>,
        url: String,
    },
}

impl RepositoryField {
    pub fn url(&self) -> &str {
        match self {
            RepositoryField::Url(url) => url,
            RepositoryField::Object { url, .. } => url,
        }
    }
}

/// Parse a git remote URL into `owner/repo`
///
/// Returns `None` for any non-GitHub host or when the owner or repository
/// segment is missing. A trailing `.git` is dropped; other dots are kept, so
/// `emberjs/ember.js.git` yields `emberjs/ember.js`.
pub fn parse_remote_url(remote_url: &str) -> Option<String> {
    let caps = github_remote()?.captures(remote_url.trim())?;
    let owner = caps.get(1)?.as_str();
    let repo = caps.get(2)?.as_str();
    if owner.is_empty() || repo.is_empty() {
        return None;
    }
    Some(format!("{}/{}", owner, repo))
}

/// Infer `owner/repo` from a manifest's `repository` field
pub fn find_repo_from_manifest(repository: Option<&RepositoryField>) -> Option<String> {
    repository.and_then(|field| parse_remote_url(field.url()))
}
