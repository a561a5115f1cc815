//! Provider-independent issue and user records

use serde::{Deserialize, Serialize};

/// Issue label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
}

/// Author of an issue or pull request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueAuthor {
    pub login: String,
    pub url: String,
}

/// Issue (or pull request) data as every provider adapter reports it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalIssue {
    pub number: u64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pull_request_url: Option<String>,
    pub labels: Vec<Label>,
    pub author: IssueAuthor,
}

impl CanonicalIssue {
    pub fn is_pull_request(&self) -> bool {
        self.pull_request_url.is_some()
    }

    pub fn has_label(&self, name: &str) -> bool {
        self.labels.iter().any(|label| label.name == name)
    }
}

/// User data as every provider adapter reports it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalUser {
    pub login: String,
    pub name: String,
    pub url: String,
}
