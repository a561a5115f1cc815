//! Repository identity types

use serde::{Deserialize, Serialize};

/// Hosting provider of a tracked repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepoType {
    #[default]
    GitHub,
    GitLab,
}

impl RepoType {
    /// Public host used when a repo object names no domain
    pub fn default_domain(&self) -> &'static str {
        match self {
            RepoType::GitHub => "github.com",
            RepoType::GitLab => "gitlab.com",
        }
    }
}

impl std::fmt::Display for RepoType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepoType::GitHub => write!(f, "github"),
            RepoType::GitLab => write!(f, "gitlab"),
        }
    }
}

/// URL scheme used to reach a self-hosted instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Http,
    #[default]
    Https,
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Protocol::Http => write!(f, "http"),
            Protocol::Https => write!(f, "https"),
        }
    }
}

/// Normalized identity of a tracked repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoDescriptor {
    #[serde(rename = "type")]
    pub kind: RepoType,
    /// `owner/repo`, never with a leading or trailing slash
    pub name: String,
    pub protocol: Protocol,
    pub domain: String,
}

impl RepoDescriptor {
    /// Build a descriptor, trimming stray slashes from the name
    pub fn new(kind: RepoType, name: &str, protocol: Protocol, domain: &str) -> Self {
        Self {
            kind,
            name: name.trim_matches('/').to_string(),
            protocol,
            domain: domain.trim_matches('/').to_string(),
        }
    }

    /// Descriptor for an `owner/repo` hosted on github.com
    pub fn github(name: &str) -> Self {
        Self::new(
            RepoType::GitHub,
            name,
            Protocol::Https,
            RepoType::GitHub.default_domain(),
        )
    }

    /// `{protocol}://{domain}`
    pub fn base_url(&self) -> String {
        format!("{}://{}", self.protocol, self.domain)
    }
}
