//! Candidate manifest files and their `changelog` sections

use super::repo::{Protocol, RepoDescriptor, RepoType};
use super::repo_url::RepositoryField;
use crate::core::{ChangelogError, ChangelogResult};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Manifest files that may carry changelog configuration, in precedence order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestKind {
    Package,
    Lerna,
}

impl ManifestKind {
    pub const PRECEDENCE: [ManifestKind; 2] = [ManifestKind::Package, ManifestKind::Lerna];

    pub fn file_name(&self) -> &'static str {
        match self {
            ManifestKind::Package => "package.json",
            ManifestKind::Lerna => "lerna.json",
        }
    }

    pub fn path(&self, root: &Path) -> PathBuf {
        root.join(self.file_name())
    }
}

/// The fields of `package.json` / `lerna.json` that changelog generation reads
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub repository: Option<RepositoryField>,
    #[serde(default)]
    pub changelog: Option<ChangelogSection>,
}

/// The `changelog` section of a manifest
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangelogSection {
    #[serde(default)]
    pub repo: Option<RepoOption>,
    #[serde(default)]
    pub next_version: Option<String>,
    #[serde(default)]
    pub next_version_from_metadata: bool,
    #[serde(default)]
    pub cache_dir: Option<String>,
    /// Label name to changelog heading, in display order
    #[serde(default)]
    pub labels: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(default)]
    pub ignore_committers: Option<Vec<String>>,
}

/// `repo` as written in a manifest: `"owner/repo"` or a structured object
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RepoOption {
    Name(String),
    Object(RepoObject),
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepoObject {
    #[serde(rename = "type", default)]
    pub kind: RepoType,
    pub name: String,
    #[serde(default)]
    pub protocol: Protocol,
    #[serde(default)]
    pub domain: Option<String>,
}

impl From<RepoOption> for RepoDescriptor {
    fn from(option: RepoOption) -> Self {
        match option {
            RepoOption::Name(name) => RepoDescriptor::github(&name),
            RepoOption::Object(obj) => {
                let domain = obj
                    .domain
                    .unwrap_or_else(|| obj.kind.default_domain().to_string());
                RepoDescriptor::new(obj.kind, &obj.name, obj.protocol, &domain)
            }
        }
    }
}

impl Manifest {
    /// Read a manifest, returning `None` when the file does not exist
    ///
    /// A file that exists but is not valid JSON is a configuration error.
    pub fn load(path: &Path) -> ChangelogResult<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path)?;
        let manifest: Manifest = serde_json::from_str(&content).map_err(|e| {
            ChangelogError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })?;

        Ok(Some(manifest))
    }
}
