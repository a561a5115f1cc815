pub mod manifest;
pub mod repo;
pub mod repo_url;

pub use manifest::{ChangelogSection, Manifest, ManifestKind, RepoOption};
pub use repo::{Protocol, RepoDescriptor, RepoType};
pub use repo_url::{find_repo_from_manifest, parse_remote_url, RepositoryField};

use crate::core::{ChangelogError, ChangelogResult};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Heading used for each label when a manifest configures none
const DEFAULT_LABELS: [(&str, &str); 5] = [
    ("breaking", ":boom: Breaking Change"),
    ("enhancement", ":rocket: Enhancement"),
    ("bug", ":bug: Bug Fix"),
    ("documentation", ":memo: Documentation"),
    ("internal", ":house: Internal"),
];

const DEFAULT_IGNORE_COMMITTERS: [&str; 6] = [
    "dependabot-bot",
    "dependabot[bot]",
    "greenkeeperio-bot",
    "greenkeeper[bot]",
    "renovate-bot",
    "renovate[bot]",
];

/// A changelog label and the heading it is rendered under
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelHeading {
    pub label: String,
    pub heading: String,
}

/// Caller-side overrides applied on top of the manifest
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Derive the next version from the manifest's `version` even if the
    /// manifest does not ask for it
    pub next_version_from_metadata: bool,
}

/// Resolved changelog configuration for a project
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    pub repo: RepoDescriptor,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<String>,
    pub root_path: PathBuf,
    pub labels: Vec<LabelHeading>,
    pub ignore_committers: Vec<String>,
}

/// The manifest whose `changelog` section won precedence
struct LoadedSection {
    kind: ManifestKind,
    manifest: Manifest,
    section: ChangelogSection,
}

impl Configuration {
    /// Resolve configuration from `package.json` or `lerna.json` under `root`
    pub fn from_path(root: &Path) -> ChangelogResult<Self> {
        Self::from_path_with_options(root, &ResolveOptions::default())
    }

    /// Resolve configuration with caller overrides
    ///
    /// The first manifest in [`ManifestKind::PRECEDENCE`] that exists and has
    /// a `changelog` section wins entirely; nothing is merged across files.
    pub fn from_path_with_options(root: &Path, options: &ResolveOptions) -> ChangelogResult<Self> {
        let LoadedSection {
            kind,
            manifest,
            section,
        } = load_section(root)?.ok_or_else(|| {
            ChangelogError::MissingConfiguration(format!(
                "no changelog configuration found in 'package.json' or 'lerna.json' at {}",
                root.display()
            ))
        })?;

        tracing::debug!("using changelog configuration from {}", kind.file_name());

        let repo = match section.repo {
            Some(option) => RepoDescriptor::from(option),
            None => RepoDescriptor::github(&infer_repo(root)?),
        };

        let next_version = if options.next_version_from_metadata || section.next_version_from_metadata {
            let version = manifest.version.ok_or_else(|| {
                ChangelogError::Config(format!(
                    "Could not infer \"nextVersion\" from the '{}' file.",
                    kind.file_name()
                ))
            })?;
            Some(format!("v{}", version))
        } else {
            section.next_version
        };

        let labels = match section.labels {
            Some(map) => labels_from_map(map, kind)?,
            None => DEFAULT_LABELS
                .iter()
                .map(|(label, heading)| LabelHeading {
                    label: label.to_string(),
                    heading: heading.to_string(),
                })
                .collect(),
        };

        let ignore_committers = section.ignore_committers.unwrap_or_else(|| {
            DEFAULT_IGNORE_COMMITTERS
                .iter()
                .map(|s| s.to_string())
                .collect()
        });

        Ok(Self {
            repo,
            next_version,
            cache_dir: section.cache_dir,
            root_path: root.to_path_buf(),
            labels,
            ignore_committers,
        })
    }

    /// Directory holding cached API responses, if caching is enabled
    ///
    /// Always `root_path/cache_dir/github`, whichever provider is configured.
    pub fn github_cache_dir(&self) -> Option<PathBuf> {
        self.cache_dir
            .as_ref()
            .map(|dir| self.root_path.join(dir).join("github"))
    }
}

/// Try each candidate manifest in order, stopping at the first with a section
fn load_section(root: &Path) -> ChangelogResult<Option<LoadedSection>> {
    for kind in ManifestKind::PRECEDENCE {
        let Some(mut manifest) = Manifest::load(&kind.path(root))? else {
            continue;
        };
        match manifest.changelog.take() {
            Some(section) => {
                return Ok(Some(LoadedSection {
                    kind,
                    manifest,
                    section,
                }))
            }
            None => {
                tracing::debug!("{} has no changelog section, skipping", kind.file_name());
            }
        }
    }
    Ok(None)
}

/// Infer `owner/repo` from the `repository` field of `package.json`
fn infer_repo(root: &Path) -> ChangelogResult<String> {
    let manifest = Manifest::load(&ManifestKind::Package.path(root))?.unwrap_or_default();
    find_repo_from_manifest(manifest.repository.as_ref()).ok_or_else(|| {
        ChangelogError::Config(
            "Could not infer \"repo\" from the 'package.json' file.".to_string(),
        )
    })
}

fn labels_from_map(
    map: serde_json::Map<String, serde_json::Value>,
    kind: ManifestKind,
) -> ChangelogResult<Vec<LabelHeading>> {
    map.into_iter()
        .map(|(label, heading)| match heading {
            serde_json::Value::String(heading) => Ok(LabelHeading { label, heading }),
            other => Err(ChangelogError::Config(format!(
                "Label '{}' in '{}' must map to a string heading, got {}",
                label,
                kind.file_name(),
                other
            ))),
        })
        .collect()
}
