//! Changelog configuration and hosting-provider metadata
//!
//! This crate resolves a project's changelog configuration from
//! `package.json` / `lerna.json` and fetches issue and user data from GitHub
//! or GitLab in a provider-independent shape, with an optional on-disk
//! response cache.

pub use changelog_core::{ChangelogError, ChangelogResult, CredentialStore, AUTH_ENV_VAR};

/// Core module re-exported from `changelog-core`.
pub mod core {
    pub use changelog_core::core::*;
}

/// Changelog configuration resolution.
pub mod config;

/// On-disk API response cache.
pub mod cache;

/// Authenticated, optionally cached, HTTP fetching.
pub mod fetch;

/// GitHub and GitLab adapters.
pub mod hosts;

/// Host API facade.
pub mod api;

/// Dependency injection infrastructure.
pub mod di;

pub use api::GitHostApi;
pub use config::{Configuration, RepoDescriptor, ResolveOptions};
pub use hosts::{CanonicalIssue, CanonicalUser};
