//! Core types shared by the lerna-changelog crates
//!
//! Holds the error taxonomy and credential lookup so that the host layer and
//! any downstream tooling agree on what a failure looks like.

pub mod core {
    pub mod credentials;
    pub mod error;

    pub use credentials::{CredentialStore, AUTH_ENV_VAR};
    pub use error::{ChangelogError, ChangelogResult};
}

pub use core::{ChangelogError, ChangelogResult, CredentialStore, AUTH_ENV_VAR};
