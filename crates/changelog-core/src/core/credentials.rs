use crate::core::{ChangelogError, ChangelogResult};

/// Environment variable holding the API token for GitHub and GitLab
pub const AUTH_ENV_VAR: &str = "GITHUB_AUTH";

/// Reads the API token from the process environment
///
/// The token is read once when the host API is constructed. An unset or
/// blank variable is a startup error.
pub struct CredentialStore;

impl CredentialStore {
    /// Retrieve the token from [`AUTH_ENV_VAR`]
    pub fn retrieve() -> ChangelogResult<String> {
        Self::retrieve_from(AUTH_ENV_VAR)
    }

    /// Retrieve a token from a named environment variable
    pub fn retrieve_from(var: &str) -> ChangelogResult<String> {
        let value = std::env::var(var).unwrap_or_default();
        Self::validate(var, value)
    }

    /// Reject blank tokens, naming the variable that should have held one
    pub fn validate(var: &str, token: String) -> ChangelogResult<String> {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(ChangelogError::MissingCredential(var.to_string()));
        }
        Ok(trimmed.to_string())
    }
}
