use thiserror::Error;

pub type ChangelogResult<T> = Result<T, ChangelogError>;

#[derive(Error, Debug)]
pub enum ChangelogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// No candidate manifest carries a `changelog` section.
    #[error("Configuration error: {0}")]
    MissingConfiguration(String),

    /// A manifest was found but its content is unusable.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The API token environment variable is unset or empty.
    #[error("Configuration error: Must provide {0}")]
    MissingCredential(String),

    /// The host answered with a non-2xx status. Never cached.
    #[error("Fetch error: {status} {status_text} ({url}).\n{body}")]
    Fetch {
        url: String,
        status: u16,
        status_text: String,
        body: serde_json::Value,
    },

    /// A 2xx response whose body is not the JSON shape we expect.
    #[error("Malformed response from {url}: {message}")]
    MalformedResponse { url: String, message: String },

    #[error("Cache error: {0}")]
    Cache(String),
}

impl ChangelogError {
    /// HTTP status of a failed fetch, if this error came from one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ChangelogError::Fetch { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the error should abort startup rather than skip a single item.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ChangelogError::MissingConfiguration(_)
                | ChangelogError::Config(_)
                | ChangelogError::MissingCredential(_)
        )
    }
}
