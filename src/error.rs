use thiserror::Error;

/// Errors returned by the Asana API wrapper.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The access token was rejected (HTTP 401).
    #[error("access token was rejected by Asana")]
    Unauthorized,

    #[error("Asana API returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("request to Asana failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

/// Invalid filter selection passed on the command line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("set one of --project-id, --section-id or --tag-id")]
    NoFilter,

    #[error("only one of --project-id, --section-id or --tag-id may be set (got {0})")]
    MultipleFilters(String),
}
