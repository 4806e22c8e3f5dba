//! Error handling for the console core

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Unknown or already-removed camera id
    #[error("Not found: {0}")]
    NotFound(String),

    /// Duplicate source locator on create
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Missing or malformed creation fields
    #[error("Validation error: {0}")]
    Validation(String),

    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Unexpected backend response
    #[error("API error: {0}")]
    Api(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Config error
    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    /// Network-class failures the polling loop absorbs; the fixed interval
    /// is the retry mechanism.
    pub fn is_transient(&self) -> bool {
        matches!(self, Error::Http(_) | Error::Api(_))
    }
}
