use thiserror::Error;

/// Failures of the likes synchronizer.
#[derive(Debug, Error)]
pub enum LikesError {
    /// The backend request failed before it could have been delivered.
    #[error("Backend request failed: {0}")]
    Backend(String),

    /// The request may have been delivered but the outcome is unknown.
    ///
    /// The optimistic entry cannot be trusted either way; the cache is
    /// stale until the next reload.
    #[error("Backend outcome unknown: {0}")]
    Ambiguous(String),

    /// The backend answered with something that is not the expected shape.
    #[error("Unexpected backend response: {0}")]
    Protocol(String),
}

impl From<reqwest::Error> for LikesError {
    fn from(err: reqwest::Error) -> Self {
        // Connection refusals and request-build errors never reached the
        // server. Timeouts and body errors might have.
        if err.is_connect() || err.is_builder() || err.is_request() {
            Self::Backend(err.to_string())
        } else {
            Self::Ambiguous(err.to_string())
        }
    }
}

/// Result type for likes operations.
pub type Result<T> = std::result::Result<T, LikesError>;
