use thiserror::Error;

/// Errors produced by the photo catalog client.
#[derive(Error, Debug)]
pub enum ApiError {
    /// No API access key is configured.  Surfaced as setup instructions in
    /// the UI, never retried.
    #[error("No photo API access key configured (set SHOTLY_UNSPLASH_ACCESS_KEY)")]
    MissingCredential,

    /// The remote API answered with a non-success status.
    #[error("Photo API error {status}: {message}")]
    Remote { status: u16, message: String },

    /// The payload did not have the expected shape.  Display-equivalent to a
    /// remote error.
    #[error("Unexpected response format from photo API")]
    MalformedResponse,

    /// Transport-level failure (DNS, TLS, connect, body read).
    #[error("Photo API request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ApiError {
    /// Whether a single transport-level retry is worthwhile.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ApiError>;
