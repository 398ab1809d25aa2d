use thiserror::Error;

/// Errors produced by the sync layer.
#[derive(Error, Debug)]
pub enum SyncError {
    /// Transport-level failure talking to the sync service.
    #[error("Sync transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered an append with a non-success status.
    #[error("Sync service rejected request with status {0}")]
    Rejected(u16),

    /// A push event could not be decoded.
    #[error("Invalid sync event: {0}")]
    InvalidEvent(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SyncError>;
