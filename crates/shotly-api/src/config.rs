//! Photo API configuration loaded from environment variables.
//!
//! Only the access key is mandatory for live use; the client is constructed
//! regardless and reports [`ApiError::MissingCredential`] on first request so
//! the UI can render setup instructions instead of crashing.
//!
//! [`ApiError::MissingCredential`]: crate::error::ApiError::MissingCredential

use shotly_shared::constants::DEFAULT_PHOTO_API_URL;

/// Photo catalog client configuration.
#[derive(Debug, Clone)]
pub struct PhotoApiConfig {
    /// Base URL of the photo API.
    /// Env: `SHOTLY_PHOTO_API_URL`
    /// Default: `https://api.unsplash.com`
    pub base_url: String,

    /// Unsplash access key ("Client-ID" credential).
    /// Env: `SHOTLY_UNSPLASH_ACCESS_KEY`
    /// Default: unset.
    pub access_key: Option<String>,
}

impl Default for PhotoApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_PHOTO_API_URL.to_string(),
            access_key: None,
        }
    }
}

impl PhotoApiConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("SHOTLY_PHOTO_API_URL") {
            if !url.is_empty() {
                config.base_url = url.trim_end_matches('/').to_string();
            }
        }

        if let Ok(key) = std::env::var("SHOTLY_UNSPLASH_ACCESS_KEY") {
            if !key.is_empty() {
                config.access_key = Some(key);
            }
        }

        config
    }
}
