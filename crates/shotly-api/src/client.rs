//! HTTP client for the photo catalog.
//!
//! Two operations only: paginated listing and single-photo lookup.  The
//! credential is checked before any request goes out so a missing key is
//! reported as configuration, not as a network failure.

use serde_json::Value;
use tracing::{debug, error};

use shotly_shared::constants::{PHOTOS_PER_PAGE, PHOTO_ORDER_BY};
use shotly_shared::types::PhotoId;

use crate::config::PhotoApiConfig;
use crate::error::{ApiError, Result};
use crate::models::Photo;

/// Read-only photo catalog client.
#[derive(Debug, Clone)]
pub struct PhotoClient {
    http: reqwest::Client,
    config: PhotoApiConfig,
}

impl PhotoClient {
    pub fn new(config: PhotoApiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Build a client from environment configuration.
    pub fn from_env() -> Self {
        Self::new(PhotoApiConfig::from_env())
    }

    fn access_key(&self) -> Result<&str> {
        self.config
            .access_key
            .as_deref()
            .ok_or(ApiError::MissingCredential)
    }

    /// Fetch one page of photos, newest first.
    ///
    /// An empty page signals end-of-pagination to the caller.
    pub async fn list_photos(&self, page: u32) -> Result<Vec<Photo>> {
        let key = self.access_key()?;
        let url = format!(
            "{}/photos?page={}&per_page={}&order_by={}",
            self.config.base_url, page, PHOTOS_PER_PAGE, PHOTO_ORDER_BY
        );

        debug!(page, "fetching photo page");

        let response = self
            .http
            .get(&url)
            .header("Authorization", format!("Client-ID {key}"))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(remote_error(status.as_u16(), &body));
        }

        // The listing endpoint must return an array; anything else means the
        // service answered with something we do not understand.
        let value: Value =
            serde_json::from_str(&body).map_err(|_| ApiError::MalformedResponse)?;
        if !value.is_array() {
            error!(page, "photo listing was not an array");
            return Err(ApiError::MalformedResponse);
        }

        serde_json::from_value(value).map_err(|e| {
            error!(page, error = %e, "failed to decode photo page");
            ApiError::MalformedResponse
        })
    }

    /// Fetch a single photo by id.
    pub async fn get_photo(&self, id: &PhotoId) -> Result<Photo> {
        let key = self.access_key()?;
        let url = format!("{}/photos/{}", self.config.base_url, id);

        debug!(photo_id = %id, "fetching photo");

        let response = self
            .http
            .get(&url)
            .header("Authorization", format!("Client-ID {key}"))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(remote_error(status.as_u16(), &body));
        }

        serde_json::from_str(&body).map_err(|e| {
            error!(photo_id = %id, error = %e, "failed to decode photo");
            ApiError::MalformedResponse
        })
    }
}

/// Map a non-success response to [`ApiError::Remote`], pulling the message
/// out of the Unsplash `errors` array when the body carries one.
fn remote_error(status: u16, body: &str) -> ApiError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            v.get("errors")?
                .as_array()?
                .first()?
                .as_str()
                .map(str::to_string)
        })
        .unwrap_or_else(|| format!("HTTP {status}"));

    error!(status, message = %message, "photo API request failed");
    ApiError::Remote { status, message }
}
