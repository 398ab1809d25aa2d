//! The gallery feed controller: composes catalog pages into one
//! infinite-scroll sequence.
//!
//! Pages are fetched on demand as the presentation layer nears the end of
//! what it has; an empty page marks the end of pagination.  One
//! transport-level retry happens here — anything beyond that is surfaced as
//! an inline error state, never a crash.

use tracing::{debug, info, warn};

use shotly_api::{ApiError, Photo, PhotoClient};

/// Incrementally-loaded photo sequence.
pub struct GalleryController {
    client: PhotoClient,
    photos: Vec<Photo>,
    next_page: u32,
    exhausted: bool,
}

impl GalleryController {
    pub fn new(client: PhotoClient) -> Self {
        Self {
            client,
            photos: Vec::new(),
            next_page: 1,
            exhausted: false,
        }
    }

    /// All photos loaded so far, in catalog order.
    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    /// Whether the catalog has no further pages.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Fetch and append the next page; returns how many photos arrived.
    ///
    /// A transport failure is retried once; configuration and remote errors
    /// propagate immediately so the caller can render them inline
    /// (`MissingCredential` becomes setup instructions).
    pub async fn load_next_page(&mut self) -> Result<usize, ApiError> {
        if self.exhausted {
            return Ok(0);
        }

        let page = self.next_page;
        let batch = match self.client.list_photos(page).await {
            Ok(batch) => batch,
            Err(e) if e.is_retryable() => {
                warn!(page, error = %e, "photo page fetch failed, retrying once");
                self.client.list_photos(page).await?
            }
            Err(e) => return Err(e),
        };

        if batch.is_empty() {
            info!(page, "end of pagination reached");
            self.exhausted = true;
            return Ok(0);
        }

        debug!(page, count = batch.len(), "photo page loaded");
        self.next_page += 1;
        let count = batch.len();
        self.photos.extend(batch);
        Ok(count)
    }

    /// Forget everything and start again from page one.
    pub fn reset(&mut self) {
        self.photos.clear();
        self.next_page = 1;
        self.exhausted = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shotly_api::PhotoApiConfig;

    fn controller_without_key() -> GalleryController {
        GalleryController::new(PhotoClient::new(PhotoApiConfig {
            base_url: "https://api.example.test".to_string(),
            access_key: None,
        }))
    }

    #[tokio::test]
    async fn missing_credential_surfaces_without_retry_or_state_change() {
        let mut gallery = controller_without_key();

        let err = gallery.load_next_page().await.unwrap_err();
        assert!(matches!(err, ApiError::MissingCredential));

        // The failed fetch leaves the controller untouched and retryable.
        assert!(gallery.photos().is_empty());
        assert!(!gallery.is_exhausted());

        let err = gallery.load_next_page().await.unwrap_err();
        assert!(matches!(err, ApiError::MissingCredential));
    }

    #[tokio::test]
    async fn reset_restarts_pagination() {
        let mut gallery = controller_without_key();
        gallery.exhausted = true;

        assert_eq!(gallery.load_next_page().await.unwrap(), 0);

        gallery.reset();
        assert!(!gallery.is_exhausted());
    }
}
