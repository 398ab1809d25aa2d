//! Photo catalog response models.
//!
//! Field names follow the Unsplash JSON schema; everything the UI does not
//! strictly need is `Option` so schema drift degrades gracefully instead of
//! failing the whole page.

use serde::{Deserialize, Serialize};

use shotly_shared::types::PhotoId;

/// One photograph from the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Photo {
    pub id: PhotoId,
    /// Dominant hue, used for modal theming.
    pub color: Option<String>,
    pub description: Option<String>,
    pub alt_description: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub urls: PhotoUrls,
    pub user: Option<PhotoUser>,
}

impl Photo {
    /// Thumbnail URL denormalized into activity records.
    pub fn thumbnail_url(&self) -> &str {
        &self.urls.thumb
    }
}

/// Pre-rendered sizes of a photo.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PhotoUrls {
    pub raw: Option<String>,
    pub full: Option<String>,
    pub regular: String,
    pub small: String,
    pub thumb: String,
}

/// The photographer who owns a photo.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PhotoUser {
    pub name: Option<String>,
    pub username: Option<String>,
    pub profile_image: Option<ProfileImage>,
    pub links: Option<UserLinks>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfileImage {
    pub small: Option<String>,
    pub medium: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserLinks {
    pub html: Option<String>,
}
