//! # shotly-api
//!
//! Read-only client for the external photo catalog (Unsplash).  Exposes
//! page-by-page listing and single-photo lookup; photo lifecycle is owned
//! entirely by the remote service.

pub mod client;
pub mod config;
pub mod error;
pub mod models;

pub use client::PhotoClient;
pub use config::PhotoApiConfig;
pub use error::ApiError;
pub use models::{Photo, PhotoUrls, PhotoUser};
