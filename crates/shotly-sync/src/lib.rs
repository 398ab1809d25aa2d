//! Realtime client for the hosted activity sync service.
//!
//! The service owns durability and fan-out; this crate only appends records
//! and subscribes to the shared collection.  All network I/O runs in a
//! dedicated tokio task driven by typed command and notification channels,
//! keeping the sync layer fully asynchronous and decoupled from callers.

pub mod client;
pub mod config;
pub mod protocol;

mod error;

pub use client::{spawn_sync, SyncCommand, SyncNotification};
pub use config::SyncConfig;
pub use error::SyncError;
