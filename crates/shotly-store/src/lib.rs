//! # shotly-store
//!
//! Local durable storage for the Shotly client, backed by SQLite.
//!
//! The only thing persisted today is the visitor's identity, which must
//! survive restarts with no expiry.  The crate exposes a synchronous
//! `Database` handle wrapping a `rusqlite::Connection` with typed helpers,
//! leaving room for future local state behind the same migration runner.

pub mod database;
pub mod identity;
pub mod migrations;

mod error;

pub use database::Database;
pub use error::StoreError;
