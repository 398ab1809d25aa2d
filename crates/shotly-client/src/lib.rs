//! # shotly-client
//!
//! Application layer of the Shotly gallery client.  Wires the photo catalog
//! adapter, the local identity store, and the realtime sync client together,
//! and owns the one real state machine in the system: the identity-gated
//! interaction flow.
//!
//! A presentation layer embeds this crate by calling into [`state::AppState`]
//! and subscribing to the [`events::AppEvent`] broadcast; rendering itself
//! lives entirely outside this repository.

pub mod app;
pub mod bridge;
pub mod coordinator;
pub mod events;
pub mod gallery;
pub mod state;

use tracing_subscriber::{fmt, EnvFilter};

/// Initialize structured logging for the whole client.
///
/// Honors `RUST_LOG` when set, otherwise applies a per-crate default.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("shotly_client=debug,shotly_sync=debug,shotly_store=info,shotly_api=info,warn")
    });

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}
