//! Application bootstrap and teardown.
//!
//! Explicit wiring replaces ambient globals: everything the client touches —
//! store handle, sync channels, coordinator — is owned here and passed down.

use std::sync::{Arc, Mutex};

use tokio::sync::broadcast;
use tracing::{info, warn};

use shotly_api::{PhotoApiConfig, PhotoClient};
use shotly_store::Database;
use shotly_sync::{spawn_sync, SyncCommand, SyncConfig};

use crate::coordinator::InteractionCoordinator;
use crate::events::{event_channel, AppEvent};
use crate::gallery::GalleryController;
use crate::state::AppState;

/// A running Shotly client.
pub struct App {
    pub state: Arc<Mutex<AppState>>,
    pub events: broadcast::Sender<AppEvent>,
}

impl App {
    /// Wire up the whole client: store, sync task, coordinator, bridge.
    ///
    /// Nothing here is fatal beyond failing to start the async machinery:
    /// a missing data directory means identity just will not survive a
    /// restart, and a missing API key surfaces later as an inline
    /// setup-instructions state.
    pub async fn bootstrap() -> anyhow::Result<Self> {
        let photo_client = PhotoClient::new(PhotoApiConfig::from_env());
        let sync_config = SyncConfig::from_env();

        let database = match Database::new() {
            Ok(db) => Some(db),
            Err(e) => {
                warn!(error = %e, "running without local persistence");
                None
            }
        };

        let (sync_cmd_tx, notif_rx) = spawn_sync(sync_config).await?;

        let mut coordinator =
            InteractionCoordinator::new(sync_cmd_tx.clone(), photo_client.clone());

        if let Some(db) = &database {
            match db.load_identity() {
                Ok(Some(identity)) => coordinator.restore_identity(identity),
                Ok(None) => info!("no persisted identity yet"),
                Err(e) => warn!(error = %e, "could not load persisted identity"),
            }
        }

        let gallery = GalleryController::new(photo_client);
        let state = Arc::new(Mutex::new(AppState::new(
            database,
            sync_cmd_tx,
            coordinator,
            gallery,
        )));

        let events = event_channel();
        crate::bridge::spawn_bridge(state.clone(), events.clone(), notif_rx);

        info!("Shotly client bootstrapped");
        Ok(Self { state, events })
    }

    /// Ask the sync task to stop.  Pending appends already handed off are
    /// still attempted by their own tasks.
    pub async fn shutdown(&self) {
        let tx = match self.state.lock() {
            Ok(guard) => guard.sync_cmd_tx.clone(),
            Err(_) => return,
        };
        if tx.send(SyncCommand::Shutdown).await.is_err() {
            warn!("sync task already stopped");
        }
    }
}
