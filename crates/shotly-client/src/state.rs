//! Application state shared across the client.
//!
//! The [`AppState`] struct is wrapped in `Arc<Mutex<>>` so the bridge task
//! and an embedding presentation layer both reach the same coordinator and
//! gallery.

use tokio::sync::broadcast;
use tokio::sync::mpsc;
use tracing::warn;

use shotly_api::Photo;
use shotly_shared::identity::Identity;
use shotly_shared::IdentityError;
use shotly_store::Database;
use shotly_sync::SyncCommand;

use crate::coordinator::{Interaction, InteractionCoordinator, InteractionOutcome};
use crate::events::{emit_event, AppEvent};
use crate::gallery::GalleryController;

/// Central application state.
pub struct AppState {
    /// Handle to the local SQLite database.
    /// `None` when no data directory is available; the client then runs
    /// without identity persistence.
    pub database: Option<Database>,

    /// Sender half of the channel used to dispatch commands to the sync
    /// task (append, shutdown).
    pub sync_cmd_tx: mpsc::Sender<SyncCommand>,

    /// The identity-gated interaction core.
    pub coordinator: InteractionCoordinator,

    /// Infinite-scroll photo sequence.
    pub gallery: GalleryController,

    /// Latest ordered feed, cached so late-joining views can render without
    /// waiting for the next push.
    pub feed: Vec<shotly_shared::activity::ActivityRecord>,
}

impl AppState {
    pub fn new(
        database: Option<Database>,
        sync_cmd_tx: mpsc::Sender<SyncCommand>,
        coordinator: InteractionCoordinator,
        gallery: GalleryController,
    ) -> Self {
        Self {
            database,
            sync_cmd_tx,
            coordinator,
            gallery,
            feed: Vec::new(),
        }
    }

    /// Route a gesture through the coordinator, asking the presentation to
    /// open the identity prompt when needed.
    pub fn request_interaction(
        &mut self,
        photo: &Photo,
        interaction: Interaction,
        events: &broadcast::Sender<AppEvent>,
    ) -> InteractionOutcome {
        let outcome = self.coordinator.request_interaction(photo, interaction);
        if outcome == InteractionOutcome::AwaitingIdentity {
            emit_event(events, AppEvent::IdentityRequired);
        }
        outcome
    }

    /// The visitor confirmed a name in the identity prompt: create the
    /// identity, persist it, and let the coordinator replay whatever was
    /// parked.
    pub fn complete_identity(&mut self, name: &str) -> Result<Identity, IdentityError> {
        let identity = Identity::create(name)?;

        // Persistence failure degrades to a session-only identity; the
        // interaction itself still goes through.
        if let Some(db) = &self.database {
            if let Err(e) = db.save_identity(&identity) {
                warn!(error = %e, "could not persist identity; it will not survive restart");
            }
        }

        self.coordinator.complete_identity(identity.clone());
        Ok(identity)
    }

    /// The visitor dismissed the identity prompt.
    pub fn cancel_identity(&mut self) {
        self.coordinator.cancel_identity();
    }
}
