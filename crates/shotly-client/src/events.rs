//! Events pushed to the embedding presentation layer.
//!
//! A tokio broadcast channel stands where a desktop shell would put its own
//! event emitter; any number of views can subscribe and lagging subscribers
//! only lose intermediate feed snapshots, never the latest one they read.

use tokio::sync::broadcast;

use shotly_shared::activity::ActivityRecord;

/// Capacity of the application event channel.
pub const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Something the presentation layer should react to.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The shared activity feed changed; carries the freshly ordered feed.
    FeedUpdated(Vec<ActivityRecord>),
    /// The sync subscription is live.
    SyncConnected,
    /// The sync subscription dropped; resubscription is in progress.
    SyncDisconnected { reason: String },
    /// An interaction is parked and the identity prompt should open.
    IdentityRequired,
}

/// Create the application event channel.
pub fn event_channel() -> broadcast::Sender<AppEvent> {
    broadcast::channel(EVENT_CHANNEL_CAPACITY).0
}

/// Emit an event, tolerating the absence of subscribers.
pub fn emit_event(tx: &broadcast::Sender<AppEvent>, event: AppEvent) {
    if tx.send(event).is_err() {
        tracing::debug!("no event subscribers");
    }
}
