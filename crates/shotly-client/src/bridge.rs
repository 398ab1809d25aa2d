//! Bridge between the sync task and the presentation layer.
//!
//! Consumes [`SyncNotification`]s, runs the ordering over each pushed record
//! set, caches the result in [`AppState`], and broadcasts typed events.

use std::sync::{Arc, Mutex};

use tokio::sync::broadcast;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use shotly_sync::SyncNotification;

use crate::coordinator::derive_ordered_feed;
use crate::events::{emit_event, AppEvent};
use crate::state::AppState;

/// Spawn the notification processing loop.
pub fn spawn_bridge(
    state: Arc<Mutex<AppState>>,
    events: broadcast::Sender<AppEvent>,
    notif_rx: mpsc::Receiver<SyncNotification>,
) {
    tokio::spawn(async move {
        notification_loop(state, events, notif_rx).await;
    });
}

/// Main loop that receives sync notifications and dispatches them onward.
async fn notification_loop(
    state: Arc<Mutex<AppState>>,
    events: broadcast::Sender<AppEvent>,
    mut notif_rx: mpsc::Receiver<SyncNotification>,
) {
    info!("Sync notification bridge started");

    while let Some(notification) = notif_rx.recv().await {
        match notification {
            SyncNotification::Connected => {
                info!("Sync connected (bridge)");
                emit_event(&events, AppEvent::SyncConnected);
            }

            SyncNotification::Disconnected { reason } => {
                warn!(reason = %reason, "Sync disconnected (bridge)");
                emit_event(&events, AppEvent::SyncDisconnected { reason });
            }

            SyncNotification::ActivitiesChanged(records) => {
                debug!(count = records.len(), "Activity set changed");
                let feed = derive_ordered_feed(&records);

                if let Ok(mut guard) = state.lock() {
                    guard.feed = feed.clone();
                }

                emit_event(&events, AppEvent::FeedUpdated(feed));
            }
        }
    }

    info!("Sync notification bridge stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use shotly_api::{PhotoApiConfig, PhotoClient};
    use shotly_shared::activity::{ActivityKind, ActivityRecord, Actor};
    use shotly_shared::types::{ActivityId, PhotoId, VisitorId};
    use uuid::Uuid;

    use crate::coordinator::InteractionCoordinator;
    use crate::gallery::GalleryController;

    fn record(ts: i64, id_seed: u128) -> ActivityRecord {
        ActivityRecord {
            id: ActivityId(Uuid::from_u128(id_seed)),
            actor: Actor {
                id: VisitorId::new(),
                display_name: "Ada".to_string(),
                avatar_url: "a".to_string(),
            },
            kind: ActivityKind::Reaction {
                emoji: "❤️".to_string(),
            },
            target_photo_id: PhotoId::from("P1"),
            target_thumbnail_url: "t".to_string(),
            created_at: Utc.timestamp_millis_opt(ts).unwrap(),
        }
    }

    #[tokio::test]
    async fn pushed_records_arrive_ordered_and_cached() {
        let client = PhotoClient::new(PhotoApiConfig {
            base_url: "https://api.example.test".to_string(),
            access_key: None,
        });
        let (cmd_tx, _cmd_rx) = mpsc::channel(16);
        let state = Arc::new(Mutex::new(AppState::new(
            None,
            cmd_tx.clone(),
            InteractionCoordinator::new(cmd_tx, client.clone()),
            GalleryController::new(client),
        )));

        let events = crate::events::event_channel();
        let mut event_rx = events.subscribe();

        let (notif_tx, notif_rx) = mpsc::channel(16);
        spawn_bridge(state.clone(), events, notif_rx);

        notif_tx
            .send(SyncNotification::ActivitiesChanged(vec![
                record(1_000, 1),
                record(2_000, 2),
            ]))
            .await
            .unwrap();

        match event_rx.recv().await.unwrap() {
            AppEvent::FeedUpdated(feed) => {
                assert_eq!(feed[0].created_at.timestamp_millis(), 2_000);
                assert_eq!(feed[1].created_at.timestamp_millis(), 1_000);
            }
            other => panic!("unexpected event: {other:?}"),
        }

        let cached = state.lock().unwrap().feed.clone();
        assert_eq!(cached.len(), 2);
        assert_eq!(cached[0].created_at.timestamp_millis(), 2_000);
    }
}
