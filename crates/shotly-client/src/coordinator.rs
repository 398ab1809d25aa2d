//! The interaction coordinator: the sole path by which a user gesture becomes
//! a durable, attributed activity record, and the sole owner of feed ordering.
//!
//! Identity gating is a small state machine, per pending flow:
//!
//! ```text
//! NoIdentity --(interaction attempted)--> AwaitingIdentity
//! AwaitingIdentity --(identity completed)--> Attributed (record written)
//! AwaitingIdentity --(prompt dismissed)--> NoIdentity (pending discarded)
//! ```
//!
//! At most one action is deferred while identity resolution is in flight; a
//! newer attempt replaces the older one.  This is a deliberate
//! simplification — last action wins for a single modal flow — not a general
//! queue.

use chrono::Utc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use shotly_api::{ApiError, Photo, PhotoClient};
use shotly_shared::activity::{ActivityKind, ActivityRecord, Actor};
use shotly_shared::identity::Identity;
use shotly_shared::palette::{is_palette_emoji, DEFAULT_REACTION};
use shotly_shared::types::ActivityId;
use shotly_sync::SyncCommand;

/// A user-initiated interaction, before it is attributed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction {
    /// React with an emoji; `None` selects the palette default.
    Reaction { emoji: Option<String> },
    /// Comment with free text.
    Comment { text: String },
}

/// An interaction deferred while the visitor's identity is being resolved.
#[derive(Debug, Clone)]
pub struct PendingAction {
    pub photo: Photo,
    pub interaction: Interaction,
}

/// What became of a [`request_interaction`] call.
///
/// [`request_interaction`]: InteractionCoordinator::request_interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionOutcome {
    /// A record was built and handed to the sync layer for durable append.
    Submitted,
    /// No identity yet; the action is parked and the caller should open the
    /// identity prompt.
    AwaitingIdentity,
    /// Validation failed; nothing happened and nothing will.
    Rejected,
}

/// Mediates between the identity store and the activity store.
pub struct InteractionCoordinator {
    identity: Option<Identity>,
    pending: Option<PendingAction>,
    sync_tx: mpsc::Sender<SyncCommand>,
    photos: PhotoClient,
}

impl InteractionCoordinator {
    pub fn new(sync_tx: mpsc::Sender<SyncCommand>, photos: PhotoClient) -> Self {
        Self {
            identity: None,
            pending: None,
            sync_tx,
            photos,
        }
    }

    /// The currently resolved identity, if any.
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// Whether an action is parked waiting for identity resolution.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Adopt an identity loaded from the local store at startup.
    ///
    /// Unlike [`complete_identity`](Self::complete_identity) this never
    /// replays anything; nothing can be pending before the first gesture.
    pub fn restore_identity(&mut self, identity: Identity) {
        info!(visitor = %identity.id, name = %identity.name, "restored persisted identity");
        self.identity = Some(identity);
    }

    /// Turn a gesture into an activity record, or park it until the visitor
    /// has a name.
    ///
    /// Validation happens here regardless of what the caller already checked:
    /// a comment that trims to empty and a reaction glyph outside the palette
    /// are both rejected with no side effects.
    pub fn request_interaction(
        &mut self,
        photo: &Photo,
        interaction: Interaction,
    ) -> InteractionOutcome {
        if !validate(&interaction) {
            debug!(photo_id = %photo.id, "interaction rejected by validation");
            return InteractionOutcome::Rejected;
        }

        let Some(identity) = self.identity.clone() else {
            if self.pending.is_some() {
                debug!("replacing pending action; last action wins");
            }
            self.pending = Some(PendingAction {
                photo: photo.clone(),
                interaction,
            });
            return InteractionOutcome::AwaitingIdentity;
        };

        let record = build_record(&identity, photo, interaction);
        self.submit(record);
        InteractionOutcome::Submitted
    }

    /// Called once a name has been resolved (existing or freshly created).
    ///
    /// Persisting the identity is the caller's step (see
    /// [`AppState::complete_identity`]); this adopts it and replays a pending
    /// action exactly once.  The pending slot is cleared regardless of the
    /// replay outcome so a persistently failing action cannot loop.
    ///
    /// Returns the replay outcome, if there was anything to replay.
    ///
    /// [`AppState::complete_identity`]: crate::state::AppState::complete_identity
    pub fn complete_identity(&mut self, identity: Identity) -> Option<InteractionOutcome> {
        info!(visitor = %identity.id, name = %identity.name, "identity completed");
        self.identity = Some(identity);

        let pending = self.pending.take()?;
        let outcome = self.request_interaction(&pending.photo, pending.interaction);
        debug!(outcome = ?outcome, "replayed pending action");
        Some(outcome)
    }

    /// The identity prompt was dismissed: discard the pending action so it
    /// can never replay against an identity the visitor picks later.
    pub fn cancel_identity(&mut self) {
        if self.pending.take().is_some() {
            debug!("identity prompt dismissed, pending action discarded");
        }
    }

    /// Resolve the full photo behind a feed entry for a detail view.
    ///
    /// Goes through the catalog's single-item lookup rather than the
    /// denormalized thumbnail.  Failure is non-fatal to the feed.
    pub async fn open_record_target(&self, record: &ActivityRecord) -> Result<Photo, ApiError> {
        self.photos.get_photo(&record.target_photo_id).await
    }

    /// Hand a record to the sync task.  Fire-and-forget: the hosted store is
    /// the system of record, and the record becomes visible locally only once
    /// the store pushes it back.
    fn submit(&self, record: ActivityRecord) {
        let record_id = record.id.clone();
        if let Err(e) = self.sync_tx.try_send(SyncCommand::Append(record)) {
            error!(record_id = %record_id, error = %e, "failed to hand record to sync task");
        }
    }
}

/// Order records for presentation: most recent first, ties broken by
/// ascending record id so concurrent writers with colliding clocks still
/// produce one deterministic feed.
///
/// Pure function of its input — recomputed in full on every store update,
/// which keeps it trivially permutation-insensitive and idempotent.
pub fn derive_ordered_feed(records: &[ActivityRecord]) -> Vec<ActivityRecord> {
    let mut feed = records.to_vec();
    feed.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });
    feed
}

fn validate(interaction: &Interaction) -> bool {
    match interaction {
        Interaction::Comment { text } => !text.trim().is_empty(),
        Interaction::Reaction { emoji: Some(e) } => {
            if is_palette_emoji(e) {
                true
            } else {
                warn!(emoji = %e, "reaction outside the palette");
                false
            }
        }
        Interaction::Reaction { emoji: None } => true,
    }
}

fn build_record(identity: &Identity, photo: &Photo, interaction: Interaction) -> ActivityRecord {
    let kind = match interaction {
        Interaction::Reaction { emoji } => ActivityKind::Reaction {
            emoji: emoji.unwrap_or_else(|| DEFAULT_REACTION.to_string()),
        },
        Interaction::Comment { text } => ActivityKind::Comment {
            text: text.trim().to_string(),
        },
    };

    ActivityRecord {
        id: ActivityId::new(),
        actor: Actor::from(identity),
        kind,
        target_photo_id: photo.id.clone(),
        target_thumbnail_url: photo.thumbnail_url().to_string(),
        created_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use shotly_api::{PhotoApiConfig, PhotoUrls};
    use shotly_shared::types::{PhotoId, VisitorId};
    use uuid::Uuid;

    fn photo(id: &str) -> Photo {
        Photo {
            id: PhotoId::from(id),
            color: Some("#112233".to_string()),
            description: None,
            alt_description: None,
            width: Some(100),
            height: Some(100),
            urls: PhotoUrls {
                raw: None,
                full: None,
                regular: "https://images.test/r".to_string(),
                small: "https://images.test/s".to_string(),
                thumb: "https://images.test/t".to_string(),
            },
            user: None,
        }
    }

    fn coordinator() -> (InteractionCoordinator, mpsc::Receiver<SyncCommand>) {
        let (tx, rx) = mpsc::channel(16);
        let photos = PhotoClient::new(PhotoApiConfig {
            base_url: "https://api.example.test".to_string(),
            access_key: None,
        });
        (InteractionCoordinator::new(tx, photos), rx)
    }

    fn record_with(ts: i64, id_seed: u128) -> ActivityRecord {
        ActivityRecord {
            id: ActivityId(Uuid::from_u128(id_seed)),
            actor: Actor {
                id: VisitorId::new(),
                display_name: "Ada".to_string(),
                avatar_url: "https://example.test/a".to_string(),
            },
            kind: ActivityKind::Reaction {
                emoji: "❤️".to_string(),
            },
            target_photo_id: PhotoId::from("P1"),
            target_thumbnail_url: "https://example.test/t".to_string(),
            created_at: Utc.timestamp_millis_opt(ts).unwrap(),
        }
    }

    fn take_appended(rx: &mut mpsc::Receiver<SyncCommand>) -> ActivityRecord {
        match rx.try_recv().expect("a record should have been submitted") {
            SyncCommand::Append(record) => record,
            other => panic!("unexpected command: {other:?}"),
        }
    }

    // --- identity gating ---

    #[test]
    fn no_identity_parks_the_action_and_writes_nothing() {
        let (mut coord, mut rx) = coordinator();

        let outcome = coord.request_interaction(
            &photo("P1"),
            Interaction::Reaction { emoji: None },
        );

        assert_eq!(outcome, InteractionOutcome::AwaitingIdentity);
        assert!(coord.has_pending());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn newer_pending_action_replaces_older() {
        let (mut coord, mut rx) = coordinator();

        coord.request_interaction(&photo("P1"), Interaction::Reaction { emoji: None });
        coord.request_interaction(
            &photo("P2"),
            Interaction::Comment {
                text: "stunning".to_string(),
            },
        );

        coord.complete_identity(Identity::create("Ada").unwrap());

        // Only the most recent deferred action survives.
        let record = take_appended(&mut rx);
        assert_eq!(record.target_photo_id, PhotoId::from("P2"));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn reaction_prompt_flow_end_to_end() {
        let (mut coord, mut rx) = coordinator();

        let outcome = coord.request_interaction(
            &photo("P123"),
            Interaction::Reaction {
                emoji: Some("❤️".to_string()),
            },
        );
        assert_eq!(outcome, InteractionOutcome::AwaitingIdentity);

        coord.complete_identity(Identity::create("Ada").unwrap());

        let record = take_appended(&mut rx);
        assert_eq!(record.target_photo_id, PhotoId::from("P123"));
        assert_eq!(record.actor.display_name, "Ada");
        assert_eq!(
            record.kind,
            ActivityKind::Reaction {
                emoji: "❤️".to_string()
            }
        );
        assert_eq!(record.target_thumbnail_url, "https://images.test/t");
    }

    #[test]
    fn replay_happens_exactly_once() {
        let (mut coord, mut rx) = coordinator();

        coord.request_interaction(&photo("P1"), Interaction::Reaction { emoji: None });

        let replayed = coord.complete_identity(Identity::create("Ada").unwrap());
        assert_eq!(replayed, Some(InteractionOutcome::Submitted));
        assert!(!coord.has_pending());
        take_appended(&mut rx);

        // A second completion has nothing left to replay.
        let replayed = coord.complete_identity(Identity::create("Grace").unwrap());
        assert_eq!(replayed, None);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn replay_failure_is_not_requeued() {
        let (mut coord, rx) = coordinator();

        coord.request_interaction(&photo("P1"), Interaction::Reaction { emoji: None });
        drop(rx); // sync task gone: the replayed append will fail

        coord.complete_identity(Identity::create("Ada").unwrap());
        assert!(!coord.has_pending());
    }

    #[test]
    fn cancel_discards_pending_so_nothing_replays() {
        let (mut coord, mut rx) = coordinator();

        coord.request_interaction(&photo("P1"), Interaction::Reaction { emoji: None });
        coord.cancel_identity();
        assert!(!coord.has_pending());

        let replayed = coord.complete_identity(Identity::create("Ada").unwrap());
        assert_eq!(replayed, None);
        assert!(rx.try_recv().is_err());
    }

    // --- validation ---

    #[test]
    fn whitespace_comment_is_rejected_before_and_after_identity() {
        let (mut coord, mut rx) = coordinator();
        let blank = Interaction::Comment {
            text: "   ".to_string(),
        };

        assert_eq!(
            coord.request_interaction(&photo("P1"), blank.clone()),
            InteractionOutcome::Rejected
        );
        assert!(!coord.has_pending());

        coord.complete_identity(Identity::create("Ada").unwrap());
        assert_eq!(
            coord.request_interaction(&photo("P1"), blank),
            InteractionOutcome::Rejected
        );
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn omitted_reaction_gets_the_default_glyph() {
        let (mut coord, mut rx) = coordinator();
        coord.restore_identity(Identity::create("Ada").unwrap());

        let outcome =
            coord.request_interaction(&photo("P1"), Interaction::Reaction { emoji: None });
        assert_eq!(outcome, InteractionOutcome::Submitted);

        let record = take_appended(&mut rx);
        assert_eq!(
            record.kind,
            ActivityKind::Reaction {
                emoji: DEFAULT_REACTION.to_string()
            }
        );
    }

    #[test]
    fn out_of_palette_reaction_is_rejected() {
        let (mut coord, mut rx) = coordinator();
        coord.restore_identity(Identity::create("Ada").unwrap());

        let outcome = coord.request_interaction(
            &photo("P1"),
            Interaction::Reaction {
                emoji: Some("💀".to_string()),
            },
        );
        assert_eq!(outcome, InteractionOutcome::Rejected);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn comments_are_stored_trimmed() {
        let (mut coord, mut rx) = coordinator();
        coord.restore_identity(Identity::create("Ada").unwrap());

        coord.request_interaction(
            &photo("P1"),
            Interaction::Comment {
                text: "  lovely light  ".to_string(),
            },
        );

        let record = take_appended(&mut rx);
        assert_eq!(
            record.kind,
            ActivityKind::Comment {
                text: "lovely light".to_string()
            }
        );
    }

    // --- feed ordering ---

    #[test]
    fn feed_is_newest_first() {
        let feed = derive_ordered_feed(&[
            record_with(1_000, 1),
            record_with(3_000, 2),
            record_with(2_000, 3),
        ]);

        let stamps: Vec<i64> = feed.iter().map(|r| r.created_at.timestamp_millis()).collect();
        assert_eq!(stamps, vec![3_000, 2_000, 1_000]);
    }

    #[test]
    fn clock_ties_break_by_ascending_id() {
        let a = record_with(1_000, 1);
        let b = record_with(1_000, 2);

        let feed = derive_ordered_feed(&[b.clone(), a.clone()]);
        assert_eq!(feed[0].id, a.id);
        assert_eq!(feed[1].id, b.id);
    }

    #[test]
    fn ordering_is_permutation_insensitive() {
        let records = vec![
            record_with(5_000, 7),
            record_with(1_000, 3),
            record_with(5_000, 2),
            record_with(2_000, 9),
        ];

        let expected = derive_ordered_feed(&records);

        let mut rotated = records.clone();
        rotated.rotate_left(2);
        assert_eq!(derive_ordered_feed(&rotated), expected);

        let mut reversed = records;
        reversed.reverse();
        assert_eq!(derive_ordered_feed(&reversed), expected);

        // Idempotent: ordering an ordered feed changes nothing.
        assert_eq!(derive_ordered_feed(&expected), expected);
    }
}
