//! Activity records: one reaction or comment against one photo.
//!
//! Records are immutable once created — there is no edit or delete.  Every
//! struct derives `Serialize` and `Deserialize` so it can cross the sync
//! service wire and be handed to a presentation layer unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identity::Identity;
use crate::types::{ActivityId, PhotoId, VisitorId};

/// Snapshot of the acting identity at record-creation time.
///
/// This is a copy, not a reference: identities created later never
/// retroactively change how old records are attributed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Actor {
    pub id: VisitorId,
    pub display_name: String,
    pub avatar_url: String,
}

impl From<&Identity> for Actor {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id.clone(),
            display_name: identity.name.clone(),
            avatar_url: identity.avatar_url.clone(),
        }
    }
}

/// What kind of interaction a record carries.
///
/// Modeled as a tagged sum type so every consumer matches exhaustively; there
/// is deliberately no free-form "kind" string anywhere.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ActivityKind {
    /// An emoji reaction from the fixed palette.
    Reaction { emoji: String },
    /// A free-text comment, non-empty after trimming.
    Comment { text: String },
}

impl ActivityKind {
    /// Past-tense verb for feed display ("reacted" / "commented").
    pub fn verb(&self) -> &'static str {
        match self {
            ActivityKind::Reaction { .. } => "reacted",
            ActivityKind::Comment { .. } => "commented",
        }
    }
}

/// A single interaction against a single photo, shared across all visitors
/// through the sync service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActivityRecord {
    /// Globally unique, assigned at creation.
    pub id: ActivityId,
    /// Who acted, snapshotted at creation time.
    pub actor: Actor,
    /// Reaction or comment, with its payload.
    #[serde(flatten)]
    pub kind: ActivityKind,
    /// The photo acted upon.
    pub target_photo_id: PhotoId,
    /// Denormalized thumbnail so the feed renders without re-fetching.
    pub target_thumbnail_url: String,
    /// Client-clock creation timestamp.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor() -> Actor {
        Actor {
            id: VisitorId::new(),
            display_name: "Ada".to_string(),
            avatar_url: "https://example.test/avatar".to_string(),
        }
    }

    #[test]
    fn kind_serializes_with_tag() {
        let record = ActivityRecord {
            id: ActivityId::new(),
            actor: actor(),
            kind: ActivityKind::Reaction {
                emoji: "❤️".to_string(),
            },
            target_photo_id: PhotoId::from("P123"),
            target_thumbnail_url: "https://example.test/thumb".to_string(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["kind"], "reaction");
        assert_eq!(json["emoji"], "❤️");
        assert_eq!(json["target_photo_id"], "P123");

        let back: ActivityRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn comment_round_trips() {
        let record = ActivityRecord {
            id: ActivityId::new(),
            actor: actor(),
            kind: ActivityKind::Comment {
                text: "lovely light".to_string(),
            },
            target_photo_id: PhotoId::from("P9"),
            target_thumbnail_url: "https://example.test/thumb".to_string(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&record).unwrap();
        let back: ActivityRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.kind.verb(), "commented");
        assert_eq!(back, record);
    }
}
