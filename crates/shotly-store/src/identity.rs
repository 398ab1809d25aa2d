//! Identity persistence.
//!
//! Exactly one identity is current at a time.  Saving a new identity replaces
//! the current one wholesale; identities themselves are never edited in place.

use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension};
use uuid::Uuid;

use shotly_shared::identity::Identity;
use shotly_shared::types::VisitorId;

use crate::database::Database;
use crate::error::Result;

impl Database {
    /// Persist `identity` as the current visitor identity.
    pub fn save_identity(&self, identity: &Identity) -> Result<()> {
        self.conn().execute(
            "INSERT OR REPLACE INTO local_identity (slot, id, name, avatar_url, created_at)
             VALUES (1, ?1, ?2, ?3, ?4)",
            params![
                identity.id.to_string(),
                identity.name,
                identity.avatar_url,
                identity.created_at.to_rfc3339(),
            ],
        )?;

        tracing::info!(visitor = %identity.id, name = %identity.name, "identity saved");
        Ok(())
    }

    /// Load the current visitor identity, if one was ever created.
    pub fn load_identity(&self) -> Result<Option<Identity>> {
        let row = self
            .conn()
            .query_row(
                "SELECT id, name, avatar_url, created_at FROM local_identity WHERE slot = 1",
                [],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                    ))
                },
            )
            .optional()?;

        let Some((id, name, avatar_url, created_at)) = row else {
            return Ok(None);
        };

        let created_at: DateTime<Utc> =
            DateTime::parse_from_rfc3339(&created_at)?.with_timezone(&Utc);

        Ok(Some(Identity {
            id: VisitorId(Uuid::parse_str(&id)?),
            name,
            avatar_url,
            created_at,
        }))
    }
}
