use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{AVATAR_SERVICE_URL, KDF_CONTEXT_AVATAR_SEED, MIN_NAME_LEN};
use crate::error::IdentityError;
use crate::types::VisitorId;

/// A visitor's local identity.  No account, no password — just a name the
/// visitor typed once, a generated id, and a derived avatar.
///
/// Identities are immutable after creation: entering a new name creates a new
/// identity rather than renaming the old one, so past activity records keep
/// the attribution they were written with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Identity {
    /// Stable, client-generated visitor id.
    pub id: VisitorId,
    /// Display name as entered (trimmed).
    pub name: String,
    /// Avatar URL, deterministically derived from the name.
    pub avatar_url: String,
    /// When this identity was created locally.
    pub created_at: DateTime<Utc>,
}

impl Identity {
    /// Create a fresh identity from a user-supplied name.
    ///
    /// The name is trimmed and must be at least [`MIN_NAME_LEN`] characters
    /// afterwards.
    pub fn create(name: &str) -> Result<Self, IdentityError> {
        let name = name.trim();
        if name.chars().count() < MIN_NAME_LEN {
            return Err(IdentityError::NameTooShort { min: MIN_NAME_LEN });
        }

        Ok(Self {
            id: VisitorId::new(),
            name: name.to_string(),
            avatar_url: avatar_url_for(name),
            created_at: Utc::now(),
        })
    }
}

/// Derive the avatar URL for a display name.
///
/// The seed is a BLAKE3 derivation of the name rather than the raw name, so
/// the URL stays ASCII-safe without any percent-encoding and the same name
/// always maps to the same avatar.
pub fn avatar_url_for(name: &str) -> String {
    let seed = blake3::derive_key(KDF_CONTEXT_AVATAR_SEED, name.as_bytes());
    format!("{}?seed={}", AVATAR_SERVICE_URL, hex::encode(&seed[..16]))
}
