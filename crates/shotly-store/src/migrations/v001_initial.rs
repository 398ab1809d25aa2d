//! v001 -- Initial schema creation.
//!
//! Creates the `local_identity` table holding the current visitor identity.

use rusqlite::Connection;

/// SQL executed when upgrading from version 0 to version 1.
const UP_SQL: &str = r#"
-- ----------------------------------------------------------------
-- Current visitor identity (single row)
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS local_identity (
    slot       INTEGER PRIMARY KEY CHECK (slot = 1),
    id         TEXT NOT NULL,                -- UUID v4
    name       TEXT NOT NULL,
    avatar_url TEXT NOT NULL,
    created_at TEXT NOT NULL                 -- ISO-8601 / RFC-3339
);
"#;

/// Apply the initial migration.
pub fn up(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(UP_SQL)
}
