//! Wire format of the sync service push stream.
//!
//! The subscription is a long-lived HTTP response streaming newline-delimited
//! JSON.  The first event after (re)connecting is a `snapshot` of the whole
//! collection; every accepted write from any client then arrives as an
//! `append` event.

use serde::{Deserialize, Serialize};

use shotly_shared::activity::ActivityRecord;

/// One event on the push stream.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StreamEvent {
    /// Full state of the collection, sent once per (re)connect.
    Snapshot { records: Vec<ActivityRecord> },
    /// A single newly-accepted record.
    Append { record: ActivityRecord },
}

/// Body of an append request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppendRequest {
    pub record: ActivityRecord,
}

/// Decode one stream line.  Blank lines are keep-alives and yield `None`.
pub fn parse_line(line: &str) -> crate::error::Result<Option<StreamEvent>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(line)?))
}
