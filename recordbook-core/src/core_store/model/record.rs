/*
    record.rs - Owned record model

    A record is a titled reference to externally stored content.
    - id: assigned by the store, never client-supplied
    - creator_id: captured from the caller at creation, never changed
    - created_at / updated_at: logical timestamps from the store clock
*/

use super::types::{CallerId, RecordId, Timestamp};
use serde::{Deserialize, Serialize};

/// Client-supplied fields for create and update calls
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordPayload {
    pub title: String,
    pub attachment_url: String,
}

impl RecordPayload {
    pub fn new(title: impl Into<String>, attachment_url: impl Into<String>) -> Self {
        RecordPayload {
            title: title.into(),
            attachment_url: attachment_url.into(),
        }
    }
}

/// A stored record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Unique record ID
    pub id: RecordId,

    pub title: String,

    /// Identity that created this record; the sole authorization key
    pub creator_id: CallerId,

    /// Reference to externally stored content
    pub attachment_url: String,

    pub created_at: Timestamp,

    /// Absent until the first successful update
    pub updated_at: Option<Timestamp>,
}

impl Record {
    /// Create a record that has never been updated
    pub fn new(
        id: RecordId,
        payload: RecordPayload,
        creator_id: CallerId,
        created_at: Timestamp,
    ) -> Self {
        Record {
            id,
            title: payload.title,
            creator_id,
            attachment_url: payload.attachment_url,
            created_at,
            updated_at: None,
        }
    }

    /// Merge payload fields and stamp the update time.
    ///
    /// Identity, ownership and creation time are left untouched.
    pub fn apply_update(&mut self, payload: RecordPayload, at: Timestamp) {
        self.title = payload.title;
        self.attachment_url = payload.attachment_url;
        self.updated_at = Some(at);
    }

    pub fn is_owned_by(&self, caller: &CallerId) -> bool {
        &self.creator_id == caller
    }

    /// Case-insensitive substring match against the title
    pub fn title_matches(&self, keyword: &str) -> bool {
        self.title.to_lowercase().contains(&keyword.to_lowercase())
    }
}
