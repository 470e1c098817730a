/*
    validator.rs - Payload and entry validation

    Runs before any lookup or mutation.
    Ensures:
    - Payload fields are non-blank
    - Keys and encoded records fit the backing map's per-entry bounds
*/

use crate::core_store::model::{Record, RecordId, RecordPayload};
use crate::core_store::store::errors::{StoreError, StoreResult, ValidationError};

/// Per-entry size limits of the backing map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryBounds {
    /// Maximum key size in bytes
    pub max_key_bytes: usize,

    /// Maximum encoded record size in bytes
    pub max_value_bytes: usize,
}

impl Default for EntryBounds {
    fn default() -> Self {
        EntryBounds {
            max_key_bytes: 44,
            max_value_bytes: 1024,
        }
    }
}

/// Check payload fields for create and update
pub fn validate_payload(payload: &RecordPayload) -> Result<(), ValidationError> {
    if payload.title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    if payload.attachment_url.trim().is_empty() {
        return Err(ValidationError::EmptyUrl);
    }
    Ok(())
}

impl EntryBounds {
    /// Check that `record` can be stored under its id
    pub fn check(&self, record: &Record) -> StoreResult<()> {
        self.check_key(&record.id)?;

        let size = bincode::serialized_size(record)? as usize;
        if size > self.max_value_bytes {
            return Err(StoreError::CapacityExceeded {
                what: "record",
                actual: size,
                limit: self.max_value_bytes,
            });
        }

        Ok(())
    }

    fn check_key(&self, id: &RecordId) -> StoreResult<()> {
        let size = id.as_str().len();
        if size > self.max_key_bytes {
            return Err(StoreError::CapacityExceeded {
                what: "key",
                actual: size,
                limit: self.max_key_bytes,
            });
        }
        Ok(())
    }
}
