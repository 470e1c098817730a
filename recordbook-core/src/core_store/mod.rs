/*
    core_store - Permissioned, persistent record store

    Handles:
    - Data model (records, caller identities, timestamps)
    - Creator-based access control
    - Id generation and logical time
    - Pluggable ordered-map persistence
    - Keyword search
*/

pub mod model;
pub mod query;
pub mod store;

#[cfg(test)]
pub mod tests;

// Re-export commonly used types
pub use model::{CallContext, CallerId, Record, RecordId, RecordPayload, Timestamp};
pub use store::{AccessPolicy, RecordStore, RecordStoreConfig, StoreError, StoreResult};
