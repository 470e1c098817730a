/*
    errors.rs - Error types for the store subsystem

    Logical errors (NotFound, Forbidden, Validation, CapacityExceeded,
    IdSpaceExhausted) are deterministic and returned before any mutation.
    Storage and (de)serialization errors come from the backing map.
*/

use crate::core_store::model::RecordId;
use thiserror::Error;

/// Errors that can occur in the store subsystem
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record at the given id
    #[error("a record with id={0} not found")]
    NotFound(RecordId),

    /// Caller is not the record's creator
    #[error("caller is not the creator of record id={0}")]
    Forbidden(RecordId),

    /// Payload failed field checks
    #[error("{0}")]
    Validation(String),

    /// Entry would not fit the backing map's per-entry bounds
    #[error("Capacity exceeded: {what} is {actual} bytes, limit is {limit}")]
    CapacityExceeded {
        what: &'static str,
        actual: usize,
        limit: usize,
    },

    /// Could not produce an unused id
    #[error("Could not generate an unused record id after {0} attempts")]
    IdSpaceExhausted(usize),

    /// Storage I/O error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Deserialization error
    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl StoreError {
    /// True for errors raised by store policy rather than the backing map
    pub fn is_logical(&self) -> bool {
        !matches!(
            self,
            StoreError::Storage(_) | StoreError::Serialization(_) | StoreError::Deserialization(_)
        )
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Payload field checks
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("empty title")]
    EmptyTitle,

    #[error("empty URL")]
    EmptyUrl,
}

impl From<ValidationError> for StoreError {
    fn from(err: ValidationError) -> Self {
        StoreError::Validation(err.to_string())
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Storage(err.to_string())
    }
}

impl From<bincode::Error> for StoreError {
    fn from(err: bincode::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}
