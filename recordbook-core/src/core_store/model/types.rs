/*
    types.rs - Common types for core_store models

    Defines:
    - Logical timestamps
    - Record and caller identifiers
    - The per-call context injected by the host
*/

use serde::{Deserialize, Serialize};
use std::fmt;

/// Logical timestamp in nanoseconds, supplied by a `Clock`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(pub u64);

impl Timestamp {
    /// Create a timestamp from nanoseconds
    pub fn from_nanos(nanos: u64) -> Self {
        Timestamp(nanos)
    }

    /// Get the raw nanosecond value
    pub fn as_nanos(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a record, assigned by the store
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordId(pub String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        RecordId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        RecordId(id.to_string())
    }
}

/// Opaque caller identity supplied by the hosting environment.
///
/// Compared by value; the store never interprets its contents.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CallerId(pub String);

impl CallerId {
    pub fn new(id: impl Into<String>) -> Self {
        CallerId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CallerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CallerId {
    fn from(id: &str) -> Self {
        CallerId(id.to_string())
    }
}

/// Per-call envelope built by the host for every dispatched operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallContext {
    caller: CallerId,
}

impl CallContext {
    pub fn new(caller: CallerId) -> Self {
        CallContext { caller }
    }

    /// The identity of whoever issued this call
    pub fn caller(&self) -> &CallerId {
        &self.caller
    }
}
