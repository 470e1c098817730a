//! Test fixtures for creating common test objects
//!
//! Builder and factory functions for stores, callers and payloads.

use crate::core_store::model::{CallerId, RecordPayload};
use crate::core_store::store::{
    AccessPolicy, EntryBounds, ManualClock, MemoryMap, RecordStore,
};
use crate::test_utils::deterministic_rng::test_id_generator;
use std::sync::Arc;

/// Builder for in-memory stores with deterministic ids and time
pub struct TestStoreBuilder {
    policy: AccessPolicy,
    bounds: EntryBounds,
    clock: ManualClock,
}

impl TestStoreBuilder {
    pub fn new() -> Self {
        Self {
            policy: AccessPolicy::default(),
            bounds: EntryBounds::default(),
            clock: ManualClock::new(1_000),
        }
    }

    pub fn with_policy(mut self, policy: AccessPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_bounds(mut self, bounds: EntryBounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Share a clock handle so the test can advance time
    pub fn with_clock(mut self, clock: ManualClock) -> Self {
        self.clock = clock;
        self
    }

    pub fn build(self) -> RecordStore<MemoryMap> {
        RecordStore::new(MemoryMap::new())
            .with_policy(self.policy)
            .with_bounds(self.bounds)
            .with_clock(Arc::new(self.clock))
            .with_id_generator(Box::new(test_id_generator()))
    }
}

impl Default for TestStoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn test_store() -> RecordStore<MemoryMap> {
    TestStoreBuilder::new().build()
}

pub fn alice() -> CallerId {
    CallerId::new("alice")
}

pub fn bob() -> CallerId {
    CallerId::new("bob")
}

pub fn test_payload(title: &str) -> RecordPayload {
    RecordPayload::new(title, format!("http://files.example/{}", title.replace(' ', "-")))
}
