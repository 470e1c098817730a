/*
    backend.rs - Ordered map beneath the record store

    The store only needs get / insert-or-replace / remove / ordered values.
    Anything offering those can back it; `MemoryMap` is the reference one.
*/

use crate::core_store::model::{Record, RecordId};
use crate::core_store::store::errors::StoreResult;
use std::collections::BTreeMap;

/// Ordered key-value map of records keyed by id
pub trait RecordMap {
    fn get(&self, id: &RecordId) -> Option<&Record>;

    fn contains_key(&self, id: &RecordId) -> bool {
        self.get(id).is_some()
    }

    /// Insert or replace, returning the previous value
    fn insert(&mut self, record: Record) -> StoreResult<Option<Record>>;

    fn remove(&mut self, id: &RecordId) -> StoreResult<Option<Record>>;

    /// All records in key order
    fn values(&self) -> Box<dyn Iterator<Item = &Record> + '_>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory `BTreeMap` backend
#[derive(Debug, Default, Clone)]
pub struct MemoryMap {
    entries: BTreeMap<RecordId, Record>,
}

impl MemoryMap {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordMap for MemoryMap {
    fn get(&self, id: &RecordId) -> Option<&Record> {
        self.entries.get(id)
    }

    fn contains_key(&self, id: &RecordId) -> bool {
        self.entries.contains_key(id)
    }

    fn insert(&mut self, record: Record) -> StoreResult<Option<Record>> {
        Ok(self.entries.insert(record.id.clone(), record))
    }

    fn remove(&mut self, id: &RecordId) -> StoreResult<Option<Record>> {
        Ok(self.entries.remove(id))
    }

    fn values(&self) -> Box<dyn Iterator<Item = &Record> + '_> {
        Box::new(self.entries.values())
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
