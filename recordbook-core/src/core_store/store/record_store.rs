/*
    record_store.rs - Permissioned record store

    Owns the ordered record map and exposes create/read/update/delete,
    owner listing and keyword search.

    Every operation:
    - validates the payload first (create/update)
    - then looks the record up and authorizes the caller
    - then checks entry bounds
    - and only then mutates the map
    so a failed call never leaves a partial change behind.
*/

use crate::core_store::model::{CallerId, Record, RecordId, RecordPayload};
use crate::core_store::query::search_records;
use crate::core_store::store::access::AccessPolicy;
use crate::core_store::store::backend::{MemoryMap, RecordMap};
use crate::core_store::store::clock::{Clock, SystemClock};
use crate::core_store::store::errors::{StoreError, StoreResult};
use crate::core_store::store::file_map::FileMap;
use crate::core_store::store::id_gen::{AlphanumericIdGenerator, IdGenerator, DEFAULT_ID_LENGTH};
use crate::core_store::store::validator::{validate_payload, EntryBounds};
use crate::metrics::{record_counter, record_gauge};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Configuration for the record store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordStoreConfig {
    /// Base directory for the snapshot file
    pub data_dir: PathBuf,

    /// Snapshot file name inside `data_dir`
    pub snapshot_file: String,

    /// Maximum key size in bytes
    pub max_key_bytes: usize,

    /// Maximum encoded record size in bytes
    pub max_value_bytes: usize,

    /// Length of generated ids
    pub id_length: usize,

    /// How many candidates to try before giving up on a fresh id
    pub max_id_attempts: usize,
}

impl Default for RecordStoreConfig {
    fn default() -> Self {
        RecordStoreConfig {
            data_dir: PathBuf::from("./data"),
            snapshot_file: "records.bin".to_string(),
            max_key_bytes: 44,
            max_value_bytes: 1024,
            id_length: DEFAULT_ID_LENGTH,
            max_id_attempts: 8,
        }
    }
}

impl RecordStoreConfig {
    pub fn snapshot_path(&self) -> PathBuf {
        self.data_dir.join(&self.snapshot_file)
    }

    pub fn bounds(&self) -> EntryBounds {
        EntryBounds {
            max_key_bytes: self.max_key_bytes,
            max_value_bytes: self.max_value_bytes,
        }
    }
}

/// Store statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreStats {
    pub records: usize,
    pub owners: usize,
}

/// Permissioned record store
pub struct RecordStore<M: RecordMap = MemoryMap> {
    map: M,
    policy: AccessPolicy,
    bounds: EntryBounds,
    id_gen: Box<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
    max_id_attempts: usize,
}

impl RecordStore<MemoryMap> {
    /// Empty in-memory store with default settings
    pub fn in_memory() -> Self {
        RecordStore::new(MemoryMap::new())
    }
}

impl RecordStore<FileMap> {
    /// Open the snapshot-backed store described by `config`
    pub fn open(config: &RecordStoreConfig, policy: AccessPolicy) -> StoreResult<Self> {
        let map = FileMap::open(config.snapshot_path())?;
        let clock = match map.latest_timestamp() {
            Some(floor) => SystemClock::with_floor(floor),
            None => SystemClock::new(),
        };

        info!(
            path = %config.snapshot_path().display(),
            records = map.len(),
            "Record store opened"
        );

        Ok(RecordStore::new(map)
            .with_policy(policy)
            .with_bounds(config.bounds())
            .with_clock(Arc::new(clock))
            .with_id_generator(Box::new(AlphanumericIdGenerator::new(config.id_length)))
            .with_max_id_attempts(config.max_id_attempts))
    }
}

impl<M: RecordMap> RecordStore<M> {
    /// Wrap `map` with the default policy, bounds, clock and id generator
    pub fn new(map: M) -> Self {
        RecordStore {
            map,
            policy: AccessPolicy::default(),
            bounds: EntryBounds::default(),
            id_gen: Box::new(AlphanumericIdGenerator::default()),
            clock: Arc::new(SystemClock::new()),
            max_id_attempts: RecordStoreConfig::default().max_id_attempts,
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

    pub fn with_id_generator(mut self, id_gen: Box<dyn IdGenerator>) -> Self {
        self.id_gen = id_gen;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_max_id_attempts(mut self, attempts: usize) -> Self {
        self.max_id_attempts = attempts.max(1);
        self
    }

    /// Records created by `caller`, in map order
    pub fn list_owned(&self, caller: &CallerId) -> Vec<Record> {
        record_counter("store.operations.read", 1);
        let records: Vec<Record> = self
            .map
            .values()
            .filter(|r| r.is_owned_by(caller))
            .cloned()
            .collect();
        debug!(caller = %caller, count = records.len(), "Listed owned records");
        records
    }

    /// Every record regardless of owner
    pub fn list_all(&self) -> Vec<Record> {
        record_counter("store.operations.read", 1);
        self.map.values().cloned().collect()
    }

    /// Fetch a record owned by `caller`
    pub fn get(&self, id: &RecordId, caller: &CallerId) -> StoreResult<Record> {
        record_counter("store.operations.read", 1);
        let record = self.lookup(id)?;
        self.authorize(record, caller)?;
        Ok(record.clone())
    }

    /// Identity that created the record
    pub fn get_creator(&self, id: &RecordId, caller: &CallerId) -> StoreResult<CallerId> {
        record_counter("store.operations.read", 1);
        let record = self.lookup(id)?;
        self.policy
            .authorize_creator_lookup(record, caller)
            .inspect_err(|_| self.note_denied(id, caller))?;
        Ok(record.creator_id.clone())
    }

    /// Create a record owned by `caller`
    pub fn add(&mut self, payload: RecordPayload, caller: &CallerId) -> StoreResult<Record> {
        validate_payload(&payload)?;

        let id = self.fresh_id()?;
        let record = Record::new(id, payload, caller.clone(), self.clock.now());
        self.bounds.check(&record)?;

        self.map.insert(record.clone())?;

        record_counter("store.operations.write", 1);
        record_gauge("store.records.count", self.map.len() as f64);
        info!(id = %record.id, caller = %caller, "Record created");
        Ok(record)
    }

    /// Replace the payload fields of a record owned by `caller`
    pub fn update(
        &mut self,
        id: &RecordId,
        payload: RecordPayload,
        caller: &CallerId,
    ) -> StoreResult<Record> {
        validate_payload(&payload)?;

        let existing = self.lookup(id)?;
        self.authorize(existing, caller)?;

        let mut updated = existing.clone();
        updated.apply_update(payload, self.clock.now());
        self.bounds.check(&updated)?;

        self.map.insert(updated.clone())?;

        record_counter("store.operations.write", 1);
        info!(id = %id, caller = %caller, "Record updated");
        Ok(updated)
    }

    /// Remove a record owned by `caller`, returning its last value
    pub fn delete(&mut self, id: &RecordId, caller: &CallerId) -> StoreResult<Record> {
        let existing = self.lookup(id)?;
        self.authorize(existing, caller)?;

        let removed = self
            .map
            .remove(id)?
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;

        record_counter("store.operations.delete", 1);
        record_gauge("store.records.count", self.map.len() as f64);
        info!(id = %id, caller = %caller, "Record deleted");
        Ok(removed)
    }

    /// Records whose title contains `keyword`, ignoring case
    pub fn search(&self, keyword: &str, caller: &CallerId) -> Vec<Record> {
        record_counter("store.operations.read", 1);
        let visible = self
            .map
            .values()
            .filter(|r| self.policy.search_includes(r, caller));
        let results = search_records(visible, keyword);
        debug!(keyword = keyword, count = results.len(), "Searched records");
        results
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn stats(&self) -> StoreStats {
        let owners: HashSet<&CallerId> = self.map.values().map(|r| &r.creator_id).collect();
        StoreStats {
            records: self.map.len(),
            owners: owners.len(),
        }
    }

    fn lookup(&self, id: &RecordId) -> StoreResult<&Record> {
        self.map
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    fn authorize(&self, record: &Record, caller: &CallerId) -> StoreResult<()> {
        self.policy
            .authorize(record, caller)
            .inspect_err(|_| self.note_denied(&record.id, caller))
    }

    fn note_denied(&self, id: &RecordId, caller: &CallerId) {
        record_counter("store.operations.denied", 1);
        warn!(id = %id, caller = %caller, "Caller is not the record creator");
    }

    fn fresh_id(&mut self) -> StoreResult<RecordId> {
        for attempt in 1..=self.max_id_attempts {
            let candidate = self.id_gen.generate();
            if !self.map.contains_key(&candidate) {
                return Ok(candidate);
            }
            debug!(attempt = attempt, "Generated id collided, regenerating");
        }
        Err(StoreError::IdSpaceExhausted(self.max_id_attempts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_store::store::clock::ManualClock;
    use crate::test_utils::ScriptedIdGenerator;
    use tempfile::tempdir;

    fn alice() -> CallerId {
        CallerId::new("alice")
    }

    fn payload(title: &str) -> RecordPayload {
        RecordPayload::new(title, "http://a")
    }

    #[test]
    fn test_add_sets_creator_and_timestamps() {
        let clock = ManualClock::new(100);
        let mut store = RecordStore::in_memory().with_clock(Arc::new(clock.clone()));

        let record = store.add(payload("x-ray"), &alice()).unwrap();

        assert_eq!(record.creator_id, alice());
        assert_eq!(record.created_at.as_nanos(), 100);
        assert!(record.updated_at.is_none());
        assert_eq!(record.id.as_str().len(), 30);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_update_stamps_time_from_clock() {
        let clock = ManualClock::new(100);
        let mut store = RecordStore::in_memory().with_clock(Arc::new(clock.clone()));
        let record = store.add(payload("x-ray"), &alice()).unwrap();

        clock.advance(50);
        let updated = store.update(&record.id, payload("mri"), &alice()).unwrap();

        assert_eq!(updated.updated_at.map(|t| t.as_nanos()), Some(150));
        assert_eq!(updated.created_at.as_nanos(), 100);
    }

    #[test]
    fn test_collision_regenerates() {
        let taken = RecordId::new("taken");
        let mut store = RecordStore::in_memory().with_id_generator(Box::new(
            ScriptedIdGenerator::new(vec![taken.clone(), taken.clone(), RecordId::new("fresh")]),
        ));

        let first = store.add(payload("one"), &alice()).unwrap();
        assert_eq!(first.id, taken);

        let second = store.add(payload("two"), &alice()).unwrap();
        assert_eq!(second.id, RecordId::new("fresh"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_id_space_exhausted_leaves_store_unchanged() {
        let taken = RecordId::new("taken");
        let mut store = RecordStore::in_memory()
            .with_max_id_attempts(3)
            .with_id_generator(Box::new(ScriptedIdGenerator::new(vec![taken.clone(); 4])));

        store.add(payload("one"), &alice()).unwrap();
        let result = store.add(payload("two"), &alice());

        assert!(matches!(result, Err(StoreError::IdSpaceExhausted(3))));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_oversized_record_rejected_without_mutation() {
        let mut store = RecordStore::in_memory();
        let result = store.add(payload(&"t".repeat(2000)), &alice());
        assert!(matches!(result, Err(StoreError::CapacityExceeded { .. })));
        assert!(store.is_empty());
    }

    #[test]
    fn test_oversized_update_keeps_old_record() {
        let mut store = RecordStore::in_memory();
        let record = store.add(payload("x-ray"), &alice()).unwrap();

        let result = store.update(&record.id, payload(&"t".repeat(2000)), &alice());
        assert!(matches!(result, Err(StoreError::CapacityExceeded { .. })));
        assert_eq!(store.get(&record.id, &alice()).unwrap(), record);
    }

    #[test]
    fn test_stats_counts_owners() {
        let mut store = RecordStore::in_memory();
        store.add(payload("a"), &alice()).unwrap();
        store.add(payload("b"), &alice()).unwrap();
        store.add(payload("c"), &CallerId::new("bob")).unwrap();

        assert_eq!(store.stats(), StoreStats { records: 3, owners: 2 });
    }

    #[test]
    fn test_open_reloads_snapshot() {
        let dir = tempdir().unwrap();
        let config = RecordStoreConfig {
            data_dir: dir.path().to_path_buf(),
            ..Default::default()
        };

        let created = {
            let mut store = RecordStore::open(&config, AccessPolicy::default()).unwrap();
            store.add(payload("x-ray"), &alice()).unwrap()
        };

        let mut store = RecordStore::open(&config, AccessPolicy::default()).unwrap();
        assert_eq!(store.get(&created.id, &alice()).unwrap(), created);

        let updated = store.update(&created.id, payload("mri"), &alice()).unwrap();
        assert!(updated.updated_at.unwrap() >= created.created_at);
    }

    #[test]
    fn test_config_bounds_and_path() {
        let config = RecordStoreConfig::default();
        assert_eq!(config.bounds(), EntryBounds::default());
        assert!(config.snapshot_path().ends_with("records.bin"));
    }
}
