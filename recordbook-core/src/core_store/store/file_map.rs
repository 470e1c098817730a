/*
    file_map.rs - Snapshot-file backend

    Keeps the whole map in memory and rewrites a single snapshot file on
    every mutation.

    Features:
    - Atomic writes (write to temp, fsync, then rename)
    - Versioned snapshot header
    - In-memory state rolled back if the write fails
*/

use crate::core_store::model::{Record, RecordId, Timestamp};
use crate::core_store::store::backend::RecordMap;
use crate::core_store::store::errors::{StoreError, StoreResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Current snapshot format version
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Deserialize)]
struct SnapshotFile {
    version: u32,
    records: BTreeMap<RecordId, Record>,
}

/// Write-side view of [`SnapshotFile`]; encodes identically
#[derive(Serialize)]
struct SnapshotRef<'a> {
    version: u32,
    records: &'a BTreeMap<RecordId, Record>,
}

/// Snapshot-file backend
#[derive(Debug)]
pub struct FileMap {
    path: PathBuf,
    entries: BTreeMap<RecordId, Record>,
}

impl FileMap {
    /// Open the snapshot at `path`, starting empty if it does not exist
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let entries = if path.exists() {
            let data = fs::read(&path)?;
            let snapshot: SnapshotFile = bincode::deserialize(&data)
                .map_err(|e| StoreError::Deserialization(e.to_string()))?;
            if snapshot.version != SNAPSHOT_VERSION {
                return Err(StoreError::Deserialization(format!(
                    "unsupported snapshot version {}",
                    snapshot.version
                )));
            }
            snapshot.records
        } else {
            BTreeMap::new()
        };

        debug!(path = %path.display(), records = entries.len(), "Opened record snapshot");

        Ok(FileMap { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling path the snapshot is staged at before the rename
    pub fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn persist(&self) -> StoreResult<()> {
        let snapshot = SnapshotRef {
            version: SNAPSHOT_VERSION,
            records: &self.entries,
        };
        let data = bincode::serialize(&snapshot)?;

        let temp_path = self.temp_path();
        let mut file = File::create(&temp_path)?;
        file.write_all(&data)?;
        file.sync_all()?;
        drop(file);

        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }

    /// Latest timestamp held in the snapshot, if any
    pub fn latest_timestamp(&self) -> Option<Timestamp> {
        self.entries
            .values()
            .map(|r| r.updated_at.unwrap_or(r.created_at).max(r.created_at))
            .max()
    }
}

impl RecordMap for FileMap {
    fn get(&self, id: &RecordId) -> Option<&Record> {
        self.entries.get(id)
    }

    fn contains_key(&self, id: &RecordId) -> bool {
        self.entries.contains_key(id)
    }

    fn insert(&mut self, record: Record) -> StoreResult<Option<Record>> {
        let id = record.id.clone();
        let previous = self.entries.insert(id.clone(), record);

        if let Err(e) = self.persist() {
            match &previous {
                Some(old) => {
                    self.entries.insert(id, old.clone());
                }
                None => {
                    self.entries.remove(&id);
                }
            }
            return Err(e);
        }

        Ok(previous)
    }

    fn remove(&mut self, id: &RecordId) -> StoreResult<Option<Record>> {
        let removed = match self.entries.remove(id) {
            Some(record) => record,
            None => return Ok(None),
        };

        if let Err(e) = self.persist() {
            self.entries.insert(id.clone(), removed);
            return Err(e);
        }

        Ok(Some(removed))
    }

    fn values(&self) -> Box<dyn Iterator<Item = &Record> + '_> {
        Box::new(self.entries.values())
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_store::model::{CallerId, RecordPayload};
    use tempfile::tempdir;

    fn record(id: &str, created: u64) -> Record {
        Record::new(
            RecordId::new(id),
            RecordPayload::new("title", "http://a"),
            CallerId::new("alice"),
            Timestamp::from_nanos(created),
        )
    }

    #[test]
    fn test_open_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let map = FileMap::open(dir.path().join("records.bin")).unwrap();
        assert!(map.is_empty());
        assert!(map.latest_timestamp().is_none());
    }

    #[test]
    fn test_reopen_preserves_contents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("records.bin");

        {
            let mut map = FileMap::open(&path).unwrap();
            map.insert(record("a", 1)).unwrap();
            map.insert(record("b", 2)).unwrap();
            map.remove(&RecordId::new("a")).unwrap();
        }

        let map = FileMap::open(&path).unwrap();
        assert_eq!(map.len(), 1);
        assert!(map.get(&RecordId::new("b")).is_some());
        assert!(map.get(&RecordId::new("a")).is_none());
        assert_eq!(map.latest_timestamp(), Some(Timestamp::from_nanos(2)));
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("records.bin");
        let mut map = FileMap::open(&path).unwrap();
        map.insert(record("a", 1)).unwrap();
        assert!(path.exists());
        assert_eq!(map.path(), path.as_path());
    }

    #[test]
    fn test_corrupt_snapshot_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("records.bin");
        fs::write(&path, b"definitely not a snapshot").unwrap();

        let result = FileMap::open(&path);
        assert!(matches!(result, Err(StoreError::Deserialization(_))));
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("records.bin");
        let mut map = FileMap::open(&path).unwrap();
        map.insert(record("a", 1)).unwrap();
        assert_eq!(map.temp_path(), dir.path().join("records.bin.tmp"));
        assert!(!map.temp_path().exists());
    }

    #[test]
    fn test_tmp_named_snapshot_is_staged_elsewhere() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("records.tmp");

        {
            let mut map = FileMap::open(&path).unwrap();
            assert_ne!(map.temp_path(), path);
            map.insert(record("a", 1)).unwrap();
            map.insert(record("b", 2)).unwrap();
            assert!(!map.temp_path().exists());
        }

        let map = FileMap::open(&path).unwrap();
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_snapshot_encoding_reads_back_as_file_format() {
        let mut entries = BTreeMap::new();
        let r = record("a", 1);
        entries.insert(r.id.clone(), r);

        let data = bincode::serialize(&SnapshotRef {
            version: SNAPSHOT_VERSION,
            records: &entries,
        })
        .unwrap();
        let decoded: SnapshotFile = bincode::deserialize(&data).unwrap();
        assert_eq!(decoded.version, SNAPSHOT_VERSION);
        assert_eq!(decoded.records, entries);
    }
}
