/*
    End-to-End Integration Test

    Drives the public API the way a host does: load config, open the
    snapshot-backed store, build a call context per request, dispatch.
*/

use recordbook_core::core_store::store::{RecordStore, StoreError};
use recordbook_core::{CallContext, CallerId, Config, RecordPayload};
use tempfile::tempdir;

fn call(name: &str) -> CallContext {
    CallContext::new(CallerId::new(name))
}

/// **End-to-End Test: Owned Record Lifecycle**
///
/// Scenario:
/// 1. alice creates record A ("x-ray", "http://a")
/// 2. alice sees [A], bob sees []
/// 3. bob's update is forbidden
/// 4. alice's update sets updated_at
/// 5. alice deletes A, then A is gone
/// 6. the snapshot on disk reflects every step
#[test]
fn test_end_to_end_owned_record_lifecycle() {
    let dir = tempdir().unwrap();
    let mut config = Config::default();
    config.store.data_dir = dir.path().to_path_buf();
    config.validate().unwrap();

    let alice = call("alice");
    let bob = call("bob");

    let mut store = RecordStore::open(&config.store, config.access).unwrap();

    // Phase 1: create
    let a = store
        .add(RecordPayload::new("x-ray", "http://a"), alice.caller())
        .unwrap();
    assert_eq!(a.creator_id, CallerId::new("alice"));
    assert!(a.updated_at.is_none());

    // Phase 2: owner listing
    assert_eq!(store.list_owned(alice.caller()), vec![a.clone()]);
    assert!(store.list_owned(bob.caller()).is_empty());

    // Phase 3: foreign update rejected
    let mri = RecordPayload::new("mri", "http://a");
    let err = store.update(&a.id, mri.clone(), bob.caller()).unwrap_err();
    assert!(matches!(err, StoreError::Forbidden(_)));

    // Phase 4: owner update
    let updated = store.update(&a.id, mri, alice.caller()).unwrap();
    assert!(updated.updated_at.is_some());
    assert_eq!(updated.created_at, a.created_at);

    // Survives a restart
    drop(store);
    let mut store = RecordStore::open(&config.store, config.access).unwrap();
    assert_eq!(store.get(&a.id, alice.caller()).unwrap(), updated);

    // Phase 5: delete
    let deleted = store.delete(&a.id, alice.caller()).unwrap();
    assert_eq!(deleted, updated);
    let err = store.get(&a.id, alice.caller()).unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
    assert_eq!(err.to_string(), format!("a record with id={} not found", a.id));

    // Phase 6: restart sees the deletion
    drop(store);
    let store = RecordStore::open(&config.store, config.access).unwrap();
    assert!(store.is_empty());
}

#[test]
fn test_search_and_creator_lookup_across_callers() {
    let dir = tempdir().unwrap();
    let mut config = Config::default();
    config.store.data_dir = dir.path().to_path_buf();

    let mut store = RecordStore::open(&config.store, config.access).unwrap();
    let alice = call("alice");
    let bob = call("bob");

    let a = store
        .add(RecordPayload::new("Knee X-Ray", "http://a"), alice.caller())
        .unwrap();
    store
        .add(RecordPayload::new("x-ray archive", "http://b"), bob.caller())
        .unwrap();

    assert_eq!(store.search("x-RAY", bob.caller()).len(), 2);
    assert_eq!(store.search("", bob.caller()).len(), 2);
    assert_eq!(store.get_creator(&a.id, bob.caller()).unwrap(), CallerId::new("alice"));
}
