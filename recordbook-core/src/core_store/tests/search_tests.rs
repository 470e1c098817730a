/*
    search_tests.rs - Keyword search through the store
*/

use crate::core_store::store::{AccessPolicy, CreatorLookup, SearchScope};
use crate::test_utils::*;

#[test]
fn test_search_spans_all_callers_by_default() {
    let mut store = test_store();
    let a = store.add(test_payload("Chest X-Ray"), &alice()).unwrap();
    let b = store.add(test_payload("x-ray follow-up"), &bob()).unwrap();
    store.add(test_payload("MRI"), &bob()).unwrap();

    assert_same_records(&store.search("X-RAY", &alice()), &[a, b]);
}

#[test]
fn test_empty_keyword_returns_everything() {
    let mut store = test_store();
    store.add(test_payload("one"), &alice()).unwrap();
    store.add(test_payload("two"), &bob()).unwrap();

    assert_eq!(store.search("", &alice()).len(), 2);
}

#[test]
fn test_owned_search_scope() {
    let policy = AccessPolicy {
        creator_lookup: CreatorLookup::Public,
        search_scope: SearchScope::Owned,
    };
    let mut store = TestStoreBuilder::new().with_policy(policy).build();
    let a = store.add(test_payload("x-ray"), &alice()).unwrap();
    store.add(test_payload("x-ray"), &bob()).unwrap();

    assert_same_records(&store.search("x-ray", &alice()), &[a]);
    assert_eq!(store.search("", &bob()).len(), 1);
}

#[test]
fn test_search_sees_updated_titles() {
    let mut store = test_store();
    let a = store.add(test_payload("x-ray"), &alice()).unwrap();
    store.update(&a.id, test_payload("mri"), &alice()).unwrap();

    assert!(store.search("x-ray", &alice()).is_empty());
    assert_eq!(store.search("MRI", &alice()).len(), 1);
}
