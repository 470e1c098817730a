//! Custom assertions for store results
//!
//! Panic messages include the unexpected value so failures read well.

use crate::core_store::model::{Record, RecordId};
use crate::core_store::store::{StoreError, StoreResult};
use std::fmt::Debug;

/// Assert that a Result is Ok and return the value
pub fn assert_ok<T, E: Debug>(result: Result<T, E>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => panic!("Expected Ok, got Err: {:?}", e),
    }
}

/// Assert that a store call failed with `NotFound`
pub fn assert_not_found<T: Debug>(result: StoreResult<T>) {
    match result {
        Err(StoreError::NotFound(_)) => {}
        other => panic!("Expected NotFound, got {:?}", other),
    }
}

/// Assert that a store call failed with `Forbidden`
pub fn assert_forbidden<T: Debug>(result: StoreResult<T>) {
    match result {
        Err(StoreError::Forbidden(_)) => {}
        other => panic!("Expected Forbidden, got {:?}", other),
    }
}

/// Assert that a store call failed validation with exactly `message`
pub fn assert_validation<T: Debug>(result: StoreResult<T>, message: &str) {
    match result {
        Err(StoreError::Validation(msg)) if msg == message => {}
        other => panic!("Expected Validation({:?}), got {:?}", message, other),
    }
}

/// Assert that two record lists hold the same ids, ignoring order
pub fn assert_same_records(a: &[Record], b: &[Record]) {
    let mut ids_a: Vec<&RecordId> = a.iter().map(|r| &r.id).collect();
    let mut ids_b: Vec<&RecordId> = b.iter().map(|r| &r.id).collect();
    ids_a.sort();
    ids_b.sort();
    if ids_a != ids_b {
        panic!("Record sets differ: {:?} vs {:?}", ids_a, ids_b);
    }
}
