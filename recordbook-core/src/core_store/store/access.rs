/*
    access.rs - Creator-based access control

    The creator recorded at construction is the only principal allowed to
    read (through `get`), update or delete a record. Two lookups have a
    configurable scope:
    - creator lookup: public by default, optionally owner-only
    - keyword search: all records by default, optionally owner-only
*/

use crate::core_store::model::{CallerId, Record};
use crate::core_store::store::errors::{StoreError, StoreResult};
use serde::{Deserialize, Serialize};

/// Who may ask for a record's creator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreatorLookup {
    /// Anyone
    #[default]
    Public,
    /// Only the creator, same as `get`
    OwnerOnly,
}

/// Which records a keyword search considers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchScope {
    #[default]
    All,
    Owned,
}

/// Access policy applied by the record store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AccessPolicy {
    #[serde(default)]
    pub creator_lookup: CreatorLookup,

    #[serde(default)]
    pub search_scope: SearchScope,
}

impl AccessPolicy {
    /// Owner-scoped everywhere
    pub fn strict() -> Self {
        AccessPolicy {
            creator_lookup: CreatorLookup::OwnerOnly,
            search_scope: SearchScope::Owned,
        }
    }

    /// Fail with `Forbidden` unless `caller` created `record`
    pub fn authorize(&self, record: &Record, caller: &CallerId) -> StoreResult<()> {
        if record.is_owned_by(caller) {
            Ok(())
        } else {
            Err(StoreError::Forbidden(record.id.clone()))
        }
    }

    pub fn authorize_creator_lookup(&self, record: &Record, caller: &CallerId) -> StoreResult<()> {
        match self.creator_lookup {
            CreatorLookup::Public => Ok(()),
            CreatorLookup::OwnerOnly => self.authorize(record, caller),
        }
    }

    /// Whether `record` is visible to `caller` in search results
    pub fn search_includes(&self, record: &Record, caller: &CallerId) -> bool {
        match self.search_scope {
            SearchScope::All => true,
            SearchScope::Owned => record.is_owned_by(caller),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_store::model::{RecordId, RecordPayload, Timestamp};

    fn alice_record() -> Record {
        Record::new(
            RecordId::new("r1"),
            RecordPayload::new("x-ray", "http://a"),
            CallerId::new("alice"),
            Timestamp::from_nanos(1),
        )
    }

    #[test]
    fn test_default_policy_is_permissive_for_lookups() {
        let policy = AccessPolicy::default();
        let record = alice_record();
        let bob = CallerId::new("bob");

        assert!(policy.authorize_creator_lookup(&record, &bob).is_ok());
        assert!(policy.search_includes(&record, &bob));
    }

    #[test]
    fn test_authorize_rejects_non_creator() {
        let policy = AccessPolicy::default();
        let record = alice_record();

        assert!(policy.authorize(&record, &CallerId::new("alice")).is_ok());
        assert!(matches!(
            policy.authorize(&record, &CallerId::new("bob")),
            Err(StoreError::Forbidden(_))
        ));
    }

    #[test]
    fn test_strict_policy() {
        let policy = AccessPolicy::strict();
        let record = alice_record();
        let bob = CallerId::new("bob");

        assert!(policy.authorize_creator_lookup(&record, &bob).is_err());
        assert!(!policy.search_includes(&record, &bob));
        assert!(policy.search_includes(&record, &CallerId::new("alice")));
    }

    #[test]
    fn test_policy_deserializes_from_toml() {
        let policy: AccessPolicy =
            toml::from_str("creator_lookup = \"owner_only\"\nsearch_scope = \"owned\"").unwrap();
        assert_eq!(policy, AccessPolicy::strict());

        let policy: AccessPolicy = toml::from_str("").unwrap();
        assert_eq!(policy, AccessPolicy::default());
    }
}
