/*
    Store subsystem - Record persistence and access control
*/

pub mod access;
pub mod backend;
pub mod clock;
pub mod errors;
pub mod file_map;
pub mod id_gen;
pub mod record_store;
pub mod validator;

pub use access::{AccessPolicy, CreatorLookup, SearchScope};
pub use backend::{MemoryMap, RecordMap};
pub use clock::{Clock, ManualClock, SystemClock};
pub use errors::*;
pub use file_map::FileMap;
pub use id_gen::{AlphanumericIdGenerator, IdGenerator};
pub use record_store::{RecordStore, RecordStoreConfig, StoreStats};
pub use validator::{validate_payload, EntryBounds};
