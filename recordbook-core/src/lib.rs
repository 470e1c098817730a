pub mod config;
pub mod core_store;
pub mod logging;
pub mod metrics;
pub mod test_utils;

pub use config::{Config, ConfigError};
pub use core_store::{
    CallContext, CallerId, Record, RecordId, RecordPayload, RecordStore, StoreError, StoreResult,
};
pub use logging::{init_logging, LogLevel};
