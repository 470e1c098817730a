/*
    Model subsystem - Data structures for entities
*/

pub mod types;
pub mod record;

pub use types::*;
pub use record::*;
