//! Test utilities and helpers for recordbook
//!
//! Fixtures, assertion helpers and deterministic RNG shared by unit tests,
//! integration tests and benchmarks.

pub mod assertions;
pub mod deterministic_rng;
pub mod fixtures;

pub use assertions::*;
pub use deterministic_rng::*;
pub use fixtures::*;
