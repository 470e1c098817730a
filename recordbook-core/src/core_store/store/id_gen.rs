/*
    id_gen.rs - Record identifier generation

    Ids are sampled uniformly, with replacement, from an alphabet.
    The entropy source is not cryptographically critical; the store
    checks candidates against existing keys and regenerates on collision.
*/

use crate::core_store::model::RecordId;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Alphanumeric alphabet: `[a-zA-Z0-9]`
pub const ALPHANUMERIC: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Default id length
pub const DEFAULT_ID_LENGTH: usize = 30;

/// Source of candidate record ids
pub trait IdGenerator: Send {
    fn generate(&mut self) -> RecordId;
}

/// Samples ids from an alphabet using a pseudo-random source
pub struct AlphanumericIdGenerator<R: Rng = StdRng> {
    alphabet: &'static [u8],
    length: usize,
    rng: R,
}

impl AlphanumericIdGenerator<StdRng> {
    /// Generator seeded from OS entropy
    pub fn new(length: usize) -> Self {
        Self::with_rng(StdRng::from_os_rng(), length)
    }

    /// Reproducible generator, for tests
    pub fn seeded(seed: u64, length: usize) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), length)
    }
}

impl<R: Rng> AlphanumericIdGenerator<R> {
    pub fn with_rng(rng: R, length: usize) -> Self {
        AlphanumericIdGenerator {
            alphabet: ALPHANUMERIC,
            length,
            rng,
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for AlphanumericIdGenerator<StdRng> {
    fn default() -> Self {
        Self::new(DEFAULT_ID_LENGTH)
    }
}

impl<R: Rng + Send> IdGenerator for AlphanumericIdGenerator<R> {
    fn generate(&mut self) -> RecordId {
        let id: String = (0..self.length)
            .map(|_| {
                let idx = self.rng.random_range(0..self.alphabet.len());
                self.alphabet[idx] as char
            })
            .collect();
        RecordId(id)
    }
}
