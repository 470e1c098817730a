/*!
    Deterministic RNG helpers for reproducible tests

    Seeded id generators and RNGs so store contents are identical across runs.
*/

use crate::core_store::model::RecordId;
use crate::core_store::store::{AlphanumericIdGenerator, IdGenerator};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::VecDeque;

/// Default seed for deterministic tests
pub const DEFAULT_TEST_SEED: u64 = 42;

/// Create a deterministic RNG with the default seed
pub fn test_rng() -> StdRng {
    test_rng_with_seed(DEFAULT_TEST_SEED)
}

/// Create a deterministic RNG with a custom seed
pub fn test_rng_with_seed(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Id generator producing the same sequence on every run
pub fn test_id_generator() -> AlphanumericIdGenerator<StdRng> {
    AlphanumericIdGenerator::with_rng(test_rng(), 30)
}

/// Replays a fixed list of ids, then falls back to [`test_id_generator`].
///
/// Lets tests force id collisions.
pub struct ScriptedIdGenerator {
    script: VecDeque<RecordId>,
    fallback: AlphanumericIdGenerator<StdRng>,
}

impl ScriptedIdGenerator {
    pub fn new(ids: impl IntoIterator<Item = RecordId>) -> Self {
        ScriptedIdGenerator {
            script: ids.into_iter().collect(),
            fallback: test_id_generator(),
        }
    }
}

impl IdGenerator for ScriptedIdGenerator {
    fn generate(&mut self) -> RecordId {
        self.script
            .pop_front()
            .unwrap_or_else(|| self.fallback.generate())
    }
}
