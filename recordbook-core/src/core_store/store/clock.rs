/*
    clock.rs - Logical time source for record timestamps

    Readings never decrease, even if the wall clock steps backwards.
*/

use crate::core_store::model::Timestamp;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Supplies monotonically non-decreasing timestamps
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Wall-clock nanoseconds, clamped to the last reading
#[derive(Debug, Default)]
pub struct SystemClock {
    last: AtomicU64,
}

impl SystemClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Never return anything earlier than `floor`.
    ///
    /// Lets a reopened store keep timestamps ahead of persisted ones.
    pub fn with_floor(floor: Timestamp) -> Self {
        SystemClock {
            last: AtomicU64::new(floor.as_nanos()),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        let wall = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        let prev = self.last.fetch_max(wall, Ordering::SeqCst);
        Timestamp::from_nanos(prev.max(wall))
    }
}

/// Hand-driven clock for tests
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    current: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new(start: u64) -> Self {
        ManualClock {
            current: Arc::new(AtomicU64::new(start)),
        }
    }

    pub fn set(&self, nanos: u64) {
        self.current.store(nanos, Ordering::SeqCst);
    }

    pub fn advance(&self, nanos: u64) {
        self.current.fetch_add(nanos, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_nanos(self.current.load(Ordering::SeqCst))
    }
}
