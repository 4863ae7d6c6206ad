//! The `KeyGenerator` entry point.

use chrono::{DateTime, Utc};

use crate::batch::build_batch;
use crate::data::KeySet;
use crate::error::Result;
use crate::random::{build_local_set, build_random_set};

/// Source of the current time.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Reads the wall clock, truncated to whole milliseconds.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        let now = Utc::now();
        DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now)
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Produces key sets. Holds no state besides its clock, so one value can be
/// shared freely between threads and requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyGenerator<C: Clock = SystemClock> {
    clock: C,
}

impl KeyGenerator<SystemClock> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: Clock> KeyGenerator<C> {
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    /// Keys derived from `batch_id`. Repeated calls with an id that carries
    /// digits return the same prefixes and hashes.
    pub fn generate_batch(&self, batch_id: &str) -> Result<KeySet> {
        build_batch(batch_id, self.clock.now())
    }

    /// Fresh keys in any of the server styles.
    pub fn generate_random_set(&self) -> Result<KeySet> {
        build_random_set(&mut rand::thread_rng(), self.clock.now())
    }

    /// Fresh keys for when the server cannot be reached.
    pub fn generate_local_set(&self) -> Result<KeySet> {
        build_local_set(&mut rand::thread_rng(), self.clock.now())
    }
}
