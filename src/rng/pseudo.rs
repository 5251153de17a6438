//! Pseudo-random sources
//!
//! `PseudoSource` draws from the `rand` crate's thread-local RNG and is the
//! production default. `SeededSource` wraps a seeded `StdRng` so the same seed
//! always yields the same sample sequence.

use crate::error::{Error, Result};
use crate::rng::RandomSource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Non-deterministic pseudo-random source
pub struct PseudoSource;

impl PseudoSource {
    /// Create a new pseudo-random source
    pub fn new() -> Self {
        Self
    }
}

impl Default for PseudoSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for PseudoSource {
    fn name(&self) -> &'static str {
        "pseudo"
    }

    fn description(&self) -> &'static str {
        "Thread-local pseudo-random generator (non-reproducible)"
    }

    fn floats(&self, n: usize) -> Result<Vec<f64>> {
        let mut rng = rand::thread_rng();
        Ok((0..n).map(|_| rng.gen::<f64>()).collect())
    }
}

/// Seeded pseudo-random source for reproducible sampling
pub struct SeededSource {
    rng: Mutex<StdRng>,
}

impl SeededSource {
    /// Create a new seeded source
    ///
    /// Using the same seed will produce the same sequence of random values.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededSource {
    fn name(&self) -> &'static str {
        "seeded"
    }

    fn description(&self) -> &'static str {
        "Seeded pseudo-random generator (reproducible)"
    }

    fn floats(&self, n: usize) -> Result<Vec<f64>> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| Error::Server("random source lock poisoned".to_string()))?;
        Ok((0..n).map(|_| rng.gen::<f64>()).collect())
    }
}
