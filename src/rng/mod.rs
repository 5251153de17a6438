//! Random sources for Monte Carlo sampling
//!
//! This module defines the `RandomSource` trait and its implementations.
//! Monte Carlo integration takes a source as a parameter instead of reaching
//! for a global generator, so callers choose between a non-deterministic
//! source (the default) and a seeded one (reproducible runs and tests).

pub mod pseudo;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Trait for random number sources
///
/// Implementations must be thread-safe (Send + Sync) to work with async server.
pub trait RandomSource: Send + Sync {
    /// Returns the source name (e.g., "pseudo", "seeded")
    fn name(&self) -> &'static str;

    /// Returns a human-readable description of this source
    fn description(&self) -> &'static str;

    /// Generate n random floats, each uniformly distributed in [0.0, 1.0)
    fn floats(&self, n: usize) -> Result<Vec<f64>>;
}

/// Information about a random source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceInfo {
    /// Source name (used in config/CLI)
    pub name: String,
    /// Human-readable description
    pub description: String,
}

/// Get a random source by name
///
/// `seed` is only used by the seeded source.
pub fn get_source(name: &str, seed: u64) -> Result<Box<dyn RandomSource>> {
    match name {
        "pseudo" => Ok(Box::new(pseudo::PseudoSource::new())),
        "seeded" => Ok(Box::new(pseudo::SeededSource::new(seed))),
        _ => Err(Error::Config(format!("Unknown random source: {}", name))),
    }
}

/// List all available random sources with their info
pub fn available_sources() -> Vec<SourceInfo> {
    [
        &pseudo::PseudoSource::new() as &dyn RandomSource,
        &pseudo::SeededSource::new(0),
    ]
    .iter()
    .map(|source| SourceInfo {
        name: source.name().to_string(),
        description: source.description().to_string(),
    })
    .collect()
}
