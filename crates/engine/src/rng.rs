//! Deterministic RNG resource.
//!
//! Wraps `ChaCha8Rng` for cross-platform deterministic randomness. Systems
//! that need randomness take `ResMut<BuildRng>` instead of
//! `rand::thread_rng()` so that identical seeds reproduce identical scenes.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Default seed used when no explicit seed is provided.
const DEFAULT_SEED: u64 = 42;

#[derive(Resource)]
pub struct BuildRng(pub ChaCha8Rng);

impl Default for BuildRng {
    fn default() -> Self {
        Self(ChaCha8Rng::seed_from_u64(DEFAULT_SEED))
    }
}

impl BuildRng {
    /// Create a new `BuildRng` seeded from the given `u64` value.
    pub fn from_seed_u64(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}
