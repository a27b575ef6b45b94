//! Seedable randomness for game content and spawning
//!
//! Every random decision a controller makes goes through [`RandomSource`],
//! so a fixed seed reproduces a whole run.

use rand::{rngs::SmallRng, Rng, SeedableRng};

/// Source of uniform random values
pub trait RandomSource: Send {
    /// Uniform value in `[0.0, 1.0)`
    fn unit(&mut self) -> f64;

    /// Uniform index in `0..len`; `len` must be non-zero
    fn index(&mut self, len: usize) -> usize;

    /// Uniform value in `[low, high)`
    fn range(&mut self, low: f64, high: f64) -> f64 {
        low + self.unit() * (high - low)
    }

    /// `true` with the given probability
    fn chance(&mut self, probability: f64) -> bool {
        self.unit() < probability
    }
}

/// Default random source backed by `SmallRng`
#[derive(Debug, Clone)]
pub struct GameRng {
    rng: SmallRng,
}

impl GameRng {
    /// Create a deterministic source from a seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Create a source seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    /// Seeded when a seed is configured, entropy otherwise
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }

    /// Derive an independent child source, e.g. one per mounted game
    pub fn fork(&mut self) -> Self {
        Self::seeded(self.rng.gen())
    }
}

impl RandomSource for GameRng {
    fn unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}
