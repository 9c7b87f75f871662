//! Random-source port for the pairing picker.
//!
//! Selection is injected so the picker stays deterministic under test and
//! reproducible from the CLI via `--seed`.

use rand::prelude::*;
use rand_pcg::Mcg128Xsl64;

/// Uniform integer source.
pub trait RandomSource {
    /// Return a uniform index in `0..n`. `n` must be at least 1.
    fn pick(&mut self, n: usize) -> usize;
}

/// Thread-local RNG for production use.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick(&mut self, n: usize) -> usize {
        rand::thread_rng().gen_range(0..n)
    }
}

/// Deterministic PCG generator for tests and reproducible runs.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: Mcg128Xsl64,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mcg128Xsl64::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn pick(&mut self, n: usize) -> usize {
        self.rng.gen_range(0..n)
    }
}
