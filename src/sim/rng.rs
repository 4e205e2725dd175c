//! Random source used by the entity factories
//!
//! Production play is intentionally unseeded; tests substitute a fixed
//! sequence so spawning becomes predictable.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Uniform random numbers in `[0, 1)`
pub trait RandomSource {
    fn next_f32(&mut self) -> f32;

    /// Uniform in `[lo, hi)`
    fn range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + self.next_f32() * (hi - lo)
    }

    /// True with probability `p`
    fn chance(&mut self, p: f32) -> bool {
        self.next_f32() < p
    }

    /// Uniform index in `0..len` (`len` must be non-zero)
    fn index(&mut self, len: usize) -> usize {
        ((self.next_f32() * len as f32) as usize).min(len.saturating_sub(1))
    }
}

/// PCG generator seeded from OS entropy
#[derive(Debug, Clone)]
pub struct EntropyRng(Pcg32);

impl EntropyRng {
    pub fn new() -> Self {
        Self(Pcg32::from_os_rng())
    }

    /// Fixed seed, for repeatable headless runs
    pub fn seeded(seed: u64) -> Self {
        Self(Pcg32::seed_from_u64(seed))
    }
}

impl Default for EntropyRng {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for EntropyRng {
    fn next_f32(&mut self) -> f32 {
        self.0.random::<f32>()
    }
}

/// Replays a fixed list of values, cycling when exhausted
#[derive(Debug, Clone)]
pub struct SequenceRng {
    values: Vec<f32>,
    cursor: usize,
}

impl SequenceRng {
    pub fn new(values: Vec<f32>) -> Self {
        Self { values, cursor: 0 }
    }

    /// Always returns `value`
    pub fn constant(value: f32) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSource for SequenceRng {
    fn next_f32(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.5;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor = self.cursor.wrapping_add(1);
        value.clamp(0.0, 0.999_999)
    }
}
