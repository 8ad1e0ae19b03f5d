//! Random steering jitter sources.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

/// Source of standard-normal draws used to perturb the exploration heading.
pub trait SteerJitter {
    /// One draw from N(0, 1).
    fn sample(&mut self) -> f32;
}

/// Gaussian jitter backed by a small fast RNG.
#[derive(Clone, Debug)]
pub struct GaussianJitter {
    rng: SmallRng,
}

impl GaussianJitter {
    /// Create a jitter source.
    ///
    /// If seed is 0, uses random entropy; otherwise the sequence is
    /// reproducible.
    pub fn new(seed: u64) -> Self {
        let rng = if seed == 0 {
            SmallRng::from_entropy()
        } else {
            SmallRng::seed_from_u64(seed)
        };
        Self { rng }
    }
}

impl SteerJitter for GaussianJitter {
    #[inline]
    fn sample(&mut self) -> f32 {
        self.rng.sample(StandardNormal)
    }
}

/// Constant jitter, for deterministic runs and tests.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FixedJitter(pub f32);

impl SteerJitter for FixedJitter {
    #[inline]
    fn sample(&mut self) -> f32 {
        self.0
    }
}
