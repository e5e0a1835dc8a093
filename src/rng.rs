use std::f64::consts::TAU;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Seeded random source behind every randomized entity parameter.
///
/// Ranges are computed as `lo + unit * (hi - lo)` rather than through
/// `random_range`, so an empty range (a zero-size viewport) yields `lo`
/// instead of panicking.
#[derive(Clone, Debug)]
pub struct SceneRng {
    inner: SmallRng,
}

impl SceneRng {
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: SmallRng::seed_from_u64(seed),
        }
    }

    /// Uniform in `[0, 1)`.
    pub fn unit(&mut self) -> f64 {
        self.inner.random::<f64>()
    }

    /// Uniform in `[lo, hi)`.
    pub fn between(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.unit() * (hi - lo)
    }

    /// Uniform in `[-width/2, width/2)`.
    pub fn spread(&mut self, width: f64) -> f64 {
        (self.unit() - 0.5) * width
    }

    pub fn angle(&mut self) -> f64 {
        self.unit() * TAU
    }
}
