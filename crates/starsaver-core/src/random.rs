//! Uniform random draws for star placement and nova triggering.

use std::ops::RangeInclusive;

use rand::{Rng, SeedableRng, rngs::SmallRng};

/// Source of uniform random integers.
///
/// The simulation only ever asks for integers in a closed range, which
/// keeps test doubles trivial to write.
pub trait RandomSource {
    /// Draw a uniform integer from `range`. An empty range yields its start.
    fn next_in(&mut self, range: RangeInclusive<u32>) -> u32;
}

/// Default random source backed by a small, fast non-cryptographic RNG.
#[derive(Debug, Clone)]
pub struct StarRng {
    inner: SmallRng,
}

impl StarRng {
    /// Seed from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            inner: SmallRng::from_os_rng(),
        }
    }

    /// Reproducible stream for debugging and tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Default for StarRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl RandomSource for StarRng {
    fn next_in(&mut self, range: RangeInclusive<u32>) -> u32 {
        if range.is_empty() {
            return *range.start();
        }
        self.inner.random_range(range)
    }
}
