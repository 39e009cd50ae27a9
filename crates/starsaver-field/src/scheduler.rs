//! Per-star, per-tick nova triggering.

use std::num::NonZeroU32;

use starsaver_core::{RandomSource, Star};

/// The draw that starts a nova.
const TRIGGER_DRAW: u32 = 1;

/// Decides whether a resting star starts a nova on this tick.
///
/// Each call is an independent 1-in-N draw, so a field of `S` stars
/// expects `S / N` new novas per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NovaScheduler {
    one_in: Option<NonZeroU32>,
}

impl NovaScheduler {
    /// Build from the configured probability denominator.
    ///
    /// Zero or negative values never trigger.
    pub fn new(nova_probability: i64) -> Self {
        let one_in = u32::try_from(nova_probability.max(0)).unwrap_or(u32::MAX);
        Self {
            one_in: NonZeroU32::new(one_in),
        }
    }

    /// Roll for `star`. Stars already in a nova are never eligible and
    /// consume no randomness.
    pub fn maybe_trigger<R: RandomSource + ?Sized>(&self, star: &Star, rng: &mut R) -> bool {
        if star.is_nova() {
            return false;
        }
        match self.one_in {
            Some(n) => rng.next_in(1..=n.get()) == TRIGGER_DRAW,
            None => false,
        }
    }
}
