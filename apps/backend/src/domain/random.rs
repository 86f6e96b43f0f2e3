//! Randomness seam for the turn engine.
//!
//! Every random decision in card generation and effect resolution goes
//! through [`RandomSource`], so the engine is deterministic under a seeded
//! [`GameRng`] and scriptable under a test stub. Each lobby owns its own
//! `GameRng`; nothing here is shared across threads.

use std::f64::consts::PI;

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Default log-space spread for [`skewed_magnitude`].
pub const DEFAULT_SPREAD: f64 = 0.6;

/// Source of the primitive draws the engine needs.
pub trait RandomSource {
    /// Uniform sample in `[0, 1)`.
    fn unit(&mut self) -> f64;

    /// Uniform integer in the inclusive range spanned by `low` and `high`.
    fn between(&mut self, low: u64, high: u64) -> u64;

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn index(&mut self, len: usize) -> usize;

    /// Fair coin flip.
    fn coin(&mut self) -> bool;

    /// 128 random bits, used for card identifiers.
    fn token_bytes(&mut self) -> [u8; 16];
}

/// ChaCha8-backed source. Not cryptographic; fast and reproducible.
#[derive(Debug, Clone)]
pub struct GameRng {
    inner: ChaCha8Rng,
}

impl GameRng {
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            inner: ChaCha8Rng::from_os_rng(),
        }
    }

    /// Draw a seed for a child generator (one per lobby).
    pub fn next_seed(&mut self) -> u64 {
        self.inner.next_u64()
    }
}

impl RandomSource for GameRng {
    fn unit(&mut self) -> f64 {
        self.inner.random::<f64>()
    }

    fn between(&mut self, low: u64, high: u64) -> u64 {
        let (lo, hi) = if low <= high { (low, high) } else { (high, low) };
        self.inner.random_range(lo..=hi)
    }

    fn index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "index() needs a non-empty range");
        if len <= 1 {
            return 0;
        }
        self.inner.random_range(0..len)
    }

    fn coin(&mut self) -> bool {
        self.inner.random_bool(0.5)
    }

    fn token_bytes(&mut self) -> [u8; 16] {
        let mut bytes = [0u8; 16];
        self.inner.fill_bytes(&mut bytes);
        bytes
    }
}

/// Uniform sample in `(0, 1)`: exact zeros are redrawn so `ln` stays finite.
fn open_unit<R: RandomSource + ?Sized>(rng: &mut R) -> f64 {
    loop {
        let x = rng.unit();
        if x > 0.0 {
            return x;
        }
    }
}

/// Unfloored log-normal sample `base * exp(z * spread)`.
///
/// `z` is a standard normal built from two open-unit draws (Box-Muller,
/// cosine branch). Returns `0.0` for `base == 0` without consuming
/// randomness; otherwise the result is strictly positive.
pub fn skewed_sample<R: RandomSource + ?Sized>(base: u64, spread: f64, rng: &mut R) -> f64 {
    if base == 0 {
        return 0.0;
    }
    let u = open_unit(rng);
    let v = open_unit(rng);
    let z = (-2.0 * u.ln()).sqrt() * (2.0 * PI * v).cos();
    base as f64 * (z * spread).exp()
}

/// Right-skewed magnitude around `base`: most draws land near or below it,
/// with a long tail of rare large values.
pub fn skewed_magnitude<R: RandomSource + ?Sized>(base: u64, spread: f64, rng: &mut R) -> u64 {
    // float -> int `as` saturates, so extreme tails clamp at u64::MAX
    skewed_sample(base, spread, rng).floor() as u64
}
