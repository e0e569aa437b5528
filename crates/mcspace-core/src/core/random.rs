//! Uniform random sources consumed by container sampling and Monte Carlo moves.
//!
//! The random source is always an explicit argument. Two implementations are provided:
//!
//! - [`UniformRng`] owns one stream and is used by exactly one thread at a time. Give
//!   every replica or worker its own instance, seeded with [`UniformRng::for_stream`]
//!   when runs must be reproducible.
//! - [`SharedRng`] lets several threads draw from one stream. Every draw is a single
//!   critical section, so the stream state is never observed half-updated. The order in
//!   which threads receive numbers is unspecified.

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// A source of uniformly distributed numbers.
pub trait RandomSource {
    /// Uniform real in `[0, 1)`.
    fn uniform(&mut self) -> f64;

    /// Uniform integer in the closed range spanned by `min` and `max`.
    ///
    /// The bounds may be given in either order.
    fn range(&mut self, min: i64, max: i64) -> i64;

    /// Uniform real in `[-0.5, 0.5)`.
    #[inline]
    fn half(&mut self) -> f64 {
        self.uniform() - 0.5
    }

    /// A uniformly chosen element, or `None` for an empty slice.
    fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T>
    where
        Self: Sized,
    {
        if items.is_empty() {
            return None;
        }
        let idx = self.range(0, items.len() as i64 - 1) as usize;
        items.get(idx)
    }
}

/// A single-owner uniform random stream.
#[derive(Debug, Clone)]
pub struct UniformRng {
    engine: StdRng,
    discard: u64,
}

impl UniformRng {
    /// Deterministic stream: the same seed always yields the same sequence.
    pub fn seeded(seed: u64) -> Self {
        Self {
            engine: StdRng::seed_from_u64(seed),
            discard: 0,
        }
    }

    /// Non-deterministic stream seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            engine: StdRng::from_entropy(),
            discard: 0,
        }
    }

    /// Independent, reproducible stream number `index` derived from a base seed.
    pub fn for_stream(seed: u64, index: u64) -> Self {
        Self::seeded(splitmix64(seed ^ splitmix64(index)))
    }

    /// Skips `discard` raw engine outputs before every uniform draw.
    ///
    /// With `n` walkers sharing a seed, walker `k` offset by `k` draws and discarding
    /// `n - 1` consumes a disjoint, interleaved slice of the same sequence.
    pub fn with_discard(mut self, discard: u64) -> Self {
        self.discard = discard;
        self
    }

    /// Advances the stream by `count` raw outputs.
    pub fn skip(&mut self, count: u64) {
        for _ in 0..count {
            self.engine.next_u64();
        }
    }
}

impl RandomSource for UniformRng {
    #[inline]
    fn uniform(&mut self) -> f64 {
        if self.discard > 0 {
            self.skip(self.discard);
        }
        self.engine.gen_range(0.0..1.0)
    }

    #[inline]
    fn range(&mut self, min: i64, max: i64) -> i64 {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        self.engine.gen_range(lo..=hi)
    }
}

/// A random stream shared by several threads.
///
/// `&SharedRng` implements [`RandomSource`], so a shared reference can be handed to any
/// sampling routine: `geometry.random_position(&mut &shared)`.
#[derive(Debug)]
pub struct SharedRng {
    inner: Mutex<UniformRng>,
}

impl SharedRng {
    pub fn new(rng: UniformRng) -> Self {
        Self {
            inner: Mutex::new(rng),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(UniformRng::seeded(seed))
    }

    /// Takes the underlying stream back.
    pub fn into_inner(self) -> UniformRng {
        self.inner.into_inner()
    }
}

impl RandomSource for &SharedRng {
    #[inline]
    fn uniform(&mut self) -> f64 {
        self.inner.lock().uniform()
    }

    #[inline]
    fn range(&mut self, min: i64, max: i64) -> i64 {
        self.inner.lock().range(min, max)
    }
}

#[inline]
fn splitmix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
