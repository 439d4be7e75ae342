//! Seedable PRNG for record generation. SplitMix64: fast, deterministic for a given seed,
//! not cryptographically secure.

const SPLITMIX64_GOLDEN: u64 = 0x9e3779b97f4a7c15;
const SPLITMIX64_M1: u64 = 0xbf58476d1ce4e5b9;
const SPLITMIX64_M2: u64 = 0x94d049bb133111eb;

/// Finalizer step of SplitMix64, usable as a standalone 64-bit mixer.
#[inline]
pub fn mix64(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(SPLITMIX64_M1);
    z = (z ^ (z >> 27)).wrapping_mul(SPLITMIX64_M2);
    z ^ (z >> 31)
}

/// Source of uniformly distributed 64-bit words. The generator only needs this, so tests
/// can drive it with scripted streams.
pub trait RandomSource {
    fn next_u64(&mut self) -> u64;

    /// Uniform draw from `0..bound` by rejection sampling (no modulo bias).
    /// `bound` must be non-zero.
    fn below(&mut self, bound: u64) -> u64 {
        debug_assert!(bound > 0, "below() needs a non-empty range");
        let threshold = bound.wrapping_neg() % bound;
        loop {
            let value = self.next_u64();
            if value >= threshold {
                return value % bound;
            }
        }
    }

    /// Uniform draw from the inclusive range `[low, high]`. `low` must not exceed `high`.
    fn range_inclusive(&mut self, low: i64, high: i64) -> i64 {
        let span = high.wrapping_sub(low) as u64;
        let offset = match span.checked_add(1) {
            Some(size) => self.below(size),
            // Full i64 domain: every word is a valid offset.
            None => self.next_u64(),
        };
        low.wrapping_add(offset as i64)
    }

    /// Uniform pick from a non-empty slice.
    fn choose<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.below(items.len() as u64) as usize]
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }
}

impl RandomSource for Rng {
    #[inline]
    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(SPLITMIX64_GOLDEN);
        mix64(self.state)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_u64(&mut self) -> u64 {
        (**self).next_u64()
    }
}
