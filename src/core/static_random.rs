// src/core/static_random.rs

use num::BigInt;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A ChaCha8-seeded RNG wrapper. Used only by the benchmark harness to draw
/// reproducible synthetic test inputs - nothing in the sieve/combine
/// pipeline itself is randomized.
pub struct StaticRandom {
    rng: ChaCha8Rng,
}

impl StaticRandom {
    /// Seeds from OS entropy.
    pub fn new() -> Self {
        let mut seed = [0u8; 32];
        rand::rng().fill(&mut seed);
        StaticRandom { rng: ChaCha8Rng::from_seed(seed) }
    }

    /// Seeds deterministically, so repeated benchmark runs see the same
    /// sequence of "random" inputs.
    pub fn from_seed(seed: u64) -> Self {
        StaticRandom { rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.rng.random()
    }

    pub fn next_range(&mut self, min_value: u32, max_value: u32) -> u32 {
        self.rng.random_range(min_value..max_value)
    }

    pub fn next_bytes(&mut self, bytes: &mut [u8]) {
        self.rng.fill(bytes);
    }

    pub fn next_bigint(&mut self, lower: &BigInt, upper: &BigInt) -> BigInt {
        if lower > upper {
            panic!("upper must be greater than or equal to lower");
        }

        let delta = (upper - lower).to_bytes_be().1;
        let mut buffer = vec![0u8; delta.len().max(1)];

        loop {
            self.next_bytes(&mut buffer);
            let result = BigInt::from_bytes_be(num::bigint::Sign::Plus, &buffer) + lower;

            if &result >= lower && &result <= upper {
                return result;
            }
        }
    }
}

impl Default for StaticRandom {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_with_same_seed() {
        let mut a = StaticRandom::from_seed(42);
        let mut b = StaticRandom::from_seed(42);
        assert_eq!(a.next_u32(), b.next_u32());
        assert_eq!(a.next_range(0, 1000), b.next_range(0, 1000));
    }

    #[test]
    fn next_bigint_respects_bounds() {
        let mut r = StaticRandom::from_seed(7);
        let lower = BigInt::from(10);
        let upper = BigInt::from(20);
        for _ in 0..50 {
            let v = r.next_bigint(&lower, &upper);
            assert!(v >= lower && v <= upper);
        }
    }
}
