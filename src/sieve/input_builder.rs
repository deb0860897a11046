// src/sieve/input_builder.rs
//
// §4.5 InputBuilder: sizes and emits the sieve interval, split into
// fixed-length shards for independent processing by the sieve workers.

use crate::core::cpu_info::CPUInfo;
use crate::factor_base::FactorBase;
use crate::integer_math::bigint_math::BigIntMath;
use crate::sieve::sieve_array::SieveArray;
use num::BigInt;

#[cfg(test)]
use num::Signed;

/// Default shard length when no cache info is available, matching §3's
/// "default 10 for test sizes".
const FALLBACK_SHARD_LENGTH: usize = 10;

/// Rough per-entry footprint: two BigInt values (heap header + a handful of
/// digit words each at these bit sizes), used only to keep one shard's
/// working set inside L1.
const BYTES_PER_ENTRY: usize = 96;

pub struct InputBuilder;

impl InputBuilder {
    /// Picks a shard length that keeps one shard's ints/evals pair inside
    /// L1, generalizing the cache-aware "prime paging" the teacher's
    /// `PrimeFactory`/`FastPrimeSieve` perform to shard paging here. Falls
    /// back to a fixed test-scale default when cache info isn't available.
    pub fn suggested_shard_length() -> usize {
        match CPUInfo::l1_cache_size() {
            Some(l1) if l1 > 0 => (l1 / BYTES_PER_ENTRY).clamp(FALLBACK_SHARD_LENGTH, 4096),
            _ => FALLBACK_SHARD_LENGTH,
        }
    }

    /// M = B^3, the full sieve interval length.
    pub fn full_size(n: &BigInt) -> BigInt {
        let b = BigInt::from(FactorBase::target_size(n) as u64);
        &b * &b * &b
    }

    /// Centers the interval on floor(sqrt(N)) and splits it into shards of
    /// length `shard_len`, with a final short shard if M doesn't divide
    /// evenly. Each returned `SieveArray` is independently sieveable.
    pub fn write_shards(n: &BigInt, shard_len: usize) -> Vec<SieveArray> {
        assert!(shard_len > 0, "shard_len must be positive");

        let m = Self::full_size(n);
        let root = BigIntMath::sqrt(n).unwrap_or_else(|_| BigInt::from(0));
        let start = &root - &m / 2;

        let mut shards = Vec::new();
        let mut current = SieveArray::with_capacity(shard_len);
        let mut k = BigInt::from(0);
        while k < m {
            let x = &start + &k;
            let eval = &x * &x - n;
            current.push(x, eval);
            if current.len() == shard_len {
                shards.push(std::mem::replace(&mut current, SieveArray::with_capacity(shard_len)));
            }
            k += 1;
        }
        if !current.is_empty() {
            shards.push(current);
        }
        shards
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggested_shard_length_is_never_zero() {
        assert!(InputBuilder::suggested_shard_length() >= FALLBACK_SHARD_LENGTH);
    }

    #[test]
    fn full_size_is_b_cubed() {
        let n = BigInt::from(5959);
        let b = FactorBase::target_size(&n);
        assert_eq!(InputBuilder::full_size(&n), BigInt::from((b * b * b) as u64));
    }

    #[test]
    fn shards_partition_the_full_interval() {
        let n = BigInt::from(5959);
        let shards = InputBuilder::write_shards(&n, 10);
        let total: usize = shards.iter().map(|s| s.len()).sum();
        let m = InputBuilder::full_size(&n);
        assert_eq!(BigInt::from(total as u64), m);
    }

    #[test]
    fn final_shard_may_be_short() {
        let n = BigInt::from(5959);
        let shards = InputBuilder::write_shards(&n, 7);
        assert!(shards.iter().rev().skip(1).all(|s| s.len() == 7));
        assert!(shards.last().unwrap().len() <= 7);
    }

    #[test]
    fn evals_match_x_squared_minus_n() {
        let n = BigInt::from(5959);
        let shards = InputBuilder::write_shards(&n, 10);
        for shard in &shards {
            for (x, e) in shard.ints.iter().zip(shard.evals.iter()) {
                assert_eq!(x * x - &n, *e);
            }
        }
    }

    #[test]
    fn interval_is_centered_on_sqrt_n() {
        let n = BigInt::from(5959);
        let shards = InputBuilder::write_shards(&n, 10);
        let root = BigIntMath::sqrt(&n).unwrap();
        let all_ints: Vec<&BigInt> = shards.iter().flat_map(|s| s.ints.iter()).collect();
        assert!(all_ints.iter().any(|&x| (x - &root).abs() < BigInt::from(2)));
    }
}
