// src/combine/mod.rs
//
// Builds the exponent-parity matrix from the sieve's smooth relations,
// walks kernel-candidate masks, and extracts a factor from the first
// congruence of squares that yields a non-trivial GCD.

use crate::core::cancellation_token::CancellationToken;
use crate::core::counters::Counters;
use crate::core::errors::QsError;
use crate::factor_base::FactorBase;
use crate::integer_math::bigint_math::BigIntMath;
use crate::matrix::BitMatrix;
use crate::sieve::SieveArray;
use num::{BigInt, One, Signed, Zero};

/// Low bit -> first free variable, per §4.8's mask interpretation. A vector
/// the length of the whole relation set covers every possible free-variable
/// count regardless of the matrix's rank; `BitMatrix::solve` ignores any
/// entries past the actual number of free variables.
fn mask_bits(mask: u64, len: usize) -> Vec<u8> {
    (0..len).map(|i| ((mask >> i) & 1) as u8).collect()
}

fn build_exponent_matrix(relations: &SieveArray, factor_base: &FactorBase) -> BitMatrix {
    let r = relations.len();
    let mut a = BitMatrix::new(factor_base.len(), r + 1);

    for j in 0..r {
        let mut residue = relations.evals[j].abs();
        for (i, p) in factor_base.primes.iter().enumerate() {
            let mut exponent = 0u32;
            while !residue.is_zero() && (&residue % p).is_zero() {
                residue /= p;
                exponent += 1;
            }
            a.set(i, j, (exponent % 2) as u8);
        }
    }
    a
}

/// Runs the mask-enumeration loop up to `mask_cap`, returning the first
/// non-trivial factor pair found.
pub fn run(
    n: &BigInt,
    relations: &SieveArray,
    factor_base: &FactorBase,
    mask_cap: u64,
    cancellation: &CancellationToken,
    counters: &Counters,
) -> Result<(BigInt, BigInt), QsError> {
    let r = relations.len();
    if r == 0 {
        counters.bump_cant_factor();
        return Err(QsError::FactorizationFailed);
    }

    let a = build_exponent_matrix(relations, factor_base);

    for mask in 1..=mask_cap {
        if cancellation.is_cancelled() {
            log::warn!("combiner cancelled at mask {}", mask);
            break;
        }

        let indeterminates = mask_bits(mask, r);
        let v = match a.solve(&indeterminates) {
            Ok(v) => v,
            Err(e) => {
                log::debug!("mask {} solve failed: {}", mask, e);
                counters.bump_unable_to_solve_system();
                continue;
            }
        };

        let mut p_eval = BigInt::one();
        let mut p_int = BigInt::one();
        let mut selected_any = false;
        for (j, &bit) in v.iter().enumerate() {
            if bit == 1 {
                p_eval *= &relations.evals[j];
                p_int *= &relations.ints[j];
                selected_any = true;
            }
        }
        if !selected_any {
            continue;
        }

        if !BigIntMath::is_square(&p_eval) {
            log::debug!("mask {}: selection product is not a perfect square, skipping", mask);
            continue;
        }
        let s = BigIntMath::sqrt(&p_eval)?;

        let f = BigIntMath::gcd(n, &(&s - &p_int));
        if f > BigInt::one() && &f < n {
            let other = n / &f;
            log::info!("mask {}: factor found via s-x", mask);
            return Ok((f, other));
        }

        let f = BigIntMath::gcd(n, &(&s + &p_int));
        if f > BigInt::one() && &f < n {
            let other = n / &f;
            log::info!("mask {}: factor found via s+x", mask);
            return Ok((f, other));
        }
    }

    counters.bump_cant_factor();
    Err(QsError::FactorizationFailed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sieve::input_builder::InputBuilder;
    use crate::sieve::smoothness::sieve_shard;

    fn gather_relations(n: &BigInt, fb: &FactorBase, shard_len: usize) -> SieveArray {
        let shards = InputBuilder::write_shards(n, shard_len);
        let mut all = SieveArray::new();
        for shard in &shards {
            all.extend(sieve_shard(shard, fb));
        }
        all
    }

    #[test]
    fn factors_5959_into_59_and_101() {
        let n = BigInt::from(5959);
        let fb = FactorBase::build(&n).unwrap();
        let relations = gather_relations(&n, &fb, 10);
        let counters = Counters::new();
        let cancellation = CancellationToken::new();
        let (f1, f2) = run(&n, &relations, &fb, 1 << 16, &cancellation, &counters).unwrap();

        assert_eq!(&f1 * &f2, n);
        let mut factors = [f1, f2];
        factors.sort();
        assert_eq!(factors, [BigInt::from(59), BigInt::from(101)]);
    }

    #[test]
    fn factors_15_into_3_and_5() {
        let n = BigInt::from(15);
        let fb = FactorBase::build(&n).unwrap();
        let relations = gather_relations(&n, &fb, 10);
        let counters = Counters::new();
        let cancellation = CancellationToken::new();
        let (f1, f2) = run(&n, &relations, &fb, 1 << 16, &cancellation, &counters).unwrap();

        assert_eq!(&f1 * &f2, n);
        let mut factors = [f1, f2];
        factors.sort();
        assert_eq!(factors, [BigInt::from(3), BigInt::from(5)]);
    }

    #[test]
    fn empty_relations_fail_immediately() {
        let n = BigInt::from(5959);
        let fb = FactorBase::build(&n).unwrap();
        let relations = SieveArray::new();
        let counters = Counters::new();
        let cancellation = CancellationToken::new();
        let result = run(&n, &relations, &fb, 100, &cancellation, &counters);
        assert!(matches!(result, Err(QsError::FactorizationFailed)));
        assert_eq!(counters.snapshot().cant_factor, 1);
    }

    #[test]
    fn cancellation_stops_the_mask_loop() {
        let n = BigInt::from(5959);
        let fb = FactorBase::build(&n).unwrap();
        let relations = gather_relations(&n, &fb, 10);
        let counters = Counters::new();
        let cancellation = CancellationToken::new();
        cancellation.cancel();
        let result = run(&n, &relations, &fb, 1 << 16, &cancellation, &counters);
        assert!(result.is_err());
    }
}
