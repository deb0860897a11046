// src/sieve/smoothness.rs
//
// §4.6 Sieve: strips factor-base primes from each shard's residues and
// keeps only the fully smooth entries.

use crate::factor_base::FactorBase;
use crate::sieve::sieve_array::SieveArray;
use num::{BigInt, Signed, ToPrimitive, Zero};

/// First index i >= 0 with p | residues[i], continuing past a prior match
/// when k == 1 to find the second root's progression. See §4.6's
/// "Start-offset policy". Returns None when no such index exists (⇒ skip).
fn first_multiple_index(p: &BigInt, residues: &[BigInt], k: u8) -> Option<usize> {
    let r0 = match residues.iter().position(|v| (v % p).is_zero()) {
        Some(r0) => r0,
        None => {
            log::warn!("prime {} has no root (k={}) in this shard, skipping", p, k);
            return None;
        }
    };
    if k == 0 {
        return Some(r0);
    }

    let r1 = match (r0 + 1..residues.len()).find(|&i| (&residues[i] % p).is_zero()) {
        Some(r1) => r1,
        None => {
            log::warn!("prime {} has no second root in this shard, skipping", p);
            return None;
        }
    };
    let p_i = p.to_i64().unwrap_or(i64::MAX);
    if ((r1 as i64 - r0 as i64) % p_i) == 0 {
        Some(r0)
    } else {
        Some(r1)
    }
}

/// Strips every factor-base prime out of one shard's residues, in place,
/// then returns the survivors whose stripped residue is +-1.
pub fn sieve_shard(shard: &SieveArray, factor_base: &FactorBase) -> SieveArray {
    let n = shard.len();
    log::debug!("sieving shard of length {} against {} factor-base primes", n, factor_base.len());
    let mut residues = shard.evals.clone();

    for p in &factor_base.primes {
        let stride = p.to_usize().unwrap_or(usize::MAX);
        if stride == 0 {
            continue;
        }
        for k in 0..2u8 {
            if let Some(i_star) = first_multiple_index(p, &residues, k) {
                log::trace!("prime {} (k={}) starts stripping at index {}", p, k, i_star);
                let mut j = i_star;
                while j < n {
                    while !residues[j].is_zero() && (&residues[j] % p).is_zero() {
                        residues[j] = &residues[j] / p;
                    }
                    j += stride;
                }
            }
        }
    }

    let mut survivors = SieveArray::with_capacity(n);
    for i in 0..n {
        if residues[i].abs() == BigInt::from(1) {
            survivors.push(shard.ints[i].clone(), shard.evals[i].clone());
        }
    }
    log::debug!("shard of length {} yielded {} smooth relations", n, survivors.len());
    survivors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sieve::input_builder::InputBuilder;

    #[test]
    fn strips_known_smooth_relation() {
        // For N = 5959, factor base [2,3,5,7,17]; x=78 gives 78^2-5959=-475=-1*5^2*19,
        // not smooth. Use x=1 => 1-5959=-5958=-2*3*3*331, not smooth either. Instead
        // verify the sieve agrees with direct factor-base trial division per-shard.
        let n = BigInt::from(5959);
        let fb = FactorBase::build(&n).unwrap();
        let shards = InputBuilder::write_shards(&n, 10);
        for shard in &shards {
            let survivors = sieve_shard(shard, &fb);
            for (x, e) in survivors.ints.iter().zip(survivors.evals.iter()) {
                let mut residue = e.clone();
                for p in &fb.primes {
                    while !residue.is_zero() && (&residue % p).is_zero() {
                        residue = &residue / p;
                    }
                }
                assert!(residue.abs() == BigInt::from(1), "x={} eval={} residue={}", x, e, residue);
            }
        }
    }

    #[test]
    fn survivors_are_subset_of_shard() {
        let n = BigInt::from(5959);
        let fb = FactorBase::build(&n).unwrap();
        let shards = InputBuilder::write_shards(&n, 10);
        for shard in &shards {
            let survivors = sieve_shard(shard, &fb);
            for x in &survivors.ints {
                assert!(shard.ints.contains(x));
            }
        }
    }

    #[test]
    fn first_multiple_index_finds_first_divisible_entry() {
        let residues = vec![BigInt::from(4), BigInt::from(7), BigInt::from(9), BigInt::from(10)];
        let p = BigInt::from(3);
        assert_eq!(first_multiple_index(&p, &residues, 0), Some(2));
    }

    #[test]
    fn first_multiple_index_returns_none_when_absent() {
        let residues = vec![BigInt::from(1), BigInt::from(1), BigInt::from(1)];
        let p = BigInt::from(5);
        assert_eq!(first_multiple_index(&p, &residues, 0), None);
    }
}
