// src/factor_base/mod.rs
//
// §4.3 FactorBase: the ordered prime base F used by InputBuilder to size
// the sieve interval and by Sieve to strip factors from candidate residues.

use crate::core::errors::QsError;
use crate::integer_math::bigint_math::BigIntMath;
use crate::integer_math::legendre::Legendre;
use lazy_static::lazy_static;
use num::{BigInt, ToPrimitive, Zero};
use std::fmt;
use std::str::FromStr;

lazy_static! {
    // Fast-path recognition for the small candidates factor-base construction
    // actually sees, avoiding repeated trial division below this table's
    // ceiling. Candidates past it fall back to `BigIntMath::is_prime_trial`.
    static ref SMALL_PRIMES: Vec<u64> = vec![
        2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89,
        97, 101, 103, 107, 109, 113, 127, 131, 137, 139, 149, 151, 157, 163, 167, 173, 179, 181,
        191, 193, 197, 199, 211, 223, 227, 229, 233, 239, 241, 251, 257, 263, 269, 271, 277, 281,
        283, 293,
    ];
}

fn is_prime_candidate(candidate: &BigInt) -> bool {
    if let Some(c) = candidate.to_u64() {
        if c <= *SMALL_PRIMES.last().unwrap() {
            return SMALL_PRIMES.binary_search(&c).is_ok();
        }
    }
    BigIntMath::is_prime_trial(candidate)
}

/// Ordered, distinct primes p with (N/p) in {0, 1}, conventionally led by 2.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactorBase {
    pub primes: Vec<BigInt>,
}

impl FactorBase {
    /// B = ceil(exp(sqrt(ln N * ln ln N))^(sqrt(2)/4)).
    ///
    /// For the toy-scale N this crate's test scenarios use, ln N can fall
    /// below e, making ln ln N negative or undefined; the formula is only
    /// meaningful once ln N >= 1, so N is floored to e before taking the
    /// outer log, and the resulting size to 3 (enough to admit {2, 3, 5}),
    /// guaranteeing very small N still terminates per §7.
    pub fn target_size(n: &BigInt) -> usize {
        let ln_n = BigIntMath::ln_approx(n).max(std::f64::consts::E);
        let ln_ln_n = ln_n.ln();
        let exponent = (ln_n * ln_ln_n).sqrt();
        let b = exponent.exp().powf(std::f64::consts::SQRT_2 / 4.0).ceil();
        (b as usize).max(3)
    }

    /// Builds F by walking candidate primes from 2 upward, admitting every
    /// p with symbol(N, p) in {0, 1}, until |F| reaches the target size.
    pub fn build(n: &BigInt) -> Result<Self, QsError> {
        if n.is_zero() || n < &BigInt::from(2) {
            return Err(QsError::InvalidArgument(format!("N must be >= 2, got {}", n)));
        }

        let target = Self::target_size(n);
        let mut primes = Vec::with_capacity(target);

        // p = 2 is admitted unconditionally; Legendre's symbol is defined
        // only for odd p, so it never participates in the symbol test.
        primes.push(BigInt::from(2));

        let mut candidate = BigInt::from(3);
        while primes.len() < target {
            if is_prime_candidate(&candidate) {
                let symbol = Legendre::symbol(n, &candidate)?;
                if symbol == 0 || symbol == 1 {
                    primes.push(candidate.clone());
                }
            }
            candidate += 2;
        }

        Ok(FactorBase { primes })
    }

    pub fn len(&self) -> usize {
        self.primes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primes.is_empty()
    }
}

impl fmt::Display for FactorBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, p) in self.primes.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", p)?;
        }
        write!(f, "]")
    }
}

impl FromStr for FactorBase {
    type Err = QsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if !trimmed.starts_with('[') || !trimmed.ends_with(']') {
            return Err(QsError::parse("factor base must be bracketed"));
        }
        let inner = &trimmed[1..trimmed.len() - 1];
        if inner.is_empty() {
            return Ok(FactorBase { primes: Vec::new() });
        }

        let mut primes = Vec::new();
        for (offset, part) in inner.split(',').enumerate() {
            let p = BigInt::from_str(part.trim()).map_err(|_| {
                QsError::parse_at(format!("invalid prime at position {}: {:?}", offset, part), offset)
            })?;
            primes.push(p);
        }
        Ok(FactorBase { primes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_known_factor_base_for_5959() {
        let fb = FactorBase::build(&BigInt::from(5959)).unwrap();
        let expected: Vec<BigInt> = [2, 3, 5, 7, 17].iter().map(|&x| BigInt::from(x)).collect();
        assert_eq!(fb.primes, expected);
    }

    #[test]
    fn primes_are_strictly_increasing_and_prime() {
        let fb = FactorBase::build(&BigInt::from(90283)).unwrap();
        for window in fb.primes.windows(2) {
            assert!(window[0] < window[1]);
        }
        for p in &fb.primes {
            assert!(BigIntMath::is_prime_trial(p), "{} should be prime", p);
        }
    }

    #[test]
    fn every_prime_has_admissible_symbol() {
        let n = BigInt::from(5959);
        let fb = FactorBase::build(&n).unwrap();
        for p in &fb.primes {
            if p == &BigInt::from(2) {
                continue;
            }
            let s = Legendre::symbol(&n, p).unwrap();
            assert!(s == 0 || s == 1);
        }
    }

    #[test]
    fn round_trips_through_display_and_parse() {
        let fb = FactorBase::build(&BigInt::from(5959)).unwrap();
        let text = fb.to_string();
        assert_eq!(text, "[2,3,5,7,17]");
        let parsed: FactorBase = text.parse().unwrap();
        assert_eq!(parsed, fb);
    }

    #[test]
    fn rejects_missing_brackets() {
        assert!("2,3,5".parse::<FactorBase>().is_err());
        assert!("[2,3,5".parse::<FactorBase>().is_err());
    }

    #[test]
    fn parses_empty_brackets() {
        let fb: FactorBase = "[]".parse().unwrap();
        assert!(fb.is_empty());
    }

    #[test]
    fn rejects_malformed_entry() {
        assert!("[2,x,5]".parse::<FactorBase>().is_err());
    }

    #[test]
    fn very_small_n_still_terminates() {
        let fb = FactorBase::build(&BigInt::from(15)).unwrap();
        assert!(fb.len() >= 3);
    }
}
