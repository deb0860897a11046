// src/integer_math/bigint_math.rs
//
// §4.1 BigIntMath: floor square root, perfect-square test, and the naive
// trial-division primality test used only for small factor-base candidates.

use crate::core::errors::QsError;
use num::{BigInt, Integer, One, Signed, ToPrimitive, Zero};

pub struct BigIntMath;

impl BigIntMath {
    /// Floor square root via integer Newton iteration. Fails with
    /// `InvalidArgument` for negative `a`, matching §4.1.
    pub fn sqrt(a: &BigInt) -> Result<BigInt, QsError> {
        if a.is_negative() {
            return Err(QsError::InvalidArgument(format!("sqrt argument must be >= 0, got {}", a)));
        }
        if a.is_zero() {
            return Ok(BigInt::zero());
        }

        let bits = a.bits();
        let mut q = BigInt::one() << ((bits / 2) as usize + 1);
        loop {
            let q_next = (&q + a / &q) / 2;
            if q_next >= q {
                break;
            }
            q = q_next;
        }

        // Newton's method can overshoot by one in either direction on the
        // last step; nudge to the exact floor.
        while &q * &q > *a {
            q -= 1;
        }
        while &(&q + BigInt::one()) * &(&q + BigInt::one()) <= *a {
            q += 1;
        }

        Ok(q)
    }

    /// `a >= 0` and `sqrt(a)^2 == a`.
    pub fn is_square(a: &BigInt) -> bool {
        if a.is_negative() {
            return false;
        }
        match Self::sqrt(a) {
            Ok(q) => &q * &q == *a,
            Err(_) => false,
        }
    }

    /// Trial-divides `a` by every integer up to `floor(sqrt(a))`. Correct
    /// for the same inputs the original "divide up through a-1" rule
    /// accepts, just faster - factor-base construction only ever asks this
    /// of candidates small enough (<= ~10^5) that it remains not-critical
    /// either way, per §4.1.
    pub fn is_prime_trial(a: &BigInt) -> bool {
        if a < &BigInt::from(2) {
            return false;
        }
        if a == &BigInt::from(2) {
            return true;
        }
        if a.is_even() {
            return false;
        }

        let limit = match Self::sqrt(a) {
            Ok(l) => l,
            Err(_) => return false,
        };

        let mut d = BigInt::from(3);
        while d <= limit {
            if (a % &d).is_zero() {
                return false;
            }
            d += 2;
        }
        true
    }

    pub fn gcd(a: &BigInt, b: &BigInt) -> BigInt {
        a.gcd(b)
    }

    /// Natural log of a (possibly huge) positive BigInt. Beyond f64's
    /// exponent range this uses the top 64 bits plus the discarded shift
    /// as a correction term - plenty accurate for factor-base sizing at
    /// the tens-to-low-hundreds-of-bits scale this crate targets (§1
    /// Non-goals rule out cryptographic-scale tuning anyway).
    pub fn ln_approx(n: &BigInt) -> f64 {
        let bits = n.bits();
        if bits <= 500 {
            return n.to_f64().unwrap_or(f64::INFINITY).ln();
        }
        let shift = (bits - 64) as usize;
        let top = (n >> shift).to_f64().unwrap_or(f64::INFINITY);
        top.ln() + (shift as f64) * std::f64::consts::LN_2
    }
}
