// src/sieve/sieve_array.rs
//
// §3 SieveArray / §4.4 serialization.

use crate::core::errors::QsError;
use num::BigInt;
use std::fmt;
use std::str::FromStr;

/// Parallel (x, x^2 - N) sequences. Never reordered independently; |ints| ==
/// |evals| is maintained by every constructor and mutator in this crate.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SieveArray {
    pub ints: Vec<BigInt>,
    pub evals: Vec<BigInt>,
}

impl SieveArray {
    pub fn new() -> Self {
        SieveArray { ints: Vec::new(), evals: Vec::new() }
    }

    pub fn with_capacity(cap: usize) -> Self {
        SieveArray { ints: Vec::with_capacity(cap), evals: Vec::with_capacity(cap) }
    }

    pub fn push(&mut self, x: BigInt, eval: BigInt) {
        self.ints.push(x);
        self.evals.push(eval);
    }

    pub fn len(&self) -> usize {
        self.ints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ints.is_empty()
    }

    /// Appends another array's entries, used by the combiner to gather all
    /// per-shard survivors under one group.
    pub fn extend(&mut self, other: SieveArray) {
        self.ints.extend(other.ints);
        self.evals.extend(other.evals);
    }
}

impl fmt::Display for SieveArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, (x, e)) in self.ints.iter().zip(self.evals.iter()).enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "[{},{}]", x, e)?;
        }
        write!(f, "]")
    }
}

impl FromStr for SieveArray {
    type Err = QsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if !trimmed.starts_with('[') || !trimmed.ends_with(']') {
            return Err(QsError::parse("sieve array must be bracketed"));
        }
        let inner = &trimmed[1..trimmed.len() - 1];
        if inner.is_empty() {
            return Ok(SieveArray::new());
        }

        let mut result = SieveArray::new();
        let mut depth = 0usize;
        let mut start = None;
        let mut saw_pair = false;
        for (i, ch) in inner.char_indices() {
            match ch {
                '[' => {
                    if depth == 0 {
                        start = Some(i);
                    }
                    depth += 1;
                    saw_pair = true;
                }
                ']' => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        let s0 = start.ok_or_else(|| QsError::parse_at("unbalanced brackets", i))?;
                        let pair = &inner[s0 + 1..i];
                        let mut parts = pair.splitn(2, ',');
                        let x_str = parts
                            .next()
                            .ok_or_else(|| QsError::parse_at("missing x in pair", s0))?;
                        let e_str = parts
                            .next()
                            .ok_or_else(|| QsError::parse_at("missing eval in pair", s0))?;
                        let x = BigInt::from_str(x_str.trim())
                            .map_err(|_| QsError::parse_at(format!("invalid x: {:?}", x_str), s0))?;
                        let e = BigInt::from_str(e_str.trim())
                            .map_err(|_| QsError::parse_at(format!("invalid eval: {:?}", e_str), s0))?;
                        result.push(x, e);
                    }
                }
                _ => {}
            }
        }
        if depth != 0 {
            return Err(QsError::parse("unbalanced brackets in sieve array"));
        }
        if !saw_pair {
            return Err(QsError::parse("expected double-bracket wrapper around entries"));
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_and_parses_round_trip() {
        let mut s = SieveArray::new();
        s.push(BigInt::from(1), BigInt::from(-5958));
        s.push(BigInt::from(2), BigInt::from(-5955));
        let text = s.to_string();
        assert_eq!(text, "[[1,-5958],[2,-5955]]");
        let parsed: SieveArray = text.parse().unwrap();
        assert_eq!(parsed, s);
    }

    #[test]
    fn empty_array_round_trips() {
        let s = SieveArray::new();
        assert_eq!(s.to_string(), "[]");
        let parsed: SieveArray = "[]".parse().unwrap();
        assert!(parsed.is_empty());
    }

    #[test]
    fn rejects_missing_wrapper() {
        assert!("[1,2],[3,4]".parse::<SieveArray>().is_err());
    }

    #[test]
    fn rejects_single_bracket_pairs() {
        assert!("[1,2]".parse::<SieveArray>().is_err());
    }

    #[test]
    fn extend_concatenates_in_order() {
        let mut a = SieveArray::new();
        a.push(BigInt::from(1), BigInt::from(2));
        let mut b = SieveArray::new();
        b.push(BigInt::from(3), BigInt::from(4));
        a.extend(b);
        assert_eq!(a.ints, vec![BigInt::from(1), BigInt::from(3)]);
        assert_eq!(a.evals, vec![BigInt::from(2), BigInt::from(4)]);
    }
}
