// src/orchestrator/broadcast.rs
//
// §6 "Broadcast parameters": N and the factor base, published once by the
// orchestrator and read-only thereafter from every worker's point of view.

use crate::core::errors::QsError;
use crate::factor_base::FactorBase;
use num::BigInt;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BroadcastParams {
    pub n: BigInt,
    pub factor_base: FactorBase,
}

impl BroadcastParams {
    pub fn new(n: BigInt, factor_base: FactorBase) -> Self {
        BroadcastParams { n, factor_base }
    }
}

impl fmt::Display for BroadcastParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.n)?;
        writeln!(f, "{}", self.factor_base)
    }
}

impl FromStr for BroadcastParams {
    type Err = QsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lines = s.lines();
        let n_line = lines.next().ok_or_else(|| QsError::parse("missing N line"))?;
        let fb_line = lines.next().ok_or_else(|| QsError::parse("missing factor base line"))?;

        let n = BigInt::from_str(n_line.trim())
            .map_err(|_| QsError::parse(format!("invalid N: {:?}", n_line)))?;
        let factor_base: FactorBase = fb_line.trim().parse()?;

        Ok(BroadcastParams { n, factor_base })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_display_and_parse() {
        let n = BigInt::from(5959);
        let fb = FactorBase::build(&n).unwrap();
        let params = BroadcastParams::new(n, fb);
        let text = params.to_string();
        let parsed: BroadcastParams = text.parse().unwrap();
        assert_eq!(parsed, params);
    }

    #[test]
    fn rejects_missing_factor_base_line() {
        assert!("5959".parse::<BroadcastParams>().is_err());
    }
}
