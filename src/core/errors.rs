// src/core/errors.rs
//
// Error taxonomy for the quadratic sieve pipeline. The codebase this crate
// grew out of never reaches for thiserror or anyhow anywhere, so errors stay
// a plain enum with hand-written Display/Error impls, the same low-ceremony
// convention the rest of the tree uses.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QsError {
    /// Negative input to sqrt, a zero-size matrix, or an empty indeterminates
    /// vector where one was required.
    InvalidArgument(String),
    /// Malformed serialized shard, factor base, or bit matrix. `offset` is
    /// the byte offset into the input where parsing gave up, when known.
    ParseError { message: String, offset: Option<usize> },
    /// A Legendre symbol computation produced a residue outside {1, p-1},
    /// indicating p was not prime or the inputs were misused.
    ArithmeticInconsistency(String),
    /// The augmented linear system has higher rank than the coefficient
    /// system alone - the back-substitution pass found a nonzero entry
    /// below the pivot rows in the augmented column.
    Inconsistent,
    /// The combiner exhausted its mask budget without producing a
    /// non-trivial GCD.
    FactorizationFailed,
    /// Shard read/write or result emission failed.
    IOFailure(String),
}

impl fmt::Display for QsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QsError::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
            QsError::ParseError { message, offset: Some(o) } => {
                write!(f, "parse error at offset {}: {}", o, message)
            }
            QsError::ParseError { message, offset: None } => {
                write!(f, "parse error: {}", message)
            }
            QsError::ArithmeticInconsistency(msg) => write!(f, "arithmetic inconsistency: {}", msg),
            QsError::Inconsistent => write!(f, "linear system is inconsistent"),
            QsError::FactorizationFailed => write!(f, "factorization failed: mask budget exhausted"),
            QsError::IOFailure(msg) => write!(f, "I/O failure: {}", msg),
        }
    }
}

impl std::error::Error for QsError {}

impl QsError {
    pub fn parse(message: impl Into<String>) -> Self {
        QsError::ParseError { message: message.into(), offset: None }
    }

    pub fn parse_at(message: impl Into<String>, offset: usize) -> Self {
        QsError::ParseError { message: message.into(), offset: Some(offset) }
    }
}

impl From<std::io::Error> for QsError {
    fn from(e: std::io::Error) -> Self {
        QsError::IOFailure(e.to_string())
    }
}
