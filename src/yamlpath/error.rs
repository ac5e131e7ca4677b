//! Error types for query expression parsing.

use std::fmt;

/// Errors that can occur while parsing a query expression.
///
/// Every message starts with `invalid input` so callers can match on it
/// regardless of the variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// Unexpected character at a specific byte position.
    UnexpectedChar {
        position: usize,
        found: char,
        expected: String,
    },
    /// Unexpected end of input.
    UnexpectedEnd { expected: String },
    /// A sequence index that does not fit in `usize`.
    InvalidIndex { position: usize, text: String },
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::UnexpectedChar {
                position,
                found,
                expected,
            } => write!(
                f,
                "invalid input '{}' at position {}, expected {}",
                found, position, expected
            ),
            QueryError::UnexpectedEnd { expected } => {
                write!(f, "invalid input: unexpected end, expected {}", expected)
            }
            QueryError::InvalidIndex { position, text } => {
                write!(f, "invalid input: index '{}' at position {} is out of bounds", text, position)
            }
        }
    }
}

impl std::error::Error for QueryError {}
