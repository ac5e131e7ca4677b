//! Error types for fix path location.

use crate::file::loader::LoadError;
use crate::yamlpath::QueryError;
use std::fmt;

/// Errors returned while building a resolver or resolving a fix path.
#[derive(Debug)]
pub enum LocateError {
    /// The manifest could not be read or parsed.
    Load(LoadError),
    /// The requested document does not exist.
    IndexOutOfRange { index: usize, len: usize },
    /// The fix path is not a valid expression.
    Query(QueryError),
}

impl fmt::Display for LocateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocateError::Load(err) => write!(f, "{}", err),
            LocateError::IndexOutOfRange { index, len } => {
                write!(f, "node index [{}] out of range [{}]", index, len)
            }
            LocateError::Query(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for LocateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LocateError::Load(err) => Some(err),
            LocateError::IndexOutOfRange { .. } => None,
            LocateError::Query(err) => Some(err),
        }
    }
}

impl From<LoadError> for LocateError {
    fn from(err: LoadError) -> Self {
        LocateError::Load(err)
    }
}

impl From<QueryError> for LocateError {
    fn from(err: QueryError) -> Self {
        LocateError::Query(err)
    }
}
