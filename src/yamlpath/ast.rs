//! Abstract syntax tree types for query expressions.

use std::fmt;

/// A step in a query expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Named mapping child (.key)
    Child(String),
    /// Sequence item ([0])
    Index(usize),
}

/// A parsed query expression.
///
/// An empty segment list is the identity expression `.`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryPath {
    /// Steps from the document root, in order.
    pub segments: Vec<PathSegment>,
}

impl QueryPath {
    /// Creates a new query path with the given segments.
    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    /// Returns true for the identity expression.
    pub fn is_identity(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for QueryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return write!(f, ".");
        }
        for segment in &self.segments {
            match segment {
                PathSegment::Child(name) => write!(f, ".{}", name)?,
                PathSegment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}
