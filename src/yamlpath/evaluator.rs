use super::ast::{PathSegment, QueryPath};
use super::error::QueryError;
use super::parser::Parser;
use crate::document::node::{SourcePosition, YamlNode, YamlValue};
use crate::document::tree::Document;

/// A node reached while walking a query expression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Candidate<'a> {
    /// A node that exists in the document.
    Node(&'a YamlNode),
    /// A path step with no counterpart in the source.
    Synthesized,
}

impl<'a> Candidate<'a> {
    /// Source position of the candidate; 0/0 for synthesized candidates.
    pub fn position(&self) -> SourcePosition {
        match self {
            Candidate::Node(node) => node.position(),
            Candidate::Synthesized => SourcePosition::synthesized(),
        }
    }
}

/// Evaluates query expressions against a single document.
///
/// The evaluator only borrows the document; all state lives in the call.
pub struct Evaluator<'a> {
    document: &'a Document,
}

impl<'a> Evaluator<'a> {
    pub fn new(document: &'a Document) -> Self {
        Evaluator { document }
    }

    /// Parses and evaluates an expression.
    pub fn evaluate_expression(&self, expression: &str) -> Result<Vec<Candidate<'a>>, QueryError> {
        let path = Parser::parse(expression)?;
        Ok(self.evaluate(&path))
    }

    /// Walks the path from the document root.
    ///
    /// The result holds the root followed by one candidate per segment, so
    /// it is never empty and its last entry is the deepest step. Once a step
    /// misses, every following step is synthesized.
    pub fn evaluate(&self, path: &QueryPath) -> Vec<Candidate<'a>> {
        let root = self.document.root();
        let mut candidates = Vec::with_capacity(path.segments.len() + 1);
        candidates.push(Candidate::Node(root));

        let mut current = Some(root);
        for segment in &path.segments {
            current = current.and_then(|node| self.evaluate_segment(node, segment));
            match current {
                Some(node) => candidates.push(Candidate::Node(node)),
                None => {
                    log::trace!(
                        "document {}: no node for {:?} in {}",
                        self.document.index(),
                        segment,
                        path
                    );
                    candidates.push(Candidate::Synthesized);
                }
            }
        }

        candidates
    }

    fn evaluate_segment(&self, node: &'a YamlNode, segment: &PathSegment) -> Option<&'a YamlNode> {
        let node = self.dereference(node)?;
        match segment {
            PathSegment::Child(name) => node.get(name),
            PathSegment::Index(index) => node.item(*index),
        }
    }

    /// Follows an alias to its anchored node.
    fn dereference(&self, node: &'a YamlNode) -> Option<&'a YamlNode> {
        match node.value() {
            YamlValue::Alias(id) => self.document.anchor(*id),
            _ => Some(node),
        }
    }
}
