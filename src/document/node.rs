//! YAML node representation with source position tracking.
//!
//! Every node produced by the parser remembers where it starts in the
//! original source, so that a query over the tree can be answered with a
//! line and column instead of a value.
//!
//! # Example
//!
//! ```
//! use fixpath_locator::document::node::{SourcePosition, YamlNode, YamlString, YamlValue};
//! use indexmap::IndexMap;
//!
//! let image = YamlNode::new(
//!     YamlValue::Scalar(YamlString::Plain("nginx:1.25".to_string())),
//!     SourcePosition::new(4, 12),
//! );
//!
//! let mut fields = IndexMap::new();
//! fields.insert("image".to_string(), image);
//! let container = YamlNode::new(YamlValue::Mapping(fields), SourcePosition::new(4, 5));
//!
//! assert!(matches!(container.value(), YamlValue::Mapping(_)));
//! assert_eq!(container.position().line, 4);
//! ```

use indexmap::IndexMap;

/// A 1-based line/column pair in the original YAML source.
///
/// Parsed nodes always carry non-zero coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SourcePosition {
    /// 1-based line number
    pub line: usize,
    /// 1-based column number
    pub column: usize,
}

impl SourcePosition {
    /// Creates a new position.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Position of a node that has no source bytes.
    pub const fn synthesized() -> Self {
        Self { line: 0, column: 0 }
    }

    /// Returns true if this position points at real source bytes.
    pub fn is_known(&self) -> bool {
        self.line != 0
    }
}

/// A scalar's text together with the style it was written in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum YamlString {
    Plain(String),
    SingleQuoted(String),
    DoubleQuoted(String),
    Literal(String),
    Folded(String),
}

impl std::fmt::Display for YamlString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl YamlString {
    pub fn as_str(&self) -> &str {
        match self {
            YamlString::Plain(s)
            | YamlString::SingleQuoted(s)
            | YamlString::DoubleQuoted(s)
            | YamlString::Literal(s)
            | YamlString::Folded(s) => s,
        }
    }
}

/// A YAML value without position information.
///
/// Mappings and sequences contain `YamlNode` instances so that every level
/// of the tree keeps its own source position.
#[derive(Debug, Clone, PartialEq)]
pub enum YamlValue {
    /// Key/value pairs in source order
    Mapping(IndexMap<String, YamlNode>),
    /// Ordered items
    Sequence(Vec<YamlNode>),
    /// A scalar with its style
    Scalar(YamlString),
    /// Reference to an anchored node of the same document
    Alias(usize),
}

/// A YAML value tagged with the position where it starts in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct YamlNode {
    pub(crate) value: YamlValue,
    pub(crate) position: SourcePosition,
    pub(crate) anchor: Option<usize>,
}

impl YamlNode {
    /// Creates a new node at the given position.
    pub fn new(value: YamlValue, position: SourcePosition) -> Self {
        Self {
            value,
            position,
            anchor: None,
        }
    }

    /// Returns the anchor id if this node defines one.
    pub fn anchor(&self) -> Option<usize> {
        self.anchor
    }

    /// Returns the node's value.
    pub fn value(&self) -> &YamlValue {
        &self.value
    }

    /// Returns where the node starts in the source.
    pub fn position(&self) -> SourcePosition {
        self.position
    }

    /// Looks up a mapping child by key.
    ///
    /// Returns `None` for missing keys and for non-mapping nodes.
    pub fn get(&self, key: &str) -> Option<&YamlNode> {
        match &self.value {
            YamlValue::Mapping(fields) => fields.get(key),
            _ => None,
        }
    }

    /// Looks up a sequence item by index.
    ///
    /// Returns `None` when out of range and for non-sequence nodes.
    pub fn item(&self, index: usize) -> Option<&YamlNode> {
        match &self.value {
            YamlValue::Sequence(items) => items.get(index),
            _ => None,
        }
    }
}
