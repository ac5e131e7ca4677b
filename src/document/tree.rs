//! Documents and ordered document sets.
//!
//! A YAML file may hold several documents separated by `---`. Each one is
//! parsed into a [`Document`] and the whole file into a [`DocumentSet`]
//! whose order matches the file.
//!
//! # Example
//!
//! ```
//! use fixpath_locator::document::parser::parse_documents;
//!
//! let set = parse_documents("kind: Deployment\n---\nkind: Service\n").unwrap();
//! assert_eq!(set.len(), 2);
//!
//! let service = set.get(1).unwrap();
//! assert_eq!(service.root().get("kind").unwrap().position().line, 3);
//! ```

use std::collections::HashMap;

use super::node::YamlNode;

/// One step from a node to one of its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeStep {
    /// Value of a mapping key
    Key(String),
    /// Item of a sequence
    Item(usize),
}

/// The root node of a single YAML document and the anchors it defines.
///
/// Anchors are kept as paths from the root, so anchored subtrees are
/// stored once. Documents are immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    index: usize,
    root: YamlNode,
    anchors: HashMap<usize, Vec<NodeStep>>,
}

impl Document {
    /// Creates a document without anchors.
    pub fn new(index: usize, root: YamlNode) -> Self {
        Self::with_anchors(index, root, HashMap::new())
    }

    /// Creates a document together with its anchor table.
    pub fn with_anchors(
        index: usize,
        root: YamlNode,
        anchors: HashMap<usize, Vec<NodeStep>>,
    ) -> Self {
        Self {
            index,
            root,
            anchors,
        }
    }

    /// 0-based position of this document in its file.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the root node.
    pub fn root(&self) -> &YamlNode {
        &self.root
    }

    /// Returns the node an alias with this anchor id points at.
    pub fn anchor(&self, id: usize) -> Option<&YamlNode> {
        self.anchors
            .get(&id)?
            .iter()
            .try_fold(&self.root, |node, step| match step {
                NodeStep::Key(key) => node.get(key),
                NodeStep::Item(index) => node.item(*index),
            })
    }
}

/// Documents of one YAML stream in file order, indexed from 0.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocumentSet {
    documents: Vec<Document>,
}

impl DocumentSet {
    pub fn new(documents: Vec<Document>) -> Self {
        Self { documents }
    }

    /// Number of documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Returns the document at `index`, or `None` when `index >= len()`.
    pub fn get(&self, index: usize) -> Option<&Document> {
        self.documents.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Document> {
        self.documents.iter()
    }
}

impl<'a> IntoIterator for &'a DocumentSet {
    type Item = &'a Document;
    type IntoIter = std::slice::Iter<'a, Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.documents.iter()
    }
}
