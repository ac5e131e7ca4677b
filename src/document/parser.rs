//! YAML parsing with source position tracking.
//!
//! This module drives the yaml-rust2 event parser and assembles the events
//! into positioned [`YamlNode`] trees, one [`Document`] per YAML document in
//! the stream. Unlike yaml-rust2's own `YamlLoader`, every node keeps the
//! marker of the event that opened it.
//!
//! A block mapping starts at its first key, a flow collection at its opening
//! bracket, a block sequence at its first `-`, a scalar at its first
//! character.
//! yaml-rust2 reports 1-based lines and 0-based columns; columns are shifted
//! to 1-based here.
//!
//! # Example
//!
//! ```
//! use fixpath_locator::document::parser::parse_documents;
//!
//! let yaml = "metadata:\n  name: adservice\n";
//! let documents = parse_documents(yaml).unwrap();
//!
//! let metadata = documents.get(0).unwrap().root().get("metadata").unwrap();
//! assert_eq!((metadata.position().line, metadata.position().column), (2, 3));
//! ```

use std::collections::HashMap;
use std::mem;

use indexmap::IndexMap;
use yaml_rust2::parser::{Event, MarkedEventReceiver, Parser};
use yaml_rust2::scanner::{Marker, TScalarStyle};
use yaml_rust2::ScanError;

use super::node::{SourcePosition, YamlNode, YamlString, YamlValue};
use super::tree::{Document, DocumentSet, NodeStep};

/// What the next completed node means inside an open mapping.
enum PendingKey {
    /// The next node is a key.
    Expected,
    /// The next node is the value for this key.
    Value(String),
    /// The key was not a scalar; the next node is a value with no usable key.
    Unaddressable,
}

/// A collection whose end event has not been seen yet.
enum Frame {
    Mapping {
        position: SourcePosition,
        anchor: usize,
        entries: IndexMap<String, YamlNode>,
        pending: PendingKey,
    },
    Sequence {
        position: SourcePosition,
        anchor: usize,
        items: Vec<YamlNode>,
    },
}

/// Builds positioned trees from parser events.
struct DocumentBuilder {
    source: Vec<char>,
    stack: Vec<Frame>,
    anchors: HashMap<usize, Vec<NodeStep>>,
    documents: Vec<Document>,
}

fn to_position(mark: Marker) -> SourcePosition {
    SourcePosition::new(mark.line(), mark.col() + 1)
}

fn to_yaml_string(value: String, style: TScalarStyle) -> YamlString {
    match style {
        TScalarStyle::SingleQuoted => YamlString::SingleQuoted(value),
        TScalarStyle::DoubleQuoted => YamlString::DoubleQuoted(value),
        TScalarStyle::Literal => YamlString::Literal(value),
        TScalarStyle::Folded => YamlString::Folded(value),
        TScalarStyle::Plain => YamlString::Plain(value),
    }
}

impl DocumentBuilder {
    fn new(content: &str) -> Self {
        Self {
            source: content.chars().collect(),
            stack: Vec::new(),
            anchors: HashMap::new(),
            documents: Vec::new(),
        }
    }

    /// Position of a sequence from its start mark.
    ///
    /// A block sequence written at the same indentation as its key is marked
    /// after its first `-`; that mark is moved back onto the `-`. Only a
    /// mapping value can be written that way.
    fn sequence_position(&self, mark: Marker) -> SourcePosition {
        let mapping_value = matches!(
            self.stack.last(),
            Some(Frame::Mapping {
                pending: PendingKey::Value(_) | PendingKey::Unaddressable,
                ..
            })
        );
        if mapping_value {
            let before = &self.source[..mark.index().min(self.source.len())];
            let indicator = before
                .iter()
                .rposition(|&c| c != ' ' && c != '\t')
                .filter(|&index| before[index] == '-');
            if let Some(index) = indicator {
                return SourcePosition::new(mark.line(), self.column_of(index));
            }
        }
        to_position(mark)
    }

    /// 1-based column of the character at `index`.
    fn column_of(&self, index: usize) -> usize {
        self.source[..index]
            .iter()
            .rev()
            .take_while(|&&c| c != '\n')
            .count()
            + 1
    }

    /// Path from the document root to the node about to be completed, or
    /// `None` when it sits where no path can reach (a mapping key).
    fn current_path(&self) -> Option<Vec<NodeStep>> {
        self.stack
            .iter()
            .map(|frame| match frame {
                Frame::Mapping {
                    pending: PendingKey::Value(key),
                    ..
                } => Some(NodeStep::Key(key.clone())),
                Frame::Mapping { .. } => None,
                Frame::Sequence { items, .. } => Some(NodeStep::Item(items.len())),
            })
            .collect()
    }

    /// Hands a finished node to its parent, or closes the document when the
    /// node is a document root.
    fn complete(&mut self, value: YamlValue, position: SourcePosition, anchor: usize) {
        let mut node = YamlNode::new(value, position);
        if anchor > 0 {
            node.anchor = Some(anchor);
            match self.current_path() {
                Some(path) => {
                    self.anchors.insert(anchor, path);
                }
                None => log::debug!("anchor {} on a mapping key is not addressable", anchor),
            }
        }

        match self.stack.last_mut() {
            None => {
                let index = self.documents.len();
                let anchors = mem::take(&mut self.anchors);
                log::trace!("document {} starts at line {}", index, node.position.line);
                self.documents
                    .push(Document::with_anchors(index, node, anchors));
            }
            Some(Frame::Sequence { items, .. }) => items.push(node),
            Some(Frame::Mapping {
                position: start,
                entries,
                pending,
                ..
            }) => match mem::replace(pending, PendingKey::Expected) {
                PendingKey::Expected => {
                    // Block mappings are marked at the first `:`; move them back to the key.
                    if (node.position.line, node.position.column) < (start.line, start.column) {
                        *start = node.position;
                    }
                    *pending = match node.value {
                        YamlValue::Scalar(key) => PendingKey::Value(key.as_str().to_string()),
                        _ => {
                            log::debug!(
                                "skipping non-scalar mapping key at line {}",
                                node.position.line
                            );
                            PendingKey::Unaddressable
                        }
                    };
                }
                PendingKey::Value(key) => {
                    // Repeated keys keep the slot of the first one and the last value.
                    entries.insert(key, node);
                }
                PendingKey::Unaddressable => {}
            },
        }
    }
}

impl MarkedEventReceiver for DocumentBuilder {
    fn on_event(&mut self, event: Event, mark: Marker) {
        match event {
            Event::Scalar(value, style, anchor, _) => {
                self.complete(
                    YamlValue::Scalar(to_yaml_string(value, style)),
                    to_position(mark),
                    anchor,
                );
            }
            Event::Alias(id) => {
                self.complete(YamlValue::Alias(id), to_position(mark), 0);
            }
            Event::MappingStart(anchor, _) => self.stack.push(Frame::Mapping {
                position: to_position(mark),
                anchor,
                entries: IndexMap::new(),
                pending: PendingKey::Expected,
            }),
            Event::SequenceStart(anchor, _) => {
                let position = self.sequence_position(mark);
                self.stack.push(Frame::Sequence {
                    position,
                    anchor,
                    items: Vec::new(),
                });
            }
            Event::MappingEnd | Event::SequenceEnd => match self.stack.pop() {
                Some(Frame::Mapping {
                    position,
                    anchor,
                    entries,
                    ..
                }) => self.complete(YamlValue::Mapping(entries), position, anchor),
                Some(Frame::Sequence {
                    position,
                    anchor,
                    items,
                }) => self.complete(YamlValue::Sequence(items), position, anchor),
                None => log::warn!("unbalanced collection end at line {}", mark.line()),
            },
            _ => {}
        }
    }
}

/// Parses a YAML stream into its documents.
///
/// An empty stream yields an empty [`DocumentSet`].
///
/// # Errors
///
/// Returns the scanner error of the first malformed document; documents
/// parsed before it are discarded.
///
/// # Example
///
/// ```
/// use fixpath_locator::document::parser::parse_documents;
///
/// assert!(parse_documents("key: [unclosed").is_err());
/// assert!(parse_documents("").unwrap().is_empty());
/// ```
pub fn parse_documents(content: &str) -> Result<DocumentSet, ScanError> {
    let mut builder = DocumentBuilder::new(content);
    let mut parser = Parser::new_from_str(content);
    parser.load(&mut builder, true)?;

    log::debug!("parsed {} YAML document(s)", builder.documents.len());
    Ok(DocumentSet::new(builder.documents))
}
