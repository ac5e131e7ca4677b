//! Fix path location resolving.
//!
//! [`FixPathLocationResolver`] owns the documents of one manifest and maps a
//! fix path to the line and column where the remediation applies. When the
//! path names a field that does not exist yet, the resolver walks back
//! towards the root and reports the closest ancestor that does.
//!
//! # Example
//!
//! ```
//! use fixpath_locator::locator::{FixPathLocationResolver, Location};
//!
//! let yaml = "\
//! spec:
//!   template:
//!     spec:
//!       containers:
//!       - name: server
//!         image: adservice:v1
//! ";
//! let resolver: FixPathLocationResolver = yaml.parse().unwrap();
//!
//! let image = resolver
//!     .resolve_location("spec.template.spec.containers[0].image", 0)
//!     .unwrap();
//! assert_eq!(image, Location::new(6, 16));
//!
//! // Missing field: falls back to the container.
//! let missing = resolver
//!     .resolve_location("spec.template.spec.containers[0].securityContext.runAsNonRoot=true", 0)
//!     .unwrap();
//! assert_eq!(missing, Location::new(5, 9));
//! ```

pub mod error;
pub mod fixpath;

pub use error::LocateError;

use crate::document::node::SourcePosition;
use crate::document::parser::parse_documents;
use crate::document::tree::DocumentSet;
use crate::file::loader::{load_yaml_file, LoadError};
use crate::yamlpath::{Candidate, Evaluator};
use serde::Serialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// A 1-based source coordinate. `{0, 0}` means no definite location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    /// The first character of the file.
    pub const FILE_START: Location = Location { line: 1, column: 1 };

    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Returns true for the "not found" location.
    pub fn is_empty(&self) -> bool {
        self.line == 0
    }

    /// Replaces the "not found" location with [`Location::FILE_START`].
    ///
    /// Reports that must point at some line (code scanning uploads, editor
    /// annotations) use this to anchor findings without a location.
    pub fn or_file_start(self) -> Self {
        if self.is_empty() {
            Self::FILE_START
        } else {
            self
        }
    }
}

impl From<SourcePosition> for Location {
    fn from(position: SourcePosition) -> Self {
        Self::new(position.line, position.column)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Resolves fix paths against the documents of one YAML manifest.
///
/// The documents are read once and never modified, so a resolver can be
/// shared between threads and queried concurrently.
#[derive(Debug, Clone, PartialEq)]
pub struct FixPathLocationResolver {
    documents: DocumentSet,
}

impl FixPathLocationResolver {
    /// Loads the manifest at `path`.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or any of its documents is not
    /// valid YAML; no resolver is built in that case.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, LocateError> {
        let documents = load_yaml_file(path)?;
        Ok(Self::from_documents(documents))
    }

    /// Wraps already parsed documents.
    pub fn from_documents(documents: DocumentSet) -> Self {
        Self { documents }
    }

    /// Number of documents in the manifest.
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Resolves `fix_path` inside the document at `document_index`.
    ///
    /// The `=value` part of the fix path is ignored. If the path does not
    /// exist, its last segment is dropped until an existing node is found;
    /// if none is, `Location { 0, 0 }` is returned without an error.
    ///
    /// # Errors
    ///
    /// - [`LocateError::IndexOutOfRange`] when `document_index` is not a
    ///   valid document index
    /// - [`LocateError::Query`] when the fix path is malformed
    pub fn resolve_location(
        &self,
        fix_path: &str,
        document_index: usize,
    ) -> Result<Location, LocateError> {
        let document =
            self.documents
                .get(document_index)
                .ok_or(LocateError::IndexOutOfRange {
                    index: document_index,
                    len: self.documents.len(),
                })?;

        let evaluator = Evaluator::new(document);
        let query = fixpath::to_query_expression(fix_path);
        let mut expression = query.as_str();

        while expression.starts_with('.') && expression.len() > 1 {
            let candidates = evaluator.evaluate_expression(expression)?;
            let position = candidates
                .last()
                .map(Candidate::position)
                .unwrap_or_else(SourcePosition::synthesized);

            if position.is_known() {
                return Ok(position.into());
            }

            log::debug!(
                "document {}: {} not found, trying parent",
                document_index,
                expression
            );
            expression = fixpath::strip_last_segment(expression);
        }

        Ok(Location::default())
    }

    /// Resolves the first non-empty fix path, never failing.
    ///
    /// Callers pass their candidate paths in order of preference (for
    /// instance failed paths before fix paths). [`Location::FILE_START`] is
    /// returned when there is no path to resolve, resolution fails, or no
    /// location is found.
    pub fn resolve_first<S: AsRef<str>>(&self, fix_paths: &[S], document_index: usize) -> Location {
        let fix_path = match fix_paths.iter().map(AsRef::as_ref).find(|p| !p.is_empty()) {
            Some(fix_path) => fix_path,
            None => return Location::FILE_START,
        };

        match self.resolve_location(fix_path, document_index) {
            Ok(location) => location.or_file_start(),
            Err(err) => {
                log::debug!("failed to resolve {}: {}", fix_path, err);
                Location::FILE_START
            }
        }
    }
}

impl FromStr for FixPathLocationResolver {
    type Err = LocateError;

    /// Parses an in-memory manifest.
    fn from_str(content: &str) -> Result<Self, Self::Err> {
        let documents = parse_documents(content).map_err(LoadError::from)?;
        Ok(Self::from_documents(documents))
    }
}
