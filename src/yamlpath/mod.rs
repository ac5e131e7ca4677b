//! Query expressions over positioned YAML documents.
//!
//! This module parses the small path language fix paths translate into and
//! evaluates it against a [`Document`](crate::document::tree::Document),
//! returning candidates that carry source positions.
//!
//! # Supported Syntax
//!
//! - `.` - Document root
//! - `.key` - Mapping child (`[A-Za-z_][A-Za-z0-9_-]*`)
//! - `[index]` - Sequence item, 0-based, after a key
//!
//! Steps chain left to right: `.spec.template.spec.containers[0].image`.
//! A step that does not exist yields a synthesized candidate at 0/0 instead
//! of an empty result.
//!
//! # Examples
//!
//! ```
//! use fixpath_locator::document::parser::parse_documents;
//! use fixpath_locator::yamlpath::{Candidate, Evaluator};
//!
//! let documents = parse_documents("spec:\n  replicas: 3\n").unwrap();
//! let evaluator = Evaluator::new(documents.get(0).unwrap());
//!
//! let candidates = evaluator.evaluate_expression(".spec.replicas").unwrap();
//! assert_eq!(candidates.last().unwrap().position().line, 2);
//!
//! let candidates = evaluator.evaluate_expression(".spec.paused").unwrap();
//! assert_eq!(candidates.last(), Some(&Candidate::Synthesized));
//! ```

pub mod ast;
pub mod error;
pub mod evaluator;
pub mod parser;

pub use ast::{PathSegment, QueryPath};
pub use error::QueryError;
pub use evaluator::{Candidate, Evaluator};
pub use parser::Parser;
