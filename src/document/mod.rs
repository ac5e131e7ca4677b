//! Positioned YAML document model and parser.

pub mod node;
pub mod parser;
pub mod tree;
