//! Locate Kubernetes remediation fix paths in YAML manifests.
//!
//! A posture scanner reports fixes as paths such as
//! `spec.template.spec.containers[0].securityContext.runAsNonRoot=true`.
//! This crate maps such a path to the line and column in the manifest where
//! the fix applies, falling back to the closest existing ancestor when the
//! field is not present yet.
//!
//! - [`document`] parses YAML streams into positioned node trees
//! - [`file`] loads manifests from disk or stdin
//! - [`yamlpath`] parses and evaluates query expressions
//! - [`locator`] turns fix paths into [`Location`]s
//! - [`config`] holds the command-line defaults
//! - [`output`] renders results as text, JSON or YAML

pub mod config;
pub mod document;
pub mod file;
pub mod locator;
pub mod output;
pub mod yamlpath;

pub use locator::{FixPathLocationResolver, LocateError, Location};
