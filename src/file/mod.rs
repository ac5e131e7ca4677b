//! File I/O for YAML manifests.
//!
//! Manifests are only ever read; see [`loader`].

pub mod loader;
