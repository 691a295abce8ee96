#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Protodoc Intermediate Representation (IR)
//!
//! This crate defines the two layers that sit between a daemon's proto files and
//! the documentation registry:
//!
//! - [`descriptor`]: the flat, pre-parsed JSON descriptor produced upstream
//! - [`schema`]: the schema entities (messages, enums, services, methods) built from it

pub mod descriptor;
pub mod schema;

// Re-export the main types for convenience
pub use descriptor::*;
pub use schema::*;

/// Builders for descriptor fixtures used in tests across the workspace
#[cfg(feature = "test-utils")]
pub mod test_utils;
