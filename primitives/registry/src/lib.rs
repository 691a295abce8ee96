#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Schema Registry — the cross-referenced, in-memory schema of a daemon.
//!
//! A [`Daemon`] is built once from a [`ir::Descriptor`]. It groups proto files
//! into [`Package`]s by namespace and answers the queries the documentation
//! renderer needs: resolving dotted type references across namespaces,
//! computing the closure of types reachable from a message, and aggregating
//! experimental services, REST endpoints and repository links.

pub mod aggregate;
pub mod closure;
pub mod daemon;
pub mod naming;
pub mod package;
pub mod resolve;
pub mod rest_types;

pub use aggregate::{ExperimentalService, RepositoryLink, RestEndpoint};
pub use daemon::{Daemon, DEFAULT_MAX_CLOSURE_DEPTH};
pub use package::Package;
pub use resolve::{Lookup, SchemaReader};
pub use rest_types::{RestMessage, RestTypes};

/// Errors raised while resolving type references
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// The namespace segment of a full type has no package
    #[error("Cannot find package {namespace} for {full_type}")]
    UnknownNamespace {
        /// Namespace segment that was looked up
        namespace: String,
        /// Full type being resolved
        full_type: String,
    },
    /// The namespace exists but declares no such message
    #[error("Cannot find message {name} for {full_type} in the {namespace} package")]
    UnknownMessage {
        /// Namespace that was searched
        namespace: String,
        /// Name relative to the namespace
        name: String,
        /// Full type being resolved
        full_type: String,
    },
    /// The namespace exists but declares no such enum
    #[error("Cannot find enum {name} for {full_type} in the {namespace} package")]
    UnknownEnum {
        /// Namespace that was searched
        namespace: String,
        /// Name relative to the namespace
        name: String,
        /// Full type being resolved
        full_type: String,
    },
    /// A closure walk nested deeper than the configured limit
    #[error("Closure of {message} exceeded the maximum depth of {limit}")]
    ClosureDepthExceeded {
        /// Message at which the limit was hit
        message: String,
        /// Configured depth limit
        limit: usize,
    },
}

/// Result alias for registry operations
pub type Result<T> = std::result::Result<T, ResolveError>;
