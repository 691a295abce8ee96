#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
//! Building blocks of the `protodoc` command line tool.
//!
//! The binary wires these together; keeping them here lets the reports be
//! tested without spawning a process.

use std::path::Path;

use config::{Config, ConfigError};
use ir::{Descriptor, DescriptorError};
use registry::{
    Daemon, ExperimentalService, RepositoryLink, ResolveError, RestEndpoint, SchemaReader,
};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while running a protodoc command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Descriptor could not be loaded
    #[error("Failed to load descriptor: {0}")]
    Descriptor(#[from] DescriptorError),
    /// A type reference did not resolve
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    /// Logging could not be set up
    #[error(transparent)]
    Logging(#[from] logging::LoggingError),
    /// A report could not be serialized
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// Load the configuration from `path`, or from the default location if a
/// file exists there, or fall back to the built-in defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        return Ok(Config::from_file(path)?);
    }
    let default_path = Config::default_path()?;
    if default_path.exists() {
        debug!(path = %default_path.display(), "using default config file");
        return Ok(Config::from_file(default_path)?);
    }
    Ok(Config::default())
}

/// Load a descriptor and build the registry for daemon `name`
pub fn load_daemon(name: &str, descriptor_path: &Path, max_closure_depth: usize) -> Result<Daemon> {
    let descriptor = Descriptor::from_file(descriptor_path)?;
    Ok(Daemon::new(name, descriptor).with_max_closure_depth(max_closure_depth))
}

/// Per-package counts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageSummary {
    /// Namespace
    pub name: String,
    /// Contributing proto files
    pub files: Vec<String>,
    /// Number of messages
    pub messages: usize,
    /// Number of enums
    pub enums: usize,
    /// Service names in declaration order
    pub services: Vec<String>,
    /// Whether the package is experimental
    pub experimental: bool,
}

/// Everything the renderer's index pages are built from
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Daemon identifier
    pub daemon: String,
    /// Display name
    pub display_name: String,
    /// Default gRPC port
    pub grpc_port: u16,
    /// Default REST port
    pub rest_port: u16,
    /// CLI client command
    pub cli_cmd: String,
    /// Daemon command
    pub daemon_cmd: String,
    /// Packages ordered by namespace
    pub packages: Vec<PackageSummary>,
    /// Services of experimental packages
    pub experimental_services: Vec<ExperimentalService>,
    /// REST endpoints sorted by path
    pub rest_endpoints: Vec<RestEndpoint>,
    /// Source links sorted by file name
    pub repository_links: Vec<RepositoryLink>,
}

/// Summarize a daemon
pub fn summarize(daemon: &Daemon) -> Summary {
    Summary {
        daemon: daemon.name().to_string(),
        display_name: daemon.pascal_name(),
        grpc_port: daemon.grpc_port(),
        rest_port: daemon.rest_port(),
        cli_cmd: daemon.cli_cmd().to_string(),
        daemon_cmd: daemon.daemon_cmd().to_string(),
        packages: daemon
            .packages()
            .map(|pkg| PackageSummary {
                name: pkg.name().to_string(),
                files: pkg.files().to_vec(),
                messages: pkg.message_count(),
                enums: pkg.enum_count(),
                services: pkg.services().iter().map(|s| s.name.clone()).collect(),
                experimental: pkg.is_experimental(),
            })
            .collect(),
        experimental_services: daemon.experimental_services(),
        rest_endpoints: daemon.rest_endpoints(),
        repository_links: daemon.repository_links().to_vec(),
    }
}

/// Types reachable from a message, as rendered in its "related types" section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosureReport {
    /// Root message full type
    pub root: String,
    /// Reachable message full types, sorted
    pub messages: Vec<String>,
    /// Reachable enum full types, sorted
    pub enums: Vec<String>,
}

/// Compute the closures of the message `full_type`
pub fn closure_report(daemon: &Daemon, full_type: &str) -> Result<ClosureReport> {
    let root = daemon.message(full_type)?;
    let messages = daemon.closure_messages(root)?.into_keys().collect();
    let enums = daemon.closure_enums(root)?.into_keys().collect();
    Ok(ClosureReport { root: full_type.to_string(), messages, enums })
}
