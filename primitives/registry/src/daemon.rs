//! Daemon registry construction

use std::collections::BTreeMap;

use ir::Descriptor;
use tracing::{debug, info};

use crate::aggregate::RepositoryLink;
use crate::naming::{locale_cmp, pascal_case};
use crate::package::Package;
use crate::rest_types::RestTypes;

/// Default bound on the nesting depth of a closure walk
pub const DEFAULT_MAX_CLOSURE_DEPTH: usize = 64;

/// The root of the schema: every package of a daemon, keyed by namespace.
#[derive(Debug, Clone)]
pub struct Daemon {
    name: String,
    packages: BTreeMap<String, Package>,
    rest_types: RestTypes,
    repo_url: String,
    commit: String,
    proto_src_dir: String,
    experimental_packages: Vec<String>,
    grpc_port: u16,
    rest_port: u16,
    cli_cmd: String,
    daemon_cmd: String,
    repository_links: Vec<RepositoryLink>,
    max_closure_depth: usize,
}

impl Daemon {
    /// Build the registry for daemon `name` from a fully loaded descriptor.
    ///
    /// Files are assigned to packages in input order; the first file of a
    /// namespace creates its package and later files merge into it.
    pub fn new(name: &str, descriptor: Descriptor) -> Self {
        info!("Creating daemon {} with {} proto files", name, descriptor.files.len());

        let Descriptor {
            files,
            rest_types,
            repo_url,
            commit,
            proto_src_dir,
            experimental_packages,
            grpc_port,
            rest_port,
            cli_cmd,
            daemon_cmd,
        } = descriptor;

        let mut packages: BTreeMap<String, Package> = BTreeMap::new();
        let mut repository_links = Vec::with_capacity(files.len());

        for file in files {
            let base_name = file.name.strip_suffix(".proto").unwrap_or(&file.name).to_string();
            repository_links.push(RepositoryLink::new(
                base_name,
                &repo_url,
                &commit,
                &proto_src_dir,
            ));

            let pkg = packages.entry(file.package.clone()).or_insert_with(|| {
                debug!(daemon = name, "creating package {}", file.package);
                Package::new(&file.package)
            });
            if experimental_packages.iter().any(|p| p == pkg.name()) {
                pkg.mark_experimental();
            }
            pkg.add_file(file);
        }

        repository_links.sort_by(|a, b| locale_cmp(&a.base_name, &b.base_name));

        Self {
            name: name.to_string(),
            packages,
            rest_types: RestTypes::new(rest_types),
            repo_url,
            commit,
            proto_src_dir,
            experimental_packages,
            grpc_port,
            rest_port,
            cli_cmd,
            daemon_cmd,
            repository_links,
            max_closure_depth: DEFAULT_MAX_CLOSURE_DEPTH,
        }
    }

    /// Override the nesting bound used by closure walks
    pub fn with_max_closure_depth(mut self, limit: usize) -> Self {
        self.max_closure_depth = limit;
        self
    }

    /// Daemon identifier (e.g. `lnd`)
    pub fn name(&self) -> &str { &self.name }

    /// Display name: `LND` for lnd, PascalCase for everything else
    pub fn pascal_name(&self) -> String {
        if self.name == "lnd" {
            return "LND".to_string();
        }
        pascal_case(&self.name)
    }

    /// Look up a package by namespace
    pub fn package(&self, namespace: &str) -> Option<&Package> { self.packages.get(namespace) }

    /// All packages, ordered by namespace
    pub fn packages(&self) -> impl Iterator<Item = &Package> { self.packages.values() }

    /// Number of packages
    pub fn package_count(&self) -> usize { self.packages.len() }

    /// REST override table
    pub fn rest_types(&self) -> &RestTypes { &self.rest_types }

    /// Source repository URL
    pub fn repo_url(&self) -> &str { &self.repo_url }

    /// Commit the proto files were taken from
    pub fn commit(&self) -> &str { &self.commit }

    /// Proto directory inside the repository
    pub fn proto_src_dir(&self) -> &str { &self.proto_src_dir }

    /// Namespaces configured as experimental
    pub fn experimental_packages(&self) -> &[String] { &self.experimental_packages }

    /// Default gRPC port
    pub fn grpc_port(&self) -> u16 { self.grpc_port }

    /// Default REST port
    pub fn rest_port(&self) -> u16 { self.rest_port }

    /// CLI client command
    pub fn cli_cmd(&self) -> &str { &self.cli_cmd }

    /// Daemon command
    pub fn daemon_cmd(&self) -> &str { &self.daemon_cmd }

    /// One link per input file, sorted by base name
    pub fn repository_links(&self) -> &[RepositoryLink] { &self.repository_links }

    /// Current closure nesting bound
    pub fn max_closure_depth(&self) -> usize { self.max_closure_depth }
}
