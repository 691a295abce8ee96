//! Cross-namespace views
//!
//! These are derived on demand from the package map and never cached.

use serde::Serialize;

use crate::daemon::Daemon;
use crate::naming::{locale_cmp, snake_case};

/// A service declared in an experimental package
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperimentalService {
    /// Service name
    pub name: String,
    /// Lowercased service name
    pub lower_name: String,
    /// Proto file declaring the service
    pub file: String,
}

/// A method reachable through the REST proxy
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestEndpoint {
    /// URL path
    pub rest_path: String,
    /// HTTP verb
    pub rest_method: String,
    /// Relative link to the method docs (`lightning/get_info`)
    pub link_url: String,
    /// Namespace-qualified method name (`lnrpc.GetInfo`)
    pub method_name: String,
}

/// Links to a proto file and its swagger definition in the source repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryLink {
    /// File name without the `.proto` extension
    pub base_name: String,
    /// URL of the proto file
    pub grpc_url: String,
    /// URL of the generated swagger file
    pub rest_url: String,
}

impl RepositoryLink {
    /// Build the links for `base_name` at `commit`
    pub fn new(base_name: String, repo_url: &str, commit: &str, proto_src_dir: &str) -> Self {
        let prefix = format!("{}/blob/{}/{}/{}", repo_url, commit, proto_src_dir, base_name);
        Self {
            grpc_url: format!("{}.proto", prefix),
            rest_url: format!("{}.swagger.json", prefix),
            base_name,
        }
    }
}

impl Daemon {
    /// Services of every experimental package, sorted by name
    pub fn experimental_services(&self) -> Vec<ExperimentalService> {
        let mut services: Vec<ExperimentalService> = self
            .packages()
            .filter(|pkg| pkg.is_experimental())
            .flat_map(|pkg| pkg.services())
            .map(|service| ExperimentalService {
                name: service.name.clone(),
                lower_name: service.name.to_lowercase(),
                file: service.file_name.clone(),
            })
            .collect();

        services.sort_by(|a, b| locale_cmp(&a.name, &b.name));
        services
    }

    /// One endpoint per method with an HTTP binding, sorted by path
    pub fn rest_endpoints(&self) -> Vec<RestEndpoint> {
        let mut endpoints = Vec::new();

        for pkg in self.packages() {
            for service in pkg.services() {
                for method in &service.methods {
                    let Some(mapping) = method.rest_binding() else {
                        continue;
                    };
                    endpoints.push(RestEndpoint {
                        rest_path: mapping.path.clone(),
                        rest_method: mapping.method.clone(),
                        link_url: format!(
                            "{}/{}",
                            snake_case(&service.name),
                            snake_case(&method.name)
                        ),
                        method_name: format!("{}.{}", pkg.name(), method.name),
                    });
                }
            }
        }

        endpoints.sort_by(|a, b| locale_cmp(&a.rest_path, &b.rest_path));
        endpoints
    }

    /// Every service of every package, in namespace then declaration order
    pub fn all_services(&self) -> impl Iterator<Item = &ir::Service> {
        self.packages().flat_map(|pkg| pkg.services())
    }
}
