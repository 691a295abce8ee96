//! Input descriptor
//!
//! The descriptor is the flat JSON document emitted by the upstream proto
//! loader. It lists every proto file of a daemon together with the messages,
//! enums and services declared in it, plus repository metadata used to link
//! back to the sources.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Errors that can occur while loading a descriptor
#[derive(Debug, thiserror::Error)]
pub enum DescriptorError {
    /// I/O error while reading the descriptor file
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// JSON parsing error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// The complete descriptor of a daemon's proto files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Descriptor {
    /// Proto files in the order the loader emitted them
    pub files: Vec<FileDef>,
    /// REST type overrides keyed by message full type, then by field name
    #[serde(default)]
    pub rest_types: BTreeMap<String, BTreeMap<String, RestFieldDef>>,
    /// Base URL of the source repository (e.g. `https://github.com/lightningnetwork/lnd`)
    #[serde(rename = "repoURL")]
    pub repo_url: String,
    /// Commit hash the proto files were taken from
    pub commit: String,
    /// Directory of the proto files inside the repository
    pub proto_src_dir: String,
    /// Packages that are flagged as experimental
    #[serde(default)]
    pub experimental_packages: Vec<String>,
    /// Default gRPC port of the daemon
    #[serde(default)]
    pub grpc_port: u16,
    /// Default REST port of the daemon
    #[serde(default)]
    pub rest_port: u16,
    /// Name of the daemon's command line client (e.g. `lncli`)
    #[serde(default)]
    pub cli_cmd: String,
    /// Name of the daemon binary (e.g. `lnd`)
    #[serde(default)]
    pub daemon_cmd: String,
}

/// A single proto file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDef {
    /// File name including extension (e.g. `lightning.proto`)
    pub name: String,
    /// File description
    #[serde(default)]
    pub description: String,
    /// Namespace declared by the file (e.g. `lnrpc`)
    pub package: String,
    /// Messages declared in the file
    #[serde(default)]
    pub messages: Vec<MessageDef>,
    /// Enums declared in the file
    #[serde(default)]
    pub enums: Vec<EnumDef>,
    /// Services declared in the file
    #[serde(default)]
    pub services: Vec<ServiceDef>,
}

/// Message declaration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDef {
    /// Short name (e.g. `InvoiceState`)
    pub name: String,
    /// Name relative to the package, including parents (e.g. `Invoice.InvoiceState`)
    pub long_name: String,
    /// Message description
    #[serde(default)]
    pub description: String,
    /// Fields in declaration order
    #[serde(default)]
    pub fields: Vec<FieldDef>,
}

/// Field declaration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDef {
    /// Field name
    pub name: String,
    /// Field description
    #[serde(default)]
    pub description: String,
    /// Field label (`""`, `"optional"` or `"repeated"`)
    #[serde(default)]
    pub label: String,
    /// Type name as written in the proto file
    #[serde(rename = "type")]
    pub type_name: String,
    /// Fully qualified type (`lnrpc.Invoice.InvoiceState`) or a native type tag (`uint64`)
    pub full_type: String,
}

/// Enum declaration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumDef {
    /// Short name
    pub name: String,
    /// Name relative to the package, including parents
    pub long_name: String,
    /// Enum description
    #[serde(default)]
    pub description: String,
    /// Enum values in declaration order
    #[serde(default)]
    pub values: Vec<EnumValueDef>,
}

/// Enum value declaration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumValueDef {
    /// Value name
    pub name: String,
    /// Numeric value as written in the proto file
    pub number: String,
    /// Value description
    #[serde(default)]
    pub description: String,
}

/// Service declaration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDef {
    /// Service name
    pub name: String,
    /// Service description
    #[serde(default)]
    pub description: String,
    /// RPC methods in declaration order
    #[serde(default)]
    pub methods: Vec<MethodDef>,
}

/// RPC method declaration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodDef {
    /// Method name
    pub name: String,
    /// Method description
    #[serde(default)]
    pub description: String,
    /// Source of the method in the daemon's code base
    #[serde(default)]
    pub source: String,
    /// CLI command that calls this method
    #[serde(default)]
    pub command_line: String,
    /// Help text of the CLI command
    #[serde(default)]
    pub command_line_help: String,
    /// Short request type name
    pub request_type: String,
    /// Fully qualified request type
    pub request_full_type: String,
    /// Whether the request is a stream
    #[serde(default)]
    pub request_streaming: bool,
    /// Short response type name
    pub response_type: String,
    /// Fully qualified response type
    pub response_full_type: String,
    /// Whether the response is a stream
    #[serde(default)]
    pub response_streaming: bool,
    /// HTTP binding, present only if the proto file declared one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest_mapping: Option<RestMappingDef>,
}

/// HTTP binding of a method
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestMappingDef {
    /// HTTP verb (e.g. `GET`)
    pub method: String,
    /// URL path (e.g. `/v1/getinfo`)
    pub path: String,
}

/// REST-specific substitution for a single field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestFieldDef {
    /// Type name used by the REST proxy
    #[serde(rename = "type")]
    pub type_name: String,
    /// Fully qualified REST type, if it differs from the type name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_type: Option<String>,
}

impl Descriptor {
    /// Load a descriptor from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, DescriptorError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse a descriptor from a JSON string
    pub fn from_json(json: &str) -> Result<Self, DescriptorError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Total number of messages across all files
    pub fn message_count(&self) -> usize { self.files.iter().map(|f| f.messages.len()).sum() }
}
