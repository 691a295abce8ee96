//! Schema entities
//!
//! These are the resolved, namespace-aware counterparts of the descriptor
//! declarations. Cross-type references stay as dotted full-type strings and
//! are resolved on demand by the registry, so namespaces can refer to each
//! other regardless of the order in which they were built.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::descriptor::{EnumDef, FieldDef, MessageDef, MethodDef, RestMappingDef, ServiceDef};

/// Separator between the segments of a full-type string
pub const TYPE_SEPARATOR: char = '.';

/// Split `"lnrpc.Invoice.InvoiceState"` into `("lnrpc", "Invoice.InvoiceState")`.
///
/// A string without a separator is returned whole as the namespace with an
/// empty remainder.
pub fn split_full_type(full_type: &str) -> (&str, &str) {
    full_type.split_once(TYPE_SEPARATOR).unwrap_or((full_type, ""))
}

/// Field cardinality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FieldLabel {
    /// Plain singular field
    #[default]
    Singular,
    /// Explicitly optional field
    Optional,
    /// Repeated field
    Repeated,
}

impl FieldLabel {
    /// Parse a descriptor label. Unknown labels are treated as singular.
    pub fn from_label(label: &str) -> Self {
        match label {
            "repeated" => FieldLabel::Repeated,
            "optional" => FieldLabel::Optional,
            _ => FieldLabel::Singular,
        }
    }
}

/// A message field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Field name
    pub name: String,
    /// Field description
    pub description: String,
    /// Field cardinality
    pub label: FieldLabel,
    /// Type name as written in the proto file
    pub type_name: String,
    /// Dotted full type, or a native type tag such as `uint64`
    pub full_type: String,
}

impl Field {
    /// Build a field from its declaration
    pub fn from_def(def: FieldDef) -> Self {
        Self {
            label: FieldLabel::from_label(&def.label),
            name: def.name,
            description: def.description,
            type_name: def.type_name,
            full_type: def.full_type,
        }
    }

    /// Whether the field type refers to another message or enum (e.g. `lnrpc.OutPoint`)
    pub fn is_reference(&self) -> bool { self.full_type.contains(TYPE_SEPARATOR) }

    /// The referenced full type, or `None` for native types
    pub fn reference(&self) -> Option<&str> {
        self.is_reference().then_some(self.full_type.as_str())
    }

    /// Whether the field is repeated
    pub fn is_repeated(&self) -> bool { self.label == FieldLabel::Repeated }

    /// Whether the field is explicitly optional
    pub fn is_optional(&self) -> bool { self.label == FieldLabel::Optional }
}

/// A message type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Short name
    pub name: String,
    /// Name relative to its namespace, including parent messages
    pub long_name: String,
    /// Owning namespace
    pub namespace: String,
    /// Message description
    pub description: String,
    /// File the message was declared in
    pub file_name: String,
    /// Fields in declaration order
    pub fields: Vec<Field>,
}

impl Message {
    /// Build a message from its declaration in `namespace`, declared in `file_name`
    pub fn from_def(def: MessageDef, namespace: &str, file_name: &str) -> Self {
        Self {
            name: def.name,
            long_name: def.long_name,
            namespace: namespace.to_string(),
            description: def.description,
            file_name: file_name.to_string(),
            fields: def.fields.into_iter().map(Field::from_def).collect(),
        }
    }

    /// Fully qualified type (e.g. `lnrpc.Invoice`)
    pub fn full_type(&self) -> String { format!("{}.{}", self.namespace, self.long_name) }

    /// Look up a field by name
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Full types of all fields that reference other messages or enums
    pub fn references(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().filter_map(Field::reference)
    }
}

/// A value of an enum
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumValue {
    /// Value name
    pub name: String,
    /// Numeric value
    pub number: String,
    /// Value description
    pub description: String,
}

/// An enum type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enum {
    /// Short name
    pub name: String,
    /// Name relative to its namespace, including parent messages
    pub long_name: String,
    /// Owning namespace
    pub namespace: String,
    /// Enum description
    pub description: String,
    /// File the enum was declared in
    pub file_name: String,
    /// Values in declaration order
    pub values: Vec<EnumValue>,
}

impl Enum {
    /// Build an enum from its declaration in `namespace`, declared in `file_name`
    pub fn from_def(def: EnumDef, namespace: &str, file_name: &str) -> Self {
        Self {
            name: def.name,
            long_name: def.long_name,
            namespace: namespace.to_string(),
            description: def.description,
            file_name: file_name.to_string(),
            values: def
                .values
                .into_iter()
                .map(|v| EnumValue { name: v.name, number: v.number, description: v.description })
                .collect(),
        }
    }

    /// Fully qualified type (e.g. `lnrpc.Invoice.InvoiceState`)
    pub fn full_type(&self) -> String { format!("{}.{}", self.namespace, self.long_name) }
}

/// HTTP binding of a method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestMapping {
    /// HTTP verb
    pub method: String,
    /// URL path
    pub path: String,
}

impl From<RestMappingDef> for RestMapping {
    fn from(def: RestMappingDef) -> Self { Self { method: def.method, path: def.path } }
}

/// Streaming direction of a method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StreamingDirection {
    /// Both request and response are streams
    Bidirectional,
    /// Only the response is a stream
    Server,
    /// Only the request is a stream
    Client,
}

impl StreamingDirection {
    /// Lowercase label used in rendered docs
    pub fn as_str(&self) -> &'static str {
        match self {
            StreamingDirection::Bidirectional => "bidirectional",
            StreamingDirection::Server => "server",
            StreamingDirection::Client => "client",
        }
    }
}

impl fmt::Display for StreamingDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// An RPC method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Method {
    /// Method name
    pub name: String,
    /// Description without the leading CLI command line
    pub description: String,
    /// Source of the method in the daemon's code base
    pub source: String,
    /// CLI command that calls this method
    pub command_line: String,
    /// Help text of the CLI command
    pub command_line_help: String,
    /// Short request type name
    pub request_type: String,
    /// Fully qualified request type
    pub request_full_type: String,
    /// Whether the request is a stream
    pub request_streaming: bool,
    /// Short response type name
    pub response_type: String,
    /// Fully qualified response type
    pub response_full_type: String,
    /// Whether the response is a stream
    pub response_streaming: bool,
    /// HTTP binding, if declared
    pub rest_mapping: Option<RestMapping>,
}

impl Method {
    /// Build a method from its declaration
    pub fn from_def(def: MethodDef) -> Self {
        Self {
            description: strip_command_line(&def.description),
            name: def.name,
            source: def.source,
            command_line: def.command_line,
            command_line_help: def.command_line_help,
            request_type: def.request_type,
            request_full_type: def.request_full_type,
            request_streaming: def.request_streaming,
            response_type: def.response_type,
            response_full_type: def.response_full_type,
            response_streaming: def.response_streaming,
            rest_mapping: def.rest_mapping.map(RestMapping::from),
        }
    }

    /// Whether the description marks the method as deprecated
    pub fn is_deprecated(&self) -> bool { self.description.to_lowercase().contains("deprecated") }

    /// Streaming direction, or `None` for a unary call
    pub fn streaming_direction(&self) -> Option<StreamingDirection> {
        match (self.request_streaming, self.response_streaming) {
            (true, true) => Some(StreamingDirection::Bidirectional),
            (false, true) => Some(StreamingDirection::Server),
            (true, false) => Some(StreamingDirection::Client),
            (false, false) => None,
        }
    }

    /// The HTTP binding, if it has a non-empty path
    pub fn rest_binding(&self) -> Option<&RestMapping> {
        self.rest_mapping.as_ref().filter(|m| !m.path.is_empty())
    }
}

/// A gRPC service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    /// Service name
    pub name: String,
    /// Owning namespace
    pub namespace: String,
    /// Service description
    pub description: String,
    /// File the service was declared in
    pub file_name: String,
    /// Methods in declaration order
    pub methods: Vec<Method>,
}

impl Service {
    /// Build a service from its declaration in `namespace`, declared in `file_name`
    pub fn from_def(def: ServiceDef, namespace: &str, file_name: &str) -> Self {
        Self {
            name: def.name,
            namespace: namespace.to_string(),
            description: def.description,
            file_name: file_name.to_string(),
            methods: def.methods.into_iter().map(Method::from_def).collect(),
        }
    }

    /// Look up a method by name
    pub fn method(&self, name: &str) -> Option<&Method> {
        self.methods.iter().find(|m| m.name == name)
    }
}

/// Drop the first line of a description if it names the CLI command,
/// e.g. ``lncli: `closechannel` ``.
fn strip_command_line(description: &str) -> String {
    match description.split_once('\n') {
        Some((first, rest)) if first.contains(": `") => rest.to_string(),
        None if description.contains(": `") => String::new(),
        _ => description.to_string(),
    }
}
