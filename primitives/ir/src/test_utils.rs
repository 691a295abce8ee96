//! Descriptor fixture builders.

use crate::descriptor::{
    Descriptor, EnumDef, EnumValueDef, FieldDef, FileDef, MessageDef, MethodDef, RestMappingDef,
    ServiceDef,
};

fn short_name(long_name: &str) -> String {
    long_name.rsplit('.').next().unwrap_or(long_name).to_string()
}

/// A singular field of type `full_type`
pub fn field(name: &str, full_type: &str) -> FieldDef {
    FieldDef {
        name: name.to_string(),
        description: String::new(),
        label: String::new(),
        type_name: short_name(full_type),
        full_type: full_type.to_string(),
    }
}

/// A repeated field of type `full_type`
pub fn repeated_field(name: &str, full_type: &str) -> FieldDef {
    FieldDef { label: "repeated".to_string(), ..field(name, full_type) }
}

/// A message named `long_name` with the given fields
pub fn message(long_name: &str, fields: Vec<FieldDef>) -> MessageDef {
    MessageDef {
        name: short_name(long_name),
        long_name: long_name.to_string(),
        description: String::new(),
        fields,
    }
}

/// An enum named `long_name` with values numbered from zero
pub fn enumeration(long_name: &str, values: &[&str]) -> EnumDef {
    EnumDef {
        name: short_name(long_name),
        long_name: long_name.to_string(),
        description: String::new(),
        values: values
            .iter()
            .enumerate()
            .map(|(i, v)| EnumValueDef {
                name: v.to_string(),
                number: i.to_string(),
                description: String::new(),
            })
            .collect(),
    }
}

/// A unary method, with an HTTP binding when `rest` is `Some((verb, path))`
pub fn method(
    name: &str,
    request_full_type: &str,
    response_full_type: &str,
    rest: Option<(&str, &str)>,
) -> MethodDef {
    MethodDef {
        name: name.to_string(),
        request_type: short_name(request_full_type),
        request_full_type: request_full_type.to_string(),
        response_type: short_name(response_full_type),
        response_full_type: response_full_type.to_string(),
        rest_mapping: rest.map(|(verb, path)| RestMappingDef {
            method: verb.to_string(),
            path: path.to_string(),
        }),
        ..MethodDef::default()
    }
}

/// A service with the given methods
pub fn service(name: &str, methods: Vec<MethodDef>) -> ServiceDef {
    ServiceDef { name: name.to_string(), description: String::new(), methods }
}

/// An empty proto file `name` declaring `package`
pub fn file(name: &str, package: &str) -> FileDef {
    FileDef { name: name.to_string(), package: package.to_string(), ..FileDef::default() }
}

/// A descriptor for the given files with lnd-like repository metadata
pub fn descriptor(files: Vec<FileDef>) -> Descriptor {
    Descriptor {
        files,
        repo_url: "https://github.com/lightningnetwork/lnd".to_string(),
        commit: "abc123".to_string(),
        proto_src_dir: "lnrpc".to_string(),
        grpc_port: 10009,
        rest_port: 8080,
        cli_cmd: "lncli".to_string(),
        daemon_cmd: "lnd".to_string(),
        ..Descriptor::default()
    }
}
