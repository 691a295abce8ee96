//! Single-hop type resolution
//!
//! A full-type string such as `lnrpc.Invoice.InvoiceState` is split at its
//! first `.`: the head names the package, the remainder names a message or
//! enum inside it. Resolution never copies: the returned references point
//! into the registry, so resolving the same string twice yields the same
//! instance.

use ir::{split_full_type, Enum, Message};

use crate::daemon::Daemon;
use crate::package::Package;
use crate::rest_types::RestMessage;
use crate::{ResolveError, Result};

/// How a failed lookup is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// Absence is an error that aborts the caller
    Required,
    /// Absence is `Ok(None)`; used to probe whether a reference is a message or an enum
    Optional,
}

/// Read-only access to the schema for renderers and closure walks.
pub trait SchemaReader {
    /// Look up a package by namespace
    fn namespace(&self, name: &str) -> Option<&Package>;

    /// Resolve `full_type` to a message.
    ///
    /// With [`Lookup::Required`] this never returns `Ok(None)`.
    fn resolve_message(&self, full_type: &str, lookup: Lookup) -> Result<Option<&Message>> {
        let (namespace, name) = split_full_type(full_type);
        let Some(pkg) = self.namespace(namespace) else {
            return absent(lookup, || ResolveError::UnknownNamespace {
                namespace: namespace.to_string(),
                full_type: full_type.to_string(),
            });
        };

        match pkg.message(name) {
            Some(message) => Ok(Some(message)),
            None => absent(lookup, || ResolveError::UnknownMessage {
                namespace: namespace.to_string(),
                name: name.to_string(),
                full_type: full_type.to_string(),
            }),
        }
    }

    /// Resolve `full_type` to an enum.
    ///
    /// With [`Lookup::Required`] this never returns `Ok(None)`.
    fn resolve_enum(&self, full_type: &str, lookup: Lookup) -> Result<Option<&Enum>> {
        let (namespace, name) = split_full_type(full_type);
        let Some(pkg) = self.namespace(namespace) else {
            return absent(lookup, || ResolveError::UnknownNamespace {
                namespace: namespace.to_string(),
                full_type: full_type.to_string(),
            });
        };

        match pkg.enumeration(name) {
            Some(enumeration) => Ok(Some(enumeration)),
            None => absent(lookup, || ResolveError::UnknownEnum {
                namespace: namespace.to_string(),
                name: name.to_string(),
                full_type: full_type.to_string(),
            }),
        }
    }

    /// Resolve a message that must exist
    fn message(&self, full_type: &str) -> Result<&Message> {
        self.resolve_message(full_type, Lookup::Required)?.ok_or_else(|| {
            let (namespace, name) = split_full_type(full_type);
            ResolveError::UnknownMessage {
                namespace: namespace.to_string(),
                name: name.to_string(),
                full_type: full_type.to_string(),
            }
        })
    }

    /// Resolve an enum that must exist
    fn enumeration(&self, full_type: &str) -> Result<&Enum> {
        self.resolve_enum(full_type, Lookup::Required)?.ok_or_else(|| {
            let (namespace, name) = split_full_type(full_type);
            ResolveError::UnknownEnum {
                namespace: namespace.to_string(),
                name: name.to_string(),
                full_type: full_type.to_string(),
            }
        })
    }

    /// Probe for a message; any failure is `None`
    fn find_message(&self, full_type: &str) -> Option<&Message> {
        self.resolve_message(full_type, Lookup::Optional).ok().flatten()
    }

    /// Probe for an enum; any failure is `None`
    fn find_enum(&self, full_type: &str) -> Option<&Enum> {
        self.resolve_enum(full_type, Lookup::Optional).ok().flatten()
    }
}

fn absent<T>(lookup: Lookup, err: impl FnOnce() -> ResolveError) -> Result<Option<T>> {
    match lookup {
        Lookup::Required => Err(err()),
        Lookup::Optional => Ok(None),
    }
}

impl SchemaReader for Daemon {
    fn namespace(&self, name: &str) -> Option<&Package> { self.package(name) }
}

impl Daemon {
    /// Resolve a message and apply the REST type overrides to it.
    ///
    /// The registry is left untouched; the overrides are applied to a view.
    pub fn resolve_rest_message(
        &self,
        full_type: &str,
        lookup: Lookup,
    ) -> Result<Option<RestMessage<'_>>> {
        Ok(self.resolve_message(full_type, lookup)?.map(|message| self.rest_types().apply(message)))
    }
}
