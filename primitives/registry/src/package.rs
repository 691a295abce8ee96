//! Packages (namespaces)
//!
//! A package aggregates the declarations of every proto file that shares its
//! namespace. Messages and enums are keyed by their name relative to the
//! namespace (`Invoice.InvoiceState`), which is exactly the remainder of a
//! full-type string after the namespace segment.

use std::collections::BTreeMap;

use ir::{Enum, FileDef, Message, Service};
use tracing::warn;

/// A namespace and everything declared in it.
#[derive(Debug, Clone, Default)]
pub struct Package {
    name: String,
    messages: BTreeMap<String, Message>,
    enums: BTreeMap<String, Enum>,
    services: Vec<Service>,
    files: Vec<String>,
    experimental: bool,
}

impl Package {
    /// Create an empty package for `name`
    pub fn new(name: &str) -> Self { Self { name: name.to_string(), ..Self::default() } }

    /// Merge the declarations of a proto file into this package.
    ///
    /// Redeclaring a message, enum or service replaces the earlier one; a
    /// replaced service keeps its position in [`Package::services`].
    pub fn add_file(&mut self, file: FileDef) {
        let FileDef { name: file_name, messages, enums, services, .. } = file;

        for def in messages {
            let message = Message::from_def(def, &self.name, &file_name);
            if let Some(previous) = self.messages.insert(message.long_name.clone(), message) {
                warn!(
                    package = %self.name,
                    file = %file_name,
                    previous_file = %previous.file_name,
                    "message {} redeclared, keeping the latest declaration",
                    previous.long_name
                );
            }
        }

        for def in enums {
            let enumeration = Enum::from_def(def, &self.name, &file_name);
            if let Some(previous) = self.enums.insert(enumeration.long_name.clone(), enumeration) {
                warn!(
                    package = %self.name,
                    file = %file_name,
                    previous_file = %previous.file_name,
                    "enum {} redeclared, keeping the latest declaration",
                    previous.long_name
                );
            }
        }

        for def in services {
            let service = Service::from_def(def, &self.name, &file_name);
            match self.services.iter_mut().find(|s| s.name == service.name) {
                Some(existing) => {
                    warn!(
                        package = %self.name,
                        file = %file_name,
                        previous_file = %existing.file_name,
                        "service {} redeclared, keeping the latest declaration",
                        service.name
                    );
                    *existing = service;
                }
                None => self.services.push(service),
            }
        }

        self.files.push(file_name);
    }

    /// Namespace name
    pub fn name(&self) -> &str { &self.name }

    /// Look up a message by its name relative to the namespace
    pub fn message(&self, name: &str) -> Option<&Message> { self.messages.get(name) }

    /// Look up an enum by its name relative to the namespace
    pub fn enumeration(&self, name: &str) -> Option<&Enum> { self.enums.get(name) }

    /// Look up a service by name
    pub fn service(&self, name: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.name == name)
    }

    /// All messages, ordered by relative name
    pub fn messages(&self) -> impl Iterator<Item = &Message> { self.messages.values() }

    /// All enums, ordered by relative name
    pub fn enums(&self) -> impl Iterator<Item = &Enum> { self.enums.values() }

    /// Services in declaration order
    pub fn services(&self) -> &[Service] { &self.services }

    /// Proto files that contributed to this package, in input order
    pub fn files(&self) -> &[String] { &self.files }

    /// Number of messages in the package
    pub fn message_count(&self) -> usize { self.messages.len() }

    /// Number of enums in the package
    pub fn enum_count(&self) -> usize { self.enums.len() }

    /// Whether the package is flagged as experimental
    pub fn is_experimental(&self) -> bool { self.experimental }

    pub(crate) fn mark_experimental(&mut self) { self.experimental = true; }
}
