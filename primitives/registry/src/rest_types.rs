//! REST type overrides
//!
//! The REST proxy encodes some fields differently from gRPC (64-bit integers
//! as strings, bytes as base64, ...). The override table records those
//! substitutions per message and field; [`RestTypes::apply`] produces a view of
//! a message with the substitutions in place.

use std::borrow::Cow;
use std::collections::BTreeMap;

use ir::{Field, Message, RestFieldDef};

/// Override table keyed by message full type, then by field name
#[derive(Debug, Clone, Default)]
pub struct RestTypes {
    overrides: BTreeMap<String, BTreeMap<String, RestFieldDef>>,
}

impl RestTypes {
    /// Create a table from the descriptor's `restTypes` section
    pub fn new(overrides: BTreeMap<String, BTreeMap<String, RestFieldDef>>) -> Self {
        Self { overrides }
    }

    /// Field overrides for a message, if any
    pub fn overrides_for(&self, full_type: &str) -> Option<&BTreeMap<String, RestFieldDef>> {
        self.overrides.get(full_type)
    }

    /// Number of messages with overrides
    pub fn len(&self) -> usize { self.overrides.len() }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool { self.overrides.is_empty() }

    /// The REST view of `message`.
    ///
    /// Fields without an override are borrowed as-is. Overrides naming fields
    /// the message does not have are ignored.
    pub fn apply<'a>(&self, message: &'a Message) -> RestMessage<'a> {
        let overrides = self.overrides_for(&message.full_type());
        let fields = message
            .fields
            .iter()
            .map(|field| match overrides.and_then(|o| o.get(&field.name)) {
                Some(rest) => Cow::Owned(Field {
                    type_name: rest.type_name.clone(),
                    full_type: rest.full_type.clone().unwrap_or_else(|| rest.type_name.clone()),
                    ..field.clone()
                }),
                None => Cow::Borrowed(field),
            })
            .collect();

        RestMessage { message, fields }
    }
}

/// A message as seen by the REST proxy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestMessage<'a> {
    message: &'a Message,
    fields: Vec<Cow<'a, Field>>,
}

impl<'a> RestMessage<'a> {
    /// The underlying message
    pub fn message(&self) -> &'a Message { self.message }

    /// Fields with REST substitutions applied, in declaration order
    pub fn fields(&self) -> impl Iterator<Item = &Field> { self.fields.iter().map(|f| &**f) }

    /// Look up a field by name
    pub fn field(&self, name: &str) -> Option<&Field> { self.fields().find(|f| f.name == name) }

    /// Whether any field differs from the gRPC declaration
    pub fn is_overridden(&self) -> bool { self.fields.iter().any(|f| matches!(f, Cow::Owned(_))) }
}
