//! Transitive closures over field references
//!
//! Starting from a root message, every field whose type is a dotted reference
//! is probed with soft resolution. Accumulators are keyed by full-type string
//! and double as visited sets: a key is checked before recursing, so cyclic
//! schemas (A embeds B, B embeds A) terminate and each type appears once no
//! matter how many paths reach it.

use std::collections::{BTreeMap, BTreeSet};

use ir::{Enum, Message};
use tracing::trace;

use crate::daemon::Daemon;
use crate::resolve::SchemaReader;
use crate::{ResolveError, Result};

impl Daemon {
    /// Every message transitively reachable from `root`'s fields.
    ///
    /// The root itself is only included when one of its descendants refers
    /// back to it.
    pub fn closure_messages(&self, root: &Message) -> Result<BTreeMap<String, &Message>> {
        let mut all = BTreeMap::new();
        self.collect_messages(root, &mut all, 0)?;
        trace!(root = %root.full_type(), count = all.len(), "message closure");
        Ok(all)
    }

    /// Every enum referenced by `root` or by any message reachable from it.
    pub fn closure_enums(&self, root: &Message) -> Result<BTreeMap<String, &Enum>> {
        let mut all = BTreeMap::new();
        let mut visited = BTreeSet::from([root.full_type()]);
        self.collect_enums(root, &mut all, &mut visited, 0)?;
        trace!(root = %root.full_type(), count = all.len(), "enum closure");
        Ok(all)
    }

    /// Resolve `full_type` as a message and compute its message closure
    pub fn closure_messages_of(&self, full_type: &str) -> Result<BTreeMap<String, &Message>> {
        let root = self.message(full_type)?;
        self.closure_messages(root)
    }

    /// Resolve `full_type` as a message and compute its enum closure
    pub fn closure_enums_of(&self, full_type: &str) -> Result<BTreeMap<String, &Enum>> {
        let root = self.message(full_type)?;
        self.closure_enums(root)
    }

    fn collect_messages<'a>(
        &'a self,
        message: &Message,
        all: &mut BTreeMap<String, &'a Message>,
        depth: usize,
    ) -> Result<()> {
        self.check_depth(message, depth)?;

        for full_type in message.references() {
            if all.contains_key(full_type) {
                continue;
            }
            if let Some(nested) = self.find_message(full_type) {
                all.insert(full_type.to_string(), nested);
                self.collect_messages(nested, all, depth + 1)?;
            }
        }

        Ok(())
    }

    fn collect_enums<'a>(
        &'a self,
        message: &Message,
        all: &mut BTreeMap<String, &'a Enum>,
        visited: &mut BTreeSet<String>,
        depth: usize,
    ) -> Result<()> {
        self.check_depth(message, depth)?;

        for full_type in message.references() {
            if let Some(enumeration) = self.find_enum(full_type) {
                all.entry(full_type.to_string()).or_insert(enumeration);
                continue;
            }

            // Not an enum: a nested message may still carry enum fields
            if visited.contains(full_type) {
                continue;
            }
            if let Some(nested) = self.find_message(full_type) {
                visited.insert(full_type.to_string());
                self.collect_enums(nested, all, visited, depth + 1)?;
            }
        }

        Ok(())
    }

    fn check_depth(&self, message: &Message, depth: usize) -> Result<()> {
        if depth > self.max_closure_depth() {
            return Err(ResolveError::ClosureDepthExceeded {
                message: message.full_type(),
                limit: self.max_closure_depth(),
            });
        }
        Ok(())
    }
}
