//! Command registry
//!
//! Hosts register every command explicitly before the dispatcher starts;
//! afterwards the registry is read-only and shared by all workers without
//! synchronization.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::trace;

use crate::command::body::CommandBody;
use crate::command::spec::{CommandSpec, Visibility};
use crate::error::ConfigError;

/// A registered command: its spec plus the body that executes it
#[derive(Clone)]
pub struct CommandEntry {
    pub spec: Arc<CommandSpec>,
    pub body: Arc<dyn CommandBody>,
}

/// Registry of all commands known to a dispatcher.
///
/// Names and aliases are matched case-insensitively and must be unique
/// across the whole registry. A failed registration leaves the registry
/// untouched.
#[derive(Default)]
pub struct CommandRegistry {
    entries: Vec<CommandEntry>,
    /// Lowercased name/alias -> index into `entries`
    by_alias: HashMap<String, usize>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command spec together with its body
    pub fn register(
        &mut self,
        spec: CommandSpec,
        body: Arc<dyn CommandBody>,
    ) -> Result<(), ConfigError> {
        let keys: Vec<String> = spec.names().iter().map(|n| n.to_lowercase()).collect();
        for (i, key) in keys.iter().enumerate() {
            if self.by_alias.contains_key(key) || keys[..i].contains(key) {
                return Err(ConfigError::DuplicateAlias { alias: key.clone() });
            }
        }

        let index = self.entries.len();
        trace!(command = spec.name(), "registered command");
        self.entries.push(CommandEntry {
            spec: Arc::new(spec),
            body,
        });
        for key in keys {
            self.by_alias.insert(key, index);
        }
        Ok(())
    }

    /// Look a command up by exact name or alias (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&CommandEntry> {
        self.by_alias
            .get(&name.to_lowercase())
            .map(|&i| &self.entries[i])
    }

    /// All registered names and aliases, lowercased
    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.by_alias.keys().map(String::as_str)
    }

    /// Entry for a given lowercased alias; used by the matcher
    pub(crate) fn entry_for_alias(&self, alias: &str) -> Option<&CommandEntry> {
        self.by_alias.get(alias).map(|&i| &self.entries[i])
    }

    /// Specs of all listed commands, for host-side command-list rendering
    pub fn listed_specs(&self) -> Vec<Arc<CommandSpec>> {
        self.entries
            .iter()
            .filter(|e| e.spec.visibility() == Visibility::Listed)
            .map(|e| Arc::clone(&e.spec))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
