//! Command registry with atomic hot swap.
//!
//! Commands are bound into a [`CommandTable`] at startup and installed into
//! the [`Registry`] as one immutable snapshot behind an `Arc`. Lookups clone
//! the entry `Arc` under a read lock, so a table swap during a reload can
//! never expose a torn table to in-flight dispatches.

use crate::error::RegistryError;
use crate::handlers::Handler;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// A registered command: name, gates, and the handler to run.
///
/// Immutable once registered.
pub struct Command {
    name: String,
    /// Minimum sender permission level, `[0, 100]`.
    pub min_permission: u8,
    /// Minimum number of argument tokens.
    pub min_args: usize,
    handler: Arc<dyn Handler>,
}

impl Command {
    pub fn new(
        name: impl Into<String>,
        min_permission: u8,
        min_args: usize,
        handler: Arc<dyn Handler>,
    ) -> Self {
        Self {
            name: name.into().to_lowercase(),
            min_permission,
            min_args,
            handler,
        }
    }

    /// Canonical (lowercase) command name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn handler(&self) -> &dyn Handler {
        self.handler.as_ref()
    }
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("min_permission", &self.min_permission)
            .field("min_args", &self.min_args)
            .finish_non_exhaustive()
    }
}

/// A set of command bindings being assembled for installation.
#[derive(Default)]
pub struct CommandTable {
    entries: HashMap<String, Arc<Command>>,
}

impl CommandTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a command. Fails when the name (case-insensitive) is taken.
    pub fn register(&mut self, command: Command) -> Result<(), RegistryError> {
        let key = command.name().to_string();
        match self.entries.entry(key) {
            std::collections::hash_map::Entry::Occupied(e) => {
                Err(RegistryError::DuplicateCommand(e.key().clone()))
            }
            std::collections::hash_map::Entry::Vacant(e) => {
                e.insert(Arc::new(command));
                Ok(())
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Live command registry consulted by the dispatcher.
#[derive(Default)]
pub struct Registry {
    table: RwLock<Arc<HashMap<String, Arc<Command>>>>,
}

impl Registry {
    /// Empty registry; install a table before dispatching.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_table(table: CommandTable) -> Self {
        let registry = Self::new();
        registry.install(table);
        registry
    }

    /// Case-insensitive O(1) lookup.
    pub fn lookup(&self, name: &str) -> Option<Arc<Command>> {
        let key = name.to_lowercase();
        self.table.read().get(&key).cloned()
    }

    /// Atomically replace the whole table. In-flight lookups keep whichever
    /// snapshot they already resolved against.
    pub fn install(&self, table: CommandTable) {
        *self.table.write() = Arc::new(table.entries);
    }

    /// Remove a single binding. Copy-on-write so concurrent lookups still
    /// see a consistent snapshot. Returns whether the command existed.
    pub fn unregister(&self, name: &str) -> bool {
        let key = name.to_lowercase();
        let mut guard = self.table.write();
        if !guard.contains_key(&key) {
            return false;
        }
        let mut next: HashMap<String, Arc<Command>> = (**guard).clone();
        next.remove(&key);
        *guard = Arc::new(next);
        true
    }

    pub fn len(&self) -> usize {
        self.table.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.read().is_empty()
    }

    /// Registered command names, sorted. Used by debug-info output.
    pub fn command_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.table.read().keys().cloned().collect();
        names.sort();
        names
    }
}
