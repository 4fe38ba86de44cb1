// Copyright 2025 Eric Jingryd (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Shortcut registry: id-keyed bindings and key-event resolution
//!
//! The registry binds shortcut ids to executable commands and resolves a
//! raw key event to at most one definition. Resolution is two-pass by
//! design: definitions owned by the active context are scanned first, the
//! `global` fallback second, so **context-specific bindings always shadow
//! global ones** with the identical combination.
//!
//! Registries must hold at most one definition per `(context,
//! combination)` pair; the conflict detector enforces that before engine
//! construction. Duplicate ids are rejected here, atomically.

use std::collections::HashMap;
use thiserror::Error;

use crate::core::catalog::ShortcutCatalog;
use crate::core::command::{command_for, Command, HostAdapters};
use crate::core::types::{CommandResult, Context, KeyCombination, Modifier, ShortcutDefinition};

/// Fatal registration errors. Only construction-time misconfiguration
/// may error like this; everything at dispatch time is Result-shaped.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A definition with this id is already registered.
    #[error("Shortcut with id \"{0}\" already registered")]
    DuplicateShortcut(String),
}

/// Execution lookup failures, returned (never thrown) to the dispatch loop.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    /// No command bound under this id.
    #[error("Shortcut \"{0}\" not found")]
    NotFound(String),

    /// The command's guard rejected the active context.
    #[error("Shortcut \"{id}\" not available in the {context} context")]
    NotAllowedInContext { id: String, context: Context },
}

/// Binds shortcut definitions to commands and resolves key events.
pub struct ShortcutRegistry {
    /// Definitions keyed by id
    shortcuts: HashMap<String, ShortcutDefinition>,

    /// Commands keyed by the same ids
    commands: HashMap<String, Box<dyn Command>>,

    /// Registration order, for deterministic scans and listings
    order: Vec<String>,
}

impl ShortcutRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            shortcuts: HashMap::new(),
            commands: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Builds a registry from a catalog, constructing one command per
    /// definition over the host adapters.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateShortcut` if the catalog carries
    /// two definitions with the same id.
    pub fn from_catalog(
        catalog: &ShortcutCatalog,
        adapters: &HostAdapters,
    ) -> Result<Self, RegistryError> {
        let mut registry = Self::new();

        for def in catalog.definitions() {
            let command = command_for(def, adapters);
            registry.register(def.clone(), Box::new(command))?;
        }

        Ok(registry)
    }

    /// Registers a definition together with its command.
    ///
    /// Fails atomically on a duplicate id: the registry is left exactly
    /// as it was.
    pub fn register(
        &mut self,
        def: ShortcutDefinition,
        command: Box<dyn Command>,
    ) -> Result<(), RegistryError> {
        if self.shortcuts.contains_key(&def.id) {
            return Err(RegistryError::DuplicateShortcut(def.id));
        }

        self.order.push(def.id.clone());
        self.commands.insert(def.id.clone(), command);
        self.shortcuts.insert(def.id.clone(), def);
        Ok(())
    }

    /// Resolves a raw key event to at most one definition.
    ///
    /// Pass 1 scans definitions owned by `active_context`; pass 2 falls
    /// back to `global`. Returns `None` when neither pass matches - a
    /// resolution miss is silent, not an error.
    pub fn resolve(
        &self,
        key: &str,
        modifiers: &[Modifier],
        active_context: Context,
    ) -> Option<&ShortcutDefinition> {
        let combination = KeyCombination::new(modifiers.to_vec(), key);

        // First, look for shortcuts in the specific context
        if let Some(def) = self.scan(active_context, &combination) {
            return Some(def);
        }

        // If not found, look for global shortcuts (available in all contexts)
        if active_context != Context::Global {
            return self.scan(Context::Global, &combination);
        }

        None
    }

    fn scan(&self, context: Context, combination: &KeyCombination) -> Option<&ShortcutDefinition> {
        self.order
            .iter()
            .filter_map(|id| self.shortcuts.get(id))
            .find(|def| def.context == context && def.combination == *combination)
    }

    /// Executes the command bound to `id` under the given context.
    ///
    /// # Errors
    ///
    /// `NotFound` when no command is bound; `NotAllowedInContext` when the
    /// command's guard rejects the context. Effect failures do NOT come
    /// back as errors - they are folded into the returned result.
    pub fn execute(&mut self, id: &str, context: Context) -> Result<CommandResult, DispatchError> {
        let command = self
            .commands
            .get_mut(id)
            .ok_or_else(|| DispatchError::NotFound(id.to_string()))?;

        if !command.can_execute(context) {
            return Err(DispatchError::NotAllowedInContext {
                id: id.to_string(),
                context,
            });
        }

        Ok(command.execute())
    }

    /// Reverts the bookkeeping of the command bound to `id`.
    pub fn undo(&mut self, id: &str) -> Result<(), DispatchError> {
        let command = self
            .commands
            .get_mut(id)
            .ok_or_else(|| DispatchError::NotFound(id.to_string()))?;

        command.undo();
        Ok(())
    }

    /// Looks up a definition by id.
    pub fn get(&self, id: &str) -> Option<&ShortcutDefinition> {
        self.shortcuts.get(id)
    }

    /// Definitions visible from a context: the ones it owns plus every
    /// global definition it does not shadow.
    ///
    /// This is what help overlays and the CLI listing show.
    pub fn visible_from(&self, context: Context) -> Vec<&ShortcutDefinition> {
        let mut visible: Vec<&ShortcutDefinition> = self
            .order
            .iter()
            .filter_map(|id| self.shortcuts.get(id))
            .filter(|def| def.context == context)
            .collect();

        if context != Context::Global {
            let shadowed: Vec<&KeyCombination> =
                visible.iter().map(|def| &def.combination).collect();

            for def in self
                .order
                .iter()
                .filter_map(|id| self.shortcuts.get(id))
                .filter(|def| def.context == Context::Global)
            {
                if !shadowed.contains(&&def.combination) {
                    visible.push(def);
                }
            }
        }

        visible
    }

    /// Number of registered shortcuts.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl Default for ShortcutRegistry {
    fn default() -> Self {
        Self::new()
    }
}
