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

//! src/dispatch/mod.rs
//!
//! The dispatch loop: one engine, one listener, at most one action per key
//!
//! `KeyboardEngine` owns every process-wide piece of dispatch state - the
//! registry, the context stack, the composition guard, the platform
//! adapter and the announcer - as one object constructed once per
//! application window. The host installs a single key listener and
//! forwards each keydown to `handle_key_down`; context-specific filtering
//! happens during resolution, never via multiple listeners.
//!
//! # Dispatch order per keydown
//!
//! 1. Composition check: events during IME composition or its grace
//!    window are ignored entirely (no resolve, not consumed)
//! 2. Modifier normalization and two-pass resolution (context, then
//!    global) against the active context
//! 3. Input suppression: a bare-key, non-essential shortcut does not
//!    fire while a text-input element is focused
//! 4. Conflict suppression: a shortcut whose conflicts_with names the
//!    active context is dropped
//! 5. Execution through the registry, with failures folded into the
//!    result, logged, and announced - never surfaced as a crash
//!
//! The returned `Dispatch` tells the host whether to preventDefault and
//! stopPropagation on the native event; the decision is made before the
//! command effect runs.

pub mod composition;
pub mod event;
pub mod inference;

pub use composition::{CompositionGuard, CompositionState, GRACE_PERIOD};
pub use event::{FocusTarget, KeyEvent};
pub use inference::{infer_context, ContextInferenceAdapter, UiState};

use std::time::Instant;
use thiserror::Error;
use tracing::{debug, error};

use crate::a11y::{Announcer, LiveRegion};
use crate::core::catalog::{CatalogError, ShortcutCatalog};
use crate::core::command::HostAdapters;
use crate::core::conflict::{Conflict, ConflictDetector};
use crate::core::context::ContextStack;
use crate::core::registry::{DispatchError, RegistryError, ShortcutRegistry};
use crate::core::types::{CommandResult, Context, PriorityClass, ShortcutDefinition};
use crate::platform::{Platform, PlatformAdapter};

/// Fatal engine construction errors.
///
/// Everything here is startup misconfiguration; once the engine exists,
/// nothing at dispatch time errors fatally.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The keymap failed to parse or validate.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// A duplicate shortcut id reached the registry.
    #[error(transparent)]
    Registration(#[from] RegistryError),

    /// Two definitions claim the same (context, combination) pair.
    #[error("{} conflicting shortcut definition pair(s) in catalog", .0.len())]
    Conflicts(Vec<Conflict>),
}

/// Why a key event was ignored without executing anything.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SuppressReason {
    /// The engine is disabled
    Disabled,
    /// IME composition in progress
    Composing,
    /// Inside the post-composition grace window
    CompositionGrace,
    /// Bare-key, non-essential shortcut while a text input is focused
    TextInput,
    /// The definition's conflicts_with names the active context
    ContextConflict,
}

/// Outcome of one keydown, telling the host what to do with the native
/// event.
#[derive(Debug)]
pub enum Dispatch {
    /// Ignored before resolution or by a suppression rule; pass the
    /// event through untouched
    Suppressed(SuppressReason),

    /// No shortcut resolved; pass the event through untouched
    NoMatch,

    /// A shortcut fired; preventDefault/stopPropagation the native event
    Executed { id: String, result: CommandResult },

    /// A shortcut resolved but its command rejected the context (or was
    /// unbound); the event is still consumed
    Rejected { id: String, error: DispatchError },
}

impl Dispatch {
    /// True when the host must preventDefault/stopPropagation.
    pub fn consumed(&self) -> bool {
        matches!(self, Dispatch::Executed { .. } | Dispatch::Rejected { .. })
    }
}

/// The keyboard engine: registry, context stack, composition guard,
/// platform adapter and announcer behind one handle.
pub struct KeyboardEngine {
    registry: ShortcutRegistry,
    contexts: ContextStack,
    composition: CompositionGuard,
    platform: PlatformAdapter,
    announcer: Announcer,
    enabled: bool,
}

impl KeyboardEngine {
    /// Engine over the built-in default catalog.
    pub fn new(
        adapters: HostAdapters,
        live_region: Box<dyn LiveRegion>,
    ) -> Result<Self, EngineError> {
        let catalog = ShortcutCatalog::load_default()?;
        Self::with_catalog(&catalog, adapters, live_region)
    }

    /// Engine over an explicit catalog.
    ///
    /// # Errors
    ///
    /// Fails fast on duplicate ids and on duplicate (context,
    /// combination) pairs - both are registration bugs, not runtime
    /// conditions.
    pub fn with_catalog(
        catalog: &ShortcutCatalog,
        adapters: HostAdapters,
        live_region: Box<dyn LiveRegion>,
    ) -> Result<Self, EngineError> {
        let mut detector = ConflictDetector::new();
        for def in catalog.definitions() {
            detector.add_definition(def.clone());
        }

        let conflicts = detector.find_conflicts();
        if !conflicts.is_empty() {
            return Err(EngineError::Conflicts(conflicts));
        }

        let registry = ShortcutRegistry::from_catalog(catalog, &adapters)?;

        Ok(Self {
            registry,
            contexts: ContextStack::new(),
            composition: CompositionGuard::new(),
            platform: PlatformAdapter::new(),
            announcer: Announcer::new(live_region),
            enabled: true,
        })
    }

    /// Overrides the detected platform (tests, previews).
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = PlatformAdapter::with_platform(platform);
        self
    }

    /// Handles one physical keydown.
    pub fn handle_key_down(&mut self, event: &KeyEvent) -> Dispatch {
        self.handle_key_down_at(event, Instant::now())
    }

    /// Keydown handling with an explicit clock (tests).
    pub fn handle_key_down_at(&mut self, event: &KeyEvent, now: Instant) -> Dispatch {
        if !self.enabled {
            return Dispatch::Suppressed(SuppressReason::Disabled);
        }

        // 1. Composition: ignored entirely, no resolve, not consumed
        if event.is_composing || self.composition.is_composing() {
            debug!(key = %event.key, "keydown ignored during IME composition");
            return Dispatch::Suppressed(SuppressReason::Composing);
        }
        if self.composition.is_blocked_at(now) {
            debug!(key = %event.key, "keydown ignored inside composition grace window");
            return Dispatch::Suppressed(SuppressReason::CompositionGrace);
        }

        // 2. Normalize and resolve against the active context
        let modifiers = self.platform.parse_modifiers(event.modifiers);
        let context = self.contexts.current();

        let Some(def) = self.registry.resolve(&event.key, &modifiers, context) else {
            debug!(key = %event.key, %context, "no shortcut resolved");
            return Dispatch::NoMatch;
        };
        let def = def.clone();

        // 3. Bare keys must not fire shortcuts while typing; modified
        // keys and essential actions stay reachable from inside forms
        if let Some(target) = &event.target {
            if target.is_text_input()
                && def.priority != PriorityClass::Essential
                && def.combination.is_bare()
            {
                debug!(id = %def.id, "bare-key shortcut suppressed inside text input");
                return Dispatch::Suppressed(SuppressReason::TextInput);
            }
        }

        // 4. Declared context conflicts
        if def.conflicts_with.contains(&context) {
            debug!(id = %def.id, %context, "shortcut suppressed by conflicts_with");
            return Dispatch::Suppressed(SuppressReason::ContextConflict);
        }

        // 5. Execute; the event is consumed regardless of the outcome
        self.announcer.announce_shortcut(&def, &self.platform);

        match self.registry.execute(&def.id, context) {
            Ok(result) => {
                if !result.success {
                    error!(id = %def.id, error = ?result.error, "shortcut execution failed");
                }
                self.announcer
                    .announce_result(def.description(), result.success, result.error.as_deref());
                Dispatch::Executed {
                    id: def.id,
                    result,
                }
            }
            Err(err) => {
                error!(id = %def.id, error = %err, "shortcut execution rejected");
                self.announcer.announce_result(def.description(), false, None);
                Dispatch::Rejected {
                    id: def.id,
                    error: err,
                }
            }
        }
    }

    /// Forwards compositionstart from the host's IME events.
    pub fn composition_start(&mut self) {
        self.composition.composition_start();
    }

    /// Forwards compositionupdate.
    pub fn composition_update(&mut self, data: &str) {
        self.composition.composition_update(data);
    }

    /// Forwards compositionend, opening the grace window.
    pub fn composition_end(&mut self, data: &str) {
        self.composition.composition_end(data);
    }

    /// compositionend with an explicit clock (tests).
    pub fn composition_end_at(&mut self, data: &str, now: Instant) {
        self.composition.composition_end_at(data, now);
    }

    /// Activates a UI context.
    pub fn push_context(&mut self, context: Context) {
        self.contexts.push(context);
    }

    /// Reverts to the previously active context.
    pub fn pop_context(&mut self) {
        self.contexts.pop();
    }

    /// Clears the context stack back to global.
    pub fn reset_contexts(&mut self) {
        self.contexts.reset();
    }

    /// The currently active context.
    pub fn context(&self) -> Context {
        self.contexts.current()
    }

    /// Mutable access for the inference adapter.
    pub fn contexts_mut(&mut self) -> &mut ContextStack {
        &mut self.contexts
    }

    /// Enables or disables dispatch wholesale (e.g. while the window is
    /// hidden). Disabled engines ignore every event.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// True when dispatch is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Reverts the bookkeeping of a command by shortcut id.
    pub fn undo(&mut self, id: &str) -> Result<(), DispatchError> {
        self.registry.undo(id)
    }

    /// The registry, for lookups and listings.
    pub fn registry(&self) -> &ShortcutRegistry {
        &self.registry
    }

    /// The platform adapter, for display formatting.
    pub fn platform(&self) -> &PlatformAdapter {
        &self.platform
    }

    /// Shortcuts visible from the active context (for help overlays).
    pub fn visible_shortcuts(&self) -> Vec<&ShortcutDefinition> {
        self.registry.visible_from(self.contexts.current())
    }
}

#[cfg(test)]
mod tests;
