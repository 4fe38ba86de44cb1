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

//! Prompt Keybind Engine
//!
//! The context-aware keyboard shortcut dispatch engine of a desktop
//! prompt-management application, with conflict detection and a keymap
//! linting CLI.
//!
//! # Features
//!
//! - **Context-aware resolution:** Every physical key routes to at most
//!   one action; context-specific bindings shadow global ones
//! - **Conflict Detection:** Duplicate `(context, combination)` pairs are
//!   caught before the engine ever starts
//! - **IME Safe:** Keys composed through an input method never trigger
//!   shortcuts, including a grace window after composition ends
//! - **Input-Element Aware:** Bare keys stay typed text inside inputs;
//!   modified keys and essential actions stay reachable
//! - **Accessible:** Live-region announcements, focus history and a
//!   focus trap for modals
//! - **Platform-Neutral:** One keymap; Cmd on macOS, Ctrl elsewhere
//!
//! # Architecture
//!
//! - **`core`:** Business logic (types, keymap parser, catalog, conflict
//!   detection, validation, registry, commands)
//! - **`dispatch`:** The keyboard engine and its composition guard
//! - **`platform`:** OS detection, modifier normalization, display
//!   formatting
//! - **`a11y`:** Screen-reader announcements and focus management
//!
//! # Examples
//!
//! ## Dispatching a key event
//!
//! ```no_run
//! use prompt_keybind_engine::core::HostAdapters;
//! use prompt_keybind_engine::a11y::NullLiveRegion;
//! use prompt_keybind_engine::dispatch::{KeyboardEngine, KeyEvent};
//! use prompt_keybind_engine::core::Context;
//!
//! let mut engine = KeyboardEngine::new(HostAdapters::noop(), Box::new(NullLiveRegion))?;
//!
//! engine.push_context(Context::List);
//! let dispatch = engine.handle_key_down(&KeyEvent::new("Escape"));
//! if dispatch.consumed() {
//!     // preventDefault / stopPropagation on the native event
//! }
//! # Ok::<(), prompt_keybind_engine::dispatch::EngineError>(())
//! ```
//!
//! ## Checking a keymap for conflicts
//!
//! ```no_run
//! use prompt_keybind_engine::core::{ConflictDetector, ShortcutCatalog};
//!
//! let catalog = ShortcutCatalog::load_default()?;
//!
//! let mut detector = ConflictDetector::new();
//! for def in catalog.definitions() {
//!     detector.add_definition(def.clone());
//! }
//!
//! let conflicts = detector.find_conflicts();
//! if conflicts.is_empty() {
//!     println!("No conflicts!");
//! }
//! # Ok::<(), prompt_keybind_engine::core::CatalogError>(())
//! ```

pub mod a11y;
pub mod core;
pub mod dispatch;
pub mod platform;

// Re-export commonly used types for convenience
pub use crate::core::{Action, Context, KeyCombination, Modifier, PriorityClass, ShortcutDefinition};
pub use dispatch::{Dispatch, KeyEvent, KeyboardEngine};
