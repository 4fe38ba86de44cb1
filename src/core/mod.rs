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

//! src/core/mod.rs
//!
//! Core business logic module
//!
//! This module contains the fundamental data structures and algorithms
//! for shortcut dispatch, including:
//! - Type definitions for shortcuts, contexts and key combinations
//! - Keymap table parsing (the catalog's authoring format)
//! - Conflict detection using HashMap-based O(1) lookup
//! - Registration-time validation with whitelisted keys
//! - The registry with two-pass (context-then-global) resolution
//! - The command execution protocol
//!
//! All business logic is isolated from UI and platform concerns to
//! enable comprehensive unit testing without a window system.

pub mod catalog;
pub mod command;
pub mod conflict;
pub mod context;
pub mod parser;
pub mod registry;
pub mod types;
pub mod validator;

pub use catalog::{CatalogError, ShortcutCatalog};
pub use command::{ActionCommand, Command, ContextGuard, HostAdapters};
pub use conflict::{Conflict, ConflictDetector, Shadow};
pub use context::ContextStack;
pub use registry::{DispatchError, RegistryError, ShortcutRegistry};
pub use types::*;
pub use validator::{validate_definition, ValidationError};

#[cfg(test)]
mod tests;
