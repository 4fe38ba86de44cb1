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

//! Registration-time definition validation
//!
//! This module implements whitelist-based validation of shortcut
//! definitions before they reach the registry:
//! - Id naming rule (lowercase kebab-case, enforced by regex)
//! - Key names against the known-key whitelist
//! - Quick-access slot ranges
//! - Self-referential conflict declarations
//!
//! # Philosophy
//! Only explicitly known keys and well-formed ids are accepted; a typo in
//! the keymap should fail catalog construction, not silently produce a
//! shortcut that can never fire.

use regex::Regex;
use thiserror::Error;

use crate::core::types::{is_known_key, Action, ShortcutDefinition};

/// Validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Id does not follow the lowercase kebab-case naming rule
    #[error("Invalid id '{0}': expected lowercase kebab-case")]
    InvalidId(String),

    /// Key name not in the known-key whitelist
    #[error("Unknown key '{0}'")]
    UnknownKey(String),

    /// Quick-access slot outside 1-10
    #[error("Quick-access slot {0} out of range (1-10)")]
    SlotOutOfRange(u8),

    /// Quick-access definition without a slot parameter
    #[error("quick_access requires a slot parameter")]
    MissingSlot,

    /// Slot parameter on an action that takes none
    #[error("Action '{0}' does not take a slot parameter")]
    UnexpectedSlot(String),

    /// Definition declares a conflict with its own context
    #[error("Shortcut conflicts with its own context '{0}'")]
    SelfConflict(String),
}

/// Builds the id naming rule.
///
/// Ids are lowercase kebab-case: `dialog-cancel`, `quick-access-10`.
fn id_pattern() -> Regex {
    Regex::new(r"^[a-z][a-z0-9]*(-[a-z0-9]+)*$").expect("id naming rule should be valid regex")
}

/// Validates the id naming rule
pub fn validate_id(id: &str) -> Result<(), ValidationError> {
    if id_pattern().is_match(id) {
        Ok(())
    } else {
        Err(ValidationError::InvalidId(id.to_string()))
    }
}

/// Validates a complete definition before registration
///
/// Performs all checks:
/// - Id naming rule
/// - Known key name
/// - Slot presence and range for quick_access (and absence elsewhere)
/// - No conflict declaration against the owning context
pub fn validate_definition(def: &ShortcutDefinition) -> Result<(), ValidationError> {
    validate_id(&def.id)?;

    if !is_known_key(&def.combination.key) {
        return Err(ValidationError::UnknownKey(def.combination.key.clone()));
    }

    match (def.action, def.slot) {
        (Action::QuickAccess, None) => return Err(ValidationError::MissingSlot),
        (Action::QuickAccess, Some(slot)) if !(1..=10).contains(&slot) => {
            return Err(ValidationError::SlotOutOfRange(slot));
        }
        (Action::QuickAccess, Some(_)) => {}
        (action, Some(_)) => {
            return Err(ValidationError::UnexpectedSlot(action.name().to_string()));
        }
        (_, None) => {}
    }

    if def.conflicts_with.contains(&def.context) {
        return Err(ValidationError::SelfConflict(def.context.to_string()));
    }

    Ok(())
}
