//! Shortcut conflict detection
//!
//! This module implements O(1) conflict detection using HashMap-based
//! indexing over `(context, combination)` pairs. The registry guarantees
//! at most one match per pair; two definitions sharing one is a
//! registration bug and is flagged here before the registry is built.
//!
//! A context-specific definition sharing a combination with a `global`
//! one is NOT a conflict: that is shadowing, the intended way to give the
//! same physical key a different meaning per context. Shadows are still
//! reported separately for diagnostics.

use std::collections::HashMap;

use crate::core::types::{Context, KeyCombination, ShortcutDefinition};

/// Detects catalog conflicts in O(1) time using HashMap-based indexing.
///
/// Uses a HashMap where keys are `(context, combination)` pairs and values
/// are vectors of all definitions using that pair. A conflict exists when
/// any vector has length > 1.
pub struct ConflictDetector {
    /// Maps (context, combination) to all definitions using that pair.
    bindings: HashMap<(Context, KeyCombination), Vec<ShortcutDefinition>>,
}

/// Represents a detected conflict between shortcut definitions.
#[derive(Clone, Debug, PartialEq)]
pub struct Conflict {
    /// Context the clash happens in
    pub context: Context,

    /// The key combination that has conflicts
    pub combination: KeyCombination,

    /// All definitions using this pair (always 2 or more)
    pub conflicting_definitions: Vec<ShortcutDefinition>,
}

/// A context-specific definition deliberately shadowing a global one.
#[derive(Clone, Debug, PartialEq)]
pub struct Shadow {
    /// The shared key combination
    pub combination: KeyCombination,

    /// The context-specific definition that wins while its context is active
    pub shadowing: ShortcutDefinition,

    /// The global definition that keeps working everywhere else
    pub shadowed: ShortcutDefinition,
}

impl ConflictDetector {
    /// Creates a new empty conflict detector.
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Adds a shortcut definition to the detector.
    ///
    /// Time complexity: O(1) average case
    pub fn add_definition(&mut self, def: ShortcutDefinition) {
        self.bindings
            .entry((def.context, def.combination.clone()))
            .or_default()
            .push(def);
    }

    /// Finds all conflicts (pairs claimed by 2 or more definitions).
    ///
    /// Time complexity: O(n) where n = number of unique pairs.
    pub fn find_conflicts(&self) -> Vec<Conflict> {
        self.bindings
            .iter()
            .filter(|(_, defs)| defs.len() > 1)
            .map(|((context, combination), defs)| Conflict {
                context: *context,
                combination: combination.clone(),
                conflicting_definitions: defs.clone(),
            })
            .collect()
    }

    /// Checks if a specific pair has conflicts.
    pub fn has_conflict(&self, context: Context, combination: &KeyCombination) -> bool {
        self.bindings
            .get(&(context, combination.clone()))
            .map(|defs| defs.len() > 1)
            .unwrap_or(false)
    }

    /// Lists the intentional shadows: context definitions whose combination
    /// also exists under `global`.
    ///
    /// Informational only; the CLI prints these so nobody mistakes the
    /// shadow for a missing binding.
    pub fn find_shadows(&self) -> Vec<Shadow> {
        let mut shadows = Vec::new();

        for ((context, combination), defs) in &self.bindings {
            if *context == Context::Global {
                continue;
            }

            if let Some(globals) = self.bindings.get(&(Context::Global, combination.clone())) {
                for shadowing in defs {
                    for shadowed in globals {
                        shadows.push(Shadow {
                            combination: combination.clone(),
                            shadowing: shadowing.clone(),
                            shadowed: shadowed.clone(),
                        });
                    }
                }
            }
        }

        shadows
    }

    /// Returns the total number of definitions tracked.
    pub fn total_definitions(&self) -> usize {
        self.bindings.values().map(|v| v.len()).sum()
    }
}

impl Default for ConflictDetector {
    fn default() -> Self {
        Self::new()
    }
}
