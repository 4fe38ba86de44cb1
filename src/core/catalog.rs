//! Static shortcut catalog
//!
//! The catalog is the authoritative table of shortcut definitions. It is
//! authored as a declarative keymap text: the default ships embedded in
//! the binary and is parsed once at engine construction. The CLI can also
//! load a keymap draft from a file to lint it before it ships.
//!
//! Catalog construction validates every definition (id naming, known
//! keys, slot ranges); duplicate combinations are the conflict
//! detector's job so that intentional global shadows stay expressible.

use std::path::Path;
use thiserror::Error;

use crate::core::parser::{parse_keymap, ParseError};
use crate::core::types::{Context, PriorityClass, ShortcutDefinition};
use crate::core::validator::{validate_definition, ValidationError};

/// Default keymap for the prompt manager.
///
/// Contexts: a `form` entry with the same combination as a `global` one
/// (e.g. escape) deliberately shadows it there - that is the resolution
/// order, not a conflict.
const DEFAULT_KEYMAP: &str = "\
# Essential shortcuts stay reachable while a text input is focused.
essential = show-help, global, primary+question, show_help
essential = open-settings, global, primary+comma, open_settings
essential = new-prompt, global, primary+n, new_prompt, custom
essential = save-prompt, form, primary+s, save_prompt
essential = dialog-cancel, global, escape, cancel
essential = dialog-confirm, global, enter, confirm
essential = search-focus, global, primary+f, focus_search, custom

# Everyday operations.
common = edit-copy, global, primary+c, copy_prompt, custom, conflicts=form
common = edit-delete, global, primary+d, delete_prompt, custom, conflicts=form
common = edit-open, global, primary+e, edit_prompt, custom
common = nav-up, global, up, navigate_up
common = nav-down, global, down, navigate_down
common = nav-first, list, home, select_first, custom
common = nav-last, list, end, select_last, custom
common = form-next-field, form, tab, focus_next_field
common = form-prev-field, form, shift+tab, focus_prev_field
common = quick-access-1, global, primary+1, quick_access:1, custom
common = quick-access-2, global, primary+2, quick_access:2, custom
common = quick-access-3, global, primary+3, quick_access:3, custom
common = quick-access-4, global, primary+4, quick_access:4, custom
common = quick-access-5, global, primary+5, quick_access:5, custom
common = quick-access-6, global, primary+6, quick_access:6, custom
common = quick-access-7, global, primary+7, quick_access:7, custom
common = quick-access-8, global, primary+8, quick_access:8, custom
common = quick-access-9, global, primary+9, quick_access:9, custom
common = quick-access-10, global, primary+0, quick_access:10, custom

# Power-user accelerators.
advanced = save-and-close, form, primary+enter, save_and_close, custom
advanced = command-palette, global, primary+k, command_palette, custom
advanced = form-cancel, form, escape, cancel_edit, custom
advanced = form-indent, form, primary+bracketright, indent_text
advanced = form-outdent, form, primary+bracketleft, outdent_text
";

/// Errors that can occur while building a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Keymap text could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A parsed definition failed semantic validation.
    #[error("Invalid shortcut '{id}': {source}")]
    Invalid {
        id: String,
        #[source]
        source: ValidationError,
    },
}

/// The static table of shortcut definitions.
///
/// Holds validated definitions in keymap order. Uniqueness of ids and
/// combinations is enforced downstream (registry and conflict detector).
#[derive(Clone, Debug)]
pub struct ShortcutCatalog {
    definitions: Vec<ShortcutDefinition>,
}

impl ShortcutCatalog {
    /// Builds the built-in default catalog.
    ///
    /// # Errors
    ///
    /// Fails only if the embedded keymap itself is broken, which the test
    /// suite rules out for shipped builds.
    pub fn load_default() -> Result<Self, CatalogError> {
        Self::from_keymap(DEFAULT_KEYMAP)
    }

    /// Parses and validates a keymap text into a catalog.
    pub fn from_keymap(content: &str) -> Result<Self, CatalogError> {
        let definitions = parse_keymap(content)?;

        for def in &definitions {
            validate_definition(def).map_err(|source| CatalogError::Invalid {
                id: def.id.clone(),
                source,
            })?;
        }

        Ok(Self { definitions })
    }

    /// Reads a keymap file and builds a catalog from it.
    ///
    /// Used by the CLI linter; the engine itself always starts from the
    /// embedded default.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(ParseError::IoError)?;
        Self::from_keymap(&content)
    }

    /// The raw default keymap text.
    pub fn default_keymap() -> &'static str {
        DEFAULT_KEYMAP
    }

    /// All definitions in keymap order.
    pub fn definitions(&self) -> &[ShortcutDefinition] {
        &self.definitions
    }

    /// Looks up a definition by id.
    pub fn get(&self, id: &str) -> Option<&ShortcutDefinition> {
        self.definitions.iter().find(|d| d.id == id)
    }

    /// Definitions owned by the given context (global excluded unless asked for).
    pub fn for_context(&self, context: Context) -> Vec<&ShortcutDefinition> {
        self.definitions
            .iter()
            .filter(|d| d.context == context)
            .collect()
    }

    /// Definitions in the given priority class.
    pub fn for_priority(&self, priority: PriorityClass) -> Vec<&ShortcutDefinition> {
        self.definitions
            .iter()
            .filter(|d| d.priority == priority)
            .collect()
    }

    /// Number of definitions in the catalog.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// True when the catalog holds no definitions.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Action;

    #[test]
    fn test_default_catalog_parses_clean() {
        let catalog = ShortcutCatalog::load_default().expect("default keymap must parse");
        assert!(
            catalog.len() >= 25,
            "Default catalog should carry the full shortcut set, got {}",
            catalog.len()
        );
    }

    #[test]
    fn test_default_catalog_ids_unique() {
        let catalog = ShortcutCatalog::load_default().unwrap();
        let mut ids: Vec<&str> = catalog.definitions().iter().map(|d| d.id.as_str()).collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total, "Catalog ids must be unique");
    }

    #[test]
    fn test_get_by_id() {
        let catalog = ShortcutCatalog::load_default().unwrap();
        let copy = catalog.get("edit-copy").expect("edit-copy should exist");

        assert_eq!(copy.action, Action::CopyPrompt);
        assert_eq!(copy.context, Context::Global);
        assert!(copy.customizable);
        assert_eq!(copy.conflicts_with, vec![Context::Form]);
    }

    #[test]
    fn test_quick_access_slots() {
        let catalog = ShortcutCatalog::load_default().unwrap();

        let slot3 = catalog.get("quick-access-3").unwrap();
        assert_eq!(slot3.action, Action::QuickAccess);
        assert_eq!(slot3.slot, Some(3));

        let slot10 = catalog.get("quick-access-10").unwrap();
        assert_eq!(slot10.slot, Some(10));
        assert_eq!(slot10.combination.key, "0");
    }

    #[test]
    fn test_for_context_excludes_other_contexts() {
        let catalog = ShortcutCatalog::load_default().unwrap();

        let form_defs = catalog.for_context(Context::Form);
        assert!(form_defs.iter().any(|d| d.id == "save-prompt"));
        assert!(form_defs.iter().all(|d| d.context == Context::Form));
    }

    #[test]
    fn test_for_priority() {
        let catalog = ShortcutCatalog::load_default().unwrap();

        let essential = catalog.for_priority(PriorityClass::Essential);
        assert_eq!(essential.len(), 7, "Seven essential shortcuts");
    }

    #[test]
    fn test_escape_shadow_pair_present() {
        // form-cancel deliberately shadows dialog-cancel inside forms
        let catalog = ShortcutCatalog::load_default().unwrap();

        let global_esc = catalog.get("dialog-cancel").unwrap();
        let form_esc = catalog.get("form-cancel").unwrap();

        assert_eq!(global_esc.combination, form_esc.combination);
        assert_eq!(global_esc.context, Context::Global);
        assert_eq!(form_esc.context, Context::Form);
    }

    #[test]
    fn test_invalid_keymap_rejected() {
        let result = ShortcutCatalog::from_keymap("common = bad id!, global, primary+c, copy_prompt");
        assert!(result.is_err(), "Malformed ids should fail validation");
    }

    #[test]
    fn test_from_path() {
        use tempfile::TempDir;

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("draft.keymap");
        std::fs::write(&path, "essential = dialog-cancel, global, escape, cancel\n").unwrap();

        let catalog = ShortcutCatalog::from_path(&path).unwrap();
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_from_missing_path() {
        use tempfile::TempDir;

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nonexistent.keymap");

        let result = ShortcutCatalog::from_path(&path);
        assert!(matches!(result, Err(CatalogError::Parse(_))));
    }
}
