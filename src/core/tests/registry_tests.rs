//! Registry resolution and execution tests
//!
//! Covers the two-pass resolution order (context shadows global), the
//! duplicate-id registration contract and the execute protocol
//! (NotFound / NotAllowedInContext / folded effect failures).

use std::cell::RefCell;
use std::rc::Rc;

use crate::core::command::{command_for, HostAdapters};
use crate::core::registry::{DispatchError, RegistryError, ShortcutRegistry};
use crate::core::types::{
    Action, Context, KeyCombination, Modifier, PriorityClass, ShortcutDefinition,
};

/// Helper to create test definitions
fn test_definition(
    id: &str,
    context: Context,
    modifiers: Vec<Modifier>,
    key: &str,
    action: Action,
) -> ShortcutDefinition {
    ShortcutDefinition {
        id: id.to_string(),
        combination: KeyCombination::new(modifiers, key),
        context,
        priority: PriorityClass::Common,
        action,
        slot: None,
        customizable: true,
        conflicts_with: Vec::new(),
    }
}

/// Helper: registry with one definition bound over noop adapters
fn registry_with(defs: Vec<ShortcutDefinition>) -> ShortcutRegistry {
    let adapters = HostAdapters::noop();
    let mut registry = ShortcutRegistry::new();
    for def in defs {
        let command = command_for(&def, &adapters);
        registry.register(def, Box::new(command)).unwrap();
    }
    registry
}

#[test]
fn test_resolve_exact_match() {
    let registry = registry_with(vec![test_definition(
        "edit-copy",
        Context::List,
        vec![Modifier::Primary],
        "c",
        Action::CopyPrompt,
    )]);

    let found = registry.resolve("c", &[Modifier::Primary], Context::List);
    assert_eq!(found.map(|d| d.id.as_str()), Some("edit-copy"));
}

#[test]
fn test_resolve_miss_from_unrelated_context() {
    let registry = registry_with(vec![test_definition(
        "nav-first",
        Context::List,
        vec![],
        "home",
        Action::SelectFirst,
    )]);

    // No global fallback registered for this combination
    assert!(registry.resolve("home", &[], Context::Form).is_none());
}

#[test]
fn test_global_fallback_resolvable_from_every_context() {
    let registry = registry_with(vec![test_definition(
        "search-focus",
        Context::Global,
        vec![Modifier::Primary],
        "f",
        Action::FocusSearch,
    )]);

    for context in Context::ALL {
        let found = registry.resolve("f", &[Modifier::Primary], context);
        assert_eq!(
            found.map(|d| d.id.as_str()),
            Some("search-focus"),
            "Global shortcut should resolve from {} context",
            context
        );
    }
}

#[test]
fn test_context_definition_shadows_global() {
    let registry = registry_with(vec![
        test_definition("cancel", Context::Global, vec![], "escape", Action::Cancel),
        test_definition(
            "list-cancel",
            Context::List,
            vec![],
            "escape",
            Action::Cancel,
        ),
    ]);

    // From list context the list definition wins
    let from_list = registry.resolve("Escape", &[], Context::List);
    assert_eq!(from_list.map(|d| d.id.as_str()), Some("list-cancel"));

    // From any other context the global one wins
    let from_form = registry.resolve("Escape", &[], Context::Form);
    assert_eq!(from_form.map(|d| d.id.as_str()), Some("cancel"));

    let from_global = registry.resolve("Escape", &[], Context::Global);
    assert_eq!(from_global.map(|d| d.id.as_str()), Some("cancel"));
}

#[test]
fn test_resolve_modifier_order_independent() {
    let registry = registry_with(vec![test_definition(
        "x",
        Context::Global,
        vec![Modifier::Shift, Modifier::Primary],
        "p",
        Action::CommandPalette,
    )]);

    let a = registry.resolve("p", &[Modifier::Shift, Modifier::Primary], Context::List);
    let b = registry.resolve("p", &[Modifier::Primary, Modifier::Shift], Context::List);

    assert!(a.is_some());
    assert_eq!(
        a.map(|d| d.id.as_str()),
        b.map(|d| d.id.as_str()),
        "Modifier order must not affect resolution"
    );
}

#[test]
fn test_resolve_key_case_insensitive() {
    let registry = registry_with(vec![test_definition(
        "new-prompt",
        Context::Global,
        vec![Modifier::Primary],
        "n",
        Action::NewPrompt,
    )]);

    assert!(registry.resolve("N", &[Modifier::Primary], Context::List).is_some());
}

#[test]
fn test_duplicate_id_rejected_atomically() {
    let adapters = HostAdapters::noop();
    let mut registry = ShortcutRegistry::new();

    let first = test_definition(
        "edit-copy",
        Context::Global,
        vec![Modifier::Primary],
        "c",
        Action::CopyPrompt,
    );
    let command = command_for(&first, &adapters);
    registry.register(first, Box::new(command)).unwrap();

    // Same id, different combination
    let dupe = test_definition(
        "edit-copy",
        Context::List,
        vec![Modifier::Primary],
        "x",
        Action::CopyPrompt,
    );
    let command = command_for(&dupe, &adapters);
    let result = registry.register(dupe, Box::new(command));

    assert!(matches!(
        result,
        Err(RegistryError::DuplicateShortcut(ref id)) if id == "edit-copy"
    ));

    // Registry unchanged: still one entry, original combination intact
    assert_eq!(registry.len(), 1);
    let kept = registry.get("edit-copy").unwrap();
    assert_eq!(kept.combination.key, "c");
    assert!(registry.resolve("x", &[Modifier::Primary], Context::List).is_none());
}

#[test]
fn test_execute_not_found() {
    let mut registry = registry_with(vec![]);

    let result = registry.execute("ghost", Context::Global);
    assert_eq!(result, Err(DispatchError::NotFound("ghost".to_string())));
}

#[test]
fn test_execute_guard_rejects_context() {
    // save_prompt's command only allows the form context
    let mut registry = registry_with(vec![test_definition(
        "save-prompt",
        Context::Form,
        vec![Modifier::Primary],
        "s",
        Action::SavePrompt,
    )]);

    let result = registry.execute("save-prompt", Context::List);
    assert_eq!(
        result,
        Err(DispatchError::NotAllowedInContext {
            id: "save-prompt".to_string(),
            context: Context::List,
        })
    );
}

#[test]
fn test_execute_runs_effect() {
    let calls = Rc::new(RefCell::new(0u32));
    let calls_in_effect = calls.clone();

    let mut adapters = HostAdapters::noop();
    adapters.shell.cancel = Rc::new(move || {
        *calls_in_effect.borrow_mut() += 1;
        Ok(())
    });

    let def = test_definition("cancel", Context::Global, vec![], "escape", Action::Cancel);
    let command = command_for(&def, &adapters);
    let mut registry = ShortcutRegistry::new();
    registry.register(def, Box::new(command)).unwrap();

    let result = registry.execute("cancel", Context::Modal).unwrap();
    assert!(result.success);
    assert_eq!(*calls.borrow(), 1);
}

#[test]
fn test_failing_effect_folds_into_result() {
    let mut adapters = HostAdapters::noop();
    adapters.prompts.copy_prompt = Rc::new(|| Err("clipboard unavailable".into()));

    let def = test_definition(
        "edit-copy",
        Context::Global,
        vec![Modifier::Primary],
        "c",
        Action::CopyPrompt,
    );
    let command = command_for(&def, &adapters);
    let mut registry = ShortcutRegistry::new();
    registry.register(def, Box::new(command)).unwrap();

    // A failing effect is a failed result, never an Err
    let result = registry.execute("edit-copy", Context::List).unwrap();
    assert!(!result.success);
    assert_eq!(result.error.as_deref(), Some("clipboard unavailable"));
}

#[test]
fn test_panicking_effect_is_contained() {
    let mut adapters = HostAdapters::noop();
    adapters.shell.confirm = Rc::new(|| panic!("handler bug"));

    let def = test_definition("dialog-confirm", Context::Global, vec![], "enter", Action::Confirm);
    let command = command_for(&def, &adapters);
    let mut registry = ShortcutRegistry::new();
    registry.register(def, Box::new(command)).unwrap();

    let result = registry.execute("dialog-confirm", Context::Global).unwrap();
    assert!(!result.success, "Panic must be folded into a failed result");
}

#[test]
fn test_visible_from_hides_shadowed_global() {
    let registry = registry_with(vec![
        test_definition("cancel", Context::Global, vec![], "escape", Action::Cancel),
        test_definition(
            "form-cancel",
            Context::Form,
            vec![],
            "escape",
            Action::CancelEdit,
        ),
        test_definition(
            "search-focus",
            Context::Global,
            vec![Modifier::Primary],
            "f",
            Action::FocusSearch,
        ),
    ]);

    let visible = registry.visible_from(Context::Form);
    let ids: Vec<&str> = visible.iter().map(|d| d.id.as_str()).collect();

    assert!(ids.contains(&"form-cancel"));
    assert!(ids.contains(&"search-focus"));
    assert!(
        !ids.contains(&"cancel"),
        "Shadowed global escape must not show up twice"
    );
}
