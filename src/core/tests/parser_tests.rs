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

//! Parser module tests
//!
//! Tests for parsing keymap tables:
//! - Priority class parsing (essential, common, advanced)
//! - Combination parsing (modifiers, bare keys, aliases)
//! - Slot parameters and trailing attributes
//! - Comments, whitespace and error line numbers

use crate::core::parser::*;
use crate::core::types::{Action, Context, Modifier, PriorityClass};

#[test]
fn test_parse_priority_class() {
    assert!(matches!(
        parse_priority_class("essential = x"),
        Ok((_, PriorityClass::Essential))
    ));
    assert!(matches!(
        parse_priority_class("common = x"),
        Ok((_, PriorityClass::Common))
    ));
    assert!(matches!(
        parse_priority_class("advanced = x"),
        Ok((_, PriorityClass::Advanced))
    ));
    assert!(parse_priority_class("urgent = x").is_err());
}

#[test]
fn test_parse_combination_single_modifier() {
    let combo = parse_combination("primary+c").unwrap();
    assert_eq!(combo.modifiers, vec![Modifier::Primary]);
    assert_eq!(combo.key, "c");
}

#[test]
fn test_parse_combination_multiple_modifiers() {
    let combo = parse_combination("primary+shift+k").unwrap();
    assert_eq!(combo.modifiers.len(), 2);
    assert!(combo.modifiers.contains(&Modifier::Primary));
    assert!(combo.modifiers.contains(&Modifier::Shift));
}

#[test]
fn test_parse_combination_bare_key() {
    let combo = parse_combination("escape").unwrap();
    assert!(combo.modifiers.is_empty());
    assert_eq!(combo.key, "escape");
}

#[test]
fn test_parse_combination_canonicalizes_key() {
    let combo = parse_combination("shift+Tab").unwrap();
    assert_eq!(combo.key, "tab");

    let combo = parse_combination("ArrowUp").unwrap();
    assert_eq!(combo.key, "up");
}

#[test]
fn test_parse_combination_unknown_modifier() {
    assert_eq!(
        parse_combination("hyper+k"),
        Err(CombinationError::UnknownModifier("hyper".to_string()))
    );
}

#[test]
fn test_parse_combination_empty() {
    assert_eq!(parse_combination(""), Err(CombinationError::Empty));
    assert_eq!(parse_combination("primary+"), Err(CombinationError::Empty));
}

#[test]
fn test_parse_simple_line() {
    let defs = parse_keymap("essential = dialog-cancel, global, escape, cancel").unwrap();

    assert_eq!(defs.len(), 1);
    let def = &defs[0];
    assert_eq!(def.id, "dialog-cancel");
    assert_eq!(def.context, Context::Global);
    assert_eq!(def.priority, PriorityClass::Essential);
    assert_eq!(def.action, Action::Cancel);
    assert!(def.combination.is_bare());
    assert!(!def.customizable);
    assert!(def.conflicts_with.is_empty());
}

#[test]
fn test_parse_line_with_attributes() {
    let defs =
        parse_keymap("common = edit-copy, global, primary+c, copy_prompt, custom, conflicts=form")
            .unwrap();

    let def = &defs[0];
    assert!(def.customizable);
    assert_eq!(def.conflicts_with, vec![Context::Form]);
}

#[test]
fn test_parse_multiple_conflicts() {
    let defs = parse_keymap(
        "common = edit-delete, global, primary+d, delete_prompt, conflicts=form+modal",
    )
    .unwrap();

    assert_eq!(defs[0].conflicts_with, vec![Context::Form, Context::Modal]);
}

#[test]
fn test_parse_slot_parameter() {
    let defs =
        parse_keymap("common = quick-access-3, global, primary+3, quick_access:3, custom").unwrap();

    assert_eq!(defs[0].action, Action::QuickAccess);
    assert_eq!(defs[0].slot, Some(3));
}

#[test]
fn test_skips_comments_and_blank_lines() {
    let keymap = "\n# the universal cancel key\n\nessential = dialog-cancel, global, escape, cancel\n";
    let defs = parse_keymap(keymap).unwrap();
    assert_eq!(defs.len(), 1);
}

#[test]
fn test_error_carries_line_number() {
    let keymap = "essential = dialog-cancel, global, escape, cancel\ngarbage line";
    let err = parse_keymap(keymap).unwrap_err();

    match err {
        ParseError::InvalidSyntax { line, .. } => assert_eq!(line, 2),
        other => panic!("Expected InvalidSyntax, got: {:?}", other),
    }
}

#[test]
fn test_unknown_context_rejected() {
    let err = parse_keymap("common = x, toolbar, primary+c, copy_prompt").unwrap_err();
    assert!(matches!(err, ParseError::UnknownContext { ref token, line: 1 } if token == "toolbar"));
}

#[test]
fn test_unknown_action_rejected() {
    let err = parse_keymap("common = x, global, primary+c, explode").unwrap_err();
    assert!(matches!(err, ParseError::UnknownAction { ref token, line: 1 } if token == "explode"));
}

#[test]
fn test_unknown_attribute_rejected() {
    let err = parse_keymap("common = x, global, primary+c, copy_prompt, sticky").unwrap_err();
    assert!(matches!(err, ParseError::UnknownAttribute { ref token, .. } if token == "sticky"));
}

#[test]
fn test_invalid_slot_rejected() {
    let err = parse_keymap("common = x, global, primary+1, quick_access:first").unwrap_err();
    assert!(matches!(err, ParseError::InvalidSyntax { line: 1, .. }));
}
