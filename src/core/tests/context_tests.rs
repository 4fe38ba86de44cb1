//! Context stack tests

use crate::core::context::ContextStack;
use crate::core::types::Context;

#[test]
fn test_starts_at_global() {
    let stack = ContextStack::new();
    assert_eq!(stack.current(), Context::Global);
    assert_eq!(stack.depth(), 0);
}

#[test]
fn test_push_changes_current() {
    let mut stack = ContextStack::new();
    stack.push(Context::List);

    assert_eq!(stack.current(), Context::List);
    assert_eq!(stack.depth(), 1);
}

#[test]
fn test_push_same_context_is_noop() {
    let mut stack = ContextStack::new();
    stack.push(Context::List);
    stack.push(Context::List);

    assert_eq!(stack.current(), Context::List);
    assert_eq!(stack.depth(), 1, "Re-pushing the active context must not grow the stack");
}

#[test]
fn test_pop_reverts_to_previous() {
    let mut stack = ContextStack::new();
    stack.push(Context::List);
    stack.push(Context::Form);

    stack.pop();
    assert_eq!(stack.current(), Context::List);

    stack.pop();
    assert_eq!(stack.current(), Context::Global);
}

#[test]
fn test_pop_on_empty_stack_keeps_current() {
    let mut stack = ContextStack::new();
    stack.pop();
    assert_eq!(stack.current(), Context::Global);

    // current stays wherever it is when there is nothing to revert to
    stack.push(Context::Modal);
    stack.pop();
    stack.pop();
    stack.pop();
    assert_eq!(stack.current(), Context::Global);
}

#[test]
fn test_reset_clears_wholesale() {
    let mut stack = ContextStack::new();
    stack.push(Context::List);
    stack.push(Context::Form);
    stack.push(Context::Modal);

    stack.reset();

    assert_eq!(stack.current(), Context::Global);
    assert_eq!(stack.depth(), 0);
}

#[test]
fn test_is_active() {
    let mut stack = ContextStack::new();
    assert!(stack.is_active(Context::Global));

    stack.push(Context::Search);
    assert!(stack.is_active(Context::Search));
    assert!(!stack.is_active(Context::Global));
}
