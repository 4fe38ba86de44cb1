//! Explicit UI context stack
//!
//! Tracks which mutually exclusive UI context is active. The stack is
//! driven by the host (open form -> push, close it -> pop); resolution
//! only ever looks at the top. There is exactly one stack per engine and
//! it lives for the whole window.
//!
//! Pushing the context that is already active is a no-op, so paired
//! push/pop call sites stay balanced even when the UI re-asserts its
//! state.

use crate::core::types::Context;

/// Push/pop stack of UI contexts with `global` as the permanent root.
#[derive(Clone, Debug)]
pub struct ContextStack {
    /// Previously active contexts, oldest first
    stack: Vec<Context>,

    /// The currently active context (top of the conceptual stack)
    current: Context,
}

impl ContextStack {
    /// Creates a stack rooted at `global`.
    pub fn new() -> Self {
        Self {
            stack: Vec::new(),
            current: Context::Global,
        }
    }

    /// The currently active context.
    pub fn current(&self) -> Context {
        self.current
    }

    /// Activates a context, remembering the previous one.
    ///
    /// No-op when `context` is already active.
    pub fn push(&mut self, context: Context) {
        if context != self.current {
            self.stack.push(self.current);
            self.current = context;
        }
    }

    /// Reverts to the previously active context.
    ///
    /// Leaves the current context unchanged when there is nothing to
    /// revert to (the stack stays at its root).
    pub fn pop(&mut self) {
        if let Some(previous) = self.stack.pop() {
            self.current = previous;
        }
    }

    /// Clears the stack wholesale and reverts to `global`.
    pub fn reset(&mut self) {
        self.stack.clear();
        self.current = Context::Global;
    }

    /// True when the given context is the active one.
    pub fn is_active(&self, context: Context) -> bool {
        self.current == context
    }

    /// Number of suspended contexts below the active one.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

impl Default for ContextStack {
    fn default() -> Self {
        Self::new()
    }
}
