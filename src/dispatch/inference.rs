//! Optional context inference from UI state
//!
//! Most hosts drive the context stack directly (open form -> push).
//! Environments without an app-driven context signal can instead derive
//! the context from coarse UI state with `infer_context` and let
//! `ContextInferenceAdapter` translate changes into push/pop calls.
//!
//! The adapter is a bridge, never a second matching path: it owns no
//! resolution state and keeps at most one inferred context on the stack.
//! Hosts that need nested overlays (modal over form) must drive the
//! stack themselves.

use crate::core::context::ContextStack;
use crate::core::types::Context;

/// Coarse UI state the inference works from.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct UiState {
    /// A create/edit form is open
    pub form_open: bool,
    /// A confirmation or other modal dialog is open
    pub modal_open: bool,
    /// The settings panel is open
    pub settings_open: bool,
    /// The help overlay is open
    pub help_open: bool,
    /// The search field holds focus
    pub search_focused: bool,
}

/// Derives the keyboard context from UI state.
///
/// Pure function; the UI state is the single source of truth. Forms win
/// over overlays, overlays over search, and the list is the default.
pub fn infer_context(ui: &UiState) -> Context {
    if ui.form_open {
        Context::Form
    } else if ui.modal_open {
        Context::Modal
    } else if ui.settings_open {
        Context::Settings
    } else if ui.help_open {
        Context::Help
    } else if ui.search_focused {
        Context::Search
    } else {
        Context::List
    }
}

/// Bridges inferred context changes onto an explicit context stack.
#[derive(Debug, Default)]
pub struct ContextInferenceAdapter {
    last: Option<Context>,
    pushed: bool,
}

impl ContextInferenceAdapter {
    pub fn new() -> Self {
        Self {
            last: None,
            pushed: false,
        }
    }

    /// Applies the current UI state, pushing/popping on the stack as the
    /// inferred context changes. No-op while the inference is stable.
    pub fn apply(&mut self, ui: &UiState, stack: &mut ContextStack) {
        let inferred = infer_context(ui);

        if self.last == Some(inferred) {
            return;
        }

        // Revert the context this adapter pushed before entering the new one
        if self.pushed {
            stack.pop();
            self.pushed = false;
        }

        if inferred != stack.current() {
            stack.push(inferred);
            self.pushed = true;
        }

        self.last = Some(inferred);
    }

    /// The context most recently inferred, if any.
    pub fn last_inferred(&self) -> Option<Context> {
        self.last
    }
}
