//! Key event model
//!
//! The engine is toolkit-agnostic: the host translates whatever its event
//! source delivers (DOM KeyboardEvent, GTK EventControllerKey, ...) into a
//! `KeyEvent` and feeds it to `KeyboardEngine::handle_key_down`. Raw
//! modifier flags stay raw here; the platform adapter normalizes them
//! during dispatch.

use serde::{Deserialize, Serialize};

use crate::platform::RawModifiers;

/// Tag names that count as text-input elements.
const INPUT_ELEMENTS: [&str; 3] = ["input", "textarea", "select"];

/// The element holding focus when a key event fired.
///
/// Only what the input-suppression rule needs: the tag name and whether
/// the element is contenteditable. Everything else about the DOM stays on
/// the host's side of the boundary.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct FocusTarget {
    /// Lowercase tag name (e.g. "input", "div")
    pub tag_name: String,

    /// True when the element carries contenteditable
    pub content_editable: bool,
}

impl FocusTarget {
    /// Target for a plain element by tag name.
    pub fn element(tag_name: &str) -> Self {
        Self {
            tag_name: tag_name.to_lowercase(),
            content_editable: false,
        }
    }

    /// Target for a contenteditable element.
    pub fn editable(tag_name: &str) -> Self {
        Self {
            tag_name: tag_name.to_lowercase(),
            content_editable: true,
        }
    }

    /// True when typing into this element produces text.
    ///
    /// Bare-key, non-essential shortcuts must not fire here.
    pub fn is_text_input(&self) -> bool {
        INPUT_ELEMENTS.contains(&self.tag_name.as_str()) || self.content_editable
    }
}

/// One physical keydown as delivered by the host.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct KeyEvent {
    /// The raw key value (e.g. "Escape", "k", "ArrowUp"); canonicalized
    /// during resolution
    pub key: String,

    /// Raw modifier flags from the event source
    pub modifiers: RawModifiers,

    /// True when the event source reports active IME composition
    pub is_composing: bool,

    /// The focused element, when any
    pub target: Option<FocusTarget>,
}

impl KeyEvent {
    /// A bare key press with no modifiers and no focus target.
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            modifiers: RawModifiers::default(),
            is_composing: false,
            target: None,
        }
    }

    /// Sets the raw modifier flags.
    pub fn with_modifiers(mut self, modifiers: RawModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Sets the focused element.
    pub fn with_target(mut self, target: FocusTarget) -> Self {
        self.target = Some(target);
        self
    }

    /// Marks the event as arriving mid-composition.
    pub fn composing(mut self) -> Self {
        self.is_composing = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_elements_are_text_inputs() {
        assert!(FocusTarget::element("input").is_text_input());
        assert!(FocusTarget::element("TEXTAREA").is_text_input());
        assert!(FocusTarget::element("select").is_text_input());
    }

    #[test]
    fn test_contenteditable_is_text_input() {
        assert!(FocusTarget::editable("div").is_text_input());
    }

    #[test]
    fn test_plain_elements_are_not() {
        assert!(!FocusTarget::element("div").is_text_input());
        assert!(!FocusTarget::element("button").is_text_input());
        assert!(!FocusTarget::element("li").is_text_input());
    }
}
