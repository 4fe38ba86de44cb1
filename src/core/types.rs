//! src/core/types.rs
//!
//! Core type definitions for shortcut dispatch
//!
//! This module defines the fundamental types used throughout the engine:
//! - `Modifier`: Platform-neutral modifier keys (primary, secondary, shift, alt)
//! - `KeyCombination`: A combination of modifiers and a key
//! - `Context`: The mutually exclusive UI contexts shortcuts are scoped to
//! - `PriorityClass`: Shortcut importance tiers (essential, common, advanced)
//! - `Action`: Every host action a shortcut can trigger
//! - `ShortcutDefinition`: Complete shortcut with context and metadata
//!
//! All types implement serialization for diagnostics and are designed
//! with consistent hashing in mind (sorted modifiers, canonical key names).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Platform-neutral modifier keys
///
/// `Primary` resolves to Command on Darwin and Ctrl elsewhere; `Secondary`
/// is the Alt/Option key. The platform adapter owns that mapping.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Modifier {
    /// Cmd on Darwin, Ctrl on Windows/Linux
    Primary,
    /// Alt/Option key
    Secondary,
    /// Shift key
    Shift,
    /// Raw Alt (kept distinct from Secondary for layouts that report both)
    Alt,
}

impl Modifier {
    /// Parses a keymap token into a modifier.
    pub fn parse(token: &str) -> Option<Self> {
        match token.to_lowercase().as_str() {
            "primary" | "cmd" | "ctrl" => Some(Modifier::Primary),
            "secondary" | "opt" | "option" => Some(Modifier::Secondary),
            "shift" => Some(Modifier::Shift),
            "alt" => Some(Modifier::Alt),
            _ => None,
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Modifier::Primary => write!(f, "primary"),
            Modifier::Secondary => write!(f, "secondary"),
            Modifier::Shift => write!(f, "shift"),
            Modifier::Alt => write!(f, "alt"),
        }
    }
}

/// UI contexts a shortcut can be scoped to
///
/// Contexts are mutually exclusive; the active one is the top of the
/// `ContextStack`. `Global` doubles as the universal fallback scope during
/// resolution (a context-specific binding always shadows a global one with
/// the identical combination).
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Context {
    /// Whole-application scope and resolution fallback
    Global,
    /// Search field focused
    Search,
    /// Prompt list navigation
    List,
    /// Prompt create/edit form
    Form,
    /// Modal dialog open
    Modal,
    /// Settings panel open
    Settings,
    /// Help overlay open
    Help,
}

impl Context {
    /// All contexts, in diagnostic priority order.
    pub const ALL: [Context; 7] = [
        Context::Global,
        Context::Search,
        Context::List,
        Context::Form,
        Context::Settings,
        Context::Modal,
        Context::Help,
    ];

    /// Static priority number, used only for diagnostics and listing order.
    ///
    /// Resolution never consults this: matching is purely
    /// active-context-then-global (see `ShortcutRegistry::resolve`).
    pub fn priority(&self) -> u8 {
        match self {
            Context::Global => 1,
            Context::Search | Context::List => 2,
            Context::Form | Context::Settings => 3,
            Context::Modal | Context::Help => 4,
        }
    }

    /// Parses a keymap token into a context.
    pub fn parse(token: &str) -> Option<Self> {
        match token.to_lowercase().as_str() {
            "global" => Some(Context::Global),
            "search" => Some(Context::Search),
            "list" => Some(Context::List),
            "form" => Some(Context::Form),
            "modal" => Some(Context::Modal),
            "settings" => Some(Context::Settings),
            "help" => Some(Context::Help),
            _ => None,
        }
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Context::Global => write!(f, "global"),
            Context::Search => write!(f, "search"),
            Context::List => write!(f, "list"),
            Context::Form => write!(f, "form"),
            Context::Modal => write!(f, "modal"),
            Context::Settings => write!(f, "settings"),
            Context::Help => write!(f, "help"),
        }
    }
}

/// Shortcut importance tiers
///
/// `Essential` shortcuts stay reachable while a text input is focused;
/// `Common` and `Advanced` are suppressed there unless they carry modifiers.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum PriorityClass {
    /// Must remain reachable everywhere, including inside inputs
    Essential,
    /// Everyday operations
    Common,
    /// Power-user accelerators
    Advanced,
}

impl fmt::Display for PriorityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriorityClass::Essential => write!(f, "essential"),
            PriorityClass::Common => write!(f, "common"),
            PriorityClass::Advanced => write!(f, "advanced"),
        }
    }
}

/// Every action a shortcut can trigger
///
/// The dispatch table over this enum is exhaustive, so adding a variant
/// forces the command builder to handle it.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Action {
    ShowHelp,
    OpenSettings,
    NewPrompt,
    EditPrompt,
    CopyPrompt,
    DeletePrompt,
    SavePrompt,
    SaveAndClose,
    Cancel,
    CancelEdit,
    Confirm,
    FocusSearch,
    NavigateUp,
    NavigateDown,
    SelectFirst,
    SelectLast,
    FocusNextField,
    FocusPrevField,
    IndentText,
    OutdentText,
    CommandPalette,
    /// Pinned-prompt slot selection; the slot number lives on the definition
    QuickAccess,
}

impl Action {
    /// The snake_case name used in keymap files.
    pub fn name(&self) -> &'static str {
        match self {
            Action::ShowHelp => "show_help",
            Action::OpenSettings => "open_settings",
            Action::NewPrompt => "new_prompt",
            Action::EditPrompt => "edit_prompt",
            Action::CopyPrompt => "copy_prompt",
            Action::DeletePrompt => "delete_prompt",
            Action::SavePrompt => "save_prompt",
            Action::SaveAndClose => "save_and_close",
            Action::Cancel => "cancel",
            Action::CancelEdit => "cancel_edit",
            Action::Confirm => "confirm",
            Action::FocusSearch => "focus_search",
            Action::NavigateUp => "navigate_up",
            Action::NavigateDown => "navigate_down",
            Action::SelectFirst => "select_first",
            Action::SelectLast => "select_last",
            Action::FocusNextField => "focus_next_field",
            Action::FocusPrevField => "focus_prev_field",
            Action::IndentText => "indent_text",
            Action::OutdentText => "outdent_text",
            Action::CommandPalette => "command_palette",
            Action::QuickAccess => "quick_access",
        }
    }

    /// Human-readable description, used for announcements and listings.
    pub fn description(&self) -> &'static str {
        match self {
            Action::ShowHelp => "Show help",
            Action::OpenSettings => "Open settings",
            Action::NewPrompt => "New prompt",
            Action::EditPrompt => "Edit prompt",
            Action::CopyPrompt => "Copy prompt",
            Action::DeletePrompt => "Delete prompt",
            Action::SavePrompt => "Save prompt",
            Action::SaveAndClose => "Save and close",
            Action::Cancel => "Cancel",
            Action::CancelEdit => "Cancel editing",
            Action::Confirm => "Confirm",
            Action::FocusSearch => "Focus search",
            Action::NavigateUp => "Previous item",
            Action::NavigateDown => "Next item",
            Action::SelectFirst => "First item",
            Action::SelectLast => "Last item",
            Action::FocusNextField => "Next field",
            Action::FocusPrevField => "Previous field",
            Action::IndentText => "Indent text",
            Action::OutdentText => "Outdent text",
            Action::CommandPalette => "Command palette",
            Action::QuickAccess => "Quick access slot",
        }
    }

    /// Parses a keymap action name.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "show_help" => Some(Action::ShowHelp),
            "open_settings" => Some(Action::OpenSettings),
            "new_prompt" => Some(Action::NewPrompt),
            "edit_prompt" => Some(Action::EditPrompt),
            "copy_prompt" => Some(Action::CopyPrompt),
            "delete_prompt" => Some(Action::DeletePrompt),
            "save_prompt" => Some(Action::SavePrompt),
            "save_and_close" => Some(Action::SaveAndClose),
            "cancel" => Some(Action::Cancel),
            "cancel_edit" => Some(Action::CancelEdit),
            "confirm" => Some(Action::Confirm),
            "focus_search" => Some(Action::FocusSearch),
            "navigate_up" => Some(Action::NavigateUp),
            "navigate_down" => Some(Action::NavigateDown),
            "select_first" => Some(Action::SelectFirst),
            "select_last" => Some(Action::SelectLast),
            "focus_next_field" => Some(Action::FocusNextField),
            "focus_prev_field" => Some(Action::FocusPrevField),
            "indent_text" => Some(Action::IndentText),
            "outdent_text" => Some(Action::OutdentText),
            "command_palette" => Some(Action::CommandPalette),
            "quick_access" => Some(Action::QuickAccess),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A combination of modifier keys and a base key
///
/// Represents a complete key combination like primary+shift+K.
/// Implements Hash and Eq for use as HashMap keys in conflict detection
/// and resolution.
///
/// # Hash Implementation
/// The hash is based on a **sorted** list of modifiers plus the canonical
/// key name. This ensures that different orderings of the same modifiers
/// produce the same hash (primary+shift and shift+primary are identical).
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct KeyCombination {
    /// Modifier keys, stored sorted and deduplicated
    pub modifiers: Vec<Modifier>,

    /// Canonical key name (e.g. "k", "escape", "comma")
    /// Always stored in canonical lowercase form for consistent hashing
    pub key: String,
}

impl KeyCombination {
    /// Create a new KeyCombination with normalized data
    ///
    /// Normalisation includes:
    /// - Sorting modifiers for consistent hashing
    /// - Removing duplicate modifiers
    /// - Canonicalizing the key name (lowercase, alias folding)
    pub fn new(mut modifiers: Vec<Modifier>, key: &str) -> Self {
        // Sort modifiers for consistent hashing
        modifiers.sort_by_key(|m| format!("{:?}", m));

        // Remove duplicates
        modifiers.dedup();

        Self {
            modifiers,
            key: canonicalize_key(key),
        }
    }

    /// True when the combination carries no modifier at all.
    ///
    /// Bare-key shortcuts are the ones suppressed while a text input is
    /// focused (unless the definition is essential).
    pub fn is_bare(&self) -> bool {
        self.modifiers.is_empty()
    }
}

impl fmt::Display for KeyCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.is_empty() {
            write!(f, "{}", self.key)
        } else {
            let mods = self
                .modifiers
                .iter()
                .map(|m| format!("{}", m))
                .collect::<Vec<_>>()
                .join("+");
            write!(f, "{}+{}", mods, self.key)
        }
    }
}

/// A complete shortcut definition
///
/// Immutable record binding a key combination to an action within one
/// owning context. Ids are globally unique within a registry; registering
/// a duplicate id is a fatal registration error.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ShortcutDefinition {
    /// Unique identifier (e.g. "edit-copy")
    pub id: String,

    /// The key combination that triggers this shortcut
    pub combination: KeyCombination,

    /// Owning context; `Context::Global` makes it a universal fallback
    pub context: Context,

    /// Importance tier controlling input-element suppression
    pub priority: PriorityClass,

    /// The host action this shortcut triggers
    pub action: Action,

    /// Quick-access slot number (1-10), only for `Action::QuickAccess`
    pub slot: Option<u8>,

    /// Whether the user may rebind this shortcut
    pub customizable: bool,

    /// Contexts in which this shortcut is suppressed even when resolved
    pub conflicts_with: Vec<Context>,
}

impl ShortcutDefinition {
    /// Human-readable description of what this shortcut does.
    pub fn description(&self) -> &'static str {
        self.action.description()
    }
}

impl fmt::Display for ShortcutDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} = {}, {}, {}, {}",
            self.priority, self.id, self.context, self.combination, self.action
        )?;

        if let Some(slot) = self.slot {
            write!(f, ":{}", slot)?;
        }

        Ok(())
    }
}

/// Outcome of a command execution
///
/// Command effects never propagate errors outward; failures are folded
/// into the result so the dispatch loop's error path stays reserved for
/// programming errors.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct CommandResult {
    /// Whether the effect completed
    pub success: bool,

    /// Optional detail for diagnostics (e.g. "direction: up")
    pub detail: Option<String>,

    /// Failure message when `success` is false
    pub error: Option<String>,
}

impl CommandResult {
    /// A successful outcome with no extra detail.
    pub fn ok() -> Self {
        Self {
            success: true,
            detail: None,
            error: None,
        }
    }

    /// A successful outcome carrying a diagnostic detail.
    pub fn ok_with(detail: impl Into<String>) -> Self {
        Self {
            success: true,
            detail: Some(detail.into()),
            error: None,
        }
    }

    /// A failed outcome with a message.
    pub fn fail(error: impl Into<String>) -> Self {
        Self {
            success: false,
            detail: None,
            error: Some(error.into()),
        }
    }
}

/// Canonicalize a key name to the internal standard form.
///
/// Folds the aliases produced by different event sources (DOM `event.key`
/// values, keymap spellings) into one lowercase name, and spells out
/// punctuation so keymap lines stay comma-safe.
pub fn canonicalize_key(key: &str) -> String {
    let key_lower = if key == " " {
        "space".to_string()
    } else {
        key.to_lowercase()
    };

    match key_lower.as_str() {
        "arrowup" | "uparrow" => "up",
        "arrowdown" | "downarrow" => "down",
        "arrowleft" | "leftarrow" => "left",
        "arrowright" | "rightarrow" => "right",
        "return" => "enter",
        "esc" => "escape",
        "spacebar" => "space",
        "," => "comma",
        "." => "period",
        "/" => "slash",
        "\\" => "backslash",
        ";" => "semicolon",
        "'" => "quote",
        "?" => "question",
        "[" => "bracketleft",
        "]" => "bracketright",
        "-" => "minus",
        "=" => "equal",
        "`" => "backquote",
        "pgup" => "pageup",
        "pgdn" | "pgdown" => "pagedown",
        _ => return key_lower,
    }
    .to_string()
}

/// Check if a canonical key name is known/valid.
///
/// Accepts single letters and digits, function keys F1-F12, and the
/// named special keys the canonicalizer produces.
pub fn is_known_key(key: &str) -> bool {
    const NAMED_KEYS: &[&str] = &[
        "enter",
        "escape",
        "tab",
        "space",
        "backspace",
        "delete",
        "insert",
        "up",
        "down",
        "left",
        "right",
        "home",
        "end",
        "pageup",
        "pagedown",
        "comma",
        "period",
        "slash",
        "backslash",
        "semicolon",
        "quote",
        "question",
        "bracketleft",
        "bracketright",
        "minus",
        "equal",
        "backquote",
    ];

    if NAMED_KEYS.contains(&key) {
        return true;
    }

    let mut chars = key.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return c.is_ascii_lowercase() || c.is_ascii_digit();
    }

    // Function keys f1..f12
    key.strip_prefix('f')
        .and_then(|n| n.parse::<u8>().ok())
        .is_some_and(|n| (1..=12).contains(&n))
}
