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

//! Platform adaptation
//!
//! Abstracts OS-specific keyboard behaviour behind one adapter:
//! - Detecting the platform (once, cached in the adapter)
//! - Normalizing raw modifier flags to platform-neutral modifiers
//!   (Meta is primary on Darwin, Ctrl elsewhere)
//! - Formatting key combinations for display (⌘⇧K vs Ctrl+Shift+K)
//! - Generating spoken aria labels for screen readers
//!
//! Display formatting is never used in matching; resolution works purely
//! on canonical key names and normalized modifier sets.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::types::{KeyCombination, Modifier};

/// Operating system family, for modifier mapping and display symbols.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Platform {
    /// macOS: Command is the primary modifier
    Darwin,
    /// Windows: Ctrl is the primary modifier
    Win32,
    /// Linux and everything else: Ctrl is the primary modifier
    Linux,
}

impl Platform {
    /// The platform this binary was built for.
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::Darwin
        } else if cfg!(target_os = "windows") {
            Platform::Win32
        } else {
            Platform::Linux
        }
    }

    /// Parses a platform name (used by the CLI's --platform override).
    pub fn parse(token: &str) -> Option<Self> {
        match token.to_lowercase().as_str() {
            "darwin" | "macos" | "mac" => Some(Platform::Darwin),
            "win32" | "windows" => Some(Platform::Win32),
            "linux" => Some(Platform::Linux),
            _ => None,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Darwin => write!(f, "darwin"),
            Platform::Win32 => write!(f, "win32"),
            Platform::Linux => write!(f, "linux"),
        }
    }
}

/// Raw modifier flags as delivered by the host's event source.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct RawModifiers {
    /// Meta/Command/Super key
    pub meta: bool,
    /// Control key
    pub ctrl: bool,
    /// Shift key
    pub shift: bool,
    /// Alt/Option key
    pub alt: bool,
}

/// Normalizes OS keyboard behaviour for one platform.
///
/// Constructed once per engine; the detected platform is cached for the
/// adapter's lifetime.
#[derive(Clone, Copy, Debug)]
pub struct PlatformAdapter {
    platform: Platform,
}

impl PlatformAdapter {
    /// Adapter for the platform this binary runs on.
    pub fn new() -> Self {
        Self {
            platform: Platform::current(),
        }
    }

    /// Adapter for an explicit platform (tests, CLI previews).
    pub fn with_platform(platform: Platform) -> Self {
        Self { platform }
    }

    /// The platform this adapter normalizes for.
    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// True when the OS-appropriate primary key is held.
    pub fn is_primary_pressed(&self, raw: RawModifiers) -> bool {
        match self.platform {
            Platform::Darwin => raw.meta,
            Platform::Win32 | Platform::Linux => raw.ctrl,
        }
    }

    /// Maps raw event flags to the platform-neutral modifier set.
    ///
    /// Alt only counts as `Secondary` while primary is NOT held; some
    /// layouts report Alt alongside AltGr-style primary chords and would
    /// otherwise double-count.
    pub fn parse_modifiers(&self, raw: RawModifiers) -> Vec<Modifier> {
        let mut modifiers = Vec::new();

        if self.is_primary_pressed(raw) {
            modifiers.push(Modifier::Primary);
        }

        if raw.alt && !self.is_primary_pressed(raw) {
            modifiers.push(Modifier::Secondary);
        }

        if raw.shift {
            modifiers.push(Modifier::Shift);
        }

        modifiers
    }

    /// Renders a combination with platform symbols, for display only.
    ///
    /// Darwin concatenates symbols (⌘⇧K); other platforms join textual
    /// modifier names with '+' (Ctrl+Shift+K).
    pub fn format_key_combo(&self, combination: &KeyCombination) -> String {
        let darwin = self.platform == Platform::Darwin;

        let mut parts: Vec<String> = combination
            .modifiers
            .iter()
            .map(|modifier| self.modifier_symbol(*modifier).to_string())
            .collect();

        parts.push(key_display(&combination.key));

        parts.join(if darwin { "" } else { "+" })
    }

    fn modifier_symbol(&self, modifier: Modifier) -> &'static str {
        match (self.platform, modifier) {
            (Platform::Darwin, Modifier::Primary) => "⌘",
            (Platform::Darwin, Modifier::Secondary) => "⌥",
            (Platform::Darwin, Modifier::Shift) => "⇧",
            (Platform::Darwin, Modifier::Alt) => "⌥",
            (_, Modifier::Primary) => "Ctrl",
            (_, Modifier::Secondary) => "Alt",
            (_, Modifier::Shift) => "Shift",
            (_, Modifier::Alt) => "Alt",
        }
    }

    /// Produces a screen-reader-friendly sentence for a shortcut.
    ///
    /// Example: "Copy prompt. Shortcut: Command C"
    pub fn aria_label(&self, combination: &KeyCombination, description: &str) -> String {
        let mut parts: Vec<String> = combination
            .modifiers
            .iter()
            .map(|modifier| self.modifier_spoken(*modifier).to_string())
            .collect();

        parts.push(key_spoken(&combination.key));

        format!("{}. Shortcut: {}", description, parts.join(" "))
    }

    fn modifier_spoken(&self, modifier: Modifier) -> &'static str {
        match modifier {
            Modifier::Primary => {
                if self.platform == Platform::Darwin {
                    "Command"
                } else {
                    "Control"
                }
            }
            Modifier::Secondary | Modifier::Alt => "Alt",
            Modifier::Shift => "Shift",
        }
    }
}

impl Default for PlatformAdapter {
    fn default() -> Self {
        Self::new()
    }
}

/// Display glyph for a canonical key name.
fn key_display(key: &str) -> String {
    match key {
        "up" => "↑",
        "down" => "↓",
        "left" => "←",
        "right" => "→",
        "enter" => "⏎",
        "escape" => "Esc",
        "backspace" => "⌫",
        "delete" => "⌦",
        "tab" => "⇥",
        "space" => "␣",
        "comma" => ",",
        "period" => ".",
        "slash" => "/",
        "backslash" => "\\",
        "semicolon" => ";",
        "quote" => "'",
        "question" => "?",
        "bracketleft" => "[",
        "bracketright" => "]",
        "minus" => "-",
        "equal" => "=",
        "backquote" => "`",
        k => return k.to_uppercase(),
    }
    .to_string()
}

/// Spoken name for a canonical key, for screen readers.
fn key_spoken(key: &str) -> String {
    match key {
        "up" => "Up arrow",
        "down" => "Down arrow",
        "left" => "Left arrow",
        "right" => "Right arrow",
        "enter" => "Enter",
        "escape" => "Escape",
        "backspace" => "Backspace",
        "delete" => "Delete",
        "tab" => "Tab",
        "space" => "Space",
        "home" => "Home",
        "end" => "End",
        "pageup" => "Page up",
        "pagedown" => "Page down",
        "comma" => "Comma",
        "period" => "Period",
        "slash" => "Slash",
        "backslash" => "Backslash",
        "semicolon" => "Semicolon",
        "quote" => "Quote",
        "question" => "Question mark",
        "bracketleft" => "Left bracket",
        "bracketright" => "Right bracket",
        "minus" => "Minus",
        "equal" => "Equals",
        "backquote" => "Backtick",
        k => return k.to_uppercase(),
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_is_meta_on_darwin() {
        let adapter = PlatformAdapter::with_platform(Platform::Darwin);

        let raw = RawModifiers {
            meta: true,
            ..Default::default()
        };
        assert_eq!(adapter.parse_modifiers(raw), vec![Modifier::Primary]);

        // Ctrl alone is not primary on Darwin
        let raw = RawModifiers {
            ctrl: true,
            ..Default::default()
        };
        assert!(adapter.parse_modifiers(raw).is_empty());
    }

    #[test]
    fn test_primary_is_ctrl_elsewhere() {
        let adapter = PlatformAdapter::with_platform(Platform::Linux);

        let raw = RawModifiers {
            ctrl: true,
            ..Default::default()
        };
        assert_eq!(adapter.parse_modifiers(raw), vec![Modifier::Primary]);

        let raw = RawModifiers {
            meta: true,
            ..Default::default()
        };
        assert!(adapter.parse_modifiers(raw).is_empty());
    }

    #[test]
    fn test_alt_suppressed_while_primary_held() {
        let adapter = PlatformAdapter::with_platform(Platform::Linux);

        let raw = RawModifiers {
            ctrl: true,
            alt: true,
            ..Default::default()
        };
        let modifiers = adapter.parse_modifiers(raw);

        assert_eq!(modifiers, vec![Modifier::Primary]);
    }

    #[test]
    fn test_alt_alone_is_secondary() {
        let adapter = PlatformAdapter::with_platform(Platform::Win32);

        let raw = RawModifiers {
            alt: true,
            ..Default::default()
        };
        assert_eq!(adapter.parse_modifiers(raw), vec![Modifier::Secondary]);
    }

    #[test]
    fn test_shift_always_reported() {
        let adapter = PlatformAdapter::with_platform(Platform::Darwin);

        let raw = RawModifiers {
            meta: true,
            shift: true,
            ..Default::default()
        };
        let modifiers = adapter.parse_modifiers(raw);

        assert!(modifiers.contains(&Modifier::Primary));
        assert!(modifiers.contains(&Modifier::Shift));
    }

    #[test]
    fn test_format_key_combo_darwin() {
        let adapter = PlatformAdapter::with_platform(Platform::Darwin);
        let combo = KeyCombination::new(vec![Modifier::Primary, Modifier::Shift], "k");

        let display = adapter.format_key_combo(&combo);
        assert!(display.contains('⌘'));
        assert!(display.contains('⇧'));
        assert!(display.ends_with('K'));
        assert!(!display.contains('+'), "Darwin concatenates symbols");
    }

    #[test]
    fn test_format_key_combo_linux() {
        let adapter = PlatformAdapter::with_platform(Platform::Linux);
        let combo = KeyCombination::new(vec![Modifier::Primary, Modifier::Shift], "k");

        assert_eq!(adapter.format_key_combo(&combo), "Ctrl+Shift+K");
    }

    #[test]
    fn test_format_named_keys() {
        let adapter = PlatformAdapter::with_platform(Platform::Linux);

        let combo = KeyCombination::new(vec![Modifier::Primary], "comma");
        assert_eq!(adapter.format_key_combo(&combo), "Ctrl+,");

        let combo = KeyCombination::new(vec![], "escape");
        assert_eq!(adapter.format_key_combo(&combo), "Esc");
    }

    #[test]
    fn test_aria_label_darwin() {
        let adapter = PlatformAdapter::with_platform(Platform::Darwin);
        let combo = KeyCombination::new(vec![Modifier::Primary], "n");

        assert_eq!(
            adapter.aria_label(&combo, "New prompt"),
            "New prompt. Shortcut: Command N"
        );
    }

    #[test]
    fn test_aria_label_uses_control_off_darwin() {
        let adapter = PlatformAdapter::with_platform(Platform::Win32);
        let combo = KeyCombination::new(vec![Modifier::Primary], "n");

        assert_eq!(
            adapter.aria_label(&combo, "New prompt"),
            "New prompt. Shortcut: Control N"
        );
    }

    #[test]
    fn test_aria_label_bare_key() {
        let adapter = PlatformAdapter::with_platform(Platform::Linux);
        let combo = KeyCombination::new(vec![], "escape");

        assert_eq!(
            adapter.aria_label(&combo, "Cancel"),
            "Cancel. Shortcut: Escape"
        );
    }
}
