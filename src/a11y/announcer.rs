//! Screen-reader announcements
//!
//! The announcer pushes transient text into a host-provided live region.
//! Politeness follows WCAG practice: routine confirmations are polite,
//! failures are assertive so they interrupt.

use crate::core::types::ShortcutDefinition;
use crate::platform::PlatformAdapter;

/// aria-live politeness level for an announcement.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Politeness {
    /// Read when the screen reader is idle
    Polite,
    /// Interrupts current speech
    Assertive,
}

/// Host-provided sink for announcements (typically an aria-live element).
pub trait LiveRegion {
    fn announce(&mut self, message: &str, politeness: Politeness);
}

/// A live region that swallows everything; for tests and headless tools.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullLiveRegion;

impl LiveRegion for NullLiveRegion {
    fn announce(&mut self, _message: &str, _politeness: Politeness) {}
}

/// Which announcement categories are enabled.
#[derive(Clone, Copy, Debug)]
pub struct AnnouncerConfig {
    /// Announce shortcut activation (the aria label)
    pub announce_shortcuts: bool,
    /// Announce execution results (completed/failed)
    pub announce_results: bool,
}

impl Default for AnnouncerConfig {
    fn default() -> Self {
        Self {
            announce_shortcuts: true,
            announce_results: true,
        }
    }
}

/// Emits screen-reader announcements for dispatch events.
pub struct Announcer {
    region: Box<dyn LiveRegion>,
    config: AnnouncerConfig,
}

impl Announcer {
    /// Announcer over a host live region, everything enabled.
    pub fn new(region: Box<dyn LiveRegion>) -> Self {
        Self {
            region,
            config: AnnouncerConfig::default(),
        }
    }

    /// Announcer with explicit category switches.
    pub fn with_config(region: Box<dyn LiveRegion>, config: AnnouncerConfig) -> Self {
        Self { region, config }
    }

    /// Pushes a raw message into the live region.
    pub fn announce(&mut self, message: &str, politeness: Politeness) {
        self.region.announce(message, politeness);
    }

    /// Announces a shortcut activation using its spoken aria label.
    pub fn announce_shortcut(&mut self, def: &ShortcutDefinition, platform: &PlatformAdapter) {
        if !self.config.announce_shortcuts {
            return;
        }

        let label = platform.aria_label(&def.combination, def.description());
        self.region.announce(&label, Politeness::Polite);
    }

    /// Announces an execution result.
    ///
    /// Failures are assertive; this is the only user-visible failure
    /// surface the engine has.
    pub fn announce_result(&mut self, description: &str, success: bool, detail: Option<&str>) {
        if !self.config.announce_results {
            return;
        }

        let mut message = if success {
            format!("{} completed", description)
        } else {
            format!("{} failed", description)
        };

        if let Some(detail) = detail {
            message.push_str(". ");
            message.push_str(detail);
        }

        let politeness = if success {
            Politeness::Polite
        } else {
            Politeness::Assertive
        };

        self.region.announce(&message, politeness);
    }
}
