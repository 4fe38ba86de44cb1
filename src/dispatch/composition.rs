//! IME composition guard
//!
//! Tracks composition state and the post-composition grace window. Keys
//! pressed while an IME is composing belong to the composition, and for a
//! short window after it ends they usually still do (the keydown that
//! committed the composition arrives after compositionend on several
//! platforms). Both are ignored wholesale by the dispatch loop.
//!
//! The grace window is a deadline rather than a timer: `compositionend`
//! records `now + grace`, and every later query compares against it. A
//! new `compositionstart` simply overwrites the deadline.

use std::time::{Duration, Instant};

/// Grace window after compositionend during which shortcuts stay blocked.
pub const GRACE_PERIOD: Duration = Duration::from_millis(150);

/// Externally observable composition state.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CompositionState {
    /// No composition activity
    Idle,
    /// IME composition in progress
    Composing,
    /// Composition ended, grace window still open
    Suppressed,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum State {
    Idle,
    Composing,
    Suppressed { until: Instant },
}

/// Tracks IME composition and the post-composition grace window.
#[derive(Clone, Debug)]
pub struct CompositionGuard {
    state: State,
    grace: Duration,
    buffer: String,
}

impl CompositionGuard {
    /// Guard with the standard 150 ms grace window.
    pub fn new() -> Self {
        Self::with_grace(GRACE_PERIOD)
    }

    /// Guard with a custom grace window (tests).
    pub fn with_grace(grace: Duration) -> Self {
        Self {
            state: State::Idle,
            grace,
            buffer: String::new(),
        }
    }

    /// Enters composition. A pending grace deadline is discarded: a new
    /// compositionstart before the window closes re-enters `Composing`
    /// directly.
    pub fn composition_start(&mut self) {
        self.state = State::Composing;
        self.buffer.clear();
    }

    /// Updates the buffered composition text.
    pub fn composition_update(&mut self, data: &str) {
        self.buffer = data.to_string();
    }

    /// Ends composition and opens the grace window.
    pub fn composition_end(&mut self, data: &str) {
        self.composition_end_at(data, Instant::now());
    }

    /// Ends composition with an explicit clock (tests).
    pub fn composition_end_at(&mut self, data: &str, now: Instant) {
        self.state = State::Suppressed {
            until: now + self.grace,
        };
        self.buffer = data.to_string();
    }

    /// True while composing or inside the grace window.
    pub fn is_blocked(&self) -> bool {
        self.is_blocked_at(Instant::now())
    }

    /// Blocking check with an explicit clock (tests).
    pub fn is_blocked_at(&self, now: Instant) -> bool {
        match self.state {
            State::Idle => false,
            State::Composing => true,
            State::Suppressed { until } => now < until,
        }
    }

    /// True while the IME is actively composing.
    pub fn is_composing(&self) -> bool {
        self.state == State::Composing
    }

    /// The effective state as of `now`.
    pub fn state_at(&self, now: Instant) -> CompositionState {
        match self.state {
            State::Idle => CompositionState::Idle,
            State::Composing => CompositionState::Composing,
            State::Suppressed { until } if now < until => CompositionState::Suppressed,
            State::Suppressed { .. } => CompositionState::Idle,
        }
    }

    /// Text buffered by the current/last composition.
    pub fn buffered_text(&self) -> &str {
        &self.buffer
    }

    /// Drops all composition state, closing any open grace window.
    pub fn reset(&mut self) {
        self.state = State::Idle;
        self.buffer.clear();
    }
}

impl Default for CompositionGuard {
    fn default() -> Self {
        Self::new()
    }
}
