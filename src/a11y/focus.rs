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

//! Focus management
//!
//! - `FocusHistory`: a bounded stack of previously focused elements, so
//!   closing a modal can restore focus where the user was
//! - `FocusTrap`: Tab/Shift+Tab cycling confined to a container's
//!   focusable elements while a modal is active
//!
//! Elements are referred to by `NodeId`, an opaque id the host assigns;
//! querying the DOM for focusable elements stays on the host's side.

use serde::{Deserialize, Serialize};

/// Opaque host-assigned identifier for a focusable element.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct NodeId(pub u64);

/// Upper bound on remembered focus positions.
const HISTORY_CAP: usize = 10;

/// Bounded stack of previously focused elements.
///
/// The cap keeps long sessions from accumulating stale references; the
/// oldest entry is dropped first.
#[derive(Clone, Debug, Default)]
pub struct FocusHistory {
    entries: Vec<NodeId>,
}

impl FocusHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remembers the element focus is moving away from.
    ///
    /// Consecutive duplicates are skipped so restore never lands on the
    /// element the user is already on.
    pub fn record(&mut self, node: NodeId) {
        if self.entries.last() == Some(&node) {
            return;
        }

        self.entries.push(node);

        if self.entries.len() > HISTORY_CAP {
            self.entries.remove(0);
        }
    }

    /// Pops the most recent entry for restore-on-close.
    pub fn restore(&mut self) -> Option<NodeId> {
        self.entries.pop()
    }

    /// Number of remembered positions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is remembered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forgets everything.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Tab/Shift+Tab cycling confined to one container.
///
/// The host collects the container's focusable elements in document
/// order and asks the trap where a Tab at the edges should land. Inside
/// the container the native tab order proceeds untouched.
#[derive(Clone, Debug)]
pub struct FocusTrap {
    focusables: Vec<NodeId>,
}

impl FocusTrap {
    /// Trap over the container's focusable elements, in document order.
    pub fn new(focusables: Vec<NodeId>) -> Self {
        Self { focusables }
    }

    /// Where focus should land when the trap activates.
    pub fn initial_focus(&self) -> Option<NodeId> {
        self.focusables.first().copied()
    }

    /// The wrap target for a Tab press, if the trap has to intervene.
    ///
    /// Returns `Some(first)` for Tab on the last element, `Some(last)`
    /// for Shift+Tab on the first, and `None` everywhere else (native
    /// order proceeds). Focus outside the container also wraps to an
    /// edge, pulling focus back in.
    pub fn wrap_target(&self, current: Option<NodeId>, backwards: bool) -> Option<NodeId> {
        let first = *self.focusables.first()?;
        let last = *self.focusables.last()?;

        let current = match current {
            Some(node) if self.focusables.contains(&node) => node,
            // Focus escaped the container; pull it back to an edge
            _ => return Some(if backwards { last } else { first }),
        };

        if backwards && current == first {
            Some(last)
        } else if !backwards && current == last {
            Some(first)
        } else {
            None
        }
    }

    /// Number of focusable elements in the trap.
    pub fn len(&self) -> usize {
        self.focusables.len()
    }

    /// True when the container has nothing focusable.
    pub fn is_empty(&self) -> bool {
        self.focusables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_records_and_restores() {
        let mut history = FocusHistory::new();
        history.record(NodeId(1));
        history.record(NodeId(2));

        assert_eq!(history.restore(), Some(NodeId(2)));
        assert_eq!(history.restore(), Some(NodeId(1)));
        assert_eq!(history.restore(), None);
    }

    #[test]
    fn test_history_skips_consecutive_duplicates() {
        let mut history = FocusHistory::new();
        history.record(NodeId(1));
        history.record(NodeId(1));

        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_history_caps_at_ten() {
        let mut history = FocusHistory::new();
        for i in 0..15 {
            history.record(NodeId(i));
        }

        assert_eq!(history.len(), 10);
        // Oldest entries were dropped first
        let mut last = None;
        while let Some(node) = history.restore() {
            last = Some(node);
        }
        assert_eq!(last, Some(NodeId(5)));
    }

    #[test]
    fn test_trap_wraps_forward_at_last() {
        let trap = FocusTrap::new(vec![NodeId(1), NodeId(2), NodeId(3)]);

        assert_eq!(trap.wrap_target(Some(NodeId(3)), false), Some(NodeId(1)));
        assert_eq!(trap.wrap_target(Some(NodeId(2)), false), None, "Native order inside");
    }

    #[test]
    fn test_trap_wraps_backward_at_first() {
        let trap = FocusTrap::new(vec![NodeId(1), NodeId(2), NodeId(3)]);

        assert_eq!(trap.wrap_target(Some(NodeId(1)), true), Some(NodeId(3)));
        assert_eq!(trap.wrap_target(Some(NodeId(2)), true), None);
    }

    #[test]
    fn test_trap_pulls_escaped_focus_back() {
        let trap = FocusTrap::new(vec![NodeId(1), NodeId(2)]);

        assert_eq!(trap.wrap_target(Some(NodeId(99)), false), Some(NodeId(1)));
        assert_eq!(trap.wrap_target(None, true), Some(NodeId(2)));
    }

    #[test]
    fn test_empty_trap_never_intervenes() {
        let trap = FocusTrap::new(Vec::new());

        assert_eq!(trap.initial_focus(), None);
        assert_eq!(trap.wrap_target(Some(NodeId(1)), false), None);
    }

    #[test]
    fn test_initial_focus_is_first() {
        let trap = FocusTrap::new(vec![NodeId(7), NodeId(8)]);
        assert_eq!(trap.initial_focus(), Some(NodeId(7)));
    }
}
