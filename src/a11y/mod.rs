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

//! Accessibility support
//!
//! Screen-reader announcements and keyboard focus management. Nothing in
//! this module sits on the matching critical path: the dispatch loop
//! calls into it after resolution and execution.
//!
//! - `announcer`: live-region announcements (polite/assertive) for
//!   shortcut activation and success/failure results
//! - `focus`: bounded focus history for restore-on-close, and the
//!   Tab/Shift+Tab focus trap used while modals are open
//!
//! The DOM stays on the host's side: the live region is a trait the host
//! implements, and focusable elements are referred to by opaque ids.

pub mod announcer;
pub mod focus;

pub use announcer::{Announcer, AnnouncerConfig, LiveRegion, NullLiveRegion, Politeness};
pub use focus::{FocusHistory, FocusTrap, NodeId};
