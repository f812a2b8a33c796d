// Copyright 2025 Crrow
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Single vs. double click on the video surface.
//!
//! A click closer than the window to the previous one is a double click. A
//! lone click is held until the window closes, so a double click never also
//! toggles playback.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Second click inside the window: the pending single click is dropped.
    Double,
    /// First click: a single-click action is due at the returned instant.
    Pending(Instant),
}

#[derive(Debug, Clone)]
pub struct ClickDisambiguator {
    window:     Duration,
    last_click: Option<Instant>,
    pending:    Option<Instant>,
}

impl ClickDisambiguator {
    pub const fn new(window: Duration) -> Self {
        Self {
            window,
            last_click: None,
            pending: None,
        }
    }

    pub fn click(&mut self, now: Instant) -> ClickOutcome {
        let previous = self.last_click.replace(now);
        let is_double = previous.is_some_and(|at| now.saturating_duration_since(at) < self.window);
        if is_double {
            self.pending = None;
            ClickOutcome::Double
        } else {
            let due = now + self.window;
            self.pending = Some(due);
            ClickOutcome::Pending(due)
        }
    }

    /// Takes the pending single click if its window has closed.
    pub fn fire_due(&mut self, now: Instant) -> bool {
        match self.pending {
            Some(due) if due <= now => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    pub const fn deadline(&self) -> Option<Instant> { self.pending }

    pub fn cancel(&mut self) {
        self.pending = None;
        self.last_click = None;
    }
}
