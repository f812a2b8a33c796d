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

//! Keyboard shortcuts.
//!
//! The key listener is page-wide, so every event says where it was aimed.
//! Only events aimed at the page body or inside the widget are ours; anything
//! typed into another focused input is left alone.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::actions::PlayerAction;

/// Physical key codes the player responds to, named after DOM `code` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::EnumString, strum_macros::Display)]
pub enum KeyCode {
    Space,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    KeyF,
    KeyM,
}

impl KeyCode {
    pub const fn action(self) -> PlayerAction {
        match self {
            Self::Space => PlayerAction::TogglePlayPause,
            Self::ArrowLeft => PlayerAction::SkipBackward,
            Self::ArrowRight => PlayerAction::SkipForward,
            Self::ArrowUp => PlayerAction::VolumeUp,
            Self::ArrowDown => PlayerAction::VolumeDown,
            Self::KeyF => PlayerAction::ToggleFullscreen,
            Self::KeyM => PlayerAction::ToggleMute,
        }
    }
}

/// Where a key event was dispatched, resolved by the host via containment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyTarget {
    /// The page body: nothing else has focus.
    #[default]
    Body,
    /// An element inside the widget's subtree.
    Inside,
    /// Some other element on the page.
    Outside,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    /// DOM `code` of the pressed key, e.g. `"Space"` or `"KeyF"`.
    pub code:   String,
    #[serde(default)]
    pub target: KeyTarget,
}

impl KeyEvent {
    pub fn new(code: impl Into<String>, target: KeyTarget) -> Self {
        Self {
            code: code.into(),
            target,
        }
    }

    pub fn on_body(code: impl Into<String>) -> Self { Self::new(code, KeyTarget::Body) }
}

/// Maps a key event to the action it triggers, if the player owns it.
///
/// A returned action means the caller must also suppress the platform's
/// default handling (page scroll on Space and arrows, for instance).
pub fn dispatch(event: &KeyEvent) -> Option<PlayerAction> {
    if event.target == KeyTarget::Outside {
        return None;
    }
    KeyCode::from_str(&event.code).ok().map(KeyCode::action)
}
