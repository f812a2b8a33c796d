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

//! NextPlayer - headless controller for a themeable video player widget
//!
//! The crate owns everything a video player widget decides: play/pause,
//! seeking, volume and mute, fullscreen and picture-in-picture toggles,
//! keyboard shortcuts, click disambiguation and the auto-hide timer of the
//! control overlay. Rendering and the native media element stay with the
//! host, which talks to the player through [`MediaElement`] and
//! [`PlayerInput`] and draws from [`ControlsView`].

pub mod actions;
pub mod callbacks;
pub mod clicks;
pub mod config;
pub mod driver;
pub mod err;
pub mod geometry;
pub mod keyboard;
pub mod listeners;
pub mod media;
pub mod player;
pub mod script;
pub mod state;
pub mod view;

pub use actions::PlayerAction;
pub use callbacks::PlayerCallbacks;
pub use config::{AccentColor, ControlsTiming, Dimension, PlayerConfig};
pub use driver::{PlayerHandle, Snapshot, spawn};
pub use err::{Error, MediaError, Result};
pub use geometry::Bounds;
pub use keyboard::{KeyEvent, KeyTarget};
pub use media::{MediaElement, MediaLoadError, MediaSignal, MediaSource, RecordingMedia};
pub use player::{Player, PlayerInput, Response};
pub use script::{Script, Step};
pub use state::PlayerState;
pub use view::ControlsView;
