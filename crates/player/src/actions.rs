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

//! Player actions shared by control buttons, keyboard shortcuts and scripts.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, strum_macros::AsRefStr)]
#[serde(tag = "action", rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PlayerAction {
    TogglePlayPause,
    SkipBackward,
    SkipForward,
    VolumeUp,
    VolumeDown,
    /// Volume slider moved to an absolute level.
    SetVolume { volume: f64 },
    ToggleMute,
    ToggleFullscreen,
    TogglePictureInPicture,
    /// Absolute seek in seconds.
    SeekTo { seconds: f64 },
}
