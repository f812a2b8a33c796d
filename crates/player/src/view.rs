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

//! Render-ready projection of the player.
//!
//! Layout of the chrome the host draws from this:
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                     ▶                        │  center overlay
//! │━━━━━━━━━━━━━━━━●━━━━━━━━━━━━━━━━━━━━━━━━━━━━━│  progress
//! │ ▶  ⟲10  ⟳10  🔊━━━━  2:37 / 4:01     ⧉   ⛶  │  control bar
//! └──────────────────────────────────────────────┘
//! ```

use serde::Serialize;

use crate::{
    config::PlayerConfig,
    state::PlayerState,
};

/// Base class of the widget container.
pub const CONTAINER_CLASS: &str = "nextplayer";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlsView {
    pub container_class:       String,
    pub style:                 ContainerStyle,
    pub poster:                Option<String>,
    /// Whether the control bar exists at all.
    pub controls_enabled:      bool,
    /// Whether the control bar is shown or faded out.
    pub controls_visible:      bool,
    pub center_overlay_visible: bool,
    /// Fill of the progress bar and thumb offset, 0 to 100.
    pub progress_percent:      f64,
    pub time_display:          String,
    /// Fill of the volume slider, 0 while muted.
    pub volume_fill:           f64,
    pub labels:                ControlLabels,
    /// Whether a context menu on the video is swallowed.
    pub suppress_context_menu: bool,
    pub error_message:         Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerStyle {
    pub width:       String,
    pub height:      String,
    pub color:       String,
    pub color_light: String,
}

/// Accessible labels of the control buttons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlLabels {
    pub play_pause:         &'static str,
    pub mute:               &'static str,
    pub fullscreen:         &'static str,
    pub skip_backward:      String,
    pub skip_forward:       String,
    pub picture_in_picture: &'static str,
}

impl ControlsView {
    pub fn new(state: &PlayerState, config: &PlayerConfig) -> Self {
        let playing = state.is_playing();
        let mut container_class = CONTAINER_CLASS.to_string();
        let extra = config.class_name.trim();
        if !extra.is_empty() {
            container_class.push(' ');
            container_class.push_str(extra);
        }
        if state.is_fullscreen {
            container_class.push_str(" fullscreen");
        }

        let skip = format_skip(config.skip_seconds);
        Self {
            container_class,
            style: ContainerStyle {
                width:       config.width.to_css(),
                height:      config.height.to_css(),
                color:       config.color.to_string(),
                color_light: config.color.light(),
            },
            poster: config.poster.clone(),
            controls_enabled: config.controls,
            controls_visible: state.show_controls || !playing,
            center_overlay_visible: !playing || (state.show_controls && state.is_hovering),
            progress_percent: state.progress.progress_fraction() * 100.0,
            time_display: format!(
                "{} / {}",
                state.progress.formatted_current_time(),
                state.progress.formatted_total_duration()
            ),
            volume_fill: state.volume.effective_volume(),
            labels: ControlLabels {
                play_pause:         if playing { "Pause" } else { "Play" },
                mute:               if state.volume.is_muted { "Unmute" } else { "Mute" },
                fullscreen:         if state.is_fullscreen {
                    "Exit fullscreen"
                } else {
                    "Enter fullscreen"
                },
                skip_backward:      format!("Skip backward {skip} seconds"),
                skip_forward:       format!("Skip forward {skip} seconds"),
                picture_in_picture: "Picture in picture",
            },
            suppress_context_menu: !config.context_menu,
            error_message: state.last_error.as_ref().map(|e| format!("{}: {}", e.code, e.message)),
        }
    }
}

fn format_skip(seconds: f64) -> String {
    if seconds.fract() == 0.0 {
        format!("{seconds:.0}")
    } else {
        format!("{seconds}")
    }
}
