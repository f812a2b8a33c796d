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

//! Per-mount player configuration.
//!
//! Field names serialize in camelCase so a config file reads like the
//! widget's props (`src`, `skipSeconds`, `contextMenu`, ...).

use std::time::Duration;

use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;
use snafu::{ResultExt, ensure};

use crate::err::{
    ConfigCodecSnafu, EmptySourceSnafu, InvalidColorSnafu, InvalidDimensionSnafu,
    InvalidSkipStepSnafu, InvalidTimingSnafu, Result,
};

/// Default seek step for the skip buttons and arrow keys.
pub const DEFAULT_SKIP_SECONDS: f64 = 10.0;

/// Default accent color of the progress bar and active buttons.
pub const DEFAULT_ACCENT_COLOR: &str = "#ff0000";

/// Alpha suffix appended to the accent color for its light variant.
const LIGHT_ALPHA_SUFFIX: &str = "44";

/// Immutable configuration supplied by the caller when the player mounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, SmartDefault, bon::Builder)]
#[builder(on(String, into))]
#[serde(default, rename_all = "camelCase")]
pub struct PlayerConfig {
    /// URL of the media resource. Required.
    #[builder(getter)]
    pub src: String,

    /// Whether the custom control bar is rendered.
    #[default = true]
    #[builder(default = true, getter)]
    pub controls: bool,

    /// Start playback once metadata has loaded.
    #[builder(default, getter)]
    pub autoplay: bool,

    /// Initial muted flag.
    #[builder(default, getter)]
    pub muted: bool,

    #[serde(rename = "loop")]
    #[builder(default, getter)]
    pub looping: bool,

    /// Allow the platform context menu on the video surface.
    #[builder(default, getter)]
    pub context_menu: bool,

    pub poster: Option<String>,

    #[default(_code = "Dimension::css(\"100%\")")]
    #[builder(default = Dimension::css("100%"), into)]
    pub width: Dimension,

    #[default(_code = "Dimension::css(\"auto\")")]
    #[builder(default = Dimension::css("auto"), into)]
    pub height: Dimension,

    /// Extra class appended to the container class list.
    #[builder(default)]
    pub class_name: String,

    #[builder(default, into)]
    pub color: AccentColor,

    /// Seconds moved by skip backward/forward.
    #[default(DEFAULT_SKIP_SECONDS)]
    #[builder(default = DEFAULT_SKIP_SECONDS, getter)]
    pub skip_seconds: f64,

    #[builder(default)]
    pub timing: ControlsTiming,
}

impl PlayerConfig {
    /// Decodes a JSON config and validates it.
    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw).context(ConfigCodecSnafu)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every field that a caller can get wrong.
    pub fn validate(&self) -> Result<()> {
        ensure!(!self.src.trim().is_empty(), EmptySourceSnafu);
        ensure!(
            self.skip_seconds.is_finite() && self.skip_seconds > 0.0,
            InvalidSkipStepSnafu {
                seconds: self.skip_seconds,
            }
        );
        self.width.validate("width")?;
        self.height.validate("height")?;
        self.color.validate()?;
        self.timing.validate()
    }
}

/// Delays that drive the auto-hide timer and click disambiguation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, SmartDefault, bon::Builder)]
#[serde(default, rename_all = "camelCase")]
pub struct ControlsTiming {
    /// Hide delay after the pointer leaves, or after playback starts
    /// without hover.
    #[default = 1000]
    #[builder(default = 1000)]
    pub hide_after_leave_ms: u64,

    /// Hide delay after pointer movement over the video while not hovering.
    #[default = 3000]
    #[builder(default = 3000)]
    pub hide_after_idle_ms: u64,

    /// Two clicks closer than this count as a double click. A single click
    /// waits the same amount before toggling playback.
    #[default = 300]
    #[builder(default = 300)]
    pub double_click_window_ms: u64,
}

impl ControlsTiming {
    pub const fn hide_after_leave(&self) -> Duration { Duration::from_millis(self.hide_after_leave_ms) }

    pub const fn hide_after_idle(&self) -> Duration { Duration::from_millis(self.hide_after_idle_ms) }

    pub const fn double_click_window(&self) -> Duration {
        Duration::from_millis(self.double_click_window_ms)
    }

    fn validate(&self) -> Result<()> {
        ensure!(
            self.hide_after_leave_ms > 0 && self.hide_after_idle_ms > 0,
            InvalidTimingSnafu {
                message: "hide delays must be above zero",
            }
        );
        ensure!(
            self.hide_after_leave_ms <= self.hide_after_idle_ms,
            InvalidTimingSnafu {
                message: format!(
                    "leave delay {}ms exceeds idle delay {}ms",
                    self.hide_after_leave_ms, self.hide_after_idle_ms
                ),
            }
        );
        ensure!(
            self.double_click_window_ms > 0,
            InvalidTimingSnafu {
                message: "double click window must be above zero",
            }
        );
        Ok(())
    }
}

/// A CSS length, or a unitless number that renders as pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Dimension {
    Pixels(f64),
    Css(String),
}

impl Dimension {
    pub fn css(value: impl Into<String>) -> Self { Self::Css(value.into()) }

    /// Renders the value the way it lands in the container's style.
    pub fn to_css(&self) -> String {
        match self {
            Self::Pixels(px) => format!("{px}px"),
            Self::Css(value) => value.clone(),
        }
    }

    fn validate(&self, field: &'static str) -> Result<()> {
        let valid = match self {
            Self::Pixels(px) => px.is_finite() && *px >= 0.0,
            Self::Css(value) => !value.trim().is_empty(),
        };
        ensure!(
            valid,
            InvalidDimensionSnafu {
                field,
                value: self.to_css(),
            }
        );
        Ok(())
    }
}

impl From<f64> for Dimension {
    fn from(px: f64) -> Self { Self::Pixels(px) }
}

impl From<u32> for Dimension {
    fn from(px: u32) -> Self { Self::Pixels(f64::from(px)) }
}

impl From<&str> for Dimension {
    fn from(value: &str) -> Self { Self::css(value) }
}

impl From<String> for Dimension {
    fn from(value: String) -> Self { Self::Css(value) }
}

/// Accent color of the player chrome, kept as the caller wrote it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_more::Display, derive_more::From)]
#[serde(transparent)]
pub struct AccentColor(String);

impl Default for AccentColor {
    fn default() -> Self { Self::new(DEFAULT_ACCENT_COLOR) }
}

impl AccentColor {
    pub fn new(value: impl Into<String>) -> Self { Self(value.into()) }

    pub fn as_str(&self) -> &str { &self.0 }

    /// The translucent variant used at the end of the progress gradient.
    pub fn light(&self) -> String { format!("{}{LIGHT_ALPHA_SUFFIX}", self.0) }

    fn validate(&self) -> Result<()> {
        let value = self.0.trim();
        let valid = match value.strip_prefix('#') {
            Some(hex) => {
                matches!(hex.len(), 3 | 4 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit())
            }
            None => !value.is_empty(),
        };
        ensure!(
            valid,
            InvalidColorSnafu {
                value: self.0.clone(),
            }
        );
        Ok(())
    }
}

impl From<&str> for AccentColor {
    fn from(value: &str) -> Self { Self::new(value) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn defaults_match_widget_props() {
        let config = PlayerConfig::builder().src("movie.mp4").build();
        assert!(config.controls);
        assert!(!config.autoplay);
        assert!(!config.muted);
        assert!(!config.looping);
        assert!(!config.context_menu);
        assert_eq!(config.width.to_css(), "100%");
        assert_eq!(config.height.to_css(), "auto");
        assert_eq!(config.color.as_str(), "#ff0000");
        assert!((config.skip_seconds - 10.0).abs() < f64::EPSILON);
        assert_eq!(config.timing.hide_after_leave(), Duration::from_millis(1000));
        assert_eq!(config.timing.hide_after_idle(), Duration::from_millis(3000));
        assert_eq!(config.timing.double_click_window(), Duration::from_millis(300));
        config.validate().unwrap();
    }

    #[test]
    fn json_uses_prop_names() {
        let config = PlayerConfig::from_json(
            r##"{"src":"a.mp4","autoplay":true,"loop":true,"contextMenu":true,
                "width":640,"height":"360px","color":"#00ff00","skipSeconds":5}"##,
        )
        .unwrap();
        assert!(config.autoplay);
        assert!(config.looping);
        assert!(config.context_menu);
        assert_eq!(config.width, Dimension::Pixels(640.0));
        assert_eq!(config.width.to_css(), "640px");
        assert_eq!(config.height.to_css(), "360px");
        assert_eq!(config.color.light(), "#00ff0044");
        assert!((config.skip_seconds - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_source_is_rejected() {
        let err = PlayerConfig::from_json("{}").unwrap_err();
        assert!(matches!(err, Error::EmptySource { .. }), "{err}");
    }

    #[test]
    fn malformed_json_is_a_codec_error() {
        let err = PlayerConfig::from_json("{\"src\":").unwrap_err();
        assert!(matches!(err, Error::ConfigCodec { .. }));
    }

    #[test]
    fn skip_step_must_be_positive() {
        for seconds in [0.0, -3.0, f64::NAN, f64::INFINITY] {
            let config = PlayerConfig::builder()
                .src("a.mp4")
                .skip_seconds(seconds)
                .build();
            assert!(matches!(
                config.validate(),
                Err(Error::InvalidSkipStep { .. })
            ));
        }
    }

    #[test]
    fn colors_and_dimensions_are_checked() {
        let bad_color = PlayerConfig::builder().src("a.mp4").color("#12345").build();
        assert!(matches!(bad_color.validate(), Err(Error::InvalidColor { .. })));

        let named = PlayerConfig::builder().src("a.mp4").color("rebeccapurple").build();
        named.validate().unwrap();

        let bad_width = PlayerConfig::builder().src("a.mp4").width(-1.0).build();
        assert!(matches!(
            bad_width.validate(),
            Err(Error::InvalidDimension { field: "width", .. })
        ));
    }

    #[test]
    fn leave_delay_cannot_exceed_idle_delay() {
        let timing = ControlsTiming::builder()
            .hide_after_leave_ms(5000)
            .hide_after_idle_ms(3000)
            .build();
        let config = PlayerConfig::builder().src("a.mp4").timing(timing).build();
        assert!(matches!(config.validate(), Err(Error::InvalidTiming { .. })));
    }
}
