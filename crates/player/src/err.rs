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

use snafu::Snafu;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors raised while configuring or driving a player.
#[derive(Snafu, Debug)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Player source must not be empty"))]
    EmptySource {
        #[snafu(implicit)]
        loc: snafu::Location,
    },

    #[snafu(display("Invalid skip step {seconds}: expected a finite number of seconds above zero"))]
    InvalidSkipStep {
        seconds: f64,
        #[snafu(implicit)]
        loc:     snafu::Location,
    },

    #[snafu(display("Invalid {field} dimension: {value}"))]
    InvalidDimension {
        field: &'static str,
        value: String,
        #[snafu(implicit)]
        loc:   snafu::Location,
    },

    #[snafu(display("Invalid accent color '{value}'"))]
    InvalidColor {
        value: String,
        #[snafu(implicit)]
        loc:   snafu::Location,
    },

    #[snafu(display("Invalid controls timing: {message}"))]
    InvalidTiming {
        message: String,
        #[snafu(implicit)]
        loc:     snafu::Location,
    },

    #[snafu(display("Failed to decode player config"))]
    ConfigCodec {
        source: serde_json::Error,
        #[snafu(implicit)]
        loc:    snafu::Location,
    },

    #[snafu(display("Failed to decode input script"))]
    ScriptCodec {
        source: serde_json::Error,
        #[snafu(implicit)]
        loc:    snafu::Location,
    },

    #[snafu(display("Player has been unmounted"))]
    Unmounted {
        #[snafu(implicit)]
        loc: snafu::Location,
    },
}

/// Platform features that may be missing or refuse a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Feature {
    #[strum(serialize = "fullscreen")]
    Fullscreen,
    #[strum(serialize = "picture-in-picture")]
    PictureInPicture,
}

/// Failure reported by a [`MediaElement`](crate::MediaElement) command.
///
/// These are never surfaced to the widget's caller: the player logs them and
/// leaves its state untouched, waiting for a new user action.
#[derive(Snafu, Debug, Clone, PartialEq, Eq)]
#[snafu(visibility(pub))]
pub enum MediaError {
    #[snafu(display("{feature} is not supported on this platform"))]
    Unsupported { feature: Feature },

    #[snafu(display("playback start was rejected: {reason}"))]
    PlaybackRejected { reason: String },

    #[snafu(display("{feature} request failed: {reason}"))]
    RequestFailed { feature: Feature, reason: String },
}

pub type MediaResult<T = ()> = std::result::Result<T, MediaError>;
