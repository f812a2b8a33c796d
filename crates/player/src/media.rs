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

//! The boundary between the widget and the native playable element.
//!
//! The player never reads playback state back from the element. Commands go
//! out through [`MediaElement`]; confirmations come back in as
//! [`MediaSignal`]s delivered by the host.

use std::sync::Arc;

use num_enum::TryFromPrimitive;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::{
    config::PlayerConfig,
    err::{Feature, MediaError, MediaResult},
};

/// What the element is bound to on mount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaSource {
    pub src:      String,
    pub poster:   Option<String>,
    pub autoplay: bool,
    pub muted:    bool,
    pub looping:  bool,
}

impl From<&PlayerConfig> for MediaSource {
    fn from(config: &PlayerConfig) -> Self {
        Self {
            src:      config.src.clone(),
            poster:   config.poster.clone(),
            autoplay: config.autoplay,
            muted:    config.muted,
            looping:  config.looping,
        }
    }
}

/// Command surface of a native playable element.
///
/// Requests that the platform completes asynchronously (play, fullscreen,
/// picture-in-picture) return as soon as they are issued. Success shows up
/// later as a signal; an `Err` means the request was refused outright.
pub trait MediaElement: Send {
    /// Binds the element to a source and starts listening for its signals.
    fn attach(&mut self, source: &MediaSource);

    /// Stops listening for signals. Called exactly once on unmount.
    fn detach(&mut self);

    fn play(&mut self) -> MediaResult;

    fn pause(&mut self);

    fn seek_to(&mut self, seconds: f64);

    fn set_volume(&mut self, volume: f64);

    fn set_muted(&mut self, muted: bool);

    /// Requests fullscreen for the widget's container, not the bare video.
    fn request_fullscreen(&mut self) -> MediaResult;

    fn exit_fullscreen(&mut self) -> MediaResult;

    fn request_picture_in_picture(&mut self) -> MediaResult;

    fn exit_picture_in_picture(&mut self) -> MediaResult;
}

impl<M: MediaElement + ?Sized> MediaElement for Box<M> {
    fn attach(&mut self, source: &MediaSource) { (**self).attach(source) }

    fn detach(&mut self) { (**self).detach() }

    fn play(&mut self) -> MediaResult { (**self).play() }

    fn pause(&mut self) { (**self).pause() }

    fn seek_to(&mut self, seconds: f64) { (**self).seek_to(seconds) }

    fn set_volume(&mut self, volume: f64) { (**self).set_volume(volume) }

    fn set_muted(&mut self, muted: bool) { (**self).set_muted(muted) }

    fn request_fullscreen(&mut self) -> MediaResult { (**self).request_fullscreen() }

    fn exit_fullscreen(&mut self) -> MediaResult { (**self).exit_fullscreen() }

    fn request_picture_in_picture(&mut self) -> MediaResult { (**self).request_picture_in_picture() }

    fn exit_picture_in_picture(&mut self) -> MediaResult { (**self).exit_picture_in_picture() }
}

/// Native signals the element emits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "signal", rename_all = "snake_case")]
pub enum MediaSignal {
    Play,
    Pause,
    #[serde(rename_all = "camelCase")]
    TimeUpdate {
        current_time: f64,
    },
    LoadedMetadata {
        duration: f64,
    },
    Ended,
    Error(MediaLoadError),
}

/// Load or decode failure reported by the element itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaLoadError {
    pub code:    MediaErrorCode,
    pub message: String,
}

impl MediaLoadError {
    /// Builds an error from the numeric code an HTML media element reports.
    /// Unknown codes collapse into [`MediaErrorCode::Unknown`].
    pub fn from_code(code: u8, message: impl Into<String>) -> Self {
        Self {
            code:    MediaErrorCode::try_from(code).unwrap_or(MediaErrorCode::Unknown),
            message: message.into(),
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    TryFromPrimitive,
    strum_macros::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum MediaErrorCode {
    Unknown = 0,
    Aborted = 1,
    Network = 2,
    Decode = 3,
    SourceNotSupported = 4,
}

/// A command issued to a [`RecordingMedia`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum MediaCommand {
    Attach { source: MediaSource },
    Detach,
    Play,
    Pause,
    SeekTo { seconds: f64 },
    SetVolume { volume: f64 },
    SetMuted { muted: bool },
    RequestFullscreen,
    ExitFullscreen,
    RequestPictureInPicture,
    ExitPictureInPicture,
}

/// In-memory element that records every command it receives.
///
/// Clones share the same log, so a test or host can keep one clone while the
/// player owns another. Requests can be configured to fail the way a browser
/// refuses autoplay or lacks picture-in-picture.
#[derive(Debug, Clone, Default)]
pub struct RecordingMedia {
    inner: Arc<Mutex<Recording>>,
}

#[derive(Debug, Default)]
struct Recording {
    commands:          Vec<MediaCommand>,
    reject_play:       Option<String>,
    reject_fullscreen: bool,
    deny_fullscreen:   Option<String>,
    reject_pip:        bool,
}

impl RecordingMedia {
    pub fn new() -> Self { Self::default() }

    /// Refuses every subsequent play request with `reason`.
    #[must_use]
    pub fn rejecting_play(self, reason: impl Into<String>) -> Self {
        self.inner.lock().reject_play = Some(reason.into());
        self
    }

    #[must_use]
    pub fn without_fullscreen(self) -> Self {
        self.inner.lock().reject_fullscreen = true;
        self
    }

    /// Fails every fullscreen request with `reason`, the way a browser
    /// denies fullscreen outside a user gesture.
    #[must_use]
    pub fn denying_fullscreen(self, reason: impl Into<String>) -> Self {
        self.inner.lock().deny_fullscreen = Some(reason.into());
        self
    }

    #[must_use]
    pub fn without_picture_in_picture(self) -> Self {
        self.inner.lock().reject_pip = true;
        self
    }

    /// Returns a copy of every command recorded so far.
    pub fn commands(&self) -> Vec<MediaCommand> { self.inner.lock().commands.clone() }

    /// Counts recorded commands matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&MediaCommand) -> bool) -> usize {
        self.inner.lock().commands.iter().filter(|c| predicate(c)).count()
    }

    pub fn clear(&self) { self.inner.lock().commands.clear(); }

    fn record(&self, command: MediaCommand) { self.inner.lock().commands.push(command); }
}

impl MediaElement for RecordingMedia {
    fn attach(&mut self, source: &MediaSource) {
        self.record(MediaCommand::Attach {
            source: source.clone(),
        });
    }

    fn detach(&mut self) { self.record(MediaCommand::Detach); }

    fn play(&mut self) -> MediaResult {
        self.record(MediaCommand::Play);
        match self.inner.lock().reject_play.clone() {
            Some(reason) => Err(MediaError::PlaybackRejected { reason }),
            None => Ok(()),
        }
    }

    fn pause(&mut self) { self.record(MediaCommand::Pause); }

    fn seek_to(&mut self, seconds: f64) { self.record(MediaCommand::SeekTo { seconds }); }

    fn set_volume(&mut self, volume: f64) { self.record(MediaCommand::SetVolume { volume }); }

    fn set_muted(&mut self, muted: bool) { self.record(MediaCommand::SetMuted { muted }); }

    fn request_fullscreen(&mut self) -> MediaResult {
        self.record(MediaCommand::RequestFullscreen);
        self.check(Feature::Fullscreen)
    }

    fn exit_fullscreen(&mut self) -> MediaResult {
        self.record(MediaCommand::ExitFullscreen);
        self.check(Feature::Fullscreen)
    }

    fn request_picture_in_picture(&mut self) -> MediaResult {
        self.record(MediaCommand::RequestPictureInPicture);
        self.check(Feature::PictureInPicture)
    }

    fn exit_picture_in_picture(&mut self) -> MediaResult {
        self.record(MediaCommand::ExitPictureInPicture);
        self.check(Feature::PictureInPicture)
    }
}

impl RecordingMedia {
    fn check(&self, feature: Feature) -> MediaResult {
        let inner = self.inner.lock();
        let (unsupported, denied) = match feature {
            Feature::Fullscreen => (inner.reject_fullscreen, inner.deny_fullscreen.clone()),
            Feature::PictureInPicture => (inner.reject_pip, None),
        };
        if unsupported {
            return Err(MediaError::Unsupported { feature });
        }
        denied.map_or(Ok(()), |reason| Err(MediaError::RequestFailed { feature, reason }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_log() {
        let media = RecordingMedia::new();
        let mut owned = media.clone();
        owned.pause();
        owned.seek_to(4.0);
        assert_eq!(
            media.commands(),
            vec![MediaCommand::Pause, MediaCommand::SeekTo { seconds: 4.0 }]
        );
    }

    #[test]
    fn rejected_requests_are_still_recorded() {
        let mut media = RecordingMedia::new()
            .rejecting_play("autoplay blocked")
            .without_picture_in_picture();
        assert!(matches!(media.play(), Err(MediaError::PlaybackRejected { .. })));
        assert_eq!(
            media.request_picture_in_picture(),
            Err(MediaError::Unsupported {
                feature: Feature::PictureInPicture
            })
        );
        assert!(media.request_fullscreen().is_ok());
        assert_eq!(media.count(|c| matches!(c, MediaCommand::Play)), 1);
    }

    #[test]
    fn denied_fullscreen_reports_the_reason() {
        let mut media = RecordingMedia::new().denying_fullscreen("no user gesture");
        assert_eq!(
            media.request_fullscreen(),
            Err(MediaError::RequestFailed {
                feature: Feature::Fullscreen,
                reason:  "no user gesture".to_string(),
            })
        );
        assert!(media.request_picture_in_picture().is_ok());
        assert_eq!(
            media.request_fullscreen().unwrap_err().to_string(),
            "fullscreen request failed: no user gesture"
        );
    }

    #[test]
    fn error_codes_follow_the_html_numbering() {
        assert_eq!(MediaLoadError::from_code(2, "offline").code, MediaErrorCode::Network);
        assert_eq!(
            MediaLoadError::from_code(4, "bad mime").code,
            MediaErrorCode::SourceNotSupported
        );
        assert_eq!(MediaLoadError::from_code(99, "?").code, MediaErrorCode::Unknown);
    }

    #[test]
    fn signals_decode_from_json() {
        let signal: MediaSignal =
            serde_json::from_str(r#"{"signal":"time_update","currentTime":12.5}"#).unwrap();
        assert_eq!(signal, MediaSignal::TimeUpdate { current_time: 12.5 });
    }
}
