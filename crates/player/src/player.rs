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

//! The player widget.
//!
//! A [`Player`] is mounted over one [`MediaElement`] and then fed
//! [`PlayerInput`]s by its host together with the current instant. Each input
//! runs to completion; timers (auto-hide, pending single click) are plain
//! deadlines the host wakes the player for through [`Player::advance`].

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use crate::{
    actions::PlayerAction,
    callbacks::PlayerCallbacks,
    clicks::{ClickDisambiguator, ClickOutcome},
    config::PlayerConfig,
    err::Result,
    geometry::Bounds,
    keyboard::{self, KeyEvent},
    listeners::{ListenerKind, ListenerSet},
    media::{MediaElement, MediaSignal, MediaSource},
    state::{PlayerState, VisibilityController},
    view::ControlsView,
};

/// Everything the host can forward to a mounted player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum PlayerInput {
    /// A native signal from the bound media element.
    Media(MediaSignal),
    /// The page entered or left fullscreen.
    FullscreenChange { active: bool },
    /// The video entered or left picture-in-picture.
    PictureInPictureChange { active: bool },
    PointerEnter,
    PointerLeave,
    /// Pointer moved over the video surface.
    PointerMove,
    /// Click on the video surface.
    SurfaceClick,
    /// Context menu requested on the video surface.
    ContextMenu,
    /// Click on the progress bar at client x-coordinate `x`.
    ProgressClick { x: f64, bounds: Bounds },
    /// Page-wide key press.
    Key(KeyEvent),
    /// A control button was pressed.
    Action(PlayerAction),
}

impl PlayerInput {
    /// The subscription an input arrives through. `None` for events
    /// delivered straight to the widget's own elements.
    const fn listener(&self) -> Option<ListenerKind> {
        let kind = match self {
            Self::Media(signal) => match signal {
                MediaSignal::Play => ListenerKind::MediaPlay,
                MediaSignal::Pause => ListenerKind::MediaPause,
                MediaSignal::TimeUpdate { .. } => ListenerKind::MediaTimeUpdate,
                MediaSignal::LoadedMetadata { .. } => ListenerKind::MediaLoadedMetadata,
                MediaSignal::Ended => ListenerKind::MediaEnded,
                MediaSignal::Error(_) => ListenerKind::MediaError,
            },
            Self::FullscreenChange { .. } => ListenerKind::DocumentFullscreenChange,
            Self::PictureInPictureChange { .. } => ListenerKind::PictureInPictureChange,
            Self::Key(_) => ListenerKind::DocumentKeyDown,
            _ => return None,
        };
        Some(kind)
    }
}

/// How the host should treat the platform event it forwarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    /// The player did not act on the event.
    Ignored,
    Handled,
    /// Handled, and the platform's default action must be suppressed.
    PreventDefault,
}

/// A mounted player widget over media element `M`.
pub struct Player<M: MediaElement> {
    config:     PlayerConfig,
    media:      M,
    callbacks:  PlayerCallbacks,
    state:      PlayerState,
    visibility: VisibilityController,
    clicks:     ClickDisambiguator,
    listeners:  ListenerSet,
}

impl<M: MediaElement> Player<M> {
    /// Validates `config`, binds `media` to its source and registers every
    /// listener.
    pub fn mount(config: PlayerConfig, mut media: M, callbacks: PlayerCallbacks) -> Result<Self> {
        config.validate()?;
        media.attach(&MediaSource::from(&config));

        let mut listeners = ListenerSet::default();
        listeners.register_all();
        info!(src = %config.src, listeners = listeners.len(), "player mounted");

        Ok(Self {
            state: PlayerState::new(config.muted),
            visibility: VisibilityController::new(&config.timing),
            clicks: ClickDisambiguator::new(config.timing.double_click_window()),
            config,
            media,
            callbacks,
            listeners,
        })
    }

    pub const fn config(&self) -> &PlayerConfig { &self.config }

    pub const fn state(&self) -> &PlayerState { &self.state }

    pub const fn media(&self) -> &M { &self.media }

    pub const fn listeners(&self) -> &ListenerSet { &self.listeners }

    pub fn is_mounted(&self) -> bool { !self.listeners.is_empty() }

    pub fn view(&self) -> ControlsView { ControlsView::new(&self.state, &self.config) }

    /// Earliest pending timer, if any. The host should call
    /// [`Player::advance`] once this instant passes.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.visibility.deadline(), self.clicks.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Fires every timer that is due at `now`.
    pub fn advance(&mut self, now: Instant) {
        if !self.is_mounted() {
            return;
        }
        if self.clicks.fire_due(now) {
            debug!("single click on video surface");
            self.toggle_play_pause();
        }
        self.visibility.fire_due(now, self.state.is_playing());
        self.sync_visibility();
    }

    /// Runs one input to completion. Due timers fire first.
    pub fn handle(&mut self, input: PlayerInput, now: Instant) -> Response {
        if !self.is_mounted() {
            trace!(?input, "input after unmount ignored");
            return Response::Ignored;
        }
        self.advance(now);
        if let Some(kind) = input.listener() {
            if !self.listeners.contains(kind) {
                return Response::Ignored;
            }
        }

        let response = match input {
            PlayerInput::Media(signal) => {
                self.on_media_signal(signal, now);
                Response::Handled
            }
            PlayerInput::FullscreenChange { active } => {
                debug!(active, "fullscreen changed");
                self.state.is_fullscreen = active;
                Response::Handled
            }
            PlayerInput::PictureInPictureChange { active } => {
                debug!(active, "picture-in-picture changed");
                self.state.is_picture_in_picture = active;
                Response::Handled
            }
            PlayerInput::PointerEnter => {
                self.visibility.pointer_enter();
                Response::Handled
            }
            PlayerInput::PointerLeave => {
                self.visibility.pointer_leave(now, self.state.is_playing());
                Response::Handled
            }
            PlayerInput::PointerMove => {
                self.visibility.pointer_move(now, self.state.is_playing());
                Response::Handled
            }
            PlayerInput::SurfaceClick => match self.clicks.click(now) {
                ClickOutcome::Double => {
                    debug!("double click on video surface");
                    self.toggle_fullscreen();
                    Response::PreventDefault
                }
                ClickOutcome::Pending(_) => Response::Handled,
            },
            PlayerInput::ContextMenu => {
                if self.config.context_menu {
                    Response::Ignored
                } else {
                    Response::PreventDefault
                }
            }
            PlayerInput::ProgressClick { x, bounds } => self.on_progress_click(x, bounds),
            PlayerInput::Key(event) => match keyboard::dispatch(&event) {
                Some(action) => {
                    self.perform(action);
                    Response::PreventDefault
                }
                None => Response::Ignored,
            },
            PlayerInput::Action(action) => {
                self.perform(action);
                Response::Handled
            }
        };
        self.sync_visibility();
        response
    }

    /// Runs a control action. Used by buttons and keyboard shortcuts alike.
    pub fn perform(&mut self, action: PlayerAction) {
        if !self.is_mounted() {
            return;
        }
        debug!(action = action.as_ref(), "performing action");
        let skip = self.config.skip_seconds;
        match action {
            PlayerAction::TogglePlayPause => self.toggle_play_pause(),
            PlayerAction::SkipBackward => self.seek(self.state.current_time() - skip),
            PlayerAction::SkipForward => self.seek(self.state.current_time() + skip),
            PlayerAction::VolumeUp => {
                let muted = self.state.volume.step(1);
                self.push_volume(muted);
            }
            PlayerAction::VolumeDown => {
                let muted = self.state.volume.step(-1);
                self.push_volume(muted);
            }
            PlayerAction::SetVolume { volume } => {
                let muted = self.state.volume.set_volume(volume);
                self.push_volume(muted);
            }
            PlayerAction::ToggleMute => {
                let muted = self.state.volume.toggle_mute();
                self.media.set_muted(muted);
            }
            PlayerAction::ToggleFullscreen => self.toggle_fullscreen(),
            PlayerAction::TogglePictureInPicture => self.toggle_picture_in_picture(),
            PlayerAction::SeekTo { seconds } => self.seek(seconds),
        }
    }

    /// Cancels every timer, releases every listener and detaches the media
    /// element. Later inputs are ignored.
    pub fn unmount(&mut self) {
        if !self.is_mounted() {
            return;
        }
        self.visibility.cancel();
        self.clicks.cancel();
        let released = self.listeners.release_all();
        self.media.detach();
        info!(released, "player unmounted");
    }

    fn on_media_signal(&mut self, signal: MediaSignal, now: Instant) {
        trace!(?signal, "media signal");
        match signal {
            MediaSignal::Play => {
                self.state.playback.is_playing = true;
                self.state.playback.has_ended = false;
                self.visibility.playback_started(now);
                self.callbacks.play();
            }
            MediaSignal::Pause => {
                self.state.playback.is_playing = false;
                self.visibility.playback_stopped();
                self.callbacks.pause();
            }
            MediaSignal::Ended => {
                self.state.playback.is_playing = false;
                self.state.playback.has_ended = true;
                self.visibility.playback_stopped();
                self.callbacks.ended();
            }
            MediaSignal::TimeUpdate { current_time } => {
                self.state.progress.set_position(current_time);
                self.callbacks.time_update(self.state.current_time());
            }
            MediaSignal::LoadedMetadata { duration } => {
                self.state.progress.set_duration(duration);
                self.state.playback.is_loaded = true;
                self.state.last_error = None;
                debug!(duration = self.state.duration(), "metadata loaded");

                self.media.set_volume(self.state.volume.volume);
                self.media.set_muted(self.state.volume.is_muted);
                if self.config.autoplay {
                    self.request_play();
                }
            }
            MediaSignal::Error(error) => {
                warn!(code = %error.code, message = %error.message, "media element reported an error");
                self.state.playback.is_playing = false;
                self.visibility.playback_stopped();
                self.callbacks.error(&error);
                self.state.last_error = Some(error);
            }
        }
    }

    fn on_progress_click(&mut self, x: f64, bounds: Bounds) -> Response {
        if !self.config.controls {
            return Response::Ignored;
        }
        let Some(fraction) = bounds.fraction_at(x) else {
            return Response::Ignored;
        };
        self.seek(fraction * self.state.duration());
        Response::Handled
    }

    fn toggle_play_pause(&mut self) {
        if self.state.is_playing() {
            self.media.pause();
        } else {
            self.request_play();
        }
    }

    fn request_play(&mut self) {
        if let Err(error) = self.media.play() {
            warn!(%error, "play request failed");
        }
    }

    fn seek(&mut self, seconds: f64) {
        let target = self.state.progress.clamp_position(seconds);
        self.media.seek_to(target);
        self.state.progress.set_position(target);
    }

    fn push_volume(&mut self, muted_now: bool) {
        self.media.set_volume(self.state.volume.volume);
        if muted_now {
            self.media.set_muted(true);
        }
    }

    fn toggle_fullscreen(&mut self) {
        let result = if self.state.is_fullscreen {
            self.media.exit_fullscreen()
        } else {
            self.media.request_fullscreen()
        };
        if let Err(error) = result {
            warn!(%error, "fullscreen toggle failed");
        }
    }

    fn toggle_picture_in_picture(&mut self) {
        let result = if self.state.is_picture_in_picture {
            self.media.exit_picture_in_picture()
        } else {
            self.media.request_picture_in_picture()
        };
        if let Err(error) = result {
            warn!(%error, "picture-in-picture toggle failed");
        }
    }

    fn sync_visibility(&mut self) {
        self.state.show_controls = self.visibility.is_visible();
        self.state.is_hovering = self.visibility.is_hovering();
    }
}

impl<M: MediaElement> Drop for Player<M> {
    fn drop(&mut self) { self.unmount(); }
}

impl<M: MediaElement> std::fmt::Debug for Player<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Player")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("callbacks", &self.callbacks)
            .field("listeners", &self.listeners)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{
            Arc,
            atomic::{AtomicUsize, Ordering},
        },
        time::Duration,
    };

    use super::*;
    use crate::{
        keyboard::KeyTarget,
        media::{MediaCommand, RecordingMedia},
        state::Visibility,
    };

    fn ms(n: u64) -> Duration { Duration::from_millis(n) }

    fn mount(config: PlayerConfig) -> (Player<RecordingMedia>, RecordingMedia) {
        let media = RecordingMedia::new();
        let player = Player::mount(config, media.clone(), PlayerCallbacks::new()).unwrap();
        media.clear();
        (player, media)
    }

    fn loaded(duration: f64) -> (Player<RecordingMedia>, RecordingMedia, Instant) {
        let (mut player, media) = mount(PlayerConfig::builder().src("clip.mp4").build());
        let t0 = Instant::now();
        player.handle(PlayerInput::Media(MediaSignal::LoadedMetadata { duration }), t0);
        media.clear();
        (player, media, t0)
    }

    fn seeks(media: &RecordingMedia) -> Vec<f64> {
        media
            .commands()
            .into_iter()
            .filter_map(|c| match c {
                MediaCommand::SeekTo { seconds } => Some(seconds),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn mount_attaches_source_and_registers_listeners() {
        let media = RecordingMedia::new();
        let config = PlayerConfig::builder().src("clip.mp4").looping(true).build();
        let player = Player::mount(config, media.clone(), PlayerCallbacks::new()).unwrap();
        assert!(player.is_mounted());
        assert_eq!(player.listeners().len(), 9);
        assert!(matches!(
            media.commands().as_slice(),
            [MediaCommand::Attach { source }] if source.src == "clip.mp4" && source.looping
        ));
    }

    #[test]
    fn invalid_config_never_touches_media() {
        let media = RecordingMedia::new();
        let err = Player::mount(PlayerConfig::default(), media.clone(), PlayerCallbacks::new());
        assert!(err.is_err());
        assert!(media.commands().is_empty());
    }

    #[test]
    fn play_pause_waits_for_confirmation() {
        let (mut player, media, t0) = loaded(60.0);
        player.perform(PlayerAction::TogglePlayPause);
        assert!(!player.state().is_playing());
        assert_eq!(media.commands(), vec![MediaCommand::Play]);

        player.handle(PlayerInput::Media(MediaSignal::Play), t0);
        assert!(player.state().is_playing());

        player.perform(PlayerAction::TogglePlayPause);
        assert!(player.state().is_playing());
        assert_eq!(media.count(|c| matches!(c, MediaCommand::Pause)), 1);
    }

    #[test]
    fn skip_clamps_at_both_ends() {
        let (mut player, media, t0) = loaded(120.0);
        player.handle(
            PlayerInput::Media(MediaSignal::TimeUpdate { current_time: 5.0 }),
            t0,
        );
        player.perform(PlayerAction::SkipBackward);
        assert!(player.state().current_time().abs() < f64::EPSILON);

        player.handle(
            PlayerInput::Media(MediaSignal::TimeUpdate {
                current_time: 115.0,
            }),
            t0,
        );
        player.perform(PlayerAction::SkipForward);
        assert!((player.state().current_time() - 120.0).abs() < f64::EPSILON);
        assert_eq!(seeks(&media), vec![0.0, 120.0]);
    }

    #[test]
    fn progress_midpoint_seeks_to_half() {
        let (mut player, media, t0) = loaded(90.0);
        let response = player.handle(
            PlayerInput::ProgressClick {
                x:      300.0,
                bounds: Bounds::new(100.0, 400.0),
            },
            t0,
        );
        assert_eq!(response, Response::Handled);
        let target = seeks(&media)[0];
        assert!((target - 45.0).abs() < 1e-9);
        assert!((player.state().current_time() - 45.0).abs() < 1e-9);
    }

    #[test]
    fn progress_click_without_controls_is_ignored() {
        let (mut player, media) = mount(PlayerConfig::builder().src("a.mp4").controls(false).build());
        let response = player.handle(
            PlayerInput::ProgressClick {
                x:      10.0,
                bounds: Bounds::new(0.0, 20.0),
            },
            Instant::now(),
        );
        assert_eq!(response, Response::Ignored);
        assert!(media.commands().is_empty());
    }

    #[test]
    fn volume_zero_mutes_and_mute_keeps_volume() {
        let (mut player, media, _) = loaded(10.0);
        player.perform(PlayerAction::SetVolume { volume: 0.0 });
        assert!(player.state().volume.is_muted);
        assert!(media.commands().contains(&MediaCommand::SetMuted { muted: true }));

        player.perform(PlayerAction::SetVolume { volume: 0.8 });
        assert!(player.state().volume.is_muted);

        player.perform(PlayerAction::ToggleMute);
        assert!(!player.state().volume.is_muted);
        assert!((player.state().volume.volume - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn arrow_up_five_times_caps_at_one() {
        let (mut player, _media, t0) = loaded(10.0);
        player.perform(PlayerAction::SetVolume { volume: 0.5 });
        for i in 0..5 {
            let response = player.handle(PlayerInput::Key(KeyEvent::on_body("ArrowUp")), t0 + ms(i));
            assert_eq!(response, Response::PreventDefault);
        }
        assert!((player.state().volume.volume - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn keys_aimed_elsewhere_are_left_alone() {
        let (mut player, media, t0) = loaded(10.0);
        let response = player.handle(
            PlayerInput::Key(KeyEvent::new("Space", KeyTarget::Outside)),
            t0,
        );
        assert_eq!(response, Response::Ignored);
        assert!(media.commands().is_empty());
    }

    #[test]
    fn double_click_toggles_fullscreen_only() {
        let (mut player, media, t0) = loaded(10.0);
        assert_eq!(player.handle(PlayerInput::SurfaceClick, t0), Response::Handled);
        assert_eq!(
            player.handle(PlayerInput::SurfaceClick, t0 + ms(150)),
            Response::PreventDefault
        );
        player.advance(t0 + ms(2000));
        assert_eq!(media.commands(), vec![MediaCommand::RequestFullscreen]);
        assert!(!player.state().is_fullscreen);

        player.handle(PlayerInput::FullscreenChange { active: true }, t0 + ms(2100));
        assert!(player.state().is_fullscreen);
    }

    #[test]
    fn single_click_plays_once_after_the_window() {
        let (mut player, media, t0) = loaded(10.0);
        player.handle(PlayerInput::SurfaceClick, t0);
        assert_eq!(player.next_deadline(), Some(t0 + ms(300)));
        player.advance(t0 + ms(299));
        assert!(media.commands().is_empty());
        player.advance(t0 + ms(300));
        player.advance(t0 + ms(1000));
        assert_eq!(media.commands(), vec![MediaCommand::Play]);
    }

    #[test]
    fn unsupported_picture_in_picture_is_swallowed() {
        let media = RecordingMedia::new().without_picture_in_picture();
        let mut player = Player::mount(
            PlayerConfig::builder().src("a.mp4").build(),
            media.clone(),
            PlayerCallbacks::new(),
        )
        .unwrap();
        player.perform(PlayerAction::TogglePictureInPicture);
        assert!(!player.state().is_picture_in_picture);
        assert_eq!(media.count(|c| matches!(c, MediaCommand::RequestPictureInPicture)), 1);
    }

    #[test]
    fn unsupported_fullscreen_key_is_swallowed() {
        let media = RecordingMedia::new().without_fullscreen();
        let mut player = Player::mount(
            PlayerConfig::builder().src("a.mp4").build(),
            media.clone(),
            PlayerCallbacks::new(),
        )
        .unwrap();
        let response = player.handle(PlayerInput::Key(KeyEvent::on_body("KeyF")), Instant::now());
        assert_eq!(response, Response::PreventDefault);
        assert_eq!(media.count(|c| matches!(c, MediaCommand::RequestFullscreen)), 1);
        assert!(!player.state().is_fullscreen);
    }

    #[test]
    fn denied_fullscreen_leaves_state_alone() {
        let media = RecordingMedia::new().denying_fullscreen("no user gesture");
        let mut player = Player::mount(
            PlayerConfig::builder().src("a.mp4").build(),
            media.clone(),
            PlayerCallbacks::new(),
        )
        .unwrap();
        player.perform(PlayerAction::ToggleFullscreen);
        player.perform(PlayerAction::ToggleFullscreen);
        assert!(!player.state().is_fullscreen);
        assert_eq!(media.count(|c| matches!(c, MediaCommand::RequestFullscreen)), 2);
        assert_eq!(media.count(|c| matches!(c, MediaCommand::ExitFullscreen)), 0);
    }

    #[test]
    fn fullscreen_toggle_exits_once_active() {
        let (mut player, media, t0) = loaded(60.0);
        player.handle(PlayerInput::FullscreenChange { active: true }, t0);
        assert!(player.state().is_fullscreen);

        player.perform(PlayerAction::ToggleFullscreen);
        assert_eq!(media.commands(), vec![MediaCommand::ExitFullscreen]);
        assert!(player.state().is_fullscreen);

        player.handle(PlayerInput::FullscreenChange { active: false }, t0 + ms(5));
        assert!(!player.state().is_fullscreen);
        assert_eq!(player.view().labels.fullscreen, "Enter fullscreen");
    }

    #[test]
    fn picture_in_picture_toggle_exits_once_active() {
        let (mut player, media, t0) = loaded(60.0);
        player.handle(PlayerInput::PictureInPictureChange { active: true }, t0);
        assert!(player.state().is_picture_in_picture);

        player.perform(PlayerAction::TogglePictureInPicture);
        assert_eq!(media.commands(), vec![MediaCommand::ExitPictureInPicture]);
        assert!(player.state().is_picture_in_picture);

        player.handle(PlayerInput::PictureInPictureChange { active: false }, t0 + ms(5));
        assert!(!player.state().is_picture_in_picture);
    }

    #[test]
    fn autoplay_rejection_keeps_state_and_callbacks_quiet() {
        let plays = Arc::new(AtomicUsize::new(0));
        let counter = plays.clone();
        let media = RecordingMedia::new().rejecting_play("NotAllowedError");
        let mut player = Player::mount(
            PlayerConfig::builder().src("a.mp4").autoplay(true).build(),
            media.clone(),
            PlayerCallbacks::new().on_play(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        )
        .unwrap();

        player.handle(
            PlayerInput::Media(MediaSignal::LoadedMetadata { duration: 120.0 }),
            Instant::now(),
        );
        assert_eq!(media.count(|c| matches!(c, MediaCommand::Play)), 1);
        assert!(!player.state().is_playing());
        assert_eq!(plays.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn controls_hide_while_playing_and_return_on_pause() {
        let (mut player, _media, t0) = loaded(60.0);
        player.handle(PlayerInput::PointerEnter, t0);
        player.handle(PlayerInput::Media(MediaSignal::Play), t0);
        assert!(player.next_deadline().is_none());

        player.handle(PlayerInput::PointerLeave, t0 + ms(100));
        player.advance(t0 + ms(1100));
        assert!(!player.state().show_controls);
        assert_eq!(player.visibility.visibility(), Visibility::Hidden);

        player.handle(PlayerInput::Media(MediaSignal::Pause), t0 + ms(1200));
        assert!(player.state().show_controls);
        assert!(player.next_deadline().is_none());
    }

    #[test]
    fn nothing_runs_after_unmount() {
        let (mut player, media, t0) = loaded(60.0);
        player.handle(PlayerInput::Media(MediaSignal::Play), t0);
        player.handle(PlayerInput::PointerMove, t0);
        player.handle(PlayerInput::SurfaceClick, t0);
        assert!(player.next_deadline().is_some());

        player.unmount();
        assert!(player.listeners().is_empty());
        assert!(player.next_deadline().is_none());
        let before = player.state().clone();
        media.clear();

        player.advance(t0 + ms(10_000));
        let response = player.handle(PlayerInput::Media(MediaSignal::Pause), t0 + ms(10_001));
        assert_eq!(response, Response::Ignored);
        assert_eq!(player.state(), &before);
        assert!(media.commands().is_empty());
    }

    #[test]
    fn dropping_a_mounted_player_detaches() {
        let (player, media) = mount(PlayerConfig::builder().src("a.mp4").build());
        drop(player);
        assert_eq!(media.commands(), vec![MediaCommand::Detach]);
    }

    #[test]
    fn load_errors_reach_the_error_callback() {
        let seen = Arc::new(parking_lot::Mutex::new(Vec::new()));
        let sink = seen.clone();
        let media = RecordingMedia::new();
        let mut player = Player::mount(
            PlayerConfig::builder().src("missing.mp4").build(),
            media,
            PlayerCallbacks::new().on_error(move |e| sink.lock().push(e.code)),
        )
        .unwrap();
        let error = crate::media::MediaLoadError::from_code(4, "no decoder");
        player.handle(PlayerInput::Media(MediaSignal::Error(error.clone())), Instant::now());
        assert_eq!(player.state().last_error.as_ref(), Some(&error));
        assert_eq!(seen.lock().len(), 1);
    }
}
