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

use std::fmt;

use crate::media::MediaLoadError;

type Hook = Box<dyn FnMut() + Send + 'static>;

/// Lifecycle callbacks supplied by the widget's caller.
///
/// Each hook runs once per confirmed media signal, never for a command that
/// was merely issued.
#[derive(Default)]
pub struct PlayerCallbacks {
    on_play:        Option<Hook>,
    on_pause:       Option<Hook>,
    on_ended:       Option<Hook>,
    on_time_update: Option<Box<dyn FnMut(f64) + Send + 'static>>,
    on_error:       Option<Box<dyn FnMut(&MediaLoadError) + Send + 'static>>,
}

impl PlayerCallbacks {
    pub fn new() -> Self { Self::default() }

    #[must_use]
    pub fn on_play(mut self, handler: impl FnMut() + Send + 'static) -> Self {
        self.on_play = Some(Box::new(handler));
        self
    }

    #[must_use]
    pub fn on_pause(mut self, handler: impl FnMut() + Send + 'static) -> Self {
        self.on_pause = Some(Box::new(handler));
        self
    }

    #[must_use]
    pub fn on_ended(mut self, handler: impl FnMut() + Send + 'static) -> Self {
        self.on_ended = Some(Box::new(handler));
        self
    }

    /// Receives the element's current time in seconds.
    #[must_use]
    pub fn on_time_update(mut self, handler: impl FnMut(f64) + Send + 'static) -> Self {
        self.on_time_update = Some(Box::new(handler));
        self
    }

    #[must_use]
    pub fn on_error(mut self, handler: impl FnMut(&MediaLoadError) + Send + 'static) -> Self {
        self.on_error = Some(Box::new(handler));
        self
    }

    pub(crate) fn play(&mut self) {
        if let Some(hook) = self.on_play.as_mut() {
            hook();
        }
    }

    pub(crate) fn pause(&mut self) {
        if let Some(hook) = self.on_pause.as_mut() {
            hook();
        }
    }

    pub(crate) fn ended(&mut self) {
        if let Some(hook) = self.on_ended.as_mut() {
            hook();
        }
    }

    pub(crate) fn time_update(&mut self, seconds: f64) {
        if let Some(hook) = self.on_time_update.as_mut() {
            hook(seconds);
        }
    }

    pub(crate) fn error(&mut self, error: &MediaLoadError) {
        if let Some(hook) = self.on_error.as_mut() {
            hook(error);
        }
    }
}

impl fmt::Debug for PlayerCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlayerCallbacks")
            .field("on_play", &self.on_play.is_some())
            .field("on_pause", &self.on_pause.is_some())
            .field("on_ended", &self.on_ended.is_some())
            .field("on_time_update", &self.on_time_update.is_some())
            .field("on_error", &self.on_error.is_some())
            .finish()
    }
}
