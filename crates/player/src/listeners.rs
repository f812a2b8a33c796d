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

use strum::IntoEnumIterator;

/// Signal subscriptions a mounted player holds.
///
/// Media listeners live on the bound element; keyboard, fullscreen and
/// picture-in-picture listeners are page-wide.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::EnumIter, strum_macros::Display,
)]
#[strum(serialize_all = "kebab-case")]
pub enum ListenerKind {
    MediaPlay,
    MediaPause,
    MediaTimeUpdate,
    MediaLoadedMetadata,
    MediaEnded,
    MediaError,
    DocumentKeyDown,
    DocumentFullscreenChange,
    PictureInPictureChange,
}

#[derive(Debug, Clone, Default)]
pub struct ListenerSet {
    registered: Vec<ListenerKind>,
}

impl ListenerSet {
    /// Registers every listener a player needs. Idempotent.
    pub fn register_all(&mut self) {
        for kind in ListenerKind::iter() {
            if !self.registered.contains(&kind) {
                self.registered.push(kind);
            }
        }
    }

    pub fn contains(&self, kind: ListenerKind) -> bool { self.registered.contains(&kind) }

    pub fn is_empty(&self) -> bool { self.registered.is_empty() }

    pub fn len(&self) -> usize { self.registered.len() }

    pub fn iter(&self) -> impl Iterator<Item = ListenerKind> + '_ { self.registered.iter().copied() }

    /// Removes every listener, returning how many were released.
    pub fn release_all(&mut self) -> usize {
        let released = self.registered.len();
        self.registered.clear();
        released
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_and_release() {
        let mut set = ListenerSet::default();
        set.register_all();
        set.register_all();
        assert_eq!(set.len(), ListenerKind::iter().count());
        assert!(set.contains(ListenerKind::DocumentKeyDown));
        assert_eq!(set.release_all(), 9);
        assert!(set.is_empty());
        assert!(!set.contains(ListenerKind::MediaPlay));
    }
}
