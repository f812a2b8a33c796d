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

//! Runs a [`Player`] on its own tokio task.
//!
//! The task owns the player, so inputs are processed strictly one at a time.
//! Between inputs it sleeps until the player's next timer is due, which is
//! what makes auto-hide and single-click delivery happen without the host
//! polling.

use serde::Serialize;
use tokio::{
    sync::{mpsc, oneshot},
    task::JoinHandle,
    time::Instant,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::{
    err::{Result, UnmountedSnafu},
    media::MediaElement,
    player::{Player, PlayerInput},
    state::PlayerState,
    view::ControlsView,
};

/// Point-in-time copy of a driven player.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub state: PlayerState,
    pub view:  ControlsView,
}

impl Snapshot {
    pub fn of<M: MediaElement>(player: &Player<M>) -> Self {
        Self {
            state: player.state().clone(),
            view:  player.view(),
        }
    }
}

enum Message {
    Input(PlayerInput),
    Snapshot(oneshot::Sender<Snapshot>),
}

/// Handle to a player running on a background task.
///
/// Dropping the handle unmounts the player.
pub struct PlayerHandle {
    tx:     mpsc::UnboundedSender<Message>,
    cancel: CancellationToken,
    task:   Option<JoinHandle<()>>,
}

/// Moves `player` onto a new task. Must be called inside a tokio runtime.
pub fn spawn<M>(player: Player<M>) -> PlayerHandle
where
    M: MediaElement + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();
    let cancel = CancellationToken::new();
    let task = tokio::spawn(run(player, rx, cancel.clone()));
    PlayerHandle {
        tx,
        cancel,
        task: Some(task),
    }
}

impl PlayerHandle {
    /// Queues an input. Fails once the player is unmounted.
    pub fn send(&self, input: PlayerInput) -> Result<()> {
        if self.cancel.is_cancelled() {
            return UnmountedSnafu.fail();
        }
        self.tx
            .send(Message::Input(input))
            .map_err(|_| UnmountedSnafu.build())
    }

    /// Returns the state after every previously sent input has run.
    pub async fn snapshot(&self) -> Result<Snapshot> {
        let (reply, rx) = oneshot::channel();
        if self.cancel.is_cancelled() || self.tx.send(Message::Snapshot(reply)).is_err() {
            return UnmountedSnafu.fail();
        }
        rx.await.map_err(|_| UnmountedSnafu.build())
    }

    pub fn is_unmounted(&self) -> bool { self.cancel.is_cancelled() || self.tx.is_closed() }

    /// Unmounts the player and waits for its task to finish.
    pub async fn unmount(&mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            if let Err(error) = task.await {
                warn!(%error, "player task ended abnormally");
            }
        }
    }
}

impl Drop for PlayerHandle {
    fn drop(&mut self) { self.cancel.cancel(); }
}

async fn run<M: MediaElement>(
    mut player: Player<M>,
    mut rx: mpsc::UnboundedReceiver<Message>,
    cancel: CancellationToken,
) {
    loop {
        let deadline = player.next_deadline();
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            message = rx.recv() => match message {
                Some(Message::Input(input)) => {
                    player.handle(input, now());
                }
                Some(Message::Snapshot(reply)) => {
                    player.advance(now());
                    // The caller may have stopped waiting.
                    let _ = reply.send(Snapshot::of(&player));
                }
                None => break,
            },
            () = sleep_until(deadline) => player.advance(now()),
        }
    }
    debug!("player task stopping");
    player.unmount();
    rx.close();
}

fn now() -> std::time::Instant { Instant::now().into_std() }

async fn sleep_until(deadline: Option<std::time::Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(Instant::from_std(at)).await,
        None => std::future::pending().await,
    }
}
