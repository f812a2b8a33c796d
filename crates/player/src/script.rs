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

//! Timed input scripts replayed against a player on a simulated clock.
//!
//! ```json
//! {
//!   "steps": [
//!     { "atMs": 0,   "input": { "type": "media", "data": { "signal": "loaded_metadata", "duration": 120 } } },
//!     { "atMs": 500, "input": { "type": "key", "data": { "code": "Space" } } }
//!   ],
//!   "untilMs": 5000
//! }
//! ```

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use snafu::ResultExt;
use tracing::debug;

use crate::{
    err::{Result, ScriptCodecSnafu},
    media::MediaElement,
    player::{Player, PlayerInput, Response},
};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Script {
    pub steps:    Vec<Step>,
    /// Clock position the replay runs to after the last step. Defaults to
    /// the last step's time.
    pub until_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    /// Milliseconds after the replay starts.
    pub at_ms: u64,
    pub input: PlayerInput,
}

impl Script {
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context(ScriptCodecSnafu)
    }

    fn end_ms(&self) -> u64 {
        let last = self.steps.iter().map(|s| s.at_ms).max().unwrap_or(0);
        self.until_ms.map_or(last, |until| until.max(last))
    }

    /// Feeds every step at its scheduled time, firing timers in between, and
    /// returns each step's response in step order.
    ///
    /// Steps run in time order; steps sharing a time keep their listed order.
    pub fn replay<M: MediaElement>(&self, player: &mut Player<M>, start: Instant) -> Vec<Response> {
        let mut order: Vec<usize> = (0..self.steps.len()).collect();
        order.sort_by_key(|&i| self.steps[i].at_ms);

        let mut responses = vec![Response::Ignored; self.steps.len()];
        for i in order {
            let step = &self.steps[i];
            let at = start + Duration::from_millis(step.at_ms);
            fire_timers_until(player, at);
            responses[i] = player.handle(step.input.clone(), at);
            debug!(at_ms = step.at_ms, response = ?responses[i], "replayed step");
        }
        fire_timers_until(player, start + Duration::from_millis(self.end_ms()));
        responses
    }
}

/// Fires each due timer at its own deadline so chained timers see the right
/// clock.
fn fire_timers_until<M: MediaElement>(player: &mut Player<M>, until: Instant) {
    while let Some(deadline) = player.next_deadline() {
        if deadline > until {
            break;
        }
        player.advance(deadline);
    }
    player.advance(until);
}
