/// Auto-hide policy for the control overlay.
///
/// The overlay is either visible or hidden. At most one hide timer is pending;
/// arming a new one replaces whatever was scheduled before.

use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::debug;

use crate::config::ControlsTiming;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, strum_macros::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Visibility {
    #[default]
    Visible,
    Hidden,
}

/// Which delay the pending hide timer was armed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "snake_case")]
pub enum HideTimer {
    /// Pointer left the widget, or playback started without hover.
    Leave,
    /// Pointer moved over the video while not hovering.
    Idle,
}

#[derive(Debug, Clone)]
pub struct VisibilityController {
    visibility:  Visibility,
    hovering:    bool,
    pending:     Option<(HideTimer, Instant)>,
    leave_delay: Duration,
    idle_delay:  Duration,
}

impl VisibilityController {
    pub const fn new(timing: &ControlsTiming) -> Self {
        Self {
            visibility:  Visibility::Visible,
            hovering:    false,
            pending:     None,
            leave_delay: timing.hide_after_leave(),
            idle_delay:  timing.hide_after_idle(),
        }
    }

    pub const fn visibility(&self) -> Visibility { self.visibility }

    pub fn is_visible(&self) -> bool { self.visibility == Visibility::Visible }

    pub const fn is_hovering(&self) -> bool { self.hovering }

    /// When the pending hide timer fires, if one is armed.
    pub fn deadline(&self) -> Option<Instant> { self.pending.map(|(_, at)| at) }

    pub fn pending_timer(&self) -> Option<HideTimer> { self.pending.map(|(kind, _)| kind) }

    pub fn pointer_enter(&mut self) {
        self.hovering = true;
        self.show();
        self.cancel();
    }

    pub fn pointer_leave(&mut self, now: Instant, playing: bool) {
        self.hovering = false;
        if playing {
            self.arm(HideTimer::Leave, now);
        }
    }

    pub fn pointer_move(&mut self, now: Instant, playing: bool) {
        self.show();
        self.cancel();
        if playing && !self.hovering {
            self.arm(HideTimer::Idle, now);
        }
    }

    pub fn playback_started(&mut self, now: Instant) {
        if self.hovering {
            self.show();
        } else {
            self.arm(HideTimer::Leave, now);
        }
    }

    /// Pause, end of media and errors all bring the overlay back for good.
    pub fn playback_stopped(&mut self) {
        self.show();
        self.cancel();
    }

    /// Fires the hide timer if it is due. Returns true when the overlay was
    /// hidden by this call.
    pub fn fire_due(&mut self, now: Instant, playing: bool) -> bool {
        let Some((kind, at)) = self.pending else {
            return false;
        };
        if at > now {
            return false;
        }
        self.pending = None;
        if playing && !self.hovering && self.visibility != Visibility::Hidden {
            debug!(timer = %kind, "hiding controls");
            self.visibility = Visibility::Hidden;
            return true;
        }
        false
    }

    /// Drops any pending timer without firing it.
    pub fn cancel(&mut self) { self.pending = None; }

    fn show(&mut self) { self.visibility = Visibility::Visible; }

    fn arm(&mut self, kind: HideTimer, now: Instant) {
        let delay = match kind {
            HideTimer::Leave => self.leave_delay,
            HideTimer::Idle => self.idle_delay,
        };
        self.pending = Some((kind, now + delay));
    }
}
