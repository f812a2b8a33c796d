/// Player state for a single mounted widget.
///
/// Everything here mirrors what the media element has confirmed, plus the
/// few flags the widget owns itself (hover, controls visibility).

use serde::Serialize;

use crate::media::MediaLoadError;

/// Step applied by the volume up/down shortcuts.
pub const VOLUME_STEP: f64 = 0.1;

/// Playback flags confirmed by the media element.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackControls {
    /// Whether the element reported that it is playing
    pub is_playing: bool,
    /// Whether metadata has been loaded
    pub is_loaded:  bool,
    /// Whether the last playback run reached the end
    pub has_ended:  bool,
}

/// Progress slider state for tracking playback position.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSlider {
    /// Current playback position in seconds
    pub current_time: f64,
    /// Total duration in seconds, 0 until metadata loads
    pub duration:     f64,
}

impl ProgressSlider {
    /// Returns the current progress as a fraction (0.0 to 1.0).
    pub fn progress_fraction(&self) -> f64 {
        if self.duration <= 0.0 {
            return 0.0;
        }
        (self.current_time / self.duration).clamp(0.0, 1.0)
    }

    /// Clamps a position into the playable range.
    ///
    /// Before metadata arrives the duration is 0, so every position clamps
    /// to the start.
    pub fn clamp_position(&self, seconds: f64) -> f64 {
        if seconds.is_nan() {
            return 0.0;
        }
        seconds.clamp(0.0, self.duration.max(0.0))
    }

    /// Records a position reported by the element or chosen by a seek.
    pub fn set_position(&mut self, seconds: f64) {
        self.current_time = if self.duration > 0.0 {
            self.clamp_position(seconds)
        } else {
            seconds.max(0.0)
        };
    }

    /// Records the duration from loaded metadata. Unknown (non-finite or
    /// negative) durations leave the slider at 0.
    pub fn set_duration(&mut self, seconds: f64) {
        self.duration = if seconds.is_finite() && seconds > 0.0 {
            seconds
        } else {
            0.0
        };
        if self.duration > 0.0 {
            self.current_time = self.current_time.min(self.duration);
        }
    }

    /// Formats the current time as "M:SS" or "H:MM:SS".
    pub fn formatted_current_time(&self) -> String { format_seconds(self.current_time) }

    /// Formats the total duration as "M:SS" or "H:MM:SS".
    pub fn formatted_total_duration(&self) -> String { format_seconds(self.duration) }
}

/// Volume control state.
///
/// Volume and mute are independent flags. Dropping the volume to zero mutes,
/// but raising it again never unmutes; only the mute toggle does.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeControl {
    /// Current volume level (0.0 to 1.0)
    pub volume:   f64,
    /// Whether audio is muted
    pub is_muted: bool,
}

impl Default for VolumeControl {
    fn default() -> Self {
        Self {
            volume:   1.0,
            is_muted: false,
        }
    }
}

impl VolumeControl {
    pub fn new(muted: bool) -> Self {
        Self {
            is_muted: muted,
            ..Self::default()
        }
    }

    /// Returns the effective volume (0 if muted, otherwise current volume).
    pub fn effective_volume(&self) -> f64 { if self.is_muted { 0.0 } else { self.volume } }

    /// Flips the mute flag without touching the stored volume.
    pub fn toggle_mute(&mut self) -> bool {
        self.is_muted = !self.is_muted;
        self.is_muted
    }

    /// Sets a clamped volume. Returns true when the change muted the player.
    pub fn set_volume(&mut self, volume: f64) -> bool {
        self.volume = clamp_volume(volume);
        if self.volume == 0.0 && !self.is_muted {
            self.is_muted = true;
            return true;
        }
        false
    }

    /// Moves the volume by `steps` increments of [`VOLUME_STEP`], rounded to
    /// the slider's hundredths so repeated steps land on exact values.
    pub fn step(&mut self, steps: i32) -> bool {
        let target = f64::from(steps).mul_add(VOLUME_STEP, self.volume);
        self.set_volume((target * 100.0).round() / 100.0)
    }
}

fn clamp_volume(volume: f64) -> f64 {
    if volume.is_nan() {
        return 0.0;
    }
    volume.clamp(0.0, 1.0)
}

/// Complete state of one mounted player.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerState {
    /// Playback control state
    pub playback:               PlaybackControls,
    /// Progress slider state
    pub progress:               ProgressSlider,
    /// Volume control state
    pub volume:                 VolumeControl,
    /// Mirrors the page fullscreen-change signal
    pub is_fullscreen:          bool,
    /// Mirrors the platform picture-in-picture signal
    pub is_picture_in_picture:  bool,
    /// Whether the control overlay is currently shown
    pub show_controls:          bool,
    /// Whether the pointer is over the widget
    pub is_hovering:            bool,
    /// Last load/decode failure reported by the element
    pub last_error:             Option<MediaLoadError>,
}

impl Default for PlayerState {
    fn default() -> Self { Self::new(false) }
}

impl PlayerState {
    /// Creates the state a freshly mounted player starts from.
    pub fn new(muted: bool) -> Self {
        Self {
            playback:              PlaybackControls::default(),
            progress:              ProgressSlider::default(),
            volume:                VolumeControl::new(muted),
            is_fullscreen:         false,
            is_picture_in_picture: false,
            show_controls:         true,
            is_hovering:           false,
            last_error:            None,
        }
    }

    pub fn is_playing(&self) -> bool { self.playback.is_playing }

    pub fn current_time(&self) -> f64 { self.progress.current_time }

    pub fn duration(&self) -> f64 { self.progress.duration }
}

/// Formats seconds as "M:SS" or "H:MM:SS".
fn format_seconds(seconds: f64) -> String {
    let total_secs = if seconds.is_finite() && seconds > 0.0 {
        // Truncation is the display rule: 59.9s still reads 0:59.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let secs = seconds.floor() as u64;
        secs
    } else {
        0
    };
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_is_always_clamped() {
        let mut volume = VolumeControl::default();
        for input in [-5.0, -0.01, 0.0, 0.3, 1.0, 1.01, 42.0, f64::NAN] {
            volume.set_volume(input);
            assert!((0.0..=1.0).contains(&volume.volume), "{input} -> {}", volume.volume);
        }
    }

    #[test]
    fn zero_volume_mutes_but_raising_does_not_unmute() {
        let mut volume = VolumeControl::default();
        assert!(volume.set_volume(0.0));
        assert!(volume.is_muted);

        volume.set_volume(0.6);
        assert!(volume.is_muted);
        assert!((volume.effective_volume()).abs() < f64::EPSILON);
    }

    #[test]
    fn toggling_mute_keeps_volume() {
        let mut volume = VolumeControl::default();
        volume.set_volume(0.4);
        volume.toggle_mute();
        assert!(volume.is_muted);
        assert!((volume.volume - 0.4).abs() < f64::EPSILON);
        volume.toggle_mute();
        assert!(!volume.is_muted);
        assert!((volume.effective_volume() - 0.4).abs() < f64::EPSILON);
    }

    #[test]
    fn stepping_lands_on_exact_hundredths() {
        let mut volume = VolumeControl::default();
        volume.set_volume(0.3);
        for _ in 0..3 {
            volume.step(-1);
        }
        assert!(volume.volume.abs() < f64::EPSILON);
        assert!(volume.is_muted);
    }

    #[test]
    fn progress_clamps_to_duration() {
        let mut progress = ProgressSlider::default();
        progress.set_position(30.0);
        progress.set_duration(20.0);
        assert!((progress.current_time - 20.0).abs() < f64::EPSILON);
        progress.set_position(25.0);
        assert!((progress.current_time - 20.0).abs() < f64::EPSILON);
        assert!((progress.progress_fraction() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn unknown_duration_stays_zero() {
        let mut progress = ProgressSlider::default();
        progress.set_duration(f64::INFINITY);
        assert!(progress.duration.abs() < f64::EPSILON);
        assert!(progress.progress_fraction().abs() < f64::EPSILON);
    }

    #[test]
    fn formats_minutes_and_hours() {
        assert_eq!(format_seconds(0.0), "0:00");
        assert_eq!(format_seconds(59.9), "0:59");
        assert_eq!(format_seconds(125.0), "2:05");
        assert_eq!(format_seconds(3725.0), "1:02:05");
        assert_eq!(format_seconds(f64::NAN), "0:00");
    }
}
