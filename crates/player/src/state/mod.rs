/// State modules for a mounted player.
///
/// `player_state` holds what the widget renders from; `visibility` owns the
/// auto-hide timer that decides whether the control overlay is shown.

mod player_state;
mod visibility;

pub use player_state::{PlaybackControls, PlayerState, ProgressSlider, VOLUME_STEP, VolumeControl};
pub use visibility::{HideTimer, Visibility, VisibilityController};
