//! Playback control overlay
//!
//! The overlay draws nothing itself. It turns player events, user gestures
//! and auto-hide timer fires into [`UiIntent`]s for a view and callbacks for
//! a delegate, keeping the controls consistent with the player:
//!
//! - `time_format`: seconds to `HH:MM:SS` and slider positions
//! - `timer`: the restartable auto-hide timer
//! - `visibility`: the controls-visible flag and auto-hide eligibility
//! - `scrub`: slider drag sessions
//! - `reconciler`: the state machine tying the above together
//! - `player_view`: the event loop a host embeds
//!
//! Everything runs on one task. The only asynchronous piece is the auto-hide
//! timer, whose fires come back through the same event channel as
//! everything else.

mod events;
mod layout;
mod player_view;
mod presenter;
mod reconciler;
mod scrub;
pub mod time_format;
mod timer;
mod visibility;

pub use events::{EventSender, OverlayEvent, PlayerEvent, UserEvent};
pub use layout::{BarGeometry, Orientation};
pub use player_view::{LoggingDelegate, LoggingView, PlayerOverlay, PlayerOverlayBuilder};
pub use presenter::{DisplaySnapshot, Presenter};
pub use reconciler::PlaybackStateReconciler;
pub use scrub::ScrubController;
pub use timer::{AutoHideTimer, TimerToken};
pub use visibility::{AutoHideGate, ControlsVisibilityController};

use crate::player::{PlayerState, VideoFitMode};
use crate::utils::error::PlaybackError;
use serde::Serialize;

/// Icon shown on the central play/pause button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayPauseIcon {
    Play,
    Pause,
}

/// Observable state of the controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ControlsVisibility {
    /// Controls are on screen
    pub visible: bool,

    /// An auto-hide fire is pending
    pub auto_hide_armed: bool,
}

/// Instruction for the hosting view
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum UiIntent {
    /// Fade the bottom bar and play/pause button in or out
    FadeControls { visible: bool, duration_ms: u64 },

    /// Start or stop the loading indicator
    SetLoader { visible: bool },

    /// Swap the play/pause button image
    SetPlayPauseIcon { icon: PlayPauseIcon },

    /// Show or hide the play/pause button
    SetPlayPauseVisible { visible: bool },

    /// Update the elapsed and remaining labels
    SetTimeLabels { elapsed: String, remaining: String },

    /// Move the position slider
    SetSliderValue { value: f32 },

    /// Show or hide the slider thumb
    SetThumbVisible { visible: bool },

    /// Show or hide the bottom bar container
    SetBottomBarVisible { visible: bool },

    /// The video fit mode changed
    SetFitMode { mode: VideoFitMode },

    /// Apply bottom bar geometry for a new orientation
    ApplyGeometry { geometry: BarGeometry },
}

/// Sink for UI intents, implemented by the hosting view
pub trait OverlayView: Send {
    /// Apply one intent
    fn apply(&mut self, intent: &UiIntent);
}

/// Callbacks to the component embedding the overlay
pub trait OverlayDelegate: Send {
    /// Controls were shown or hidden
    fn controls_visibility_changed(&mut self, visible: bool);

    /// The player reached the end of the media
    fn playback_finished(&mut self);

    /// The player reported a failure
    fn playback_failed(&mut self, error: &PlaybackError);

    /// The player reported a new state
    fn player_state_changed(&mut self, state: PlayerState);
}
