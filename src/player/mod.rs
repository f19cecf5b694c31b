//! External player contract
//!
//! The overlay never decodes or renders anything itself. It talks to a
//! player engine through [`PlayerBackend`] and listens to the events the
//! engine posts through an [`EventSender`](crate::overlay::EventSender).
//! This module holds that contract plus the plain data the two sides share.

mod simulated;

pub use simulated::{SimulatedPlayer, SimulationConfig};

use crate::utils::error::Result;
use serde::{Deserialize, Serialize};

/// Player engine interface consumed by the overlay
///
/// Commands are fire-and-forget: their effect becomes visible when the
/// engine reports a new state or time sample.
pub trait PlayerBackend: Send {
    /// Start preparing the media at `url` for playback
    fn prepare(&mut self, url: &str) -> Result<()>;

    /// Start or resume playback
    fn play(&mut self) -> Result<()>;

    /// Pause playback
    fn pause(&mut self) -> Result<()>;

    /// Seek to a normalized position
    ///
    /// # Arguments
    ///
    /// * `position` - Target position in `[0, 1]` of the media duration
    fn seek(&mut self, position: f32) -> Result<()>;

    /// Stop playback and release the media
    fn reset(&mut self) -> Result<()>;

    /// Apply a new video fit mode
    fn set_fit_mode(&mut self, mode: VideoFitMode) -> Result<()>;

    /// Current engine state
    fn current_state(&self) -> PlayerState;

    /// Media duration in seconds, `None` while unknown
    fn current_duration(&self) -> Option<f64>;
}

/// Player state as reported by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerState {
    /// Nothing loaded
    Idle,

    /// Media is being opened
    Preparing,

    /// Waiting for data
    Buffering,

    /// Currently playing
    Playing,

    /// Paused by the user
    Paused,

    /// Stopped, media still loaded
    Stopped,

    /// End of media reached
    End,

    /// Engine reported a failure
    Failed,
}

impl PlayerState {
    /// States in which the controls stay pinned on screen
    pub fn pins_controls(self) -> bool {
        matches!(self, PlayerState::Paused | PlayerState::End)
    }

    /// States in which a single tap may toggle the controls
    pub fn accepts_tap(self) -> bool {
        matches!(
            self,
            PlayerState::Playing
                | PlayerState::Buffering
                | PlayerState::Preparing
                | PlayerState::Stopped
        )
    }
}

/// A time sample reported by the engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaybackTime {
    /// Seconds played so far
    pub elapsed_seconds: f64,

    /// Media duration in seconds
    pub total_seconds: f64,
}

impl PlaybackTime {
    pub fn new(elapsed_seconds: f64, total_seconds: f64) -> Self {
        Self {
            elapsed_seconds,
            total_seconds,
        }
    }

    /// Whether the sample carries a usable duration (finite and positive)
    pub fn has_known_duration(&self) -> bool {
        self.total_seconds.is_finite() && self.total_seconds > 0.0
    }
}

/// How the video is scaled inside its bounds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoFitMode {
    /// Letterbox: whole frame visible
    #[default]
    AspectFit,

    /// Crop: bounds fully covered
    AspectFill,
}

impl VideoFitMode {
    /// The other fit mode
    pub fn toggled(self) -> Self {
        match self {
            VideoFitMode::AspectFit => VideoFitMode::AspectFill,
            VideoFitMode::AspectFill => VideoFitMode::AspectFit,
        }
    }
}
