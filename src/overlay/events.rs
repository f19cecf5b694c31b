//! Overlay input events and the channel that carries them
//!
//! Player callbacks, user gestures and auto-hide fires all travel through a
//! single unbounded channel so the overlay handles them one at a time, in
//! arrival order.

use crate::overlay::TimerToken;
use crate::player::{PlaybackTime, PlayerState};
use crate::utils::error::PlaybackError;
use log::debug;
use tokio::sync::mpsc;

/// Event reported by the player engine
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    /// Engine moved to a new state
    StateChanged(PlayerState),

    /// New time sample
    TimeUpdated(PlaybackTime),

    /// Engine failure
    Failed(PlaybackError),
}

/// Gesture from the user
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UserEvent {
    /// Single tap on the video surface
    Tap,

    /// Double tap on the video surface
    DoubleTap,

    /// Finger down on the slider
    ScrubBegin,

    /// Slider moved to a normalized value
    ScrubUpdate(f32),

    /// Finger lifted from the slider (inside or outside)
    ScrubEnd,

    /// Play/pause button pressed
    PlayPausePressed,
}

/// Anything the overlay reacts to
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayEvent {
    Player(PlayerEvent),
    User(UserEvent),
    AutoHideElapsed(TimerToken),
}

impl From<PlayerEvent> for OverlayEvent {
    fn from(event: PlayerEvent) -> Self {
        OverlayEvent::Player(event)
    }
}

impl From<UserEvent> for OverlayEvent {
    fn from(event: UserEvent) -> Self {
        OverlayEvent::User(event)
    }
}

/// Cloneable handle for posting events to an overlay
///
/// The player engine gets one as its single registered listener; gesture
/// sources and the auto-hide timer use clones of the same handle.
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: mpsc::UnboundedSender<OverlayEvent>,
}

impl EventSender {
    pub(crate) fn new(tx: mpsc::UnboundedSender<OverlayEvent>) -> Self {
        Self { tx }
    }

    /// Create a sender together with the receiving end
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<OverlayEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }

    /// Post an event. Events posted after the overlay is gone are dropped.
    pub fn post(&self, event: impl Into<OverlayEvent>) {
        if self.tx.send(event.into()).is_err() {
            debug!("Overlay gone, dropping event");
        }
    }

    pub fn state_changed(&self, state: PlayerState) {
        self.post(PlayerEvent::StateChanged(state));
    }

    pub fn time_updated(&self, elapsed_seconds: f64, total_seconds: f64) {
        self.post(PlayerEvent::TimeUpdated(PlaybackTime::new(
            elapsed_seconds,
            total_seconds,
        )));
    }

    pub fn failed(&self, error: PlaybackError) {
        self.post(PlayerEvent::Failed(error));
    }

    pub fn user(&self, event: UserEvent) {
        self.post(event);
    }

    /// Whether the receiving overlay has been dropped
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}
