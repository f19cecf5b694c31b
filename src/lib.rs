//! Playback control overlay
//!
//! Keeps a video player's on-screen controls (play/pause button, loader,
//! elapsed/remaining labels, position slider) consistent with the player's
//! reported state, and auto-hides them after a period of inactivity.
//!
//! The overlay renders nothing. It consumes player events and user gestures
//! and produces [`UiIntent`](overlay::UiIntent)s for a host view, callbacks
//! for a delegate, and commands for the player engine.

pub mod overlay;
pub mod player;
pub mod utils;

pub use overlay::{
    EventSender, Orientation, OverlayDelegate, OverlayEvent, OverlayView, PlayerEvent,
    PlayerOverlay, PlayerOverlayBuilder, UiIntent, UserEvent,
};
pub use player::{PlaybackTime, PlayerBackend, PlayerState, VideoFitMode};
pub use utils::{OverlayConfig, OverlayError, PlaybackError, Result};
