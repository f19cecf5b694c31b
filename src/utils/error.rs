//! Error types for the playback overlay
//!
//! Two families live here. `PlaybackError` is whatever the external player
//! reports; the overlay never looks inside it and only hands it to the
//! delegate. `OverlayError` covers the crate's own failures (configuration,
//! I/O, rejected player commands).

use thiserror::Error;

/// Error reported by the external player engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlaybackError {
    /// Media could not be opened or prepared
    #[error("Load failed: {0}")]
    Load(String),

    /// Media was opened but could not be decoded
    #[error("Decode failed: {0}")]
    Decode(String),

    /// Any other engine-side failure
    #[error("Engine error: {0}")]
    Engine(String),
}

/// Main error type for the overlay crate
#[derive(Error, Debug)]
pub enum OverlayError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("File error: {0}")]
    FileIO(#[from] std::io::Error),

    /// Errors surfaced by the external player
    #[error("Playback error: {0}")]
    Playback(#[from] PlaybackError),

    /// Invalid input errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Generic error for unexpected situations
    #[error("Internal error: {0}")]
    Internal(String),
}

impl OverlayError {
    /// Create a playback load error from string
    pub fn load_error<S: Into<String>>(msg: S) -> Self {
        OverlayError::Playback(PlaybackError::Load(msg.into()))
    }

    /// The player-side error, if this error came from the player.
    /// Anything else is wrapped as an engine error so it can still be
    /// forwarded to the delegate.
    pub fn into_playback_error(self) -> PlaybackError {
        match self {
            OverlayError::Playback(err) => err,
            other => PlaybackError::Engine(other.to_string()),
        }
    }
}

/// Convenience type alias for Results in the overlay
pub type Result<T> = std::result::Result<T, OverlayError>;

/// Extension trait for converting other errors to OverlayError
pub trait IntoOverlayError<T> {
    /// Convert this error into a configuration error with the given context
    fn config_err(self, context: &str) -> Result<T>;
}

impl<T, E: std::fmt::Display> IntoOverlayError<T> for std::result::Result<T, E> {
    fn config_err(self, context: &str) -> Result<T> {
        self.map_err(|e| OverlayError::Config(format!("{}: {}", context, e)))
    }
}
