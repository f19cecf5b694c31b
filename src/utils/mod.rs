//! Utility module for the playback overlay
//!
//! - Error handling with custom error types
//! - Configuration management

pub mod config;
pub mod error;

// Re-export commonly used items
pub use config::{ControlsConfig, GeneralConfig, OverlayConfig};
pub use error::{IntoOverlayError, OverlayError, PlaybackError, Result};

/// Load the overlay configuration from the standard locations
///
/// # Returns
///
/// Returns the loaded configuration or an error if loading fails
pub fn load_config() -> Result<OverlayConfig> {
    OverlayConfig::load()
}
