//! Configuration management for the playback overlay
//!
//! Handles loading the overlay configuration from config files and
//! environment variables.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::player::VideoFitMode;
use crate::utils::error::{IntoOverlayError, OverlayError, Result};

const DEFAULT_AUTO_HIDE: Duration = Duration::from_secs(4);

/// Main overlay configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Controls behaviour
    pub controls: ControlsConfig,

    /// General settings
    pub general: GeneralConfig,
}

/// Controls configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    /// Seconds of inactivity before the controls hide while playing
    pub auto_hide_secs: f64,

    /// Fade animation length in milliseconds
    pub fade_duration_ms: u64,

    /// Fit mode applied at the start of every session
    pub initial_fit_mode: VideoFitMode,
}

/// General configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            auto_hide_secs: 4.0,
            fade_duration_ms: 300,
            initial_fit_mode: VideoFitMode::AspectFit,
        }
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl ControlsConfig {
    /// Auto-hide delay as a `Duration`. Falls back to the default delay
    /// for values `validate` would reject.
    pub fn auto_hide_delay(&self) -> Duration {
        Duration::try_from_secs_f64(self.auto_hide_secs)
            .ok()
            .filter(|d| !d.is_zero())
            .unwrap_or(DEFAULT_AUTO_HIDE)
    }

    /// Fade duration as a `Duration`
    pub fn fade_duration(&self) -> Duration {
        Duration::from_millis(self.fade_duration_ms)
    }
}

impl OverlayConfig {
    /// Load configuration from various sources
    ///
    /// Later sources override earlier ones:
    /// 1. Default values
    /// 2. System config file
    /// 3. User config file (`<config dir>/playback-overlay/config.toml`)
    /// 4. Environment variables (`PLAYBACK_OVERLAY_*` prefix)
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        if let Some(system_path) = Self::system_config_path() {
            if system_path.exists() {
                config = Self::read_file(&system_path)?;
            }
        }

        if let Some(user_path) = Self::user_config_path() {
            if user_path.exists() {
                config = Self::read_file(&user_path)?;
            }
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from an explicit file, then apply environment overrides
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = Self::read_file(path)?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the user config file
    pub fn save(&self) -> Result<()> {
        let path = Self::user_config_path()
            .ok_or_else(|| OverlayError::Config("Cannot determine user config path".to_string()))?;
        self.save_to(&path)
    }

    /// Save configuration to the given path, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).config_err("Failed to create config directory")?;
        }

        let toml = toml::to_string_pretty(self).config_err("Failed to serialize config")?;
        std::fs::write(path, toml).config_err("Failed to write config file")?;

        Ok(())
    }

    fn read_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).config_err("Failed to read config file")?;
        toml::from_str(&contents).config_err("Failed to parse config file")
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(secs) = std::env::var("PLAYBACK_OVERLAY_AUTO_HIDE_SECS") {
            self.controls.auto_hide_secs = secs
                .parse::<f64>()
                .config_err("Invalid PLAYBACK_OVERLAY_AUTO_HIDE_SECS")?;
        }

        if let Ok(ms) = std::env::var("PLAYBACK_OVERLAY_FADE_MS") {
            self.controls.fade_duration_ms =
                ms.parse::<u64>().config_err("Invalid PLAYBACK_OVERLAY_FADE_MS")?;
        }

        if let Ok(log_level) = std::env::var("PLAYBACK_OVERLAY_LOG_LEVEL") {
            self.general.log_level = log_level;
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let secs = self.controls.auto_hide_secs;
        if !secs.is_finite() || secs <= 0.0 {
            return Err(OverlayError::Config(format!(
                "Auto-hide delay must be a positive number of seconds, got {}",
                secs
            )));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.general.log_level.as_str()) {
            return Err(OverlayError::Config(format!(
                "Invalid log level '{}', must be one of: {:?}",
                self.general.log_level, valid_log_levels
            )));
        }

        Ok(())
    }

    fn system_config_path() -> Option<PathBuf> {
        #[cfg(target_os = "linux")]
        return Some(PathBuf::from("/etc/playback-overlay/config.toml"));

        #[cfg(target_os = "macos")]
        return Some(PathBuf::from(
            "/Library/Application Support/PlaybackOverlay/config.toml",
        ));

        #[allow(unreachable_code)]
        None
    }

    /// Path of the per-user config file
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("playback-overlay").join("config.toml"))
    }
}
