//! Integration test utilities for the playback overlay
//!
//! - Recording view and delegate
//! - Overlay fixtures wired to a simulated player
//! - Temporary config files

use anyhow::Result;
use parking_lot::Mutex;
use playback_overlay::overlay::PlayerOverlay;
use playback_overlay::player::{SimulatedPlayer, SimulationConfig};
use playback_overlay::utils::ControlsConfig;
use playback_overlay::{OverlayDelegate, OverlayView, PlaybackError, PlayerState, UiIntent};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

/// Delegate callback as recorded by [`Recording`]
#[derive(Debug, Clone, PartialEq)]
pub enum Callback {
    Visibility(bool),
    Finished,
    Failed(PlaybackError),
    State(PlayerState),
}

/// Shared log of everything the overlay sent to its view and delegate
#[derive(Clone, Default)]
pub struct Recording {
    intents: Arc<Mutex<Vec<UiIntent>>>,
    callbacks: Arc<Mutex<Vec<Callback>>>,
}

impl Recording {
    pub fn view(&self) -> Box<dyn OverlayView> {
        Box::new(RecordingView(self.clone()))
    }

    pub fn delegate(&self) -> Box<dyn OverlayDelegate> {
        Box::new(RecordingDelegate(self.clone()))
    }

    pub fn intents(&self) -> Vec<UiIntent> {
        self.intents.lock().clone()
    }

    pub fn callbacks(&self) -> Vec<Callback> {
        self.callbacks.lock().clone()
    }

    pub fn count(&self, callback: &Callback) -> usize {
        self.callbacks.lock().iter().filter(|c| *c == callback).count()
    }

    /// States reported to the delegate, in order
    pub fn states(&self) -> Vec<PlayerState> {
        self.callbacks
            .lock()
            .iter()
            .filter_map(|c| match c {
                Callback::State(state) => Some(*state),
                _ => None,
            })
            .collect()
    }
}

struct RecordingView(Recording);

impl OverlayView for RecordingView {
    fn apply(&mut self, intent: &UiIntent) {
        self.0.intents.lock().push(intent.clone());
    }
}

struct RecordingDelegate(Recording);

impl OverlayDelegate for RecordingDelegate {
    fn controls_visibility_changed(&mut self, visible: bool) {
        self.0.callbacks.lock().push(Callback::Visibility(visible));
    }

    fn playback_finished(&mut self) {
        self.0.callbacks.lock().push(Callback::Finished);
    }

    fn playback_failed(&mut self, error: &PlaybackError) {
        self.0.callbacks.lock().push(Callback::Failed(error.clone()));
    }

    fn player_state_changed(&mut self, state: PlayerState) {
        self.0.callbacks.lock().push(Callback::State(state));
    }
}

/// A short simulated clip with one-second ticks
pub fn short_clip(duration: f64) -> SimulationConfig {
    SimulationConfig {
        duration,
        tick: Duration::from_secs(1),
        prepare_delay: Duration::from_millis(200),
    }
}

/// Overlay wired to a [`SimulatedPlayer`] and a fresh [`Recording`]
pub fn simulated_overlay(
    controls: ControlsConfig,
    clip: SimulationConfig,
) -> Result<(PlayerOverlay, Recording)> {
    let recording = Recording::default();
    let overlay = PlayerOverlay::builder()
        .with_config(controls)
        .with_view(recording.view())
        .with_delegate(recording.delegate())
        .build(|events| Ok(SimulatedPlayer::new(events, clip)))?;
    Ok((overlay, recording))
}

/// Temporary directory holding a config file
pub struct ConfigFixture {
    pub temp_dir: TempDir,
    pub path: PathBuf,
}

impl ConfigFixture {
    /// Write `contents` to `config.toml` in a fresh temporary directory
    pub fn new(contents: &str) -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, contents)?;
        Ok(Self { temp_dir, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
