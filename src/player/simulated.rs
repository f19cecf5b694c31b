//! Simulated player engine
//!
//! Plays a clip of fixed length without decoding anything: a tokio task
//! advances the clock on every tick and reports through the overlay's
//! [`EventSender`] exactly as a real engine would. Used by the demo binary
//! and the tests.

use crate::overlay::EventSender;
use crate::player::{PlayerBackend, PlayerState, VideoFitMode};
use crate::utils::error::{OverlayError, PlaybackError, Result};
use log::{debug, info};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// URLs with this prefix fail to load
pub const FAILING_URL_PREFIX: &str = "fail:";

/// Simulated clip parameters
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Clip length in seconds
    pub duration: f64,

    /// Interval between time samples
    pub tick: Duration,

    /// Time spent in `preparing` before playback starts
    pub prepare_delay: Duration,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            duration: 12.0,
            tick: Duration::from_millis(250),
            prepare_delay: Duration::from_millis(500),
        }
    }
}

#[derive(Debug)]
struct SimState {
    state: PlayerState,
    elapsed: f64,
    fit_mode: VideoFitMode,
}

impl SimState {
    fn is_loaded(&self) -> bool {
        !matches!(
            self.state,
            PlayerState::Idle | PlayerState::Preparing | PlayerState::Failed
        )
    }
}

pub struct SimulatedPlayer {
    config: SimulationConfig,
    events: EventSender,
    shared: Arc<Mutex<SimState>>,
    task: Option<JoinHandle<()>>,
}

impl SimulatedPlayer {
    pub fn new(events: EventSender, config: SimulationConfig) -> Self {
        Self {
            config,
            events,
            shared: Arc::new(Mutex::new(SimState {
                state: PlayerState::Idle,
                elapsed: 0.0,
                fit_mode: VideoFitMode::default(),
            })),
            task: None,
        }
    }

    pub fn fit_mode(&self) -> VideoFitMode {
        self.shared.lock().fit_mode
    }

    pub fn elapsed(&self) -> f64 {
        self.shared.lock().elapsed
    }

    fn set_state(&self, state: PlayerState) {
        self.shared.lock().state = state;
        self.events.state_changed(state);
    }

    fn stop_task(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    fn spawn_clock(&mut self, url: String) {
        let shared = Arc::clone(&self.shared);
        let events = self.events.clone();
        let config = self.config.clone();

        self.task = Some(tokio::spawn(async move {
            tokio::time::sleep(config.prepare_delay).await;

            if url.starts_with(FAILING_URL_PREFIX) {
                shared.lock().state = PlayerState::Failed;
                events.failed(PlaybackError::Load(format!("cannot open {}", url)));
                return;
            }

            shared.lock().state = PlayerState::Playing;
            events.state_changed(PlayerState::Playing);
            events.time_updated(0.0, config.duration);

            let step = config.tick.as_secs_f64();
            let mut interval = tokio::time::interval(config.tick);
            interval.tick().await;

            loop {
                interval.tick().await;

                let mut sim = shared.lock();
                if sim.state != PlayerState::Playing {
                    continue;
                }

                sim.elapsed = (sim.elapsed + step).min(config.duration);
                events.time_updated(sim.elapsed, config.duration);

                if sim.elapsed >= config.duration {
                    sim.state = PlayerState::End;
                    events.state_changed(PlayerState::End);
                }
            }
        }));
    }
}

impl PlayerBackend for SimulatedPlayer {
    fn prepare(&mut self, url: &str) -> Result<()> {
        info!("Simulating {} ({:.1}s)", url, self.config.duration);
        self.stop_task();
        self.shared.lock().elapsed = 0.0;
        self.set_state(PlayerState::Preparing);
        self.spawn_clock(url.to_string());
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        let mut sim = self.shared.lock();
        if !sim.is_loaded() {
            return Err(OverlayError::InvalidInput(format!(
                "cannot play in {:?}",
                sim.state
            )));
        }
        if sim.state == PlayerState::End {
            sim.elapsed = 0.0;
        }
        drop(sim);

        self.set_state(PlayerState::Playing);
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        if self.shared.lock().state != PlayerState::Playing {
            return Ok(());
        }
        self.set_state(PlayerState::Paused);
        Ok(())
    }

    fn seek(&mut self, position: f32) -> Result<()> {
        let mut sim = self.shared.lock();
        if !sim.is_loaded() {
            return Err(OverlayError::InvalidInput("nothing to seek".to_string()));
        }

        sim.elapsed = position.clamp(0.0, 1.0) as f64 * self.config.duration;
        debug!("Seek to {:.2}s", sim.elapsed);
        self.events.time_updated(sim.elapsed, self.config.duration);
        Ok(())
    }

    fn reset(&mut self) -> Result<()> {
        self.stop_task();
        self.shared.lock().elapsed = 0.0;
        self.set_state(PlayerState::Idle);
        Ok(())
    }

    fn set_fit_mode(&mut self, mode: VideoFitMode) -> Result<()> {
        self.shared.lock().fit_mode = mode;
        Ok(())
    }

    fn current_state(&self) -> PlayerState {
        self.shared.lock().state
    }

    fn current_duration(&self) -> Option<f64> {
        self.shared
            .lock()
            .is_loaded()
            .then_some(self.config.duration)
    }
}

impl Drop for SimulatedPlayer {
    fn drop(&mut self) {
        self.stop_task();
    }
}
