//! Overlay event loop
//!
//! [`PlayerOverlay`] is what a host embeds: it owns the reconciler and the
//! receiving end of the event channel, and hands out [`EventSender`]s to the
//! player engine and gesture sources.

use crate::overlay::{
    ControlsVisibility, DisplaySnapshot, EventSender, Orientation, OverlayDelegate, OverlayEvent,
    OverlayView, PlaybackStateReconciler, UiIntent,
};
use crate::player::{PlayerBackend, PlayerState};
use crate::utils::config::ControlsConfig;
use crate::utils::error::{PlaybackError, Result};
use log::{debug, error, info, trace};
use std::future::Future;
use tokio::sync::mpsc;

/// Builder for [`PlayerOverlay`]
pub struct PlayerOverlayBuilder {
    config: ControlsConfig,
    view: Box<dyn OverlayView>,
    delegate: Box<dyn OverlayDelegate>,
}

impl Default for PlayerOverlayBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerOverlayBuilder {
    /// Create a builder with default settings and logging collaborators
    pub fn new() -> Self {
        Self {
            config: ControlsConfig::default(),
            view: Box::new(LoggingView),
            delegate: Box::new(LoggingDelegate),
        }
    }

    /// Set the controls configuration
    pub fn with_config(mut self, config: ControlsConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the view that receives UI intents
    pub fn with_view(mut self, view: Box<dyn OverlayView>) -> Self {
        self.view = view;
        self
    }

    /// Set the delegate that receives callbacks
    pub fn with_delegate(mut self, delegate: Box<dyn OverlayDelegate>) -> Self {
        self.delegate = delegate;
        self
    }

    /// Build the overlay
    ///
    /// `make_backend` receives the sender the engine must report its
    /// events through.
    pub fn build<B, F>(self, make_backend: F) -> Result<PlayerOverlay>
    where
        B: PlayerBackend + 'static,
        F: FnOnce(EventSender) -> Result<B>,
    {
        let (events, rx) = EventSender::channel();
        let backend = make_backend(events.clone())?;

        let reconciler = PlaybackStateReconciler::new(
            &self.config,
            Box::new(backend),
            self.view,
            self.delegate,
            events.clone(),
        );

        debug!(
            "Overlay built (auto-hide {:?}, fade {:?})",
            self.config.auto_hide_delay(),
            self.config.fade_duration()
        );

        Ok(PlayerOverlay {
            reconciler,
            events,
            rx,
        })
    }
}

/// Playback control overlay bound to one player engine
pub struct PlayerOverlay {
    reconciler: PlaybackStateReconciler,
    events: EventSender,
    rx: mpsc::UnboundedReceiver<OverlayEvent>,
}

impl PlayerOverlay {
    pub fn builder() -> PlayerOverlayBuilder {
        PlayerOverlayBuilder::new()
    }

    /// Sender for player events and user gestures
    pub fn events(&self) -> EventSender {
        self.events.clone()
    }

    /// Start a playback session. Must be called inside a tokio runtime.
    ///
    /// Events still queued from a previous session are discarded before the
    /// player is asked to prepare.
    pub fn load_video(&mut self, url: &str) {
        self.discard_pending();
        self.reconciler.load_video(url);
    }

    /// End the current session and discard its queued events. Idempotent.
    pub fn destroy(&mut self) {
        self.reconciler.destroy();
        self.discard_pending();
    }

    pub fn update_for_orientation(&mut self, orientation: Orientation) {
        self.reconciler.update_for_orientation(orientation);
    }

    /// Handle one event immediately, bypassing the channel
    pub fn dispatch(&mut self, event: impl Into<OverlayEvent>) {
        self.reconciler.handle(event.into());
    }

    /// Wait for the next queued event and handle it
    pub async fn process_next(&mut self) -> bool {
        match self.rx.recv().await {
            Some(event) => {
                trace!("Event: {:?}", event);
                self.reconciler.handle(event);
                true
            }
            None => false,
        }
    }

    /// Handle every event already queued without waiting. Returns the count.
    pub fn drain_pending(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.rx.try_recv() {
            trace!("Event: {:?}", event);
            self.reconciler.handle(event);
            handled += 1;
        }
        handled
    }

    fn discard_pending(&mut self) -> usize {
        let mut discarded = 0;
        while let Ok(event) = self.rx.try_recv() {
            trace!("Discarding stale event: {:?}", event);
            discarded += 1;
        }
        if discarded > 0 {
            debug!("Discarded {} queued events from the previous session", discarded);
        }
        discarded
    }

    /// Handle events until `shutdown` completes
    pub async fn run_until<F>(&mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    debug!("Overlay event loop shutting down");
                    break;
                }
                event = self.rx.recv() => match event {
                    Some(event) => {
                        trace!("Event: {:?}", event);
                        self.reconciler.handle(event);
                    }
                    None => break,
                },
            }
        }
    }

    pub fn reconciler(&self) -> &PlaybackStateReconciler {
        &self.reconciler
    }

    pub fn display(&self) -> &DisplaySnapshot {
        self.reconciler.display()
    }

    pub fn visibility(&self) -> ControlsVisibility {
        self.reconciler.visibility()
    }

    pub fn player_state(&self) -> PlayerState {
        self.reconciler.player_state()
    }
}

/// View that logs every intent at debug level
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingView;

impl OverlayView for LoggingView {
    fn apply(&mut self, intent: &UiIntent) {
        debug!("View: {:?}", intent);
    }
}

/// Delegate that logs callbacks
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingDelegate;

impl OverlayDelegate for LoggingDelegate {
    fn controls_visibility_changed(&mut self, visible: bool) {
        debug!("Controls {}", if visible { "shown" } else { "hidden" });
    }

    fn playback_finished(&mut self) {
        info!("Playback finished");
    }

    fn playback_failed(&mut self, error: &PlaybackError) {
        error!("Playback failed: {}", error);
    }

    fn player_state_changed(&mut self, state: PlayerState) {
        debug!("Player state: {:?}", state);
    }
}
