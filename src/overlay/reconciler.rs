//! Playback state reconciler
//!
//! The top-level state machine. Player events and user gestures come in,
//! UI intents, delegate callbacks and player commands go out. The reconciler
//! mirrors the player's state but never invents transitions; it only reacts.
//!
//! A reported failure is terminal for the session: from then on the loader,
//! play/pause button and auto-hide are left alone until the next
//! [`load_video`](PlaybackStateReconciler::load_video).

use crate::overlay::time_format::{scrub_position, time_labels};
use crate::overlay::{
    AutoHideGate, BarGeometry, ControlsVisibility, ControlsVisibilityController,
    DisplaySnapshot, EventSender, Orientation, OverlayDelegate, OverlayEvent, OverlayView,
    PlayPauseIcon, PlayerEvent, Presenter, ScrubController, TimerToken, UiIntent, UserEvent,
};
use crate::player::{PlaybackTime, PlayerBackend, PlayerState, VideoFitMode};
use crate::utils::config::ControlsConfig;
use crate::utils::error::PlaybackError;
use log::{debug, error, info, warn};

pub struct PlaybackStateReconciler {
    backend: Box<dyn PlayerBackend>,
    presenter: Presenter,
    visibility: ControlsVisibilityController,
    scrub: ScrubController,

    /// Last state reported by the player
    state: PlayerState,

    /// Duration from the last sample that carried one
    total_seconds: Option<f64>,

    fit_mode: VideoFitMode,
    initial_fit_mode: VideoFitMode,

    /// Set by a player failure, cleared by `load_video`
    failed: bool,

    /// Between `load_video` and `destroy`
    session_live: bool,
}

impl PlaybackStateReconciler {
    /// Create a reconciler. `events` is the sender of the channel this
    /// reconciler's events are read from; the auto-hide timer posts into it.
    pub fn new(
        config: &ControlsConfig,
        backend: Box<dyn PlayerBackend>,
        view: Box<dyn OverlayView>,
        delegate: Box<dyn OverlayDelegate>,
        events: EventSender,
    ) -> Self {
        Self {
            backend,
            presenter: Presenter::new(view, delegate),
            visibility: ControlsVisibilityController::new(
                events,
                config.auto_hide_delay(),
                config.fade_duration(),
            ),
            scrub: ScrubController::new(),
            state: PlayerState::Idle,
            total_seconds: None,
            fit_mode: config.initial_fit_mode,
            initial_fit_mode: config.initial_fit_mode,
            failed: false,
            session_live: false,
        }
    }

    /// Handle one event. Events arriving outside a session are dropped.
    pub fn handle(&mut self, event: OverlayEvent) {
        if !self.session_live {
            debug!("No active session, dropping {:?}", event);
            return;
        }

        match event {
            OverlayEvent::Player(event) => self.on_player_event(event),
            OverlayEvent::User(event) => self.on_user_event(event),
            OverlayEvent::AutoHideElapsed(token) => self.on_auto_hide_elapsed(token),
        }
    }

    fn on_player_event(&mut self, event: PlayerEvent) {
        match event {
            PlayerEvent::StateChanged(state) => self.on_state_changed(state),
            PlayerEvent::TimeUpdated(time) => self.on_time_updated(time),
            PlayerEvent::Failed(error) => self.on_failed(error),
        }
    }

    fn on_user_event(&mut self, event: UserEvent) {
        match event {
            UserEvent::Tap => self.tap(),
            UserEvent::DoubleTap => self.double_tap(),
            UserEvent::ScrubBegin => self.scrub_begin(),
            UserEvent::ScrubUpdate(value) => self.scrub_update(value),
            UserEvent::ScrubEnd => self.scrub_end(),
            UserEvent::PlayPausePressed => self.play_pause_pressed(),
        }
    }

    /// Start a new playback session for `url`
    ///
    /// Discards any drag in progress, resets the display, shows the controls
    /// with a fresh auto-hide countdown and asks the player to prepare.
    pub fn load_video(&mut self, url: &str) {
        info!("Loading video: {}", url);

        self.scrub.discard();
        self.visibility.disarm();

        self.state = PlayerState::Idle;
        self.total_seconds = None;
        self.failed = false;
        self.session_live = true;

        self.presenter.reset_timeline();
        self.presenter.emit(UiIntent::SetBottomBarVisible { visible: false });
        self.presenter.emit(UiIntent::SetLoader { visible: true });

        self.fit_mode = self.initial_fit_mode;
        self.presenter.emit(UiIntent::SetFitMode {
            mode: self.fit_mode,
        });
        if let Err(e) = self.backend.set_fit_mode(self.fit_mode) {
            warn!("Fit mode {:?} rejected: {}", self.fit_mode, e);
        }

        let gate = self.gate();
        self.visibility.show(&mut self.presenter, gate);
        // show() always emits the play/pause button; it stays hidden until
        // the player reports a state that calls for it
        self.presenter
            .emit(UiIntent::SetPlayPauseVisible { visible: false });

        if let Err(e) = self.backend.prepare(url) {
            error!("Failed to prepare {}: {}", url, e);
            self.on_failed(e.into_playback_error());
        }
    }

    /// Tear the session down: cancel auto-hide, drop any drag, hide the
    /// controls, reset the display and release the player. Safe to repeat.
    pub fn destroy(&mut self) {
        if self.session_live {
            info!("Destroying playback session");
        }

        self.scrub.discard();
        self.visibility.hide(&mut self.presenter);
        self.presenter.reset_timeline();
        self.total_seconds = None;

        if self.session_live {
            self.session_live = false;
            if let Err(e) = self.backend.reset() {
                warn!("Player reset failed: {}", e);
            }
        }
    }

    /// Hand the bottom bar geometry for `orientation` to the view
    pub fn update_for_orientation(&mut self, orientation: Orientation) {
        let geometry = BarGeometry::for_orientation(orientation);
        debug!("Orientation {:?} -> {:?}", orientation, geometry);
        self.presenter.emit(UiIntent::ApplyGeometry { geometry });
    }

    fn on_state_changed(&mut self, state: PlayerState) {
        debug!("Player state {:?} -> {:?}", self.state, state);
        self.state = state;
        self.presenter.delegate().player_state_changed(state);

        if self.failed {
            debug!("Session failed, not driving controls for {:?}", state);
            return;
        }

        let gate = self.gate();
        match state {
            PlayerState::Preparing | PlayerState::Buffering => {
                self.presenter.emit(UiIntent::SetLoader { visible: true });
                self.presenter
                    .emit(UiIntent::SetPlayPauseVisible { visible: false });
                self.visibility.revalidate(gate);
            }
            PlayerState::Paused | PlayerState::Stopped => {
                self.presenter.emit(UiIntent::SetLoader { visible: false });
                self.presenter.emit(UiIntent::SetPlayPauseIcon {
                    icon: PlayPauseIcon::Play,
                });
                self.visibility.show(&mut self.presenter, gate);
                self.visibility.disarm();
            }
            PlayerState::Playing => {
                self.presenter.emit(UiIntent::SetLoader { visible: false });
                self.presenter.emit(UiIntent::SetPlayPauseIcon {
                    icon: PlayPauseIcon::Pause,
                });
                self.presenter
                    .emit(UiIntent::SetPlayPauseVisible { visible: true });
                self.visibility.restart_auto_hide(gate);
            }
            PlayerState::End => {
                self.presenter.emit(UiIntent::SetPlayPauseIcon {
                    icon: PlayPauseIcon::Play,
                });
                self.visibility.show(&mut self.presenter, gate);
                // A drag in progress keeps the slider
                if !self.scrub.is_dragging() {
                    self.presenter.emit(UiIntent::SetSliderValue { value: 1.0 });
                    self.presenter
                        .emit(UiIntent::SetThumbVisible { visible: true });
                }
                self.presenter.delegate().playback_finished();
            }
            PlayerState::Failed => {
                // The error itself arrives with PlayerEvent::Failed
                info!("Player entered failed state");
                self.failed = true;
                self.visibility.disarm();
            }
            PlayerState::Idle => self.visibility.revalidate(gate),
        }
    }

    fn on_time_updated(&mut self, time: PlaybackTime) {
        if self.failed {
            return;
        }
        if !time.has_known_duration() {
            debug!("Unknown duration, suppressing time display");
            return;
        }

        // Samples during a drag still tell us the duration
        self.total_seconds = Some(time.total_seconds);

        if self.scrub.is_dragging() {
            debug!("Scrubbing, ignoring time sample {:?}", time);
            return;
        }

        if !self.presenter.snapshot().bottom_bar_visible {
            self.presenter
                .emit(UiIntent::SetBottomBarVisible { visible: true });
        }

        let (elapsed, remaining) = time_labels(time.elapsed_seconds, time.total_seconds);
        self.presenter
            .emit(UiIntent::SetTimeLabels { elapsed, remaining });
        self.presenter.emit(UiIntent::SetSliderValue {
            value: scrub_position(time.elapsed_seconds, time.total_seconds),
        });
    }

    fn on_failed(&mut self, error: PlaybackError) {
        error!("Playback failed: {}", error);
        self.failed = true;
        self.visibility.disarm();
        self.presenter.delegate().playback_failed(&error);
    }

    fn on_auto_hide_elapsed(&mut self, token: TimerToken) {
        let gate = self.gate();
        self.visibility
            .on_timer_fire(token, &mut self.presenter, gate);
    }

    fn tap(&mut self) {
        let gate = self.gate();
        self.visibility.toggle(&mut self.presenter, gate);
    }

    fn double_tap(&mut self) {
        self.fit_mode = self.fit_mode.toggled();
        debug!("Fit mode -> {:?}", self.fit_mode);
        self.presenter.emit(UiIntent::SetFitMode {
            mode: self.fit_mode,
        });
        if let Err(e) = self.backend.set_fit_mode(self.fit_mode) {
            warn!("Fit mode {:?} rejected: {}", self.fit_mode, e);
        }
    }

    fn scrub_begin(&mut self) {
        if self.scrub.begin_drag(&mut self.presenter) {
            let gate = self.gate();
            self.visibility.revalidate(gate);
        }
    }

    fn scrub_update(&mut self, value: f32) {
        let total = self.known_duration();
        self.scrub.update_drag(value, total, &mut self.presenter);
    }

    fn scrub_end(&mut self) {
        if self
            .scrub
            .end_drag(self.backend.as_mut(), &mut self.presenter)
            .is_some()
        {
            let gate = self.gate();
            self.visibility.restart_auto_hide(gate);
        }
    }

    fn play_pause_pressed(&mut self) {
        let result = match self.state {
            PlayerState::Playing => self.backend.pause(),
            PlayerState::Paused | PlayerState::Stopped | PlayerState::End => self.backend.play(),
            other => {
                debug!("Play/pause ignored in {:?}", other);
                return;
            }
        };

        if let Err(e) = result {
            warn!("Play/pause command rejected: {}", e);
        }
    }

    /// Duration from the last valid sample, falling back to the player
    fn known_duration(&self) -> Option<f64> {
        self.total_seconds
            .or_else(|| self.backend.current_duration())
            .filter(|t| t.is_finite() && *t > 0.0)
    }

    fn gate(&self) -> AutoHideGate {
        AutoHideGate {
            state: self.state,
            scrubbing: self.scrub.is_dragging(),
            failed: self.failed,
        }
    }

    pub fn player_state(&self) -> PlayerState {
        self.state
    }

    pub fn display(&self) -> &DisplaySnapshot {
        self.presenter.snapshot()
    }

    pub fn visibility(&self) -> ControlsVisibility {
        self.visibility.visibility()
    }

    pub fn is_scrubbing(&self) -> bool {
        self.scrub.is_dragging()
    }

    pub fn fit_mode(&self) -> VideoFitMode {
        self.fit_mode
    }

    pub fn has_failed(&self) -> bool {
        self.failed
    }

    pub fn is_session_live(&self) -> bool {
        self.session_live
    }
}

impl Drop for PlaybackStateReconciler {
    fn drop(&mut self) {
        self.destroy();
    }
}
