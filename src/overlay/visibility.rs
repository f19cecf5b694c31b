//! Controls visibility and auto-hide
//!
//! Owns the "controls visible" flag and the [`AutoHideTimer`]. The timer is
//! only ever armed while the controls are visible and the current
//! [`AutoHideGate`] allows it; every show, hide, state change and scrub
//! transition re-checks that rule.

use crate::overlay::{
    AutoHideTimer, ControlsVisibility, EventSender, Presenter, TimerToken, UiIntent,
};
use crate::player::PlayerState;
use log::debug;
use std::time::Duration;

/// Conditions the auto-hide rule depends on, sampled by the reconciler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoHideGate {
    pub state: PlayerState,
    pub scrubbing: bool,
    pub failed: bool,
}

impl AutoHideGate {
    /// Controls may hide themselves: not pinned by paused/end, no drag in
    /// progress, and the player has not failed
    pub fn allows_auto_hide(&self) -> bool {
        !self.state.pins_controls() && !self.scrubbing && !self.failed
    }
}

pub struct ControlsVisibilityController {
    visible: bool,
    timer: AutoHideTimer,
    auto_hide_delay: Duration,
    fade_duration: Duration,
}

impl ControlsVisibilityController {
    pub fn new(events: EventSender, auto_hide_delay: Duration, fade_duration: Duration) -> Self {
        Self {
            visible: true,
            timer: AutoHideTimer::new(events),
            auto_hide_delay,
            fade_duration,
        }
    }

    /// Fade the controls in and arm auto-hide if the gate allows it
    pub fn show(&mut self, out: &mut Presenter, gate: AutoHideGate) {
        self.set_visible(true, out);
        self.restart_auto_hide(gate);
    }

    /// Fade the controls out and cancel auto-hide
    pub fn hide(&mut self, out: &mut Presenter) {
        self.timer.disarm();
        self.set_visible(false, out);
    }

    /// Single-tap handling. Returns `false` when the tap was ignored
    /// because the player state pins the controls or does not take taps.
    pub fn toggle(&mut self, out: &mut Presenter, gate: AutoHideGate) -> bool {
        if !gate.state.accepts_tap() {
            debug!("Tap ignored in {:?}", gate.state);
            return false;
        }

        if self.visible {
            self.hide(out);
        } else {
            self.show(out, gate);
        }
        true
    }

    /// Auto-hide fire delivered through the event channel
    ///
    /// Stale fires are dropped, and a current fire is re-checked against
    /// the gate since the state may have moved on since it was armed.
    pub fn on_timer_fire(&mut self, token: TimerToken, out: &mut Presenter, gate: AutoHideGate) {
        if !self.timer.fire(token) {
            return;
        }

        if !gate.allows_auto_hide() {
            debug!("Auto-hide fire ignored ({:?})", gate);
            return;
        }

        debug!("Auto-hiding controls");
        self.hide(out);
    }

    /// Arm a fresh auto-hide countdown when visible and allowed, else disarm
    pub fn restart_auto_hide(&mut self, gate: AutoHideGate) {
        if self.visible && gate.allows_auto_hide() {
            self.timer.arm(self.auto_hide_delay);
        } else {
            self.timer.disarm();
        }
    }

    /// Disarm a pending countdown that the gate no longer allows
    pub fn revalidate(&mut self, gate: AutoHideGate) {
        if self.timer.is_armed() && !(self.visible && gate.allows_auto_hide()) {
            self.timer.disarm();
        }
    }

    pub fn disarm(&mut self) {
        self.timer.disarm();
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn visibility(&self) -> ControlsVisibility {
        ControlsVisibility {
            visible: self.visible,
            auto_hide_armed: self.timer.is_armed(),
        }
    }

    fn set_visible(&mut self, visible: bool, out: &mut Presenter) {
        let changed = self.visible != visible;
        self.visible = visible;

        out.emit(UiIntent::FadeControls {
            visible,
            duration_ms: self.fade_duration.as_millis() as u64,
        });
        out.emit(UiIntent::SetThumbVisible { visible });
        out.emit(UiIntent::SetPlayPauseVisible { visible });

        if changed {
            out.delegate().controls_visibility_changed(visible);
        }
    }
}
