//! Auto-hide timer
//!
//! A single-shot, restartable timer. Arming spawns a tokio sleep that posts
//! [`OverlayEvent::AutoHideElapsed`] back into the overlay's event channel,
//! so the fire is handled on the overlay's own task like any other event.
//!
//! Every arm mints a fresh [`TimerToken`]. Disarming aborts the sleep and
//! forgets the token, which means a fire that was already sitting in the
//! channel no longer matches and is dropped by [`AutoHideTimer::fire`].
//! Once `disarm` returns, no fire from an earlier arm can get through.

use crate::overlay::{EventSender, OverlayEvent};
use log::debug;
use serde::Serialize;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Identifies one arming of the timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TimerToken(u64);

/// Restartable one-shot timer owned by the visibility controller
///
/// Must be armed from inside a tokio runtime.
pub struct AutoHideTimer {
    events: EventSender,
    armed: Option<TimerToken>,
    task: Option<JoinHandle<()>>,
    next_token: u64,
}

impl AutoHideTimer {
    pub fn new(events: EventSender) -> Self {
        Self {
            events,
            armed: None,
            task: None,
            next_token: 0,
        }
    }

    /// Schedule a fire after `after`, replacing any pending one
    pub fn arm(&mut self, after: Duration) -> TimerToken {
        self.disarm();

        self.next_token += 1;
        let token = TimerToken(self.next_token);
        let events = self.events.clone();
        // Deadline is fixed here, not when the task is first polled
        let deadline = tokio::time::Instant::now() + after;

        self.task = Some(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            events.post(OverlayEvent::AutoHideElapsed(token));
        }));
        self.armed = Some(token);

        debug!("Auto-hide armed ({:?}, token {:?})", after, token);
        token
    }

    /// Cancel the pending fire, if any. Safe to call when already disarmed.
    pub fn disarm(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        if let Some(token) = self.armed.take() {
            debug!("Auto-hide disarmed (token {:?})", token);
        }
    }

    /// Consume a fire delivered through the event channel
    ///
    /// Returns `true` when `token` belongs to the current arming; the timer
    /// is disarmed before returning so the caller's on-fire action sees a
    /// settled state. Stale tokens return `false`.
    pub fn fire(&mut self, token: TimerToken) -> bool {
        if self.armed != Some(token) {
            debug!("Ignoring stale auto-hide fire (token {:?})", token);
            return false;
        }

        self.armed = None;
        self.task = None;
        true
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }
}

impl Drop for AutoHideTimer {
    fn drop(&mut self) {
        self.disarm();
    }
}
