//! Slider drag sessions
//!
//! `idle -> dragging -> idle`. While a session is open the user's slider
//! value is the only source for the displayed position; the reconciler
//! drops player time samples until the drag ends with a single seek.

use crate::overlay::time_format::{clamp_unit, time_labels};
use crate::overlay::{Presenter, UiIntent};
use crate::player::PlayerBackend;
use log::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq)]
struct ScrubSession {
    last_user_value: f32,
}

#[derive(Debug, Default)]
pub struct ScrubController {
    session: Option<ScrubSession>,
}

impl ScrubController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Open a drag session starting at the slider's current value.
    /// Returns `false` if a session is already open.
    pub fn begin_drag(&mut self, out: &mut Presenter) -> bool {
        if self.session.is_some() {
            debug!("Scrub already in progress");
            return false;
        }

        let start = out.snapshot().slider_value;
        self.session = Some(ScrubSession {
            last_user_value: start,
        });
        out.emit(UiIntent::SetThumbVisible { visible: true });

        debug!("Scrub started at {:.3}", start);
        true
    }

    /// Move the slider. Labels are recomputed against `total_seconds` when
    /// the duration is known; no seek is issued. No-op while idle.
    pub fn update_drag(
        &mut self,
        value: f32,
        total_seconds: Option<f64>,
        out: &mut Presenter,
    ) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };

        let value = clamp_unit(value);
        session.last_user_value = value;
        out.emit(UiIntent::SetSliderValue { value });

        if let Some(total) = total_seconds.filter(|t| t.is_finite() && *t > 0.0) {
            let (elapsed, remaining) = time_labels(value as f64 * total, total);
            out.emit(UiIntent::SetTimeLabels { elapsed, remaining });
        }

        true
    }

    /// Close the session and seek to its final value.
    /// Returns the value sought to, or `None` if no drag was in progress.
    pub fn end_drag(
        &mut self,
        backend: &mut dyn PlayerBackend,
        out: &mut Presenter,
    ) -> Option<f32> {
        let session = self.session.take()?;

        out.emit(UiIntent::SetThumbVisible { visible: false });
        debug!("Scrub ended, seeking to {:.3}", session.last_user_value);
        if let Err(e) = backend.seek(session.last_user_value) {
            warn!("Seek to {:.3} rejected: {}", session.last_user_value, e);
        }

        Some(session.last_user_value)
    }

    /// Drop an open session without seeking
    pub fn discard(&mut self) {
        if self.session.take().is_some() {
            debug!("Scrub session discarded");
        }
    }
}
