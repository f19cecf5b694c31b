//! Intent emission and the display snapshot
//!
//! Every [`UiIntent`] goes through the [`Presenter`], which records its
//! effect in a [`DisplaySnapshot`] before handing it to the view. Hosts and
//! tests read the snapshot instead of replaying intents.

use crate::overlay::time_format::EMPTY_TIME;
use crate::overlay::{
    BarGeometry, OverlayDelegate, OverlayView, PlayPauseIcon, UiIntent,
};
use crate::player::VideoFitMode;
use log::debug;
use serde::Serialize;

/// What the controls currently show
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplaySnapshot {
    pub controls_visible: bool,
    pub loader_visible: bool,
    pub play_pause_icon: PlayPauseIcon,
    pub play_pause_visible: bool,
    pub elapsed_label: String,
    pub remaining_label: String,
    pub slider_value: f32,
    pub thumb_visible: bool,
    pub bottom_bar_visible: bool,
    pub fit_mode: VideoFitMode,
    pub geometry: BarGeometry,
}

impl Default for DisplaySnapshot {
    fn default() -> Self {
        Self {
            controls_visible: true,
            loader_visible: true,
            play_pause_icon: PlayPauseIcon::Play,
            play_pause_visible: false,
            elapsed_label: EMPTY_TIME.to_string(),
            remaining_label: EMPTY_TIME.to_string(),
            slider_value: 0.0,
            thumb_visible: false,
            bottom_bar_visible: false,
            fit_mode: VideoFitMode::AspectFit,
            geometry: BarGeometry::default(),
        }
    }
}

impl DisplaySnapshot {
    fn apply(&mut self, intent: &UiIntent) {
        match intent {
            UiIntent::FadeControls { visible, .. } => self.controls_visible = *visible,
            UiIntent::SetLoader { visible } => self.loader_visible = *visible,
            UiIntent::SetPlayPauseIcon { icon } => self.play_pause_icon = *icon,
            UiIntent::SetPlayPauseVisible { visible } => self.play_pause_visible = *visible,
            UiIntent::SetTimeLabels { elapsed, remaining } => {
                self.elapsed_label.clone_from(elapsed);
                self.remaining_label.clone_from(remaining);
            }
            UiIntent::SetSliderValue { value } => self.slider_value = *value,
            UiIntent::SetThumbVisible { visible } => self.thumb_visible = *visible,
            UiIntent::SetBottomBarVisible { visible } => self.bottom_bar_visible = *visible,
            UiIntent::SetFitMode { mode } => self.fit_mode = *mode,
            UiIntent::ApplyGeometry { geometry } => self.geometry = *geometry,
        }
    }
}

/// Owns the view and delegate collaborators
///
/// The overlay keeps no reference back to whoever embeds it; both
/// collaborators are handed over at construction.
pub struct Presenter {
    view: Box<dyn OverlayView>,
    delegate: Box<dyn OverlayDelegate>,
    snapshot: DisplaySnapshot,
}

impl Presenter {
    pub fn new(view: Box<dyn OverlayView>, delegate: Box<dyn OverlayDelegate>) -> Self {
        Self {
            view,
            delegate,
            snapshot: DisplaySnapshot::default(),
        }
    }

    /// Record an intent and forward it to the view
    pub fn emit(&mut self, intent: UiIntent) {
        debug!("UI intent: {:?}", intent);
        self.snapshot.apply(&intent);
        self.view.apply(&intent);
    }

    /// Put labels, slider and thumb back to their empty state
    pub fn reset_timeline(&mut self) {
        self.emit(UiIntent::SetSliderValue { value: 0.0 });
        self.emit(UiIntent::SetThumbVisible { visible: false });
        self.emit(UiIntent::SetTimeLabels {
            elapsed: EMPTY_TIME.to_string(),
            remaining: EMPTY_TIME.to_string(),
        });
        self.emit(UiIntent::SetPlayPauseVisible { visible: false });
    }

    pub fn delegate(&mut self) -> &mut dyn OverlayDelegate {
        self.delegate.as_mut()
    }

    pub fn snapshot(&self) -> &DisplaySnapshot {
        &self.snapshot
    }
}
