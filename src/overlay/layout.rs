//! Orientation-driven bottom bar geometry
//!
//! Not part of the state machine; `update_for_orientation` only computes
//! these numbers and hands them to the view.

use serde::{Deserialize, Serialize};

/// Device orientation as reported by the host
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[default]
    Unknown,
    Portrait,
    PortraitUpsideDown,
    LandscapeLeft,
    LandscapeRight,
    FaceUp,
    FaceDown,
}

impl Orientation {
    pub fn is_landscape(self) -> bool {
        matches!(self, Orientation::LandscapeLeft | Orientation::LandscapeRight)
    }
}

/// Bottom bar corner radius and margins, in points
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BarGeometry {
    pub corner_radius: f32,

    /// Inset from the leading and trailing edges
    pub horizontal_margin: f32,

    /// Offset from the bottom edge; negative lifts the bar
    pub bottom_margin: f32,
}

impl BarGeometry {
    /// Floating rounded bar in landscape, flush edge-to-edge bar otherwise
    pub fn for_orientation(orientation: Orientation) -> Self {
        if orientation.is_landscape() {
            Self {
                corner_radius: 12.0,
                horizontal_margin: 10.0,
                bottom_margin: -10.0,
            }
        } else {
            Self::default()
        }
    }
}
