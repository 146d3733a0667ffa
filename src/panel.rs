//! Draggable capture sheet
//!
//! Offsets are measured from the collapsed baseline, positive downward:
//! - `Hidden` rests at `+D`
//! - `Collapsed` rests at `0`
//! - `Expanded` rests at `-D`
//!
//! where `D = max_height - min_height` is the drag distance.

pub mod engine;
pub mod events;
pub mod snap;
pub mod spring;

pub use engine::PanelEngine;
pub use events::{PanelEvent, PanelListener};
pub use snap::{SnapDecision, decide};
pub use spring::{Spring, SpringParams};

/// Discrete resting states of the sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Hidden,
    Collapsed,
    Expanded,
}

impl PanelState {
    /// Resting offset of this state for the given drag distance
    pub fn offset(self, drag_distance: f32) -> f32 {
        match self {
            PanelState::Hidden => drag_distance,
            PanelState::Collapsed => 0.0,
            PanelState::Expanded => -drag_distance,
        }
    }

    /// State whose resting offset is exactly `position`, if any
    pub fn at(position: f32, drag_distance: f32) -> Option<Self> {
        [PanelState::Hidden, PanelState::Collapsed, PanelState::Expanded]
            .into_iter()
            .find(|state| state.offset(drag_distance) == position)
    }
}

/// One pointer sample from the input system
///
/// Velocity is in pixels per millisecond, the unit the snap thresholds use.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GestureSample {
    pub delta_y: f32,
    pub velocity_y: f32,
}

/// Sheet heights in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetGeometry {
    pub min_height: f32,
    pub max_height: f32,
}

impl SheetGeometry {
    pub fn new(min_height: f32, max_height: f32) -> Self {
        Self {
            min_height,
            max_height: max_height.max(min_height),
        }
    }

    /// Travel between the collapsed and expanded heights
    pub fn drag_distance(&self) -> f32 {
        self.max_height - self.min_height
    }
}
