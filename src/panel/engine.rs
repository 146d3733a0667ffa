//! Position engine for the capture sheet
//!
//! Maps pointer gestures onto the sheet offset and settles it with a spring.
//!
//! ## Offset model
//! ```text
//! gesture start:  base = position          (captures a mid-flight settle, no jump)
//! gesture move:   position = clamp(base + dy, -D, D)
//! gesture end:    position = clamp(base + dy), flatten, decide, settle
//! settle done:    position = target, notify ExpansionChanged once
//! ```

use tracing::debug;

use super::events::{PanelEvent, PanelListener};
use super::snap::{self, SnapDecision};
use super::spring::{Spring, SpringParams};
use super::{PanelState, SheetGeometry};

/// Running settle toward a resting state
#[derive(Debug, Clone)]
struct Settle {
    spring: Spring,
    target: PanelState,
    will_be_expanded: bool,
}

/// Owns the sheet offset; the only place it is mutated
#[derive(Debug, Clone)]
pub struct PanelEngine {
    drag_distance: f32,
    spring_params: SpringParams,
    /// Live offset reported to the renderer
    position: f32,
    /// Offset captured at gesture start, `None` outside a gesture
    gesture_base: Option<f32>,
    settle: Option<Settle>,
    /// Expansion the sheet is at or heading to
    expanded: bool,
}

impl PanelEngine {
    /// Create an engine resting in the collapsed state
    pub fn new(geometry: SheetGeometry, spring_params: SpringParams) -> Self {
        Self {
            drag_distance: geometry.drag_distance(),
            spring_params,
            position: 0.0,
            gesture_base: None,
            settle: None,
            expanded: false,
        }
    }

    /// Current offset from the collapsed baseline
    pub fn position(&self) -> f32 {
        self.position
    }

    pub fn drag_distance(&self) -> f32 {
        self.drag_distance
    }

    /// Resting state the sheet is at, or the one it is settling toward
    ///
    /// `None` while a gesture holds the sheet between states.
    pub fn state(&self) -> Option<PanelState> {
        if let Some(settle) = &self.settle {
            return Some(settle.target);
        }
        PanelState::at(self.position, self.drag_distance)
    }

    pub fn is_animating(&self) -> bool {
        self.settle.is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture_base.is_some()
    }

    /// Whether the sheet is expanded or settling into expansion
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    fn clamp(&self, offset: f32) -> f32 {
        offset.clamp(-self.drag_distance, self.drag_distance)
    }

    /// Begin a drag from wherever the sheet currently is
    pub fn on_gesture_start(&mut self) {
        if let Some(settle) = self.settle.take() {
            debug!(
                "Gesture interrupted settle toward {:?} at {:.1}",
                settle.target, self.position
            );
            self.expanded = PanelState::at(self.position, self.drag_distance)
                == Some(PanelState::Expanded);
        }
        self.gesture_base = Some(self.position);
    }

    /// Follow the finger; `dy` is relative to the gesture start
    pub fn on_gesture_delta(&mut self, dy: f32) {
        let base = match self.gesture_base {
            Some(base) => base,
            None => {
                self.on_gesture_start();
                self.position
            }
        };
        self.position = self.clamp(base + dy);
    }

    /// Finish a drag and settle where the snap policy says
    pub fn on_gesture_end(
        &mut self,
        dy: f32,
        velocity_y: f32,
        listener: &mut impl PanelListener,
    ) -> SnapDecision {
        let base = self.gesture_base.take().unwrap_or(self.position);
        self.settle = None;
        self.position = self.clamp(base + dy);

        let decision = snap::decide(self.position, velocity_y, self.drag_distance);
        debug!(
            "Sheet released at {:.1} (v={:.2}): rule {} -> {:?}",
            self.position, velocity_y, decision.rule, decision.target
        );

        if decision.should_hide {
            listener.on_panel_event(PanelEvent::HideRequested);
        }
        self.settle_to(decision.target, decision.will_be_expanded);
        decision
    }

    /// Show the sheet collapsed, or slide it fully out of view
    pub fn set_visible(&mut self, visible: bool) {
        let target = if visible {
            PanelState::Collapsed
        } else {
            PanelState::Hidden
        };
        self.settle_to(target, false);
    }

    /// Flip between collapsed and expanded (handle tap)
    pub fn toggle(&mut self) {
        if self.expanded {
            self.settle_to(PanelState::Collapsed, false);
        } else {
            self.settle_to(PanelState::Expanded, true);
        }
    }

    /// Settle into the collapsed state
    pub fn collapse(&mut self) {
        self.settle_to(PanelState::Collapsed, false);
    }

    fn settle_to(&mut self, target: PanelState, will_be_expanded: bool) {
        self.gesture_base = None;
        self.expanded = will_be_expanded;

        let mut spring = Spring::new(self.position as f64, self.spring_params);
        spring.set_target(target.offset(self.drag_distance) as f64);
        self.settle = Some(Settle {
            spring,
            target,
            will_be_expanded,
        });
    }

    /// Advance the settle by one host frame
    ///
    /// Returns `true` while still animating.
    pub fn tick(&mut self, dt: f32, listener: &mut impl PanelListener) -> bool {
        let Some(settle) = self.settle.as_mut() else {
            return false;
        };

        settle.spring.update(dt as f64);
        if !settle.spring.arrived() {
            self.position = (settle.spring.position() as f32)
                .clamp(-self.drag_distance, self.drag_distance);
            return true;
        }

        let target = settle.target;
        let will_be_expanded = settle.will_be_expanded;
        self.settle = None;
        self.position = target.offset(self.drag_distance);
        debug!("Sheet settled {:?}", target);
        listener.on_panel_event(PanelEvent::ExpansionChanged(will_be_expanded));
        false
    }
}
