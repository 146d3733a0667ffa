// src/app/view.rs
//! Screen view model
//!
//! What the renderer needs to draw the camera overlay and the sheet. Nothing
//! here mutates the screen.

use super::ScanScreen;
use super::grid::{self, GridCell};
use crate::panel::PanelState;

impl ScanScreen {
    /// Sheet offset from its collapsed baseline, positive downward
    pub fn sheet_offset(&self) -> f32 {
        self.panel.position()
    }

    pub fn sheet_state(&self) -> Option<PanelState> {
        self.panel.state()
    }

    /// Header close button is only offered on an expanded sheet
    pub fn shows_close_button(&self) -> bool {
        self.sheet_expanded
    }

    pub fn grid_cells(&self) -> Vec<GridCell<'_>> {
        grid::cells(&self.gallery, &self.selection)
    }

    pub fn shows_grid_footer(&self) -> bool {
        grid::shows_footer(&self.gallery)
    }

    /// Count on the gallery button, hidden with nothing selected
    pub fn gallery_badge(&self) -> Option<usize> {
        (!self.selection.is_empty()).then(|| self.selection.len())
    }

    /// "3/8" counter on the camera overlay
    pub fn selection_counter(&self) -> Option<String> {
        if self.selection.is_empty() {
            return None;
        }
        Some(format!(
            "{}/{}",
            self.selection.len(),
            self.selection.capacity()
        ))
    }

    pub fn continue_label(&self) -> Option<String> {
        match self.selection.len() {
            0 => None,
            1 => Some("Continue with 1 photo".to_string()),
            n => Some(format!("Continue with {} photos", n)),
        }
    }
}
