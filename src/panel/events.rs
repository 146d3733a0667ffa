//! Sheet notifications
//!
//! The engine reports settles and dismissals through a [`PanelListener`]
//! passed into the calls that can produce them, so it never holds a
//! reference to whoever renders it.

/// Notifications raised by [`PanelEngine`](super::PanelEngine)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelEvent {
    /// A settle finished; carries whether the sheet is now expanded
    ExpansionChanged(bool),
    /// A release decided to dismiss the sheet
    HideRequested,
}

/// Receives sheet notifications
pub trait PanelListener {
    fn on_panel_event(&mut self, event: PanelEvent);
}

/// Collects events in order, used by the screen to process them after the call
impl PanelListener for Vec<PanelEvent> {
    fn on_panel_event(&mut self, event: PanelEvent) {
        self.push(event);
    }
}
