//! Sheet message handlers

use tracing::debug;

use crate::app::message::Message;
use crate::app::state::ScanScreen;
use crate::app::task::Task;
use crate::panel::PanelEvent;

impl ScanScreen {
    /// Handle sheet gestures, visibility and frame ticks
    pub fn handle_panel(&mut self, message: &Message) -> Option<Task> {
        let mut events: Vec<PanelEvent> = Vec::new();

        match message {
            Message::GestureStarted => self.panel.on_gesture_start(),

            Message::GestureMoved(dy) => self.panel.on_gesture_delta(*dy),

            Message::GestureReleased(sample) => {
                self.panel
                    .on_gesture_end(sample.delta_y, sample.velocity_y, &mut events);
            }

            Message::HandleTapped => self.panel.toggle(),

            Message::ShowGallery => {
                self.gallery_visible = true;
                self.panel.set_visible(true);
            }

            Message::CloseGallery => {
                self.gallery_visible = false;
                self.panel.set_visible(false);
            }

            Message::Frame(dt) => {
                self.panel.tick(dt.as_secs_f32(), &mut events);
            }

            _ => return None,
        }

        self.apply_panel_events(events);
        Some(Task::none())
    }

    pub(crate) fn apply_panel_events(&mut self, events: Vec<PanelEvent>) {
        for event in events {
            match event {
                PanelEvent::ExpansionChanged(expanded) => {
                    if self.sheet_expanded != expanded {
                        debug!("Sheet expanded: {}", expanded);
                    }
                    self.sheet_expanded = expanded;
                }
                PanelEvent::HideRequested => {
                    debug!("Sheet dismissed by gesture");
                    self.gallery_visible = false;
                }
            }
        }
    }
}
