//! Camera message handlers

use tracing::{info, warn};

use crate::app::message::Message;
use crate::app::notice::Notice;
use crate::app::state::ScanScreen;
use crate::app::task::Task;

impl ScanScreen {
    /// Handle shutter presses and capture results
    pub fn handle_capture(&mut self, message: &Message) -> Option<Task> {
        match message {
            Message::CapturePressed => Some(Task::Capture),

            Message::Captured(Ok(item)) => {
                info!("Captured {}", item.uri);
                if self.selection.contains(&item.id) {
                    warn!("Captured photo {} was already selected", item.id);
                } else {
                    self.toggle_item(item.clone());
                }
                // Reload so the new photo shows up at the top of the grid
                Some(self.refresh_gallery())
            }

            Message::Captured(Err(e)) => {
                warn!("Capture failed: {}", e);
                self.notice = Some(Notice::from(e));
                Some(Task::none())
            }

            _ => None,
        }
    }
}
