//! Message update handlers - thin dispatcher delegating to submodules

mod capture;
mod gallery;
mod panel;
mod session;

use super::{Message, ScanScreen, Task};

impl ScanScreen {
    /// Handle messages by delegating to appropriate submodule handlers
    pub fn update(&mut self, message: Message) -> Task {
        if let Some(task) = self.handle_panel(&message) {
            return task;
        }
        if let Some(task) = self.handle_gallery(&message) {
            return task;
        }
        if let Some(task) = self.handle_capture(&message) {
            return task;
        }
        if let Some(task) = self.handle_session(&message) {
            return task;
        }

        Task::none()
    }
}
