//! Selection and session message handlers

use tracing::{info, warn};

use crate::app::message::Message;
use crate::app::notice::Notice;
use crate::app::state::ScanScreen;
use crate::app::task::Task;
use crate::error::ScanError;
use crate::media::MediaItem;
use crate::selection::Toggled;

impl ScanScreen {
    /// Handle continue, notice dismissal and session end
    pub fn handle_session(&mut self, message: &Message) -> Option<Task> {
        match message {
            Message::ContinuePressed => Some(self.continue_with_selection()),

            Message::DismissNotice => {
                self.notice = None;
                Some(Task::none())
            }

            Message::SessionFinished => {
                info!("Scan session finished, clearing {} photos", self.selection.len());
                self.selection.clear();
                self.picked.clear();
                Some(Task::none())
            }

            _ => None,
        }
    }

    /// Select `item`, or deselect it if already selected
    ///
    /// A full selection raises a notice instead.
    pub(crate) fn toggle_item(&mut self, item: MediaItem) -> Option<Toggled> {
        match self.selection.toggle(item.id.clone()) {
            Ok(toggled @ Toggled::Added { .. }) => {
                self.picked.insert(item.id.clone(), item);
                Some(toggled)
            }
            Ok(toggled @ Toggled::Removed { .. }) => {
                self.picked.remove(&item.id);
                Some(toggled)
            }
            Err(e) => {
                self.notice = Some(Notice::from(&e));
                None
            }
        }
    }

    fn continue_with_selection(&mut self) -> Task {
        if self.selection.is_empty() {
            self.notice = Some(Notice::from(&ScanError::EmptySelection));
            return Task::none();
        }

        let items = self.selected_items();
        if items.len() != self.selection.len() {
            warn!(
                "Resolved {} of {} selected photos",
                items.len(),
                self.selection.len()
            );
        }
        info!("Continuing with {} photos", items.len());
        Task::Navigate(items)
    }
}
