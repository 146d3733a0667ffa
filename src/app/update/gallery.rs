//! Gallery message handlers

use tracing::{debug, info, warn};

use crate::app::message::{Message, ScrollMetrics};
use crate::app::notice::Notice;
use crate::app::state::ScanScreen;
use crate::app::task::Task;
use crate::media::{LoadOutcome, MediaId};

impl ScanScreen {
    /// Handle paging, refresh and photo selection
    pub fn handle_gallery(&mut self, message: &Message) -> Option<Task> {
        match message {
            Message::Mounted => {
                info!("Scan screen mounted, loading photos");
                Some(Task::Fetch(self.gallery.begin_initial()))
            }

            Message::GridScrolled(metrics) => Some(self.on_grid_scrolled(metrics)),

            Message::RefreshGallery => Some(self.refresh_gallery()),

            Message::PhotoPressed(id) => {
                self.toggle_photo(id);
                Some(Task::none())
            }

            Message::PageLoaded(request, result) => {
                match self.gallery.complete(request, result.clone()) {
                    Ok(LoadOutcome::Stale) => {}
                    Ok(outcome) => debug!("Gallery page applied: {:?}", outcome),
                    Err(e) => {
                        warn!("Gallery {:?} page failed: {}", request.kind, e);
                        self.notice = Some(Notice::from(&e));
                    }
                }
                Some(Task::none())
            }

            _ => None,
        }
    }

    fn on_grid_scrolled(&mut self, metrics: &ScrollMetrics) -> Task {
        let pull = metrics.pull_down();
        if pull <= 0.0 {
            self.pull_latched = false;
        }

        if pull > self.pull_down_distance {
            if self.pull_latched {
                return Task::none();
            }
            self.pull_latched = true;

            if self.panel.is_expanded() {
                debug!("Pull down on expanded sheet, collapsing");
                self.panel.collapse();
                return Task::none();
            }
            if self.gallery.is_loading() {
                return Task::none();
            }
            return self.refresh_gallery();
        }

        if metrics.is_near_end(self.end_reached_ratio) {
            if let Some(request) = self.gallery.begin_more() {
                debug!("Grid near end, loading more after {:?}", request.after);
                return Task::Fetch(request);
            }
        }
        Task::none()
    }

    /// Drop the loaded window and start again from the newest photo
    pub(crate) fn refresh_gallery(&mut self) -> Task {
        info!("Refreshing gallery");
        self.gallery.reset();
        Task::Fetch(self.gallery.begin_initial())
    }

    fn toggle_photo(&mut self, id: &MediaId) {
        let Some(item) = self
            .gallery
            .find(id)
            .cloned()
            .or_else(|| self.picked.get(id).cloned())
        else {
            debug!("Ignoring press on unknown photo {}", id);
            return;
        };

        self.toggle_item(item);
    }
}
