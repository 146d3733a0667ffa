//! Screen state definitions

use std::collections::HashMap;

use crate::app::notice::Notice;
use crate::features::Settings;
use crate::media::{MediaId, MediaIndex, MediaItem};
use crate::panel::PanelEngine;
use crate::selection::SelectionSet;

/// Capture screen: camera overlay plus the draggable gallery sheet
#[derive(Debug, Clone)]
pub struct ScanScreen {
    pub(crate) panel: PanelEngine,
    pub(crate) gallery: MediaIndex,
    pub(crate) selection: SelectionSet<MediaId>,
    /// Items behind the selected ids, so a gallery refresh cannot lose them
    pub(crate) picked: HashMap<MediaId, MediaItem>,
    pub(crate) gallery_visible: bool,
    /// Last expansion reported by the sheet
    pub(crate) sheet_expanded: bool,
    pub(crate) notice: Option<Notice>,
    /// Set once a pull-down has acted, cleared when the grid leaves the top
    pub(crate) pull_latched: bool,
    pub(crate) end_reached_ratio: f32,
    pub(crate) pull_down_distance: f32,
}

impl ScanScreen {
    pub fn new(settings: &Settings) -> Self {
        Self {
            panel: PanelEngine::new(settings.geometry(), settings.spring),
            gallery: MediaIndex::new(settings.gallery.page_size),
            selection: SelectionSet::new(settings.selection.capacity),
            picked: HashMap::new(),
            gallery_visible: true,
            sheet_expanded: false,
            notice: None,
            pull_latched: false,
            end_reached_ratio: settings.gallery.end_reached_ratio,
            pull_down_distance: settings.gallery.pull_down_distance,
        }
    }

    pub fn panel(&self) -> &PanelEngine {
        &self.panel
    }

    pub fn gallery(&self) -> &MediaIndex {
        &self.gallery
    }

    pub fn selection(&self) -> &SelectionSet<MediaId> {
        &self.selection
    }

    pub fn gallery_visible(&self) -> bool {
        self.gallery_visible
    }

    pub fn sheet_expanded(&self) -> bool {
        self.sheet_expanded
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Selected items in selection order
    pub fn selected_items(&self) -> Vec<MediaItem> {
        self.selection
            .iter()
            .filter_map(|id| self.picked.get(id).cloned())
            .collect()
    }

    /// Whether the sheet still needs frame ticks
    pub fn wants_frames(&self) -> bool {
        self.panel.is_animating()
    }
}
