//! Gallery grid view model

use crate::media::{MediaId, MediaIndex, MediaItem};
use crate::selection::SelectionSet;

/// Photos per grid row
pub const COLUMNS: usize = 4;

/// One thumbnail in the grid
#[derive(Debug, Clone, PartialEq)]
pub struct GridCell<'a> {
    pub item: &'a MediaItem,
    /// Selection number shown on the badge, `None` when not selected
    pub badge: Option<usize>,
}

/// Cells for every loaded photo, in gallery order
pub fn cells<'a>(gallery: &'a MediaIndex, selection: &SelectionSet<MediaId>) -> Vec<GridCell<'a>> {
    gallery
        .items()
        .iter()
        .map(|item| GridCell {
            item,
            badge: selection.index_of(&item.id),
        })
        .collect()
}

/// Whether the footer spinner is shown
pub fn shows_footer(gallery: &MediaIndex) -> bool {
    gallery.is_loading()
}
