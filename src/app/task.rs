//! Side effects requested by the screen
//!
//! `update` never performs I/O itself; it returns a `Task` and the runtime
//! carries it out, feeding results back as messages.

use crate::media::{MediaItem, PageRequest};

#[derive(Debug, Clone, PartialEq)]
pub enum Task {
    None,
    /// Run a page fetch and answer with `Message::PageLoaded`
    Fetch(PageRequest),
    /// Take a photo, admit it to the library, answer with `Message::Captured`
    Capture,
    /// Leave for the preview screen with these photos
    Navigate(Vec<MediaItem>),
}

impl Task {
    pub fn none() -> Self {
        Task::None
    }
}
