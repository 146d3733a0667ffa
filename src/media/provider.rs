//! Collaborator contracts
//!
//! The sheet never talks to a photo library or camera directly; the runtime
//! drives these traits and feeds results back as messages.

use anyhow::Result;
use async_trait::async_trait;

use super::{Cursor, MediaItem, MediaPage};

/// Source of library pages
#[async_trait(?Send)]
pub trait MediaProvider {
    /// Fetch up to `page_size` items strictly after `after`, newest first
    async fn fetch_page(&self, page_size: usize, after: Option<&Cursor>) -> Result<MediaPage>;

    /// Admit a freshly captured file into the library
    async fn create_item(&self, source_uri: &str) -> Result<MediaItem>;
}

/// Produces a new photo on demand
#[async_trait(?Send)]
pub trait CaptureDevice {
    /// Take a photo and return an opaque local reference to it
    async fn capture(&self) -> Result<String>;
}
