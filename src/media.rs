//! Media library types and collaborators
//!
//! - `index` - cursor-paginated view over the library
//! - `provider` - contracts for the media provider and capture device
//! - `library` - image folder on disk
//! - `memory` - in-memory library for tests and demos

pub mod index;
pub mod library;
pub mod memory;
pub mod provider;

pub use index::{LoadKind, LoadOutcome, MediaIndex, PageRequest};
pub use library::{FolderCapture, LocalLibrary};
pub use memory::{MemoryLibrary, ScriptedCapture};
pub use provider::{CaptureDevice, MediaProvider};

use std::path::Path;

use chrono::{DateTime, Utc};

/// Supported photo extensions
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "heic", "heif", "webp"];

/// Check if a file extension is a supported photo format
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Stable identifier of a library item
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MediaId(String);

impl MediaId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MediaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A photo in the library
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaItem {
    pub id: MediaId,
    /// Opaque local reference the renderer can load
    pub uri: String,
    pub created_at: DateTime<Utc>,
}

impl MediaItem {
    /// Library order: newest first, ties broken by id so pages never overlap
    pub fn newest_first(a: &MediaItem, b: &MediaItem) -> std::cmp::Ordering {
        b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id))
    }

    /// Whether `self` sorts strictly after `anchor` in library order
    pub fn is_after(&self, anchor: &CursorPosition) -> bool {
        (self.created_at, &self.id) < (anchor.created_at, &anchor.id)
    }
}

/// Opaque pagination token handed back by a provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor(String);

impl Cursor {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Encode the position of the last item of a page
    ///
    /// The timestamp keeps full nanosecond precision (`"{secs}.{nanos}:{id}"`)
    /// so items sharing a millisecond with the anchor are not skipped.
    pub fn after_item(item: &MediaItem) -> Self {
        Self(format!(
            "{}.{:09}:{}",
            item.created_at.timestamp(),
            item.created_at.timestamp_subsec_nanos(),
            item.id.as_str()
        ))
    }

    /// Decode a token produced by [`Cursor::after_item`]
    pub fn position(&self) -> Option<CursorPosition> {
        let (timestamp, id) = self.0.split_once(':')?;
        let (secs, nanos) = timestamp.split_once('.')?;
        let created_at = DateTime::from_timestamp(secs.parse().ok()?, nanos.parse().ok()?)?;
        Some(CursorPosition {
            created_at,
            id: MediaId::new(id),
        })
    }
}

/// Decoded cursor: the last item already delivered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorPosition {
    pub created_at: DateTime<Utc>,
    pub id: MediaId,
}

/// One page from the provider
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MediaPage {
    pub items: Vec<MediaItem>,
    pub cursor: Option<Cursor>,
    pub has_more: bool,
}

impl MediaPage {
    /// Slice a page of `page_size` out of an already sorted library
    pub fn from_sorted(sorted: &[MediaItem], page_size: usize, after: Option<&CursorPosition>) -> Self {
        let start = match after {
            Some(anchor) => sorted
                .iter()
                .position(|item| item.is_after(anchor))
                .unwrap_or(sorted.len()),
            None => 0,
        };
        let end = (start + page_size).min(sorted.len());
        let items = sorted[start..end].to_vec();

        Self {
            cursor: items.last().map(Cursor::after_item),
            has_more: end < sorted.len(),
            items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, millis: i64) -> MediaItem {
        MediaItem {
            id: MediaId::new(id),
            uri: format!("file:///{}.jpg", id),
            created_at: DateTime::from_timestamp_millis(millis).unwrap(),
        }
    }

    #[test]
    fn test_is_image_file() {
        assert!(is_image_file(Path::new("/photos/card.JPG")));
        assert!(is_image_file(Path::new("scan.heic")));
        assert!(!is_image_file(Path::new("notes.txt")));
        assert!(!is_image_file(Path::new("no_extension")));
    }

    #[test]
    fn test_cursor_survives_ids_with_colons() {
        let cursor = Cursor::after_item(&item("ph:abc", 1_700_000_000_123));
        let position = cursor.position().unwrap();
        assert_eq!(position.id.as_str(), "ph:abc");
        assert_eq!(position.created_at.timestamp_millis(), 1_700_000_000_123);
        assert!(Cursor::new("garbage").position().is_none());
    }

    #[test]
    fn test_cursor_keeps_sub_millisecond_precision() {
        let created_at = DateTime::from_timestamp(1_700_000_000, 123_456_789).unwrap();
        let anchor = MediaItem {
            created_at,
            ..item("b", 0)
        };
        let position = Cursor::after_item(&anchor).position().unwrap();
        assert_eq!(position.created_at, created_at);

        // Same instant, later in library order
        let sibling = MediaItem {
            created_at,
            ..item("a", 0)
        };
        assert!(sibling.is_after(&position));
        assert!(Cursor::new("1700000000:b").position().is_none());
    }

    #[test]
    fn test_pages_do_not_overlap_on_equal_timestamps() {
        let mut all = vec![item("a", 10), item("b", 10), item("c", 10), item("d", 5)];
        all.sort_by(MediaItem::newest_first);

        let first = MediaPage::from_sorted(&all, 2, None);
        assert!(first.has_more);
        let anchor = first.cursor.as_ref().unwrap().position().unwrap();
        let second = MediaPage::from_sorted(&all, 2, Some(&anchor));
        assert!(!second.has_more);

        let ids: Vec<&str> = first
            .items
            .iter()
            .chain(second.items.iter())
            .map(|item| item.id.as_str())
            .collect();
        assert_eq!(ids, vec!["c", "b", "a", "d"]);
    }
}
