//! In-memory library and camera
//!
//! Used by tests and script replays that should not touch the disk. Both
//! types use interior mutability and are meant for a single thread.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::time::Duration;

use anyhow::{Result, anyhow, bail};
use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};

use super::provider::{CaptureDevice, MediaProvider};
use super::{Cursor, MediaId, MediaItem, MediaPage};

/// Fixed reference time so generated libraries are reproducible
const EPOCH_MILLIS: i64 = 1_700_000_000_000;

#[derive(Debug, Default)]
pub struct MemoryLibrary {
    items: RefCell<Vec<MediaItem>>,
    fetches: Cell<usize>,
    failures: Cell<usize>,
    latency: Cell<Duration>,
    captures: Cell<usize>,
}

impl MemoryLibrary {
    pub fn new(items: Vec<MediaItem>) -> Self {
        Self {
            items: RefCell::new(items),
            ..Default::default()
        }
    }

    /// Library of `count` photos named `mem-0000`, `mem-0001`, ... newest first
    pub fn with_photos(count: usize) -> Self {
        Self::new(Self::sample_items(count))
    }

    pub fn sample_items(count: usize) -> Vec<MediaItem> {
        let newest = DateTime::from_timestamp_millis(EPOCH_MILLIS).unwrap_or_default();
        (0..count)
            .map(|i| MediaItem {
                id: MediaId::new(format!("mem-{:04}", i)),
                uri: format!("memory://photos/{:04}.jpg", i),
                created_at: newest - TimeDelta::seconds(i as i64),
            })
            .collect()
    }

    /// Number of `fetch_page` calls so far
    pub fn fetch_count(&self) -> usize {
        self.fetches.get()
    }

    /// Make the next `count` fetches fail
    pub fn fail_next_fetches(&self, count: usize) {
        self.failures.set(count);
    }

    /// Delay every fetch by `latency`
    pub fn set_latency(&self, latency: Duration) {
        self.latency.set(latency);
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

#[async_trait(?Send)]
impl MediaProvider for MemoryLibrary {
    async fn fetch_page(&self, page_size: usize, after: Option<&Cursor>) -> Result<MediaPage> {
        self.fetches.set(self.fetches.get() + 1);

        let latency = self.latency.get();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }

        let failures = self.failures.get();
        if failures > 0 {
            self.failures.set(failures - 1);
            bail!("photo library unavailable");
        }

        let anchor = match after {
            Some(cursor) => Some(
                cursor
                    .position()
                    .ok_or_else(|| anyhow!("invalid cursor {:?}", cursor.as_str()))?,
            ),
            None => None,
        };

        let mut sorted = self.items.borrow().clone();
        sorted.sort_by(MediaItem::newest_first);
        Ok(MediaPage::from_sorted(&sorted, page_size, anchor.as_ref()))
    }

    async fn create_item(&self, source_uri: &str) -> Result<MediaItem> {
        let n = self.captures.get();
        self.captures.set(n + 1);

        let newest = self
            .items
            .borrow()
            .iter()
            .map(|item| item.created_at)
            .max()
            .unwrap_or_else(Utc::now);
        let item = MediaItem {
            id: MediaId::new(format!("cap-{:04}", n)),
            uri: source_uri.to_string(),
            created_at: newest + TimeDelta::seconds(1),
        };
        self.items.borrow_mut().push(item.clone());
        Ok(item)
    }
}

/// Camera that hands out queued results in order
#[derive(Debug, Default)]
pub struct ScriptedCapture {
    shots: RefCell<VecDeque<Option<String>>>,
}

impl ScriptedCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful shot
    pub fn push_shot(&self, uri: impl Into<String>) {
        self.shots.borrow_mut().push_back(Some(uri.into()));
    }

    /// Queue a failed shot
    pub fn push_failure(&self) {
        self.shots.borrow_mut().push_back(None);
    }
}

#[async_trait(?Send)]
impl CaptureDevice for ScriptedCapture {
    async fn capture(&self) -> Result<String> {
        match self.shots.borrow_mut().pop_front() {
            Some(Some(uri)) => Ok(uri),
            Some(None) => bail!("camera error"),
            None => bail!("camera has no shots queued"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_created_item_sorts_first() {
        let library = MemoryLibrary::with_photos(3);
        let item = library.create_item("memory://camera/1.jpg").await.unwrap();
        assert_eq!(item.id.as_str(), "cap-0000");
        assert_eq!(library.len(), 4);

        let page = library.fetch_page(2, None).await.unwrap();
        assert_eq!(page.items[0].id, item.id);
        assert!(page.has_more);
    }

    #[tokio::test]
    async fn test_failure_injection_counts_down() {
        let library = MemoryLibrary::with_photos(1);
        library.fail_next_fetches(2);
        assert!(library.fetch_page(5, None).await.is_err());
        assert!(library.fetch_page(5, None).await.is_err());
        assert_eq!(library.fetch_page(5, None).await.unwrap().items.len(), 1);
        assert_eq!(library.fetch_count(), 3);
    }

    #[tokio::test]
    async fn test_scripted_capture_plays_in_order() {
        let camera = ScriptedCapture::new();
        camera.push_shot("a.jpg");
        camera.push_failure();

        assert_eq!(camera.capture().await.unwrap(), "a.jpg");
        assert!(camera.capture().await.is_err());
        assert!(camera.capture().await.is_err());
    }
}
