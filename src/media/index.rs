//! Cursor-paginated gallery index
//!
//! Loading is split into `begin_*` (guarded, marks the index as loading and
//! returns the request to run) and `complete` (applies the result), so the
//! screen can keep handling gestures while a fetch is outstanding. The
//! `load_initial` / `load_more` helpers run both halves against a provider.
//!
//! Each request carries the generation it was issued in. `reset` and
//! `begin_initial` start a new generation and any late result from an older
//! one is dropped.

use std::time::Duration;

use tracing::{debug, warn};

use super::provider::MediaProvider;
use super::{Cursor, MediaId, MediaItem, MediaPage};
use crate::error::ScanError;

/// Which half of the pagination a request belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadKind {
    /// First page, replaces the loaded items
    Initial,
    /// Next page, appended after the loaded items
    More,
}

/// A fetch the index is waiting on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub kind: LoadKind,
    pub page_size: usize,
    pub after: Option<Cursor>,
    generation: u64,
}

impl PageRequest {
    /// Run this request against a provider, optionally bounded by `timeout`
    pub async fn fetch<P: MediaProvider>(
        &self,
        provider: &P,
        timeout: Option<Duration>,
    ) -> Result<MediaPage, ScanError> {
        let fetch = provider.fetch_page(self.page_size, self.after.as_ref());
        let result = match timeout {
            Some(limit) => match tokio::time::timeout(limit, fetch).await {
                Ok(result) => result,
                Err(_) => {
                    return Err(ScanError::FetchFailed(format!(
                        "timed out after {}ms",
                        limit.as_millis()
                    )));
                }
            },
            None => fetch.await,
        };
        result.map_err(|e| ScanError::FetchFailed(format!("{:#}", e)))
    }
}

/// What a load did to the index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// First page loaded with this many items
    Replaced(usize),
    /// This many items appended
    Appended(usize),
    /// Provider returned an empty page; no more pages will be requested
    Exhausted,
    /// Result belonged to a previous generation and was dropped
    Stale,
    /// Nothing to fetch (no more pages, or a fetch already in flight)
    Skipped,
}

/// Loaded gallery items plus pagination state
#[derive(Debug, Clone)]
pub struct MediaIndex {
    items: Vec<MediaItem>,
    cursor: Option<Cursor>,
    has_more: bool,
    loading: bool,
    generation: u64,
    page_size: usize,
}

impl MediaIndex {
    pub fn new(page_size: usize) -> Self {
        Self {
            items: Vec::new(),
            cursor: None,
            has_more: true,
            loading: false,
            generation: 0,
            page_size: page_size.max(1),
        }
    }

    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Whether a fetch is in flight (drives the footer spinner)
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn cursor(&self) -> Option<&Cursor> {
        self.cursor.as_ref()
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn find(&self, id: &MediaId) -> Option<&MediaItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Start loading the first page
    ///
    /// Always issues a request; anything already in flight becomes stale.
    pub fn begin_initial(&mut self) -> PageRequest {
        self.generation += 1;
        self.loading = true;
        PageRequest {
            kind: LoadKind::Initial,
            page_size: self.page_size,
            after: None,
            generation: self.generation,
        }
    }

    /// Start loading the next page, unless exhausted or already loading
    pub fn begin_more(&mut self) -> Option<PageRequest> {
        if !self.has_more || self.loading {
            debug!(
                "Skipping load more: has_more={}, loading={}",
                self.has_more, self.loading
            );
            return None;
        }

        self.loading = true;
        Some(PageRequest {
            kind: LoadKind::More,
            page_size: self.page_size,
            after: self.cursor.clone(),
            generation: self.generation,
        })
    }

    /// Apply the result of `request`
    ///
    /// On error nothing but the loading flag changes.
    pub fn complete(
        &mut self,
        request: &PageRequest,
        result: Result<MediaPage, ScanError>,
    ) -> Result<LoadOutcome, ScanError> {
        if request.generation != self.generation {
            debug!(
                "Dropping stale {:?} page (generation {} != {})",
                request.kind, request.generation, self.generation
            );
            return Ok(LoadOutcome::Stale);
        }

        self.loading = false;
        let page = match result {
            Ok(page) => page,
            Err(e) => {
                warn!("Failed to load {:?} page: {}", request.kind, e);
                return Err(e);
            }
        };

        match request.kind {
            LoadKind::Initial => {
                let count = page.items.len();
                self.items = page.items;
                self.cursor = page.cursor;
                self.has_more = page.has_more;
                debug!("Loaded {} photos, has_more: {}", count, self.has_more);
                Ok(LoadOutcome::Replaced(count))
            }
            LoadKind::More if page.items.is_empty() => {
                self.has_more = false;
                debug!("Library exhausted at {} photos", self.items.len());
                Ok(LoadOutcome::Exhausted)
            }
            LoadKind::More => {
                let count = page.items.len();
                self.items.extend(page.items);
                self.cursor = page.cursor;
                self.has_more = page.has_more;
                debug!(
                    "Appended {} photos ({} total), has_more: {}",
                    count,
                    self.items.len(),
                    self.has_more
                );
                Ok(LoadOutcome::Appended(count))
            }
        }
    }

    /// Forget the current pagination window
    pub fn reset(&mut self) {
        self.generation += 1;
        self.items.clear();
        self.cursor = None;
        self.has_more = true;
        self.loading = false;
    }

    /// Fetch and apply the first page
    pub async fn load_initial<P: MediaProvider>(
        &mut self,
        provider: &P,
        timeout: Option<Duration>,
    ) -> Result<LoadOutcome, ScanError> {
        let request = self.begin_initial();
        let result = request.fetch(provider, timeout).await;
        self.complete(&request, result)
    }

    /// Fetch and append the next page, if there is one and nothing is in flight
    pub async fn load_more<P: MediaProvider>(
        &mut self,
        provider: &P,
        timeout: Option<Duration>,
    ) -> Result<LoadOutcome, ScanError> {
        let Some(request) = self.begin_more() else {
            return Ok(LoadOutcome::Skipped);
        };
        let result = request.fetch(provider, timeout).await;
        self.complete(&request, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::MemoryLibrary;

    fn ids(index: &MediaIndex) -> Vec<String> {
        index.items().iter().map(|item| item.id.to_string()).collect()
    }

    #[tokio::test]
    async fn test_initial_then_more_appends_in_order() {
        let library = MemoryLibrary::with_photos(5);
        let mut index = MediaIndex::new(2);

        assert_eq!(
            index.load_initial(&library, None).await,
            Ok(LoadOutcome::Replaced(2))
        );
        assert!(index.has_more());
        assert_eq!(
            index.load_more(&library, None).await,
            Ok(LoadOutcome::Appended(2))
        );
        assert_eq!(
            index.load_more(&library, None).await,
            Ok(LoadOutcome::Appended(1))
        );
        assert!(!index.has_more());
        assert!(!index.is_loading());

        assert_eq!(ids(&index), vec!["mem-0000", "mem-0001", "mem-0002", "mem-0003", "mem-0004"]);
        assert!(
            index
                .items()
                .windows(2)
                .all(|pair| pair[0].created_at > pair[1].created_at)
        );
    }

    #[tokio::test]
    async fn test_load_more_without_more_pages_is_noop() {
        let library = MemoryLibrary::with_photos(3);
        let mut index = MediaIndex::new(10);
        index.load_initial(&library, None).await.unwrap();
        assert!(!index.has_more());
        let fetches = library.fetch_count();
        let before = ids(&index);
        let cursor = index.cursor().cloned();

        assert_eq!(
            index.load_more(&library, None).await,
            Ok(LoadOutcome::Skipped)
        );
        assert_eq!(library.fetch_count(), fetches);
        assert_eq!(ids(&index), before);
        assert_eq!(index.cursor().cloned(), cursor);
    }

    #[test]
    fn test_overlapping_load_more_issues_one_request() {
        let mut index = MediaIndex::new(2);
        let first = index.begin_more().expect("first request");
        assert!(index.begin_more().is_none());
        assert!(index.is_loading());

        let page = MediaPage {
            items: MemoryLibrary::sample_items(2),
            cursor: Some(Cursor::new("c1")),
            has_more: true,
        };
        assert_eq!(index.complete(&first, Ok(page)), Ok(LoadOutcome::Appended(2)));
        assert_eq!(index.len(), 2);
        assert!(!index.is_loading());
    }

    #[tokio::test]
    async fn test_failed_fetch_leaves_state_untouched() {
        let library = MemoryLibrary::with_photos(6);
        let mut index = MediaIndex::new(2);
        index.load_initial(&library, None).await.unwrap();
        let cursor = index.cursor().cloned();
        let before = ids(&index);

        library.fail_next_fetches(1);
        let result = index.load_more(&library, None).await;
        assert!(matches!(result, Err(ScanError::FetchFailed(_))));
        assert_eq!(ids(&index), before);
        assert_eq!(index.cursor().cloned(), cursor);
        assert!(index.has_more());
        assert!(!index.is_loading());

        // Retry by scrolling again picks up where it left off
        assert_eq!(
            index.load_more(&library, None).await,
            Ok(LoadOutcome::Appended(2))
        );
        assert_eq!(index.len(), 4);
    }

    #[tokio::test]
    async fn test_empty_page_exhausts_index() {
        let library = MemoryLibrary::with_photos(0);
        let mut index = MediaIndex::new(4);
        assert_eq!(index.load_more(&library, None).await, Ok(LoadOutcome::Exhausted));
        assert!(!index.has_more());
        assert!(!index.is_loading());
    }

    #[test]
    fn test_reset_drops_late_pages() {
        let mut index = MediaIndex::new(2);
        let request = index.begin_more().unwrap();
        index.reset();
        assert!(!index.is_loading());
        assert!(index.has_more());

        let page = MediaPage {
            items: MemoryLibrary::sample_items(2),
            cursor: None,
            has_more: false,
        };
        assert_eq!(index.complete(&request, Ok(page)), Ok(LoadOutcome::Stale));
        assert!(index.is_empty());
        assert!(index.has_more());
    }

    #[tokio::test]
    async fn test_reset_clears_window() {
        let library = MemoryLibrary::with_photos(4);
        let mut index = MediaIndex::new(3);
        index.load_initial(&library, None).await.unwrap();
        index.reset();
        assert!(index.is_empty());
        assert!(index.cursor().is_none());
        assert!(index.has_more());
    }

    #[tokio::test]
    async fn test_timeout_surfaces_as_fetch_failure() {
        let library = MemoryLibrary::with_photos(4);
        library.set_latency(Duration::from_secs(5));
        let mut index = MediaIndex::new(2);

        let result = index
            .load_initial(&library, Some(Duration::from_millis(10)))
            .await;
        assert!(matches!(result, Err(ScanError::FetchFailed(msg)) if msg.contains("timed out")));
        assert!(!index.is_loading());
        assert!(index.is_empty());
    }
}
