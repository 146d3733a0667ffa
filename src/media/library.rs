//! Photo library backed by a folder on disk
//!
//! Every image under the root is an item. Ids are xxh3 hashes of the path,
//! the creation time is the file's modification time.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, info};
use walkdir::WalkDir;
use xxhash_rust::xxh3::xxh3_64;

use super::provider::{CaptureDevice, MediaProvider};
use super::{Cursor, MediaId, MediaItem, MediaPage, is_image_file};

/// Folder-backed [`MediaProvider`]
#[derive(Debug, Clone)]
pub struct LocalLibrary {
    root: PathBuf,
    /// Maximum depth to scan (None = unlimited)
    max_depth: Option<usize>,
}

impl LocalLibrary {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            max_depth: None,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Every photo under the root, in library order
    pub fn scan(&self) -> Result<Vec<MediaItem>> {
        if !self.root.is_dir() {
            bail!("library folder {} does not exist", self.root.display());
        }

        let mut walker = WalkDir::new(&self.root).follow_links(true);
        if let Some(max_depth) = self.max_depth {
            walker = walker.max_depth(max_depth);
        }

        let mut items = walker
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file() && is_image_file(e.path()))
            .map(|e| item_for(e.path()))
            .collect::<Result<Vec<_>>>()?;

        items.sort_by(MediaItem::newest_first);
        debug!("Scanned {} photos under {}", items.len(), self.root.display());
        Ok(items)
    }

    fn page(&self, page_size: usize, after: Option<Cursor>) -> Result<MediaPage> {
        let anchor = match &after {
            Some(cursor) => Some(
                cursor
                    .position()
                    .ok_or_else(|| anyhow!("invalid cursor {:?}", cursor.as_str()))?,
            ),
            None => None,
        };
        let items = self.scan()?;
        Ok(MediaPage::from_sorted(&items, page_size, anchor.as_ref()))
    }

    /// Copy a file into the library under a timestamped name
    fn admit(&self, source: &Path) -> Result<MediaItem> {
        if source.starts_with(&self.root) {
            return item_for(source);
        }

        let extension = source
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("jpg")
            .to_lowercase();
        let name = format!(
            "capture-{}.{}",
            Utc::now().format("%Y%m%d-%H%M%S%3f"),
            extension
        );
        let dest = self.root.join(name);

        std::fs::copy(source, &dest).with_context(|| {
            format!("Failed to copy {} into {}", source.display(), dest.display())
        })?;
        info!("Added capture {}", dest.display());
        item_for(&dest)
    }
}

/// Build the library item for a file
fn item_for(path: &Path) -> Result<MediaItem> {
    let metadata = std::fs::metadata(path)
        .with_context(|| format!("Failed to read metadata of {}", path.display()))?;
    let modified = metadata
        .modified()
        .with_context(|| format!("No modification time for {}", path.display()))?;

    Ok(MediaItem {
        id: MediaId::new(format!(
            "{:016x}",
            xxh3_64(path.to_string_lossy().as_bytes())
        )),
        uri: path.to_string_lossy().into_owned(),
        created_at: DateTime::<Utc>::from(modified),
    })
}

#[async_trait(?Send)]
impl MediaProvider for LocalLibrary {
    async fn fetch_page(&self, page_size: usize, after: Option<&Cursor>) -> Result<MediaPage> {
        let library = self.clone();
        let after = after.cloned();
        tokio::task::spawn_blocking(move || library.page(page_size, after))
            .await
            .context("Library scan task panicked")?
    }

    async fn create_item(&self, source_uri: &str) -> Result<MediaItem> {
        let library = self.clone();
        let source = PathBuf::from(source_uri);
        tokio::task::spawn_blocking(move || library.admit(&source))
            .await
            .context("Library write task panicked")?
    }
}

/// [`CaptureDevice`] that "takes" a photo by handing out an existing file
#[derive(Debug, Clone, Default)]
pub struct FolderCapture {
    source: Option<PathBuf>,
}

impl FolderCapture {
    pub fn new(source: Option<PathBuf>) -> Self {
        Self { source }
    }
}

#[async_trait(?Send)]
impl CaptureDevice for FolderCapture {
    async fn capture(&self) -> Result<String> {
        let source = self
            .source
            .as_ref()
            .ok_or_else(|| anyhow!("no capture source configured"))?;
        if !is_image_file(source) || !source.is_file() {
            bail!("capture source {} is not a photo", source.display());
        }
        Ok(source.to_string_lossy().into_owned())
    }
}
