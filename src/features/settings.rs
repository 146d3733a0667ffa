//! Scanner settings persistence
//!
//! Handles saving and loading the tunables of the capture screen.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::panel::{SheetGeometry, SpringParams};
use crate::selection::DEFAULT_CAPACITY;

/// Scanner settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Bottom sheet layout
    #[serde(default)]
    pub sheet: SheetSettings,
    /// Settle animation
    #[serde(default)]
    pub spring: SpringParams,
    /// Gallery paging and scroll thresholds
    #[serde(default)]
    pub gallery: GallerySettings,
    /// Selection limits
    #[serde(default)]
    pub selection: SelectionSettings,
    /// Host frame interval in milliseconds
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,
}

/// Screen measurements the sheet heights are derived from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetSettings {
    pub screen_height: f32,
    pub status_bar_height: f32,
    pub header_height: f32,
    /// Space kept above the fully expanded sheet
    pub top_gap: f32,
    /// Collapsed height as a fraction of the screen
    pub min_height_ratio: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GallerySettings {
    /// Photos requested per page
    pub page_size: usize,
    /// Load more when the remaining content is within this many viewports
    pub end_reached_ratio: f32,
    /// Pull past the top by this many pixels to collapse or refresh
    pub pull_down_distance: f32,
    /// Give up on a page fetch after this long (None = wait forever)
    #[serde(default)]
    pub fetch_timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionSettings {
    pub capacity: usize,
}

fn default_frame_interval_ms() -> u64 {
    16
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sheet: SheetSettings::default(),
            spring: SpringParams::default(),
            gallery: GallerySettings::default(),
            selection: SelectionSettings::default(),
            frame_interval_ms: default_frame_interval_ms(),
        }
    }
}

impl Default for SheetSettings {
    fn default() -> Self {
        Self {
            screen_height: 844.0,
            status_bar_height: 44.0,
            header_height: 60.0,
            top_gap: 20.0,
            min_height_ratio: 0.33,
        }
    }
}

impl Default for GallerySettings {
    fn default() -> Self {
        Self {
            page_size: 100,
            end_reached_ratio: 0.5,
            pull_down_distance: 60.0,
            fetch_timeout_ms: None,
        }
    }
}

impl Default for SelectionSettings {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl SheetSettings {
    /// Collapsed and expanded sheet heights
    pub fn geometry(&self) -> SheetGeometry {
        let min_height = self.screen_height * self.min_height_ratio;
        let max_height =
            self.screen_height - self.status_bar_height - self.header_height - self.top_gap;
        SheetGeometry::new(min_height, max_height)
    }
}

impl GallerySettings {
    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.fetch_timeout_ms.map(Duration::from_millis)
    }
}

impl Settings {
    pub fn geometry(&self) -> SheetGeometry {
        self.sheet.geometry()
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms.max(1))
    }

    /// Get the settings file path
    pub fn file_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "cardvault", "CardVault")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Load settings from file, or return defaults if not found
    pub fn load() -> Self {
        Self::file_path()
            .and_then(|path| Self::load_from_file(&path).ok())
            .unwrap_or_default()
    }

    /// Load settings from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self, SettingsError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| SettingsError::Io(e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| SettingsError::Parse(e.to_string()))
    }

    /// Save settings to the default file
    pub fn save(&self) -> Result<(), SettingsError> {
        if let Some(path) = Self::file_path() {
            self.save_to_file(&path)
        } else {
            Err(SettingsError::Io(
                "Could not determine config directory".to_string(),
            ))
        }
    }

    /// Save settings to a specific file
    pub fn save_to_file(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| SettingsError::Io(e.to_string()))?;
        }

        let content =
            serde_json::to_string_pretty(self).map_err(|e| SettingsError::Parse(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| SettingsError::Io(e.to_string()))?;
        Ok(())
    }
}

/// Errors that can occur with settings
#[derive(Debug, Clone)]
pub enum SettingsError {
    Io(String),
    Parse(String),
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "IO error: {}", e),
            SettingsError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for SettingsError {}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_geometry() {
        let geometry = Settings::default().geometry();
        assert!((geometry.min_height - 278.52).abs() < 0.01);
        assert_eq!(geometry.max_height, 720.0);
        assert!((geometry.drag_distance() - 441.48).abs() < 0.01);
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let mut settings = Settings::default();
        settings.gallery.page_size = 24;
        settings.gallery.fetch_timeout_ms = Some(1500);
        settings.selection.capacity = 4;
        settings.save_to_file(&path).unwrap();

        let loaded = Settings::load_from_file(&path).unwrap();
        assert_eq!(loaded, settings);
        assert_eq!(
            loaded.gallery.fetch_timeout(),
            Some(Duration::from_millis(1500))
        );
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "selection": { "capacity": 3 } }"#).unwrap();

        let loaded = Settings::load_from_file(&path).unwrap();
        assert_eq!(loaded.selection.capacity, 3);
        assert_eq!(loaded.gallery, GallerySettings::default());
        assert_eq!(loaded.frame_interval(), Duration::from_millis(16));
    }

    #[test]
    fn test_load_errors() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(
            Settings::load_from_file(&missing),
            Err(SettingsError::Io(_))
        ));

        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "{ not json").unwrap();
        assert!(matches!(
            Settings::load_from_file(&broken),
            Err(SettingsError::Parse(_))
        ));
    }
}
