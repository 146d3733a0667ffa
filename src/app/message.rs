//! Screen messages

use std::time::Duration;

use crate::error::ScanError;
use crate::media::{MediaId, MediaItem, MediaPage, PageRequest};
use crate::panel::GestureSample;

/// Scroll position of the gallery grid
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    /// Content offset; negative while pulled past the top
    pub offset_y: f32,
    pub viewport_height: f32,
    pub content_height: f32,
}

impl ScrollMetrics {
    /// Content left below the bottom edge of the viewport
    pub fn distance_to_end(&self) -> f32 {
        self.content_height - self.viewport_height - self.offset_y
    }

    /// Whether the bottom edge is within `ratio` viewports of the end
    pub fn is_near_end(&self, ratio: f32) -> bool {
        self.distance_to_end() <= self.viewport_height * ratio
    }

    /// How far the grid is pulled past its top
    pub fn pull_down(&self) -> f32 {
        (-self.offset_y).max(0.0)
    }
}

/// Screen messages
#[derive(Debug, Clone)]
pub enum Message {
    /// Screen became visible
    Mounted,

    // ============ Sheet ============
    /// Finger went down on the sheet header
    GestureStarted,
    /// Finger moved; total vertical travel since the gesture started
    GestureMoved(f32),
    /// Finger lifted
    GestureReleased(GestureSample),
    /// Drag handle tapped
    HandleTapped,
    /// Gallery button on the camera overlay
    ShowGallery,
    /// Close button in the header
    CloseGallery,
    /// Host frame tick
    Frame(Duration),

    // ============ Gallery ============
    GridScrolled(ScrollMetrics),
    RefreshGallery,
    PhotoPressed(MediaId),
    PageLoaded(PageRequest, Result<MediaPage, ScanError>),

    // ============ Camera ============
    CapturePressed,
    Captured(Result<MediaItem, ScanError>),

    // ============ Session ============
    ContinuePressed,
    DismissNotice,
    /// The next screen finished with the selected photos
    SessionFinished,
}
