//! CardVault capture sheet
//!
//! Gesture-driven bottom sheet over the camera, a cursor-paginated photo
//! gallery inside it, and a bounded selection of photos to scan.

pub mod app;
pub mod error;
pub mod features;
pub mod media;
pub mod panel;
pub mod selection;

pub use error::ScanError;
