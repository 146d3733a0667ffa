//! Feature modules - configuration shared by the screen and the binary

pub mod settings;

pub use settings::{GallerySettings, SelectionSettings, Settings, SettingsError, SheetSettings};
