//! Capture screen controller
//!
//! `ScanScreen::update` turns messages into state changes plus a [`Task`];
//! the [`Runtime`] executes tasks and feeds their results back in.

pub mod grid;
mod message;
pub mod notice;
pub mod runtime;
pub mod script;
mod state;
mod task;
mod update;
mod view;

pub use grid::GridCell;
pub use message::{Message, ScrollMetrics};
pub use notice::{Notice, NoticeStyle};
pub use runtime::Runtime;
pub use script::{Report, Script, Step};
pub use state::ScanScreen;
pub use task::Task;
