//! Editor module
//!
//! The text editor pane and its supporting logic: the TextEdit-backed
//! widget, text-insertion shortcuts, and document statistics.

mod formatting;
mod stats;
mod widget;

pub use formatting::{apply_insert, InsertCommand, InsertResult};
pub use stats::TextStats;
pub use widget::{EditorOutput, EditorWidget};
