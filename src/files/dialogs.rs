//! Native file dialog integration using the rfd crate
//!
//! This module provides functions to open native file picker dialogs for
//! opening and saving markdown documents.

use rfd::FileDialog;
use std::path::PathBuf;

use crate::state::DEFAULT_SAVE_NAME;

/// File extension filter for markdown documents.
const MARKDOWN_EXTENSIONS: &[&str] = &["md"];

/// Opens a native file dialog for selecting a single markdown file.
///
/// Returns `Some(PathBuf)` if a file was selected, `None` if cancelled.
pub fn open_markdown_dialog() -> Option<PathBuf> {
    FileDialog::new()
        .set_title("Open Markdown File")
        .add_filter("Markdown Files", MARKDOWN_EXTENSIONS)
        .pick_file()
}

/// Opens a native save dialog, defaulting to `markdown-document.md`.
///
/// Returns `Some(PathBuf)` if a location was selected, `None` if cancelled.
pub fn save_markdown_dialog() -> Option<PathBuf> {
    FileDialog::new()
        .set_title("Save Markdown File")
        .add_filter("Markdown Files", MARKDOWN_EXTENSIONS)
        .set_file_name(DEFAULT_SAVE_NAME)
        .save_file()
}
