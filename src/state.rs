//! Application state management
//!
//! This module defines the central `AppState` struct: the single
//! authoritative copy of the markdown document, the independent UI mode
//! flags (dark mode, fullscreen, sync scroll), the editor's selection, and
//! the transient toast notification shown in the status bar. State is owned
//! by the app and passed down to widgets; nothing here is persisted across
//! sessions.

use log::info;

use crate::editor::{apply_insert, InsertCommand};
use crate::error::Result;

// ─────────────────────────────────────────────────────────────────────────────
// Welcome Document
// ─────────────────────────────────────────────────────────────────────────────

/// The sample document shown at startup.
pub const WELCOME_DOCUMENT: &str = "# Welcome to Markdown Magic\n\nThis is a **real-time** markdown editor.\n\n## Features\n\n- Real-time preview\n- Simple and clean interface\n- Markdown syntax support\n\n### Try it out!\n\n1. Edit this text\n2. See the changes in real-time\n3. Enjoy markdown formatting\n\n```javascript\nconst hello = () => {\n  console.log('Hello, Markdown!');\n};\n```\n\n> Markdown is a lightweight markup language with plain text formatting syntax.\n\n[Learn more about Markdown](https://www.markdownguide.org/)";

/// Default filename offered by the save dialog.
pub const DEFAULT_SAVE_NAME: &str = "markdown-document.md";

// ─────────────────────────────────────────────────────────────────────────────
// UI Mode Flags
// ─────────────────────────────────────────────────────────────────────────────

/// Independent presentation flags, toggled by user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiFlags {
    /// Dark color scheme (seeded from the system preference)
    pub dark_mode: bool,
    /// Fullscreen window mode (F11, Escape to exit)
    pub fullscreen: bool,
    /// Forward editor scroll to the preview (effective only in fullscreen)
    pub sync_scroll: bool,
}

// ─────────────────────────────────────────────────────────────────────────────
// Application State
// ─────────────────────────────────────────────────────────────────────────────

/// Central application state: the document and all UI state.
pub struct AppState {
    /// The authoritative markdown source
    document: String,
    /// Bumped on every document change, so the preview knows when to
    /// re-render
    revision: u64,
    /// UI mode flags
    pub flags: UiFlags,
    /// Current editor selection (start, end) in character indices
    pub selection: Option<(usize, usize)>,
    /// Caret position in character indices, when there is no selection
    pub cursor: usize,
    /// Selection to apply to the editor on the next frame, set after a
    /// shortcut insertion so the wrapped span stays selected
    pub pending_selection: Option<(usize, usize)>,
    /// Whether the editor should request focus on the next frame
    pub editor_needs_focus: bool,
    /// Temporary toast message (shown in the status bar)
    toast_message: Option<String>,
    /// When the toast message expires, as seconds since app start
    toast_expires_at: Option<f64>,
}

impl AppState {
    /// Create the initial state with the welcome document.
    pub fn new(dark_mode: bool) -> Self {
        Self {
            document: WELCOME_DOCUMENT.to_string(),
            revision: 0,
            flags: UiFlags {
                dark_mode,
                fullscreen: false,
                sync_scroll: false,
            },
            selection: None,
            cursor: 0,
            pending_selection: None,
            editor_needs_focus: true,
            toast_message: None,
            toast_expires_at: None,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Document Access
    // ─────────────────────────────────────────────────────────────────────────

    /// Read access to the document.
    pub fn document(&self) -> &str {
        &self.document
    }

    /// Mutable access for the editor widget. The caller must invoke
    /// [`AppState::mark_edited`] if the text changed.
    pub fn document_mut(&mut self) -> &mut String {
        &mut self.document
    }

    /// Current document revision.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Record that the editor changed the document in place.
    pub fn mark_edited(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    /// Replace the whole document (file load or drop).
    pub fn replace_document(&mut self, content: String) {
        self.document = content;
        self.revision = self.revision.wrapping_add(1);
        self.selection = None;
        self.cursor = 0;
        self.pending_selection = None;
        self.editor_needs_focus = true;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Shortcut Insertion
    // ─────────────────────────────────────────────────────────────────────────

    /// Apply a text-insertion shortcut at the current selection (or caret)
    /// and schedule the wrapped span to be re-selected on the next frame.
    ///
    /// The committed document is untouched when this returns an error.
    pub fn apply_insert_command(&mut self, command: InsertCommand) -> Result<()> {
        let selection = self.selection.unwrap_or((self.cursor, self.cursor));
        let result = apply_insert(&self.document, selection, command);
        self.document = result.text;
        self.revision = self.revision.wrapping_add(1);
        self.pending_selection = Some(result.selection);
        self.editor_needs_focus = true;
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // UI Mode Toggles
    // ─────────────────────────────────────────────────────────────────────────

    /// Toggle dark mode. Presentation only; the document is untouched.
    pub fn toggle_dark_mode(&mut self) -> bool {
        self.flags.dark_mode = !self.flags.dark_mode;
        self.flags.dark_mode
    }

    /// Toggle fullscreen mode.
    pub fn toggle_fullscreen(&mut self) -> bool {
        self.flags.fullscreen = !self.flags.fullscreen;
        self.flags.fullscreen
    }

    /// Leave fullscreen mode (Escape).
    pub fn exit_fullscreen(&mut self) {
        self.flags.fullscreen = false;
    }

    /// Toggle sync scroll and report the new state.
    pub fn toggle_sync_scroll(&mut self) -> bool {
        self.flags.sync_scroll = !self.flags.sync_scroll;
        info!(
            "Sync scroll {}",
            if self.flags.sync_scroll {
                "enabled"
            } else {
                "disabled"
            }
        );
        self.flags.sync_scroll
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Toast Notifications
    // ─────────────────────────────────────────────────────────────────────────

    /// Show a temporary toast message (disappears after `duration` seconds).
    pub fn show_toast(&mut self, message: impl Into<String>, current_time: f64, duration: f64) {
        self.toast_message = Some(message.into());
        self.toast_expires_at = Some(current_time + duration);
    }

    /// Clear the toast once it has expired.
    pub fn update_toast(&mut self, current_time: f64) {
        if let Some(expires_at) = self.toast_expires_at {
            if current_time >= expires_at {
                self.toast_message = None;
                self.toast_expires_at = None;
            }
        }
    }

    /// The currently visible toast, if any.
    pub fn toast(&self) -> Option<&str> {
        self.toast_message.as_deref()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_document_is_welcome_sample() {
        let state = AppState::new(false);
        assert!(state
            .document()
            .contains("# Welcome to Markdown Magic"));
        assert_eq!(state.revision(), 0);
    }

    #[test]
    fn test_dark_mode_toggle_leaves_document_unchanged() {
        let mut state = AppState::new(false);
        let before = state.document().to_string();
        assert!(state.toggle_dark_mode());
        assert!(state.flags.dark_mode);
        assert_eq!(state.document(), before);
        assert_eq!(state.revision(), 0);
    }

    #[test]
    fn test_sync_scroll_toggle() {
        let mut state = AppState::new(false);
        assert!(state.toggle_sync_scroll());
        assert!(!state.toggle_sync_scroll());
    }

    #[test]
    fn test_fullscreen_toggle_and_escape() {
        let mut state = AppState::new(false);
        assert!(state.toggle_fullscreen());
        state.exit_fullscreen();
        assert!(!state.flags.fullscreen);
    }

    #[test]
    fn test_replace_document_bumps_revision() {
        let mut state = AppState::new(false);
        state.replace_document("# New".to_string());
        assert_eq!(state.document(), "# New");
        assert_eq!(state.revision(), 1);
        assert_eq!(state.selection, None);
    }

    #[test]
    fn test_mark_edited_bumps_revision() {
        let mut state = AppState::new(false);
        state.document_mut().push('!');
        state.mark_edited();
        assert_eq!(state.revision(), 1);
    }

    #[test]
    fn test_apply_insert_wraps_selection() {
        let mut state = AppState::new(false);
        state.replace_document("Hello world".to_string());
        state.selection = Some((0, 5));
        state.apply_insert_command(InsertCommand::Bold).unwrap();
        assert_eq!(state.document(), "**Hello** world");
        assert_eq!(state.pending_selection, Some((2, 7)));
        assert!(state.editor_needs_focus);
    }

    #[test]
    fn test_apply_insert_at_caret_without_selection() {
        let mut state = AppState::new(false);
        state.replace_document("ab".to_string());
        state.cursor = 1;
        state.apply_insert_command(InsertCommand::Italic).unwrap();
        assert_eq!(state.document(), "a**b");
    }

    #[test]
    fn test_toast_lifecycle() {
        let mut state = AppState::new(false);
        state.show_toast("Saved", 10.0, 2.0);
        assert_eq!(state.toast(), Some("Saved"));

        state.update_toast(11.0);
        assert_eq!(state.toast(), Some("Saved"));

        state.update_toast(12.5);
        assert_eq!(state.toast(), None);
    }
}
