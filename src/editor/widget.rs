//! Text editor widget
//!
//! Wraps egui's TextEdit with the behavior the app needs: the full document
//! string is the widget's backing store, so every keystroke propagates to
//! the owner synchronously; the scroll geometry is reported every frame for
//! sync scrolling; and a pending selection left by a shortcut insertion is
//! applied on the following frame, once the new text is in place, restoring
//! focus and selecting the wrapped span.

use egui::text::{CCursor, CCursorRange};
use egui::{FontId, ScrollArea, TextEdit, Ui};
use log::debug;

use crate::preview::ScrollMetrics;
use crate::state::AppState;

/// Result of showing the editor widget.
pub struct EditorOutput {
    /// Whether the content was modified this frame.
    pub changed: bool,
    /// Scroll geometry after layout.
    pub metrics: ScrollMetrics,
}

/// The markdown source editor pane.
pub struct EditorWidget<'a> {
    state: &'a mut AppState,
    font_size: f32,
}

impl<'a> EditorWidget<'a> {
    pub fn new(state: &'a mut AppState) -> Self {
        Self {
            state,
            font_size: 14.0,
        }
    }

    /// Set the font size for the editor.
    #[must_use]
    pub fn font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    /// Show the editor widget and return the output.
    pub fn show(self, ui: &mut Ui) -> EditorOutput {
        let id = ui.id().with("markdown_editor");

        // A shortcut insertion changed the text last frame; now that the
        // new text is in place, re-select the wrapped span.
        if let Some((start, end)) = self.state.pending_selection.take() {
            let mut edit_state = TextEdit::load_state(ui.ctx(), id).unwrap_or_default();
            edit_state.cursor.set_char_range(Some(CCursorRange::two(
                CCursor::new(start),
                CCursor::new(end),
            )));
            edit_state.store(ui.ctx(), id);
            debug!("Restored selection [{}, {}) after insertion", start, end);
        }

        let needs_focus = self.state.editor_needs_focus;
        if needs_focus {
            self.state.editor_needs_focus = false;
        }

        // Store original content for change detection
        let original_content = self.state.document().to_string();
        let font_size = self.font_size;

        let scroll_output = ScrollArea::vertical()
            .id_source(id.with("scroll"))
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let text_edit = TextEdit::multiline(self.state.document_mut())
                    .id(id)
                    .frame(false)
                    .font(FontId::monospace(font_size))
                    .desired_width(f32::INFINITY)
                    .desired_rows(24)
                    .lock_focus(true);

                let text_output = text_edit.show(ui);

                if needs_focus {
                    text_output.response.request_focus();
                }

                text_output
            });

        let text_output = scroll_output.inner;

        // TextEdit mutates the document in place; detect and record it
        let changed = self.state.document() != original_content;
        if changed {
            self.state.mark_edited();
        }

        // Track caret and selection in character indices
        if let Some(cursor_range) = text_output.cursor_range {
            let primary = cursor_range.primary.ccursor.index;
            let secondary = cursor_range.secondary.ccursor.index;
            self.state.cursor = primary;
            self.state.selection = if primary != secondary {
                Some((primary.min(secondary), primary.max(secondary)))
            } else {
                None
            };
        }

        let metrics = ScrollMetrics::new(
            scroll_output.state.offset.y,
            scroll_output.content_size.y,
            scroll_output.inner_rect.height(),
        );

        EditorOutput { changed, metrics }
    }
}
