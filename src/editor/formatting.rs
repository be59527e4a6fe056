//! Text-insertion shortcuts for the markdown editor
//!
//! Each shortcut wraps the current selection in a markdown delimiter pair:
//! the selected span is spliced back as `prefix + selection + suffix`, and
//! the new selection covers exactly the original span, shifted past the
//! prefix. No toggling: applying Bold twice yields `****text****`.

use crate::string_utils::char_index_to_byte_index;

// ─────────────────────────────────────────────────────────────────────────────
// Insert Command Enum
// ─────────────────────────────────────────────────────────────────────────────

/// Text-insertion shortcuts available in the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertCommand {
    /// Bold text (**text**)
    Bold,
    /// Italic text (*text*)
    Italic,
    /// Underlined text (<u>text</u>)
    Underline,
    /// Heading prefix (# ), prefix-only
    Heading,
    /// Fenced code block (``` on its own lines)
    CodeFence,
}

impl InsertCommand {
    /// The delimiter pair inserted around the selection.
    pub fn delimiters(&self) -> (&'static str, &'static str) {
        match self {
            Self::Bold => ("**", "**"),
            Self::Italic => ("*", "*"),
            Self::Underline => ("<u>", "</u>"),
            Self::Heading => ("# ", ""),
            Self::CodeFence => ("```\n", "\n```"),
        }
    }

    /// Get the keyboard shortcut label for this command.
    pub fn shortcut_label(&self) -> &'static str {
        match self {
            Self::Bold => "Ctrl+B",
            Self::Italic => "Ctrl+I",
            Self::Underline => "Ctrl+U",
            Self::Heading => "Ctrl+H",
            Self::CodeFence => "Ctrl+Shift+C",
        }
    }

    /// Get the icon for this command (for toolbar).
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Bold => "𝐁",
            Self::Italic => "𝐼",
            Self::Underline => "U̲",
            Self::Heading => "H",
            Self::CodeFence => "{ }",
        }
    }

    /// Get the tooltip text for this command.
    pub fn tooltip(&self) -> String {
        let name = match self {
            Self::Bold => "Bold",
            Self::Italic => "Italic",
            Self::Underline => "Underline",
            Self::Heading => "Heading",
            Self::CodeFence => "Code Block",
        };
        format!("{} ({})", name, self.shortcut_label())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Insert Result
// ─────────────────────────────────────────────────────────────────────────────

/// Result of applying an insertion command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertResult {
    /// The new text after insertion
    pub text: String,
    /// New selection range (start, end) in character indices; covers
    /// exactly the originally selected span, now wrapped
    pub selection: (usize, usize),
}

// ─────────────────────────────────────────────────────────────────────────────
// Insertion
// ─────────────────────────────────────────────────────────────────────────────

/// Apply an insertion command to `text` over the selection `[start, end)`.
///
/// Selection bounds are character indices; they are clamped to the text
/// length and swapped if reversed, so the operation is total.
pub fn apply_insert(text: &str, selection: (usize, usize), command: InsertCommand) -> InsertResult {
    let char_count = text.chars().count();
    let (mut start, mut end) = selection;
    start = start.min(char_count);
    end = end.min(char_count);
    if start > end {
        std::mem::swap(&mut start, &mut end);
    }

    let (prefix, suffix) = command.delimiters();

    let byte_start = char_index_to_byte_index(text, start);
    let byte_end = char_index_to_byte_index(text, end);
    let selected = &text[byte_start..byte_end];

    let mut new_text =
        String::with_capacity(text.len() + prefix.len() + suffix.len());
    new_text.push_str(&text[..byte_start]);
    new_text.push_str(prefix);
    new_text.push_str(selected);
    new_text.push_str(suffix);
    new_text.push_str(&text[byte_end..]);

    // Delimiters are ASCII, so byte length equals character length
    let shift = prefix.chars().count();
    InsertResult {
        text: new_text,
        selection: (start + shift, end + shift),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold_wraps_selection() {
        let result = apply_insert("Hello world", (0, 5), InsertCommand::Bold);
        assert_eq!(result.text, "**Hello** world");
        assert_eq!(result.selection, (2, 7));
    }

    #[test]
    fn test_bold_preserves_inner_span() {
        let text = "one two three";
        let (start, end) = (4, 7); // "two"
        let result = apply_insert(text, (start, end), InsertCommand::Bold);
        assert_eq!(result.text, "one **two** three");
        let (s, e) = result.selection;
        let inner: String = result.text.chars().skip(s).take(e - s).collect();
        assert_eq!(inner, "two");
    }

    #[test]
    fn test_italic() {
        let result = apply_insert("Hello", (0, 5), InsertCommand::Italic);
        assert_eq!(result.text, "*Hello*");
        assert_eq!(result.selection, (1, 6));
    }

    #[test]
    fn test_underline() {
        let result = apply_insert("abc def", (4, 7), InsertCommand::Underline);
        assert_eq!(result.text, "abc <u>def</u>");
        assert_eq!(result.selection, (7, 10));
    }

    #[test]
    fn test_heading_prefix_only() {
        let result = apply_insert("Title", (0, 5), InsertCommand::Heading);
        assert_eq!(result.text, "# Title");
        assert_eq!(result.selection, (2, 7));
    }

    #[test]
    fn test_code_fence() {
        let result = apply_insert("let x = 1;", (0, 10), InsertCommand::CodeFence);
        assert_eq!(result.text, "```\nlet x = 1;\n```");
        assert_eq!(result.selection, (4, 14));
    }

    #[test]
    fn test_empty_selection_inserts_at_caret() {
        let result = apply_insert("ab", (1, 1), InsertCommand::Bold);
        assert_eq!(result.text, "a****b");
        assert_eq!(result.selection, (3, 3));
    }

    #[test]
    fn test_reversed_selection_is_swapped() {
        let result = apply_insert("Hello world", (5, 0), InsertCommand::Bold);
        assert_eq!(result.text, "**Hello** world");
        assert_eq!(result.selection, (2, 7));
    }

    #[test]
    fn test_selection_clamped_to_text() {
        let result = apply_insert("hi", (0, 99), InsertCommand::Italic);
        assert_eq!(result.text, "*hi*");
        assert_eq!(result.selection, (1, 3));
    }

    #[test]
    fn test_multibyte_selection() {
        // "på 🎉" - wrap the emoji (char index 3..4)
        let result = apply_insert("på 🎉", (3, 4), InsertCommand::Bold);
        assert_eq!(result.text, "på **🎉**");
        assert_eq!(result.selection, (5, 6));
    }

    #[test]
    fn test_no_toggle_applies_again() {
        let once = apply_insert("hi", (0, 2), InsertCommand::Bold);
        let twice = apply_insert(&once.text, once.selection, InsertCommand::Bold);
        assert_eq!(twice.text, "****hi****");
    }

    #[test]
    fn test_delimiters_table() {
        assert_eq!(InsertCommand::Bold.delimiters(), ("**", "**"));
        assert_eq!(InsertCommand::Italic.delimiters(), ("*", "*"));
        assert_eq!(InsertCommand::Underline.delimiters(), ("<u>", "</u>"));
        assert_eq!(InsertCommand::Heading.delimiters(), ("# ", ""));
        assert_eq!(InsertCommand::CodeFence.delimiters(), ("```\n", "\n```"));
    }

    #[test]
    fn test_tooltip_includes_shortcut() {
        assert_eq!(InsertCommand::Bold.tooltip(), "Bold (Ctrl+B)");
        assert_eq!(InsertCommand::CodeFence.tooltip(), "Code Block (Ctrl+Shift+C)");
    }
}
