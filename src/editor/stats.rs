//! Document statistics for the status bar
//!
//! Counts words, characters, and lines of the current document. Counting is
//! cheap enough to run on every frame for a single-document editor.

/// Word, character, and line counts for a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextStats {
    /// Number of whitespace-separated words
    pub words: usize,
    /// Number of Unicode characters (not bytes)
    pub chars: usize,
    /// Number of lines (an empty document has one)
    pub lines: usize,
}

impl TextStats {
    /// Measure the given text.
    pub fn measure(text: &str) -> Self {
        Self {
            words: text.split_whitespace().count(),
            chars: text.chars().count(),
            lines: text.lines().count().max(1),
        }
    }

    /// Status bar label, e.g. `42 words · 256 chars`.
    pub fn label(&self) -> String {
        format!("{} words · {} chars", self.words, self.chars)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text() {
        let stats = TextStats::measure("");
        assert_eq!(stats.words, 0);
        assert_eq!(stats.chars, 0);
        assert_eq!(stats.lines, 1);
    }

    #[test]
    fn test_single_line() {
        let stats = TextStats::measure("Hello brave new world");
        assert_eq!(stats.words, 4);
        assert_eq!(stats.chars, 21);
        assert_eq!(stats.lines, 1);
    }

    #[test]
    fn test_multiline() {
        let stats = TextStats::measure("one two\nthree\n\nfour");
        assert_eq!(stats.words, 4);
        assert_eq!(stats.lines, 4);
    }

    #[test]
    fn test_chars_counts_characters_not_bytes() {
        let stats = TextStats::measure("på 🎉");
        assert_eq!(stats.chars, 4);
        assert_eq!(stats.words, 2);
    }

    #[test]
    fn test_label() {
        let stats = TextStats::measure("a b c");
        assert_eq!(stats.label(), "3 words · 5 chars");
    }
}
