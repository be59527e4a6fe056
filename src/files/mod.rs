//! File operations module
//!
//! Native open/save dialogs, background file loading, and document saving.
//! Only markdown files (`.md` name suffix) are accepted, whether they come
//! from the picker dialog or from a drag-and-drop gesture.

pub mod dialogs;
pub mod loader;

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Whether a file name has the `.md` suffix (case-insensitive).
pub fn is_markdown_name(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    lower.ends_with(".md") && lower.len() > 3
}

/// Write the document to `path` as UTF-8 markdown text.
pub fn save_document(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|source| Error::FileWrite {
        path: path.to_path_buf(),
        source,
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_markdown_name() {
        assert!(is_markdown_name("notes.md"));
        assert!(is_markdown_name("NOTES.MD"));
        assert!(!is_markdown_name("notes.txt"));
        assert!(!is_markdown_name("notes.markdown.bak"));
        assert!(!is_markdown_name(".md"));
        assert!(!is_markdown_name(""));
    }

    #[test]
    fn test_save_document_writes_exact_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("markdown-document.md");
        let content = "# Title\n\nBody with unicode: på 🎉\n";

        save_document(&path, content).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, content);
    }

    #[test]
    fn test_save_document_error_carries_path() {
        let path = Path::new("/nonexistent-dir/markdown-document.md");
        let err = save_document(path, "x").unwrap_err();
        assert!(matches!(err, Error::FileWrite { .. }));
        assert!(format!("{}", err).contains("markdown-document.md"));
    }
}
