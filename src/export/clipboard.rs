//! Clipboard export of rendered HTML
//!
//! Copies the renderer's HTML fragment to the system clipboard with a
//! plain-text fallback, so rich paste works in email clients and word
//! processors while plain editors get the markdown source.

use arboard::Clipboard;

use crate::error::Result;

/// Copy an HTML fragment to the clipboard with a plain-text fallback.
///
/// The fallback text is what apps without rich paste support receive.
pub fn copy_html_to_clipboard(html: &str, plain_text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new()?;
    clipboard.set_html(html, Some(plain_text))?;
    Ok(())
}

// Note: Actual clipboard tests require a display/clipboard context
// which isn't typically available in CI environments.
