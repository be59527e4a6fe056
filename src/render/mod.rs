//! Markdown rendering module
//!
//! Markdown-to-HTML conversion is delegated entirely to comrak, configured
//! through a typed [`RenderOptions`] struct: soft line breaks become hard
//! breaks, GitHub Flavored Markdown extensions are enabled, and fenced code
//! blocks pass through a pluggable syntect-backed highlight hook. The same
//! options also drive the AST walk that feeds the egui preview pane.
//!
//! Rendering is pure: the same input with the same options yields identical
//! output.

mod blocks;
mod highlight;

pub use blocks::{build_preview_blocks, InlineSpan, InlineStyle, PreviewBlock};
pub use highlight::{CodeHighlighter, HighlightedLine, HighlightedSegment};

use comrak::{format_html_with_plugins, parse_document, Arena, Options, Plugins};

use crate::error::{Error, Result};

// ─────────────────────────────────────────────────────────────────────────────
// Render Options
// ─────────────────────────────────────────────────────────────────────────────

/// Typed renderer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Render soft line breaks as hard breaks (`<br>`)
    pub hardbreaks: bool,
    /// Enable GitHub Flavored Markdown extensions
    /// (strikethrough, tables, task lists, autolinks)
    pub gfm: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            hardbreaks: true,
            gfm: true,
        }
    }
}

impl RenderOptions {
    /// Build the comrak options corresponding to this configuration.
    pub(crate) fn to_comrak(self) -> Options {
        let mut options = Options::default();
        if self.gfm {
            options.extension.strikethrough = true;
            options.extension.table = true;
            options.extension.autolink = true;
            options.extension.tasklist = true;
        }
        options.render.hardbreaks = self.hardbreaks;
        // Raw HTML passes through; the underline shortcut inserts <u> tags
        options.render.unsafe_ = true;
        options
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// HTML Rendering
// ─────────────────────────────────────────────────────────────────────────────

/// Convert markdown to an HTML fragment.
///
/// When a highlighter is supplied it is invoked once per fenced code block
/// with the block's code and (possibly absent) language tag. With no
/// highlighter, code blocks pass through as escaped plain text.
pub fn render_html(
    markdown: &str,
    options: &RenderOptions,
    highlighter: Option<&CodeHighlighter>,
) -> Result<String> {
    let comrak_options = options.to_comrak();
    let arena = Arena::new();
    let root = parse_document(&arena, markdown, &comrak_options);

    let mut plugins = Plugins::default();
    if let Some(adapter) = highlighter {
        plugins.render.codefence_syntax_highlighter = Some(adapter);
    }

    let mut output = Vec::new();
    format_html_with_plugins(root, &comrak_options, &mut output, &plugins)
        .map_err(|e| Error::Render(e.to_string()))?;
    String::from_utf8(output).map_err(|e| Error::Render(e.to_string()))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
