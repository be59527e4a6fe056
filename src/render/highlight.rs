//! Code-block syntax highlighting
//!
//! This module wraps syntect behind the highlight hook the renderer expects:
//! given `(code, optional language)` it produces highlighted output, falling
//! back to first-line detection and finally plain text when the language tag
//! is absent or unrecognized. Two output forms are supported: HTML spans for
//! the HTML renderer, and colored segments for the egui preview pane.

use std::collections::HashMap;
use std::io::{self, Write};

use comrak::adapters::SyntaxHighlighterAdapter;
use egui::Color32;
use log::debug;
use syntect::easy::HighlightLines;
use syntect::highlighting::{FontStyle, Style, Theme, ThemeSet};
use syntect::html::{styled_line_to_highlighted_html, IncludeBackground};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use crate::error::{Error, Result, ResultExt};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Default dark theme name from syntect's built-in themes
pub const DEFAULT_DARK_THEME: &str = "base16-ocean.dark";

/// Default light theme name from syntect's built-in themes
pub const DEFAULT_LIGHT_THEME: &str = "InspiredGitHub";

// ─────────────────────────────────────────────────────────────────────────────
// Highlighted Segments (for the egui preview)
// ─────────────────────────────────────────────────────────────────────────────

/// A run of code with a single color and style.
#[derive(Debug, Clone, PartialEq)]
pub struct HighlightedSegment {
    /// The text content of this segment
    pub text: String,
    /// Foreground color for this segment
    pub color: Color32,
    /// Whether this segment should be italic
    pub italic: bool,
    /// Whether this segment should be underlined
    pub underline: bool,
}

/// One line of highlighted code.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HighlightedLine {
    /// The segments that make up this line, without the trailing newline
    pub segments: Vec<HighlightedSegment>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Code Highlighter
// ─────────────────────────────────────────────────────────────────────────────

/// Highlight hook backed by syntect's built-in syntaxes and themes.
pub struct CodeHighlighter {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: &'static str,
}

impl CodeHighlighter {
    /// Create a highlighter matching the UI theme.
    pub fn new(dark: bool) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: if dark {
                DEFAULT_DARK_THEME
            } else {
                DEFAULT_LIGHT_THEME
            },
        }
    }

    /// Switch between the dark and light highlight themes.
    pub fn set_dark(&mut self, dark: bool) {
        self.theme_name = if dark {
            DEFAULT_DARK_THEME
        } else {
            DEFAULT_LIGHT_THEME
        };
    }

    fn theme(&self) -> Result<&Theme> {
        self.theme_set
            .themes
            .get(self.theme_name)
            .ok_or_else(|| Error::Render(format!("missing syntect theme '{}'", self.theme_name)))
    }

    /// Resolve a language tag to a syntax definition.
    ///
    /// Order: exact token match, then first-line detection on the code
    /// itself, then plain text.
    fn resolve_syntax(&self, language: Option<&str>, code: &str) -> &SyntaxReference {
        if let Some(lang) = language {
            if !lang.is_empty() {
                if let Some(syntax) = self.syntax_set.find_syntax_by_token(lang) {
                    return syntax;
                }
                debug!("Unrecognized code fence language '{}'", lang);
            }
        }
        code.lines()
            .next()
            .and_then(|line| self.syntax_set.find_syntax_by_first_line(line))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text())
    }

    /// Highlight a code block as HTML spans (no surrounding pre/code tags).
    pub fn highlight_html(&self, code: &str, language: Option<&str>) -> Result<String> {
        let syntax = self.resolve_syntax(language, code);
        let mut highlighter = HighlightLines::new(syntax, self.theme()?);
        let mut html = String::with_capacity(code.len() * 2);
        for line in LinesWithEndings::from(code) {
            let regions = highlighter.highlight_line(line, &self.syntax_set)?;
            html.push_str(&styled_line_to_highlighted_html(
                &regions,
                IncludeBackground::No,
            )?);
        }
        Ok(html)
    }

    /// Highlight a code block as colored segments for the preview pane.
    pub fn highlight_lines(&self, code: &str, language: Option<&str>) -> Result<Vec<HighlightedLine>> {
        let syntax = self.resolve_syntax(language, code);
        let mut highlighter = HighlightLines::new(syntax, self.theme()?);
        let mut lines = Vec::new();
        for line in LinesWithEndings::from(code) {
            let regions = highlighter.highlight_line(line, &self.syntax_set)?;
            let segments = regions
                .iter()
                .map(|(style, text)| to_segment(style, text.trim_end_matches('\n')))
                .filter(|s| !s.text.is_empty())
                .collect();
            lines.push(HighlightedLine { segments });
        }
        Ok(lines)
    }
}

/// Convert a syntect style region to a preview segment.
fn to_segment(style: &Style, text: &str) -> HighlightedSegment {
    let fg = style.foreground;
    HighlightedSegment {
        text: text.to_string(),
        color: Color32::from_rgb(fg.r, fg.g, fg.b),
        italic: style.font_style.contains(FontStyle::ITALIC),
        underline: style.font_style.contains(FontStyle::UNDERLINE),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// comrak Adapter
// ─────────────────────────────────────────────────────────────────────────────

// Invoked by comrak once per fenced code block while producing HTML.
impl SyntaxHighlighterAdapter for CodeHighlighter {
    fn write_highlighted(
        &self,
        output: &mut dyn Write,
        lang: Option<&str>,
        code: &str,
    ) -> io::Result<()> {
        // A highlight failure degrades to escaped plain code
        let html = self
            .highlight_html(code, lang)
            .unwrap_or_warn_default(escape_text(code), "Code highlighting failed");
        output.write_all(html.as_bytes())
    }

    fn write_pre_tag(
        &self,
        output: &mut dyn Write,
        attributes: HashMap<String, String>,
    ) -> io::Result<()> {
        write_tag(output, "pre", &attributes)
    }

    fn write_code_tag(
        &self,
        output: &mut dyn Write,
        attributes: HashMap<String, String>,
    ) -> io::Result<()> {
        write_tag(output, "code", &attributes)
    }
}

/// HTML-escape code for the plain fallback path.
fn escape_text(code: &str) -> String {
    code.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Write an opening tag with sorted attributes (sorted for deterministic output).
fn write_tag(
    output: &mut dyn Write,
    tag: &str,
    attributes: &HashMap<String, String>,
) -> io::Result<()> {
    write!(output, "<{}", tag)?;
    let mut attrs: Vec<_> = attributes.iter().collect();
    attrs.sort_by_key(|(key, _)| key.as_str());
    for (key, value) in attrs {
        write!(output, " {}=\"{}\"", key, value)?;
    }
    write!(output, ">")
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
