//! Rendered markdown preview pane
//!
//! The pane re-renders whenever the document revision or the theme changes:
//! the renderer produces both the canonical HTML fragment (used for
//! copy-as-HTML) and the preview block list that is laid out as egui
//! widgets. A render failure never crashes the pane; it is logged and the
//! display falls back to a fixed placeholder instead of stale or partial
//! content.
//!
//! A scroll-fraction target set by the view controller is applied on the
//! next show, against the most recently settled layout.

use egui::text::LayoutJob;
use egui::{Color32, FontId, RichText, ScrollArea, Stroke, TextFormat, Ui};
use log::{error, warn};

use super::sync_scroll::ScrollMetrics;
use crate::error::Result;
use crate::render::{
    build_preview_blocks, render_html, CodeHighlighter, InlineSpan, PreviewBlock, RenderOptions,
};
use crate::theme::ThemeColors;

/// Fixed text shown in place of the preview when rendering fails.
pub const RENDER_ERROR_PLACEHOLDER: &str = "⚠ Failed to render markdown preview.";

/// Base font size for preview body text.
const BODY_FONT_SIZE: f32 = 14.0;

/// Horizontal indent per list nesting level.
const LIST_INDENT: f32 = 18.0;

// ─────────────────────────────────────────────────────────────────────────────
// Preview Pane
// ─────────────────────────────────────────────────────────────────────────────

/// The read-only rendered view of the document.
pub struct PreviewPane {
    /// Laid-out display blocks
    blocks: Vec<PreviewBlock>,
    /// Canonical HTML fragment for the current content
    html: String,
    /// Whether the last render failed
    render_failed: bool,
    /// (document revision, dark mode) the current content was rendered for
    rendered_for: Option<(u64, bool)>,
    /// Scroll fraction to apply on the next show
    target_fraction: Option<f32>,
    /// Scroll geometry from the last settled layout
    last_metrics: ScrollMetrics,
}

impl Default for PreviewPane {
    fn default() -> Self {
        Self::new()
    }
}

impl PreviewPane {
    pub fn new() -> Self {
        Self {
            blocks: Vec::new(),
            html: String::new(),
            render_failed: false,
            rendered_for: None,
            target_fraction: None,
            last_metrics: ScrollMetrics::default(),
        }
    }

    /// Re-render if the document revision or theme changed.
    pub fn update(
        &mut self,
        revision: u64,
        markdown: &str,
        options: &RenderOptions,
        highlighter: &CodeHighlighter,
        dark_mode: bool,
    ) {
        if self.rendered_for == Some((revision, dark_mode)) {
            return;
        }
        match render_parts(markdown, options, highlighter) {
            Ok((html, blocks)) => {
                self.html = html;
                self.blocks = blocks;
                self.render_failed = false;
            }
            Err(err) => {
                error!("Markdown rendering failed: {}", err);
                self.apply_failure();
            }
        }
        self.rendered_for = Some((revision, dark_mode));
    }

    /// Replace the display with the fixed error placeholder.
    fn apply_failure(&mut self) {
        self.render_failed = true;
        self.html = format!("<p>{}</p>", RENDER_ERROR_PLACEHOLDER);
        self.blocks = vec![PreviewBlock::Paragraph {
            spans: vec![InlineSpan {
                text: RENDER_ERROR_PLACEHOLDER.to_string(),
                style: Default::default(),
            }],
            indent: 0,
            marker: None,
        }];
    }

    /// The canonical HTML fragment for the displayed content.
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Whether the pane currently shows the error placeholder.
    pub fn is_failed(&self) -> bool {
        self.render_failed
    }

    /// Request the pane scroll to the given fraction on the next show.
    pub fn set_scroll_fraction(&mut self, fraction: f32) {
        self.target_fraction = Some(fraction);
    }

    /// Show the preview and return its scroll geometry.
    pub fn show(&mut self, ui: &mut Ui, theme: &ThemeColors) -> ScrollMetrics {
        let mut scroll_area = ScrollArea::vertical()
            .id_source("preview_scroll")
            .auto_shrink([false, false]);

        // Apply a pending sync-scroll target against the settled layout
        if let Some(fraction) = self.target_fraction.take() {
            if self.last_metrics.is_overflowing() {
                scroll_area =
                    scroll_area.vertical_scroll_offset(self.last_metrics.offset_for_fraction(fraction));
            }
        }

        let output = scroll_area.show(ui, |ui| {
            ui.spacing_mut().item_spacing.y = 8.0;
            for block in &self.blocks {
                show_block(ui, block, theme);
            }
        });

        self.last_metrics = ScrollMetrics::new(
            output.state.offset.y,
            output.content_size.y,
            output.inner_rect.height(),
        );
        self.last_metrics
    }
}

/// Render both products of the pipeline from one source.
fn render_parts(
    markdown: &str,
    options: &RenderOptions,
    highlighter: &CodeHighlighter,
) -> Result<(String, Vec<PreviewBlock>)> {
    let html = render_html(markdown, options, Some(highlighter))?;
    let blocks = build_preview_blocks(markdown, options, highlighter)?;
    Ok((html, blocks))
}

// ─────────────────────────────────────────────────────────────────────────────
// Block Layout
// ─────────────────────────────────────────────────────────────────────────────

fn show_block(ui: &mut Ui, block: &PreviewBlock, theme: &ThemeColors) {
    match block {
        PreviewBlock::Heading { level, spans } => {
            let size = heading_size(*level);
            ui.horizontal_wrapped(|ui| {
                ui.spacing_mut().item_spacing.x = 0.0;
                for span in spans {
                    let text = RichText::new(&span.text)
                        .size(size)
                        .strong()
                        .color(theme.heading);
                    ui.label(text);
                }
            });
            if *level <= 2 {
                ui.separator();
            }
        }
        PreviewBlock::Paragraph {
            spans,
            indent,
            marker,
        } => {
            ui.horizontal_wrapped(|ui| {
                ui.spacing_mut().item_spacing.x = 0.0;
                if *indent > 0 || marker.is_some() {
                    ui.add_space(*indent as f32 * LIST_INDENT);
                }
                if let Some(marker) = marker {
                    ui.label(
                        RichText::new(marker)
                            .size(BODY_FONT_SIZE)
                            .color(theme.muted),
                    );
                }
                for span in spans {
                    show_span(ui, span, theme);
                }
            });
        }
        PreviewBlock::CodeBlock { lines, .. } => {
            egui::Frame::none()
                .fill(theme.code_background)
                .rounding(4.0)
                .inner_margin(8.0)
                .show(ui, |ui| {
                    ui.spacing_mut().item_spacing.y = 2.0;
                    for line in lines {
                        if line.segments.is_empty() {
                            // Preserve blank lines inside the block
                            ui.label(RichText::new(" ").font(FontId::monospace(BODY_FONT_SIZE)));
                            continue;
                        }
                        let mut job = LayoutJob::default();
                        for segment in &line.segments {
                            let mut format = TextFormat {
                                font_id: FontId::monospace(BODY_FONT_SIZE),
                                color: segment.color,
                                italics: segment.italic,
                                ..Default::default()
                            };
                            if segment.underline {
                                format.underline = Stroke::new(1.0, segment.color);
                            }
                            job.append(&segment.text, 0.0, format);
                        }
                        ui.label(job);
                    }
                });
        }
        PreviewBlock::Quote { spans } => {
            ui.horizontal_wrapped(|ui| {
                ui.spacing_mut().item_spacing.x = 0.0;
                ui.label(RichText::new("▌ ").color(theme.quote));
                for span in spans {
                    let text = RichText::new(&span.text)
                        .size(BODY_FONT_SIZE)
                        .italics()
                        .color(theme.quote);
                    ui.label(text);
                }
            });
        }
        PreviewBlock::Rule => {
            ui.separator();
        }
    }
}

fn show_span(ui: &mut Ui, span: &InlineSpan, theme: &ThemeColors) {
    let style = &span.style;
    let color = if style.link.is_some() {
        theme.link
    } else {
        theme.text
    };

    let mut text = RichText::new(&span.text).size(BODY_FONT_SIZE).color(color);
    if style.code {
        text = text
            .font(FontId::monospace(BODY_FONT_SIZE))
            .background_color(theme.code_background);
    }
    if style.bold {
        text = text.strong().color(strong_color(theme));
    }
    if style.italic {
        text = text.italics();
    }
    if style.strikethrough {
        text = text.strikethrough();
    }
    if style.underline {
        text = text.underline();
    }

    if let Some(url) = &style.link {
        let response = ui.link(text);
        if response.clicked() {
            if let Err(err) = open::that(url) {
                warn!("Failed to open link '{}': {}", url, err);
            }
        }
        response.on_hover_text(url);
    } else {
        ui.label(text);
    }
}

/// Bold body text uses full-contrast color since the default fonts have no
/// bold variant.
fn strong_color(theme: &ThemeColors) -> Color32 {
    if theme.is_dark() {
        Color32::WHITE
    } else {
        Color32::BLACK
    }
}

fn heading_size(level: u8) -> f32 {
    match level {
        1 => 26.0,
        2 => 22.0,
        3 => 19.0,
        4 => 17.0,
        5 => 15.0,
        _ => 14.0,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
