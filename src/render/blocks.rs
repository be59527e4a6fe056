//! Preview block model
//!
//! The preview pane does not display raw HTML; it lays out native egui
//! widgets. This module walks the comrak AST (parsed with the same options
//! as the HTML renderer, so the two outputs always agree) and flattens it
//! into a list of display blocks: headings, styled paragraphs, highlighted
//! code blocks, list items, blockquotes, and rules.

use comrak::nodes::{AstNode, ListType, NodeValue};
use comrak::{parse_document, Arena};

use super::highlight::{CodeHighlighter, HighlightedLine};
use super::RenderOptions;
use crate::error::Result;

// ─────────────────────────────────────────────────────────────────────────────
// Block Model
// ─────────────────────────────────────────────────────────────────────────────

/// Character style of an inline text run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InlineStyle {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    /// Inline code span (monospace)
    pub code: bool,
    /// Link target, when the run is inside a link
    pub link: Option<String>,
}

/// A run of text with a single style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineSpan {
    pub text: String,
    pub style: InlineStyle,
}

/// One block of rendered preview content.
#[derive(Debug, Clone, PartialEq)]
pub enum PreviewBlock {
    /// Heading with level 1-6
    Heading { level: u8, spans: Vec<InlineSpan> },
    /// Paragraph, or a list item when `marker` is set; `indent` is the
    /// list nesting depth
    Paragraph {
        spans: Vec<InlineSpan>,
        indent: usize,
        marker: Option<String>,
    },
    /// Fenced or indented code block with pre-highlighted lines
    CodeBlock {
        language: Option<String>,
        lines: Vec<HighlightedLine>,
    },
    /// Blockquote content
    Quote { spans: Vec<InlineSpan> },
    /// Thematic break
    Rule,
}

// ─────────────────────────────────────────────────────────────────────────────
// AST Walk
// ─────────────────────────────────────────────────────────────────────────────

/// Parse markdown and flatten it into preview blocks.
pub fn build_preview_blocks(
    markdown: &str,
    options: &RenderOptions,
    highlighter: &CodeHighlighter,
) -> Result<Vec<PreviewBlock>> {
    let comrak_options = options.to_comrak();
    let arena = Arena::new();
    let root = parse_document(&arena, markdown, &comrak_options);

    let mut blocks = Vec::new();
    for child in root.children() {
        collect_block(child, 0, options, highlighter, &mut blocks)?;
    }
    Ok(blocks)
}

fn collect_block<'a>(
    node: &'a AstNode<'a>,
    indent: usize,
    options: &RenderOptions,
    highlighter: &CodeHighlighter,
    out: &mut Vec<PreviewBlock>,
) -> Result<()> {
    let value = node.data.borrow().value.clone();
    match value {
        NodeValue::Heading(heading) => {
            out.push(PreviewBlock::Heading {
                level: heading.level,
                spans: collect_inlines(node, options),
            });
        }
        NodeValue::Paragraph => {
            out.push(PreviewBlock::Paragraph {
                spans: collect_inlines(node, options),
                indent,
                marker: None,
            });
        }
        NodeValue::CodeBlock(code_block) => {
            let language = code_block
                .info
                .split_whitespace()
                .next()
                .filter(|token| !token.is_empty())
                .map(str::to_string);
            let lines = highlighter.highlight_lines(&code_block.literal, language.as_deref())?;
            out.push(PreviewBlock::CodeBlock { language, lines });
        }
        NodeValue::List(list) => {
            let ordered = list.list_type == ListType::Ordered;
            let mut number = list.start;
            for item in node.children() {
                let marker = item_marker(item, ordered, number);
                if ordered {
                    number += 1;
                }
                collect_item(item, indent, marker, options, highlighter, out)?;
            }
        }
        NodeValue::BlockQuote => {
            let mut spans = Vec::new();
            for child in node.children() {
                if !spans.is_empty() {
                    push_span(&mut spans, "\n", &InlineStyle::default());
                }
                spans.extend(collect_inlines(child, options));
            }
            out.push(PreviewBlock::Quote { spans });
        }
        NodeValue::ThematicBreak => out.push(PreviewBlock::Rule),
        NodeValue::HtmlBlock(html_block) => {
            // Raw HTML blocks are shown verbatim as monospace text
            let style = InlineStyle {
                code: true,
                ..Default::default()
            };
            out.push(PreviewBlock::Paragraph {
                spans: vec![InlineSpan {
                    text: html_block.literal.trim_end().to_string(),
                    style,
                }],
                indent,
                marker: None,
            });
        }
        NodeValue::Table(_) => {
            // Compact table rendering: one line of pipe-joined cells per row
            for row in node.children() {
                let mut spans = Vec::new();
                for (idx, cell) in row.children().enumerate() {
                    if idx > 0 {
                        push_span(&mut spans, "  |  ", &InlineStyle::default());
                    }
                    spans.extend(collect_inlines(cell, options));
                }
                out.push(PreviewBlock::Paragraph {
                    spans,
                    indent,
                    marker: None,
                });
            }
        }
        _ => {
            // Unknown container: flatten its children
            for child in node.children() {
                collect_block(child, indent, options, highlighter, out)?;
            }
        }
    }
    Ok(())
}

/// List item marker text: bullet, number, or task checkbox.
fn item_marker<'a>(item: &'a AstNode<'a>, ordered: bool, number: usize) -> String {
    match &item.data.borrow().value {
        NodeValue::TaskItem(symbol) => {
            if symbol.is_some() {
                "☑ ".to_string()
            } else {
                "☐ ".to_string()
            }
        }
        _ if ordered => format!("{}. ", number),
        _ => "• ".to_string(),
    }
}

fn collect_item<'a>(
    item: &'a AstNode<'a>,
    indent: usize,
    marker: String,
    options: &RenderOptions,
    highlighter: &CodeHighlighter,
    out: &mut Vec<PreviewBlock>,
) -> Result<()> {
    let mut marker = Some(marker);
    for child in item.children() {
        let is_paragraph = matches!(child.data.borrow().value, NodeValue::Paragraph);
        let is_list = matches!(child.data.borrow().value, NodeValue::List(_));
        if is_paragraph {
            out.push(PreviewBlock::Paragraph {
                spans: collect_inlines(child, options),
                indent,
                marker: marker.take(),
            });
        } else if is_list {
            collect_block(child, indent + 1, options, highlighter, out)?;
        } else {
            collect_block(child, indent, options, highlighter, out)?;
        }
    }
    // An empty item still shows its marker
    if let Some(marker) = marker {
        out.push(PreviewBlock::Paragraph {
            spans: Vec::new(),
            indent,
            marker: Some(marker),
        });
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Inline Collection
// ─────────────────────────────────────────────────────────────────────────────

/// Collect the styled inline runs of a block node's children.
fn collect_inlines<'a>(parent: &'a AstNode<'a>, options: &RenderOptions) -> Vec<InlineSpan> {
    let mut spans = Vec::new();
    walk_inline_children(parent, &InlineStyle::default(), options, &mut spans);
    spans
}

/// Walk the inline children of `parent`, tracking `<u>`/`</u>` toggles,
/// which apply to following siblings rather than nesting.
fn walk_inline_children<'a>(
    parent: &'a AstNode<'a>,
    base: &InlineStyle,
    options: &RenderOptions,
    out: &mut Vec<InlineSpan>,
) {
    let mut underline = base.underline;
    for child in parent.children() {
        let value = child.data.borrow().value.clone();
        if let NodeValue::HtmlInline(tag) = &value {
            match tag.trim().to_ascii_lowercase().as_str() {
                "<u>" => {
                    underline = true;
                    continue;
                }
                "</u>" => {
                    underline = false;
                    continue;
                }
                _ => {}
            }
        }
        let style = InlineStyle {
            underline,
            ..base.clone()
        };
        collect_inline(child, &value, &style, options, out);
    }
}

fn collect_inline<'a>(
    node: &'a AstNode<'a>,
    value: &NodeValue,
    style: &InlineStyle,
    options: &RenderOptions,
    out: &mut Vec<InlineSpan>,
) {
    match value {
        NodeValue::Text(text) => push_span(out, text, style),
        NodeValue::SoftBreak => {
            let text = if options.hardbreaks { "\n" } else { " " };
            push_span(out, text, style);
        }
        NodeValue::LineBreak => push_span(out, "\n", style),
        NodeValue::Code(code) => {
            let style = InlineStyle {
                code: true,
                ..style.clone()
            };
            push_span(out, &code.literal, &style);
        }
        NodeValue::Strong => {
            let style = InlineStyle {
                bold: true,
                ..style.clone()
            };
            walk_inline_children(node, &style, options, out);
        }
        NodeValue::Emph => {
            let style = InlineStyle {
                italic: true,
                ..style.clone()
            };
            walk_inline_children(node, &style, options, out);
        }
        NodeValue::Strikethrough => {
            let style = InlineStyle {
                strikethrough: true,
                ..style.clone()
            };
            walk_inline_children(node, &style, options, out);
        }
        NodeValue::Link(link) | NodeValue::Image(link) => {
            let style = InlineStyle {
                link: Some(link.url.clone()),
                ..style.clone()
            };
            walk_inline_children(node, &style, options, out);
        }
        NodeValue::HtmlInline(html) => push_span(out, html, style),
        _ => walk_inline_children(node, style, options, out),
    }
}

/// Append text to the span list, merging with the previous span when the
/// style matches.
fn push_span(out: &mut Vec<InlineSpan>, text: &str, style: &InlineStyle) {
    if text.is_empty() {
        return;
    }
    if let Some(last) = out.last_mut() {
        if last.style == *style {
            last.text.push_str(text);
            return;
        }
    }
    out.push(InlineSpan {
        text: text.to_string(),
        style: style.clone(),
    });
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn build(markdown: &str) -> Vec<PreviewBlock> {
        let highlighter = CodeHighlighter::new(true);
        build_preview_blocks(markdown, &RenderOptions::default(), &highlighter).unwrap()
    }

    fn plain_text(spans: &[InlineSpan]) -> String {
        spans.iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn test_heading_levels() {
        let blocks = build("# One\n\n### Three");
        assert!(matches!(&blocks[0], PreviewBlock::Heading { level: 1, .. }));
        assert!(matches!(&blocks[1], PreviewBlock::Heading { level: 3, .. }));
    }

    #[test]
    fn test_paragraph_styles() {
        let blocks = build("plain **bold** *italic* `code` ~~gone~~");
        let PreviewBlock::Paragraph { spans, .. } = &blocks[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(plain_text(spans), "plain bold italic code gone");
        assert!(spans.iter().any(|s| s.style.bold && s.text == "bold"));
        assert!(spans.iter().any(|s| s.style.italic && s.text == "italic"));
        assert!(spans.iter().any(|s| s.style.code && s.text == "code"));
        assert!(spans.iter().any(|s| s.style.strikethrough && s.text == "gone"));
    }

    #[test]
    fn test_underline_html_toggles_style() {
        let blocks = build("before <u>under</u> after");
        let PreviewBlock::Paragraph { spans, .. } = &blocks[0] else {
            panic!("expected paragraph");
        };
        let under: Vec<_> = spans.iter().filter(|s| s.style.underline).collect();
        assert_eq!(under.len(), 1);
        assert_eq!(under[0].text, "under");
    }

    #[test]
    fn test_link_carries_url() {
        let blocks = build("[docs](https://example.com)");
        let PreviewBlock::Paragraph { spans, .. } = &blocks[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(spans[0].text, "docs");
        assert_eq!(spans[0].style.link.as_deref(), Some("https://example.com"));
    }

    #[test]
    fn test_softbreak_becomes_newline_with_hardbreaks() {
        let blocks = build("one\ntwo");
        let PreviewBlock::Paragraph { spans, .. } = &blocks[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(plain_text(spans), "one\ntwo");
    }

    #[test]
    fn test_bullet_list_markers() {
        let blocks = build("- first\n- second");
        let markers: Vec<_> = blocks
            .iter()
            .filter_map(|b| match b {
                PreviewBlock::Paragraph { marker, .. } => marker.clone(),
                _ => None,
            })
            .collect();
        assert_eq!(markers, vec!["• ", "• "]);
    }

    #[test]
    fn test_ordered_list_numbering() {
        let blocks = build("1. first\n2. second\n3. third");
        let markers: Vec<_> = blocks
            .iter()
            .filter_map(|b| match b {
                PreviewBlock::Paragraph { marker, .. } => marker.clone(),
                _ => None,
            })
            .collect();
        assert_eq!(markers, vec!["1. ", "2. ", "3. "]);
    }

    #[test]
    fn test_nested_list_indent() {
        let blocks = build("- outer\n  - inner");
        let indents: Vec<_> = blocks
            .iter()
            .filter_map(|b| match b {
                PreviewBlock::Paragraph { indent, .. } => Some(*indent),
                _ => None,
            })
            .collect();
        assert_eq!(indents, vec![0, 1]);
    }

    #[test]
    fn test_code_block_language_and_lines() {
        let blocks = build("```javascript\nconst a = 1;\nconst b = 2;\n```\n");
        let PreviewBlock::CodeBlock { language, lines } = &blocks[0] else {
            panic!("expected code block");
        };
        assert_eq!(language.as_deref(), Some("javascript"));
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_blockquote_and_rule() {
        let blocks = build("> quoted wisdom\n\n---\n");
        assert!(matches!(&blocks[0], PreviewBlock::Quote { .. }));
        assert!(matches!(&blocks[1], PreviewBlock::Rule));
    }

    #[test]
    fn test_welcome_document_renders() {
        let blocks = build(crate::state::WELCOME_DOCUMENT);
        assert!(matches!(
            &blocks[0],
            PreviewBlock::Heading { level: 1, .. }
        ));
        let PreviewBlock::Heading { spans, .. } = &blocks[0] else {
            unreachable!();
        };
        assert_eq!(plain_text(spans), "Welcome to Markdown Magic");
        assert!(blocks
            .iter()
            .any(|b| matches!(b, PreviewBlock::CodeBlock { language, .. }
                if language.as_deref() == Some("javascript"))));
    }
}
