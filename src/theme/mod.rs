//! Theme system
//!
//! Dark and light palettes applied to egui's `Visuals`, plus the handful of
//! colors the editor and preview panes draw with directly. The active theme
//! is a presentation flag owned by `AppState`; switching it also switches
//! the syntect highlight theme (see `render::CodeHighlighter::set_dark`).

mod dark;
mod light;

use egui::{Color32, Context};

/// Colors used by the application's panes and custom widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeColors {
    /// Main content background
    pub background: Color32,
    /// Panel and header background
    pub panel: Color32,
    /// Primary text
    pub text: Color32,
    /// Secondary text (status bar, list markers)
    pub muted: Color32,
    /// Headings and the app title
    pub heading: Color32,
    /// Hyperlinks in the preview
    pub link: Color32,
    /// Code block and inline code background
    pub code_background: Color32,
    /// Blockquote text and bar
    pub quote: Color32,
    /// Separator and border lines
    pub border: Color32,
    /// Whether this is the dark palette
    dark: bool,
}

impl ThemeColors {
    /// Palette for the given mode.
    pub fn for_mode(dark_mode: bool) -> Self {
        if dark_mode {
            dark::colors()
        } else {
            light::colors()
        }
    }

    pub fn is_dark(&self) -> bool {
        self.dark
    }

    /// Apply this theme to the egui context.
    pub fn apply(&self, ctx: &Context) {
        let mut visuals = if self.dark {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };
        visuals.panel_fill = self.panel;
        visuals.window_fill = self.background;
        visuals.extreme_bg_color = self.background;
        visuals.hyperlink_color = self.link;
        visuals.override_text_color = Some(self.text);
        visuals.widgets.noninteractive.bg_stroke.color = self.border;
        ctx.set_visuals(visuals);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_mode_selects_palette() {
        assert!(ThemeColors::for_mode(true).is_dark());
        assert!(!ThemeColors::for_mode(false).is_dark());
    }

    #[test]
    fn test_palettes_differ() {
        let dark = ThemeColors::for_mode(true);
        let light = ThemeColors::for_mode(false);
        assert_ne!(dark.background, light.background);
        assert_ne!(dark.text, light.text);
    }
}
