//! Dark theme palette

use egui::Color32;

use super::ThemeColors;

/// Dark palette, tuned for comfortable long-form editing.
pub(super) fn colors() -> ThemeColors {
    ThemeColors {
        background: Color32::from_rgb(24, 26, 31),
        panel: Color32::from_rgb(32, 34, 40),
        text: Color32::from_rgb(212, 215, 221),
        muted: Color32::from_rgb(130, 135, 145),
        heading: Color32::from_rgb(186, 148, 255),
        link: Color32::from_rgb(120, 170, 255),
        code_background: Color32::from_rgb(40, 43, 52),
        quote: Color32::from_rgb(150, 156, 168),
        border: Color32::from_rgb(55, 58, 66),
        dark: true,
    }
}
