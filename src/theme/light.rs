//! Light theme palette

use egui::Color32;

use super::ThemeColors;

/// Light palette, matching the app's purple-accented look.
pub(super) fn colors() -> ThemeColors {
    ThemeColors {
        background: Color32::from_rgb(250, 250, 251),
        panel: Color32::WHITE,
        text: Color32::from_rgb(40, 42, 48),
        muted: Color32::from_rgb(120, 125, 135),
        heading: Color32::from_rgb(109, 40, 217),
        link: Color32::from_rgb(37, 99, 235),
        code_background: Color32::from_rgb(240, 240, 243),
        quote: Color32::from_rgb(100, 106, 118),
        border: Color32::from_rgb(225, 226, 230),
        dark: false,
    }
}
