// PlantCare - ui/theme.rs
//
// Colour scheme, text sizing, and layout constants.
// No dependencies on app state or business logic.

use egui::{Color32, TextStyle};

/// Accent for primary actions and the title.
pub const ACCENT: Color32 = Color32::from_rgb(79, 70, 229); // Indigo 600

/// Title colour on a light background.
pub const TITLE_LIGHT: Color32 = Color32::from_rgb(49, 46, 129); // Indigo 900

/// Title colour on a dark background.
pub const TITLE_DARK: Color32 = Color32::from_rgb(165, 180, 252); // Indigo 300

/// Error heading and icon.
pub const ERROR: Color32 = Color32::from_rgb(239, 68, 68); // Red 500

/// Error detail text.
pub const ERROR_SOFT: Color32 = Color32::from_rgb(248, 113, 113); // Red 400

/// Secondary text.
pub const MUTED: Color32 = Color32::from_rgb(156, 163, 175); // Gray 400

/// Layout constants.
pub const DROP_ZONE_MIN_HEIGHT: f32 = 420.0;
pub const RESULT_MIN_HEIGHT: f32 = 300.0;
pub const PREVIEW_MAX_HEIGHT: f32 = 420.0;
pub const SPINNER_SIZE: f32 = 48.0;
pub const LIST_INDENT: f32 = 12.0;
pub const CONTENT_MAX_WIDTH: f32 = 1150.0;

pub fn title_colour(dark_mode: bool) -> Color32 {
    if dark_mode {
        TITLE_DARK
    } else {
        TITLE_LIGHT
    }
}

/// Point size for a markdown heading of `level` (1-6).
pub fn heading_size(level: u8, body: f32) -> f32 {
    let scale = match level {
        1 => 1.8,
        2 => 1.5,
        3 => 1.25,
        4 => 1.1,
        _ => 1.0,
    };
    body * scale
}

/// Apply the theme and body font size to the context.
pub fn apply(ctx: &egui::Context, dark_mode: bool, font_size: f32) {
    ctx.set_theme(if dark_mode {
        egui::Theme::Dark
    } else {
        egui::Theme::Light
    });

    ctx.style_mut(|style| {
        for (text_style, font_id) in style.text_styles.iter_mut() {
            font_id.size = match text_style {
                TextStyle::Heading => font_size * 1.6,
                TextStyle::Small => font_size * 0.8,
                _ => font_size,
            };
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_sizes_decrease_with_level() {
        let sizes: Vec<f32> = (1..=6).map(|l| heading_size(l, 15.0)).collect();
        assert!(sizes.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(sizes[5], 15.0);
    }
}
