//! Color themes for the chat window.
//!
//! Surfaces go from `surface[0]` (app background) to `surface[3]`
//! (selected rows). Own messages use `bubble_own`, everyone else
//! `bubble_other`.

use eframe::egui::{self, Color32};

#[derive(Clone, Debug)]
pub struct ChatTheme {
    pub surface: [Color32; 4],
    pub accent: Color32,
    pub link: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub bubble_own: Color32,
    /// Text drawn on `bubble_own`.
    pub text_own: Color32,
    pub bubble_other: Color32,
    pub border: Color32,
}

impl ChatTheme {
    pub fn dark() -> Self {
        Self {
            surface: [
                Color32::from_rgb(10, 10, 15),
                Color32::from_rgb(19, 19, 26),
                Color32::from_rgb(28, 28, 38),
                Color32::from_rgb(46, 46, 62),
            ],
            accent: Color32::from_rgb(88, 101, 242),
            link: Color32::from_rgb(0, 175, 244),
            text_primary: Color32::WHITE,
            text_muted: Color32::from_rgb(114, 118, 125),
            bubble_own: Color32::from_rgb(71, 82, 196),
            text_own: Color32::WHITE,
            bubble_other: Color32::from_rgb(37, 37, 50),
            border: Color32::from_rgb(47, 49, 54),
        }
    }

    pub fn light() -> Self {
        Self {
            surface: [
                Color32::from_rgb(255, 255, 255),
                Color32::from_rgb(246, 246, 247),
                Color32::from_rgb(242, 243, 245),
                Color32::from_rgb(212, 215, 220),
            ],
            accent: Color32::from_rgb(88, 101, 242),
            link: Color32::from_rgb(0, 120, 212),
            text_primary: Color32::from_rgb(6, 6, 7),
            text_muted: Color32::from_rgb(116, 127, 141),
            bubble_own: Color32::from_rgb(206, 212, 252),
            text_own: Color32::from_rgb(24, 28, 74),
            bubble_other: Color32::from_rgb(227, 229, 232),
            border: Color32::from_rgb(210, 213, 219),
        }
    }

    /// Theme by settings name; anything but "light" is dark.
    pub fn named(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }

    pub fn for_ctx(ctx: &egui::Context) -> Self {
        if ctx.style().visuals.dark_mode {
            Self::dark()
        } else {
            Self::light()
        }
    }
}

/// Apply egui visuals for a settings theme name.
pub fn apply_visuals(ctx: &egui::Context, theme: &str) {
    match theme {
        "light" => ctx.set_visuals(egui::Visuals::light()),
        _ => ctx.set_visuals(egui::Visuals::dark()),
    }
}

const USER_COLORS: [Color32; 8] = [
    Color32::from_rgb(0xE0, 0x6C, 0x75),
    Color32::from_rgb(0x98, 0xC3, 0x79),
    Color32::from_rgb(0xE5, 0xC0, 0x7B),
    Color32::from_rgb(0x61, 0xAF, 0xEF),
    Color32::from_rgb(0xC6, 0x78, 0xDD),
    Color32::from_rgb(0x56, 0xB6, 0xC2),
    Color32::from_rgb(0xD1, 0x9A, 0x66),
    Color32::from_rgb(0xBE, 0x50, 0x46),
];

/// Stable avatar color for a username (FNV-1a).
pub fn user_color(name: &str) -> Color32 {
    let mut hash: u64 = 1469598103934665603u64;
    for b in name.as_bytes() {
        hash ^= *b as u64;
        hash = hash.wrapping_mul(1099511628211u64);
    }
    USER_COLORS[(hash as usize) % USER_COLORS.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_color_is_stable() {
        assert_eq!(user_color("alice"), user_color("alice"));
        assert!(USER_COLORS.contains(&user_color("")));
    }

    #[test]
    fn test_named_theme() {
        assert_eq!(ChatTheme::named("light").text_primary, ChatTheme::light().text_primary);
        assert_eq!(ChatTheme::named("dark").text_primary, Color32::WHITE);
        assert_eq!(ChatTheme::named("nonsense").text_primary, Color32::WHITE);
    }

    /// Rough WCAG-style luminance gap between two colors.
    fn contrast(a: Color32, b: Color32) -> f32 {
        let lum = |c: Color32| {
            (0.2126 * c.r() as f32 + 0.7152 * c.g() as f32 + 0.0722 * c.b() as f32) / 255.0
        };
        (lum(a) - lum(b)).abs()
    }

    #[test]
    fn test_own_bubble_text_is_readable() {
        for theme in [ChatTheme::dark(), ChatTheme::light()] {
            assert!(contrast(theme.text_own, theme.bubble_own) > 0.4);
            assert!(contrast(theme.text_primary, theme.bubble_other) > 0.4);
        }
    }
}
