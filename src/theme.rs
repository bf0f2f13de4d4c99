//! Roadmap theme module.
//!
//! Dark charcoal surfaces with a violet accent, matching the roadmap's
//! landing-page palette.

use ratatui::style::Color;

/// Roadmap color palette
pub mod colors {
    use super::Color;

    // === Background Colors ===
    /// Page background behind the sticky panel
    pub const BG_DARK: Color = Color::Rgb(0x1C, 0x1C, 0x1C);
    /// Detail card surface
    pub const BG_CARD: Color = Color::Rgb(0x20, 0x20, 0x20);
    /// Summary card surface
    pub const BG_SUMMARY: Color = Color::Rgb(0x84, 0x6C, 0xEC);
    /// Overlays
    pub const BG_DIM: Color = Color::Rgb(0x12, 0x12, 0x12);

    // === Foreground Colors ===
    pub const FG_PRIMARY: Color = Color::Rgb(0xFF, 0xFF, 0xFF);
    /// Bullet text in the detail card
    pub const FG_MUTED: Color = Color::Rgb(0x86, 0x8E, 0x8B);
    /// Label text on the summary card
    pub const FG_ON_ACCENT_DIM: Color = Color::Rgb(0xD9, 0xD2, 0xF9);
    pub const FG_HINT: Color = Color::Rgb(0x54, 0x54, 0x54);

    // === Accent Colors ===
    /// Timeline fill, markers and the whitepaper button
    pub const ACCENT: Color = Color::Rgb(0x8B, 0x5C, 0xF6);
    /// Eyebrow heading above the section title
    pub const ACCENT_SOFT: Color = Color::Rgb(0xA5, 0x8B, 0xFF);

    pub const GREEN: Color = Color::Rgb(0x8A, 0x9A, 0x7B);
    pub const YELLOW: Color = Color::Rgb(0xC4, 0xB2, 0x8A);
    pub const BLUE: Color = Color::Rgb(0x8B, 0xA4, 0xB0);

    // === UI Element Colors ===
    /// Unfilled timeline rail and upcoming markers
    pub const RAIL: Color = Color::Rgb(0x2C, 0x2C, 0x2C);
    /// Separators inside the detail card
    pub const DIVIDER: Color = Color::Rgb(0x33, 0x33, 0x33);
    pub const BORDER: Color = Color::Rgb(0x72, 0x71, 0x69);
    pub const BORDER_DIM: Color = Color::Rgb(0x3A, 0x3A, 0x3A);
}

/// Blend two RGB colors; non-RGB inputs return `from`
pub fn blend(from: Color, to: Color, ratio: f32) -> Color {
    match (from, to) {
        (Color::Rgb(r1, g1, b1), Color::Rgb(r2, g2, b2)) => {
            let ratio = ratio.clamp(0.0, 1.0);
            let mix = |a: u8, b: u8| (a as f32 * (1.0 - ratio) + b as f32 * ratio) as u8;
            Color::Rgb(mix(r1, r2), mix(g1, g2), mix(b1, b2))
        }
        _ => from,
    }
}

/// Semantic styling helpers
pub mod styles {
    use ratatui::style::{Modifier, Style};
    use super::colors;

    pub fn text() -> Style {
        Style::default().fg(colors::FG_PRIMARY)
    }

    pub fn text_muted() -> Style {
        Style::default().fg(colors::FG_MUTED)
    }

    pub fn text_hint() -> Style {
        Style::default().fg(colors::FG_HINT)
    }

    /// Small uppercase heading above the section title
    pub fn eyebrow() -> Style {
        Style::default()
            .fg(colors::ACCENT_SOFT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn section_title() -> Style {
        Style::default()
            .fg(colors::FG_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn summary_label() -> Style {
        Style::default()
            .fg(colors::FG_ON_ACCENT_DIM)
            .add_modifier(Modifier::BOLD)
    }

    pub fn divider() -> Style {
        Style::default().fg(colors::DIVIDER)
    }

    pub fn border() -> Style {
        Style::default().fg(colors::BORDER)
    }

    pub fn border_dim() -> Style {
        Style::default().fg(colors::BORDER_DIM)
    }

    /// Block titles in the chrome around the document
    pub fn title() -> Style {
        Style::default()
            .fg(colors::ACCENT)
            .add_modifier(Modifier::BOLD | Modifier::ITALIC)
    }

    pub fn button() -> Style {
        Style::default()
            .fg(colors::FG_PRIMARY)
            .bg(colors::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn success() -> Style {
        Style::default().fg(colors::GREEN)
    }

    pub fn warning() -> Style {
        Style::default().fg(colors::YELLOW)
    }

    pub fn info() -> Style {
        Style::default().fg(colors::BLUE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_endpoints() {
        assert_eq!(blend(colors::RAIL, colors::ACCENT, 0.0), colors::RAIL);
        assert_eq!(blend(colors::RAIL, colors::ACCENT, 1.0), colors::ACCENT);
        assert_eq!(blend(Color::Reset, colors::ACCENT, 0.5), Color::Reset);
    }

    #[test]
    fn test_heading_styles_are_distinct() {
        let headings = [styles::eyebrow(), styles::section_title(), styles::title()];
        for (i, a) in headings.iter().enumerate() {
            for b in &headings[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
