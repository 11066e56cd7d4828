//! Dashboard theme tokens.
//!
//! Navy/indigo accents on a dark surface, matching the chart palettes.
//! Chart series colors arrive as `#rrggbb` strings from the pipeline and are
//! converted with [`hex_color`].

use ratatui::style::{Color, Modifier, Style};

pub const BACKGROUND: Color = Color::Rgb(14, 16, 28);
pub const ACCENT: Color = Color::Rgb(130, 145, 211);
pub const POSITIVE: Color = Color::Rgb(77, 173, 170);
pub const NEGATIVE: Color = Color::Rgb(255, 99, 132);
pub const WARNING: Color = Color::Rgb(255, 235, 135);
pub const NEUTRAL: Color = Color::Rgb(176, 140, 232);
pub const MUTED: Color = Color::Rgb(120, 128, 160);
pub const TEXT_PRIMARY: Color = Color::White;
pub const MAP_OUTLINE: Color = Color::Rgb(55, 69, 135);

/// Parse `#rrggbb` (leading `#` optional) into an RGB color.
pub fn hex_color(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

/// Series color, or the accent when the hex string is unusable.
pub fn series_color(hex: &str) -> Color {
    hex_color(hex).unwrap_or(ACCENT)
}

/// Terminal-friendly shade for a choropleth intensity in [0, 1]: blends from
/// the map outline color up to the accent.
pub fn intensity_color(intensity: f64) -> Color {
    let t = intensity.clamp(0.0, 1.0);
    let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
    match (MAP_OUTLINE, WARNING) {
        (Color::Rgb(r0, g0, b0), Color::Rgb(r1, g1, b1)) => {
            Color::Rgb(lerp(r0, r1), lerp(g0, g1), lerp(b0, b1))
        }
        _ => ACCENT,
    }
}

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn text() -> Style {
    Style::default().fg(TEXT_PRIMARY)
}

pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

pub fn negative() -> Style {
    Style::default().fg(NEGATIVE)
}

pub fn positive() -> Style {
    Style::default().fg(POSITIVE)
}

pub fn neutral() -> Style {
    Style::default().fg(NEUTRAL)
}

pub fn panel_border(focused: bool) -> Style {
    if focused {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(focused: bool) -> Style {
    if focused {
        accent_bold()
    } else {
        text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex() {
        assert_eq!(hex_color("#b8c1e7"), Some(Color::Rgb(0xb8, 0xc1, 0xe7)));
        assert_eq!(hex_color("000032"), Some(Color::Rgb(0, 0, 0x32)));
    }

    #[test]
    fn rejects_bad_hex() {
        assert_eq!(hex_color("#fff"), None);
        assert_eq!(hex_color("#gg0000"), None);
        assert_eq!(hex_color("#ééé"), None);
        assert_eq!(series_color("nope"), ACCENT);
    }

    #[test]
    fn intensity_endpoints() {
        assert_eq!(intensity_color(0.0), MAP_OUTLINE);
        assert_eq!(intensity_color(1.0), WARNING);
        assert_eq!(intensity_color(7.0), WARNING);
    }

    #[test]
    fn focus_styles_differ() {
        assert_ne!(panel_border(true), panel_border(false));
        assert_eq!(panel_title(true), accent_bold());
    }
}
