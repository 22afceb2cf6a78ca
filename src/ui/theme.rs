use ratatui::style::Color;
use crate::app::Config;

pub fn parse_color(hex: &str) -> Color {
    if hex.starts_with('#') && hex.len() == 7 {
        if let (Ok(r), Ok(g), Ok(b)) = (
            u8::from_str_radix(&hex[1..3], 16),
            u8::from_str_radix(&hex[3..5], 16),
            u8::from_str_radix(&hex[5..7], 16),
        ) {
            return Color::Rgb(r, g, b);
        }
    }
    Color::White
}

// Only RGB pairs blend; anything else is returned unchanged.
pub fn fade(color: Color, background: Color, opacity: f32) -> Color {
    match (color, background) {
        (Color::Rgb(r, g, b), Color::Rgb(br, bg, bb)) => {
            let t = opacity.clamp(0.0, 1.0);
            let mix = |c: u8, base: u8| {
                (f32::from(base) + (f32::from(c) - f32::from(base)) * t).round() as u8
            };
            Color::Rgb(mix(r, br), mix(g, bg), mix(b, bb))
        }
        _ => color,
    }
}

pub struct Theme {
    pub background: Color,
    pub foreground: Color,
    pub accent: Color,
    pub muted: Color,
    pub summary: Color,
}

impl Theme {
    pub fn from_config(config: &Config) -> Self {
        let dark_theme = &config.theme.dark;

        Self {
            background: parse_color(&dark_theme.background),
            foreground: parse_color(&dark_theme.foreground),
            accent: parse_color(&dark_theme.accent),
            muted: parse_color(&dark_theme.muted),
            summary: parse_color(&dark_theme.summary),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_and_falls_back_to_white() {
        assert_eq!(parse_color("#FF0000"), Color::Rgb(255, 0, 0));
        assert_eq!(parse_color("red"), Color::White);
        assert_eq!(parse_color("#GG0000"), Color::White);
    }

    #[test]
    fn fade_blends_toward_background() {
        let white = Color::Rgb(255, 255, 255);
        let black = Color::Rgb(0, 0, 0);
        assert_eq!(fade(white, black, 1.0), white);
        assert_eq!(fade(white, black, 0.0), black);
        assert_eq!(fade(white, black, 0.8), Color::Rgb(204, 204, 204));
        assert_eq!(fade(Color::Yellow, black, 0.5), Color::Yellow);
    }
}
