//! Catppuccin Mocha color palette for the TUI, plus marker colors.

use daybar_engine::MarkerColor;
use ratatui::style::Color;

/// Theme color palette.
#[derive(Debug, Clone)]
pub struct Theme {
    // Backgrounds
    pub base: Color,
    pub surface: Color,
    pub overlay: Color,

    // Foregrounds
    pub text: Color,
    pub subtext: Color,
    pub muted: Color,

    // Accents
    pub primary: Color,
    pub secondary: Color,

    // Semantic
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,

    // Markers
    pub marker_red: Color,
    pub marker_orange: Color,
    pub marker_green: Color,
    pub marker_blue: Color,
    pub lunch_start: Color,
    pub lunch_end: Color,

    // Borders
    pub border: Color,
    pub border_focused: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::mocha()
    }
}

impl Theme {
    /// Catppuccin Mocha theme (default dark theme).
    pub fn mocha() -> Self {
        Self {
            // Backgrounds
            base: Color::Rgb(30, 30, 46),       // #1e1e2e
            surface: Color::Rgb(49, 50, 68),    // #313244
            overlay: Color::Rgb(69, 71, 90),    // #45475a

            // Foregrounds
            text: Color::Rgb(205, 214, 244),    // #cdd6f4
            subtext: Color::Rgb(166, 173, 200), // #a6adc8
            muted: Color::Rgb(108, 112, 134),   // #6c7086

            // Accents
            primary: Color::Rgb(180, 190, 254),   // #b4befe (lavender)
            secondary: Color::Rgb(148, 226, 213), // #94e2d5 (teal)

            // Semantic
            success: Color::Rgb(166, 227, 161), // #a6e3a1 (green)
            warning: Color::Rgb(249, 226, 175), // #f9e2af (yellow)
            error: Color::Rgb(243, 139, 168),   // #f38ba8 (red)
            info: Color::Rgb(137, 180, 250),    // #89b4fa (blue)

            // Markers
            marker_red: Color::Rgb(231, 76, 60),     // #e74c3c
            marker_orange: Color::Rgb(243, 156, 18), // #f39c12
            marker_green: Color::Rgb(46, 204, 113),  // #2ecc71
            marker_blue: Color::Rgb(52, 152, 219),   // #3498db
            lunch_start: Color::Rgb(255, 193, 7),    // #ffc107 (amber)
            lunch_end: Color::Rgb(255, 152, 0),      // #ff9800 (orange)

            // Borders
            border: Color::Rgb(69, 71, 90),            // #45475a
            border_focused: Color::Rgb(180, 190, 254), // #b4befe (lavender)
        }
    }

    /// High contrast theme for accessibility.
    pub fn high_contrast() -> Self {
        Self {
            // Maximum contrast backgrounds
            base: Color::Black,
            surface: Color::Rgb(20, 20, 20),
            overlay: Color::Rgb(40, 40, 40),

            // Maximum contrast foregrounds
            text: Color::White,
            subtext: Color::Rgb(200, 200, 200),
            muted: Color::Rgb(150, 150, 150),

            // Bright accents
            primary: Color::Cyan,
            secondary: Color::Magenta,

            // Semantic (bright versions)
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            info: Color::Blue,

            // Markers
            marker_red: Color::LightRed,
            marker_orange: Color::Yellow,
            marker_green: Color::LightGreen,
            marker_blue: Color::LightBlue,
            lunch_start: Color::LightYellow,
            lunch_end: Color::Yellow,

            // Borders
            border: Color::White,
            border_focused: Color::Cyan,
        }
    }

    /// Pick the theme from the environment, respecting `NO_COLOR`.
    pub fn from_env() -> Self {
        if std::env::var_os("NO_COLOR").is_some() {
            Self::high_contrast()
        } else {
            Self::mocha()
        }
    }

    /// Terminal color for a marker tag.
    pub fn marker_color(&self, color: MarkerColor) -> Color {
        match color {
            MarkerColor::Red => self.marker_red,
            MarkerColor::Orange => self.marker_orange,
            MarkerColor::Green => self.marker_green,
            MarkerColor::Blue => self.marker_blue,
            MarkerColor::LunchStart => self.lunch_start,
            MarkerColor::LunchEnd => self.lunch_end,
            MarkerColor::Hue(hue) => hsl_to_rgb(f64::from(hue), 0.7, 0.6),
        }
    }
}

/// Convert HSL (hue in degrees, saturation and lightness in `0..=1`) to RGB.
pub fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> Color {
    let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let sector = hue.rem_euclid(360.0) / 60.0;
    let x = chroma * (1.0 - (sector % 2.0 - 1.0).abs());

    let (r, g, b) = match sector as u8 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };

    let m = lightness - chroma / 2.0;
    let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    Color::Rgb(channel(r), channel(g), channel(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mocha_theme_creates() {
        let theme = Theme::mocha();
        assert!(matches!(theme.base, Color::Rgb(30, 30, 46)));
    }

    #[test]
    fn test_high_contrast_theme_creates() {
        let theme = Theme::high_contrast();
        assert!(matches!(theme.base, Color::Black));
    }

    #[test]
    fn test_seed_marker_colors() {
        let theme = Theme::mocha();
        assert_eq!(theme.marker_color(MarkerColor::Red), Color::Rgb(231, 76, 60));
        assert_eq!(
            theme.marker_color(MarkerColor::LunchEnd),
            Color::Rgb(255, 152, 0)
        );
    }

    #[test]
    fn test_hsl_primary_hues() {
        assert_eq!(hsl_to_rgb(0.0, 1.0, 0.5), Color::Rgb(255, 0, 0));
        assert_eq!(hsl_to_rgb(120.0, 1.0, 0.5), Color::Rgb(0, 255, 0));
        assert_eq!(hsl_to_rgb(240.0, 1.0, 0.5), Color::Rgb(0, 0, 255));
        assert_eq!(hsl_to_rgb(360.0, 1.0, 0.5), Color::Rgb(255, 0, 0));
    }

    #[test]
    fn test_hue_marker_is_rgb() {
        let theme = Theme::mocha();
        assert!(matches!(
            theme.marker_color(MarkerColor::Hue(200)),
            Color::Rgb(..)
        ));
    }
}
