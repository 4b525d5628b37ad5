use std::str::FromStr;

use ratatui::style::Color;

use crate::ui::surface::HighlightKind;

/// Which palette a [`Theme`] was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeVariant {
    #[default]
    Dark,
    Light,
}

impl ThemeVariant {
    pub fn other(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

impl FromStr for ThemeVariant {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            _ => Err(()),
        }
    }
}

/// Colors for the board and side panels.
///
/// Highlight tints come in pairs: the first is used on light squares and
/// the second on dark squares so the square parity stays readable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub variant: ThemeVariant,

    pub light_square: Color,
    pub dark_square: Color,
    pub white_piece: Color,
    pub black_piece: Color,
    pub board_border: Color,
    pub board_label: Color,

    pub highlight_selected: (Color, Color),
    pub highlight_legal_move: (Color, Color),
    pub highlight_last_move: (Color, Color),

    /// Arrow shafts and heads.
    pub arrow: Color,
    /// Outline of right-click square marks.
    pub mark: Color,

    pub panel_border: Color,
    pub positive: Color,
    pub warning: Color,
    pub negative: Color,
    pub info: Color,
    pub muted: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
}

impl Theme {
    /// For terminals with a dark background.
    pub fn dark() -> Self {
        Self {
            variant: ThemeVariant::Dark,
            light_square: Color::Rgb(238, 238, 210),
            dark_square: Color::Rgb(118, 150, 86),
            // RGB rather than ANSI White/Black, which terminals remap freely.
            white_piece: Color::Rgb(255, 255, 255),
            black_piece: Color::Rgb(0, 0, 0),
            board_border: Color::Cyan,
            board_label: Color::Yellow,
            highlight_selected: (Color::Rgb(246, 246, 105), Color::Rgb(186, 202, 43)),
            highlight_legal_move: (Color::Rgb(130, 180, 230), Color::Rgb(80, 130, 190)),
            highlight_last_move: (Color::Rgb(245, 223, 120), Color::Rgb(200, 170, 70)),
            arrow: Color::Rgb(21, 120, 27),
            mark: Color::Rgb(220, 50, 50),
            panel_border: Color::Cyan,
            positive: Color::Green,
            warning: Color::Yellow,
            negative: Color::Red,
            info: Color::Cyan,
            muted: Color::DarkGray,
            text_primary: Color::White,
            text_secondary: Color::Gray,
        }
    }

    /// For terminals with a light background. Darker squares keep white
    /// pieces visible and chrome uses explicit RGB.
    pub fn light() -> Self {
        Self {
            variant: ThemeVariant::Light,
            light_square: Color::Rgb(205, 210, 170),
            dark_square: Color::Rgb(96, 128, 68),
            white_piece: Color::Rgb(255, 255, 255),
            black_piece: Color::Rgb(25, 25, 25),
            board_border: Color::Rgb(50, 90, 110),
            board_label: Color::Rgb(110, 80, 30),
            highlight_selected: (Color::Rgb(220, 210, 80), Color::Rgb(170, 160, 40)),
            highlight_legal_move: (Color::Rgb(110, 160, 210), Color::Rgb(60, 110, 170)),
            highlight_last_move: (Color::Rgb(225, 195, 100), Color::Rgb(180, 145, 55)),
            arrow: Color::Rgb(15, 100, 20),
            mark: Color::Rgb(190, 30, 30),
            panel_border: Color::Rgb(50, 90, 110),
            positive: Color::Rgb(30, 130, 30),
            warning: Color::Rgb(170, 120, 0),
            negative: Color::Rgb(190, 35, 35),
            info: Color::Rgb(30, 110, 140),
            muted: Color::Rgb(140, 140, 140),
            text_primary: Color::Rgb(30, 30, 30),
            text_secondary: Color::Rgb(80, 80, 80),
        }
    }

    pub fn from_variant(variant: ThemeVariant) -> Self {
        match variant {
            ThemeVariant::Dark => Self::dark(),
            ThemeVariant::Light => Self::light(),
        }
    }

    /// Pick the palette from `CHESSBOARD_THEME` (`dark` or `light`).
    /// Anything else, or no value, gives the dark palette.
    pub fn detect() -> Self {
        let variant = std::env::var("CHESSBOARD_THEME")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or_default();
        Self::from_variant(variant)
    }

    pub fn toggle(&mut self) {
        *self = Self::from_variant(self.variant.other());
    }

    pub fn is_dark(&self) -> bool {
        self.variant == ThemeVariant::Dark
    }

    pub fn name(&self) -> &'static str {
        match self.variant {
            ThemeVariant::Dark => "Dark",
            ThemeVariant::Light => "Light",
        }
    }

    /// Background for a highlighted square.
    pub fn resolve_highlight(&self, kind: HighlightKind, is_light_square: bool) -> Color {
        let (on_light, on_dark) = match kind {
            HighlightKind::Selected => self.highlight_selected,
            HighlightKind::LegalDestination => self.highlight_legal_move,
            HighlightKind::LastMove => self.highlight_last_move,
        };
        if is_light_square {
            on_light
        } else {
            on_dark
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::detect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_parsing() {
        assert_eq!("light".parse(), Ok(ThemeVariant::Light));
        assert_eq!(" Dark ".parse(), Ok(ThemeVariant::Dark));
        assert_eq!("solarized".parse::<ThemeVariant>(), Err(()));
    }

    #[test]
    fn test_toggle_round_trips() {
        let mut theme = Theme::dark();
        theme.toggle();
        assert!(!theme.is_dark());
        assert_eq!(theme.name(), "Light");
        assert_eq!(theme, Theme::light());
        theme.toggle();
        assert_eq!(theme, Theme::dark());
    }

    #[test]
    fn test_highlight_depends_on_square_shade() {
        let theme = Theme::dark();
        let on_light = theme.resolve_highlight(HighlightKind::LegalDestination, true);
        let on_dark = theme.resolve_highlight(HighlightKind::LegalDestination, false);
        assert_eq!(on_light, theme.highlight_legal_move.0);
        assert_eq!(on_dark, theme.highlight_legal_move.1);
        assert_ne!(on_light, on_dark);
    }
}
