use ratatui::style::{Color, Modifier, Style};

/// Palette for the prediction form.
pub struct Theme;

impl Theme {
    pub const TEXT: Color = Color::White;
    pub const MUTED: Color = Color::DarkGray;
    pub const LEAF: Color = Color::Green;
    pub const FOCUS: Color = Color::Cyan;

    // Input groups
    pub const CLIMATE: Color = Color::LightBlue;
    pub const SOIL: Color = Color::Rgb(176, 124, 72);

    // Outcomes
    pub const ADVISORY: Color = Color::LightYellow;
    pub const YIELD: Color = Color::LightGreen;
    pub const ERROR: Color = Color::Red;

    pub fn title() -> Style {
        Style::default().fg(Self::LEAF).add_modifier(Modifier::BOLD)
    }

    pub fn normal() -> Style {
        Style::default().fg(Self::TEXT)
    }

    pub fn dim() -> Style {
        Style::default().fg(Self::MUTED)
    }

    /// Focused select value.
    pub fn highlight() -> Style {
        Style::default().fg(Self::FOCUS).add_modifier(Modifier::BOLD)
    }

    /// Text cursor block.
    pub fn cursor() -> Style {
        Style::default().bg(Self::MUTED).fg(Self::TEXT)
    }

    pub fn climate_group() -> Style {
        Style::default()
            .fg(Self::CLIMATE)
            .add_modifier(Modifier::BOLD)
    }

    pub fn soil_group() -> Style {
        Style::default().fg(Self::SOIL).add_modifier(Modifier::BOLD)
    }

    /// Planting window advice. Informational, so not as loud as an error.
    pub fn advisory() -> Style {
        Style::default()
            .fg(Self::ADVISORY)
            .add_modifier(Modifier::ITALIC)
    }

    pub fn yield_value() -> Style {
        Style::default().fg(Self::YIELD).add_modifier(Modifier::BOLD)
    }

    pub fn error() -> Style {
        Style::default().fg(Self::ERROR).add_modifier(Modifier::BOLD)
    }

    pub fn busy() -> Style {
        Style::default()
            .fg(Self::FOCUS)
            .add_modifier(Modifier::SLOW_BLINK)
    }

    pub fn nav_key() -> Style {
        Style::default().fg(Self::LEAF).add_modifier(Modifier::BOLD)
    }

    pub fn nav_label() -> Style {
        Style::default().fg(Self::MUTED)
    }

    pub fn border() -> Style {
        Style::default().fg(Self::MUTED)
    }

    pub fn border_focused() -> Style {
        Style::default().fg(Self::FOCUS)
    }
}
