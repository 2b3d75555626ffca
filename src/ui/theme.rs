use crate::config::Config;
use ratatui::style::Color;

#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub foreground: Color,
    pub cursor: Color,
    /// Button that matches the current selection.
    pub active: Color,
    pub inactive: Color,
    pub focus_border: Color,
    pub command: Color,
    pub copied: Color,
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
}

impl Theme {
    pub fn default_theme() -> Self {
        Self {
            background: Color::Reset,
            foreground: Color::White,
            cursor: Color::Cyan,
            active: Color::Green,
            inactive: Color::Gray,
            focus_border: Color::Cyan,
            command: Color::Yellow,
            copied: Color::Green,
            status_bar_bg: Color::DarkGray,
            status_bar_fg: Color::White,
        }
    }

    pub fn dark() -> Self {
        Self {
            background: Color::Black,
            foreground: Color::White,
            cursor: Color::Cyan,
            active: Color::Green,
            inactive: Color::DarkGray,
            focus_border: Color::Cyan,
            command: Color::Yellow,
            copied: Color::Green,
            status_bar_bg: Color::DarkGray,
            status_bar_fg: Color::White,
        }
    }

    pub fn light() -> Self {
        Self {
            background: Color::White,
            foreground: Color::Black,
            cursor: Color::Blue,
            active: Color::Green,
            inactive: Color::Gray,
            focus_border: Color::Blue,
            command: Color::Magenta,
            copied: Color::Green,
            status_bar_bg: Color::LightBlue,
            status_bar_fg: Color::Black,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        match config.theme.as_str() {
            "dark" => Self::dark(),
            "light" => Self::light(),
            _ => Self::default_theme(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_theme()
    }
}
