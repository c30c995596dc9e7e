use crate::store::Theme;
use ratatui::style::{Color, Modifier, Style};

/// Colours for one theme.
#[derive(Debug, Clone, Copy)]
pub(super) struct Palette {
    pub text: Color,
    pub background: Color,
    pub accent: Color,
    pub marked: Color,
    pub winning: Color,
    pub focus: Color,
    pub error: Color,
}

impl Palette {
    pub(super) const fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                text: Color::White,
                background: Color::Reset,
                accent: Color::Cyan,
                marked: Color::Yellow,
                winning: Color::Green,
                focus: Color::Magenta,
                error: Color::Red,
            },
            Theme::Light => Self {
                text: Color::Black,
                background: Color::White,
                accent: Color::Blue,
                marked: Color::Rgb(200, 120, 0),
                winning: Color::Rgb(0, 130, 60),
                focus: Color::Magenta,
                error: Color::Red,
            },
        }
    }

    pub(super) fn base(self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    pub(super) fn dim(self) -> Style {
        self.base().add_modifier(Modifier::DIM)
    }

    pub(super) fn bold(self) -> Style {
        self.base().add_modifier(Modifier::BOLD)
    }
}
