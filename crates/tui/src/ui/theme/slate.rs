//! Default truecolor palette: cool grays with a blue accent.

use ratatui::style::Color;

use super::roles::{Theme, ThemeRoles};

#[derive(Debug)]
pub struct SlateTheme {
    roles: ThemeRoles,
}

impl Default for SlateTheme {
    fn default() -> Self {
        Self {
            roles: ThemeRoles {
                background: Color::Rgb(15, 19, 24),
                surface: Color::Rgb(23, 28, 36),
                surface_muted: Color::Rgb(30, 37, 47),
                border: Color::Rgb(62, 72, 88),
                text: Color::Rgb(222, 228, 237),
                text_secondary: Color::Rgb(166, 176, 190),
                text_muted: Color::Rgb(108, 118, 132),
                accent_primary: Color::Rgb(97, 157, 234),
                info: Color::Rgb(97, 157, 234),
                success: Color::Rgb(113, 190, 132),
                warning: Color::Rgb(224, 176, 92),
                error: Color::Rgb(226, 105, 102),
                selection_bg: Color::Rgb(44, 58, 79),
                selection_fg: Color::Rgb(230, 236, 244),
                focus: Color::Rgb(126, 178, 242),
                modal_bg: Color::Rgb(10, 13, 17),
            },
        }
    }
}

impl Theme for SlateTheme {
    fn roles(&self) -> &ThemeRoles {
        &self.roles
    }
}
