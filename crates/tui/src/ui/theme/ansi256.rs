//! ANSI 256-color fallback palette for terminals without truecolor support.

use ratatui::style::Color;

use super::roles::{Theme, ThemeRoles};

#[derive(Debug)]
pub struct Ansi256Theme {
    roles: ThemeRoles,
}

impl Default for Ansi256Theme {
    fn default() -> Self {
        Self {
            roles: ThemeRoles {
                background: Color::Indexed(233),
                surface: Color::Indexed(235),
                surface_muted: Color::Indexed(237),
                border: Color::Indexed(240),
                text: Color::Indexed(253),
                text_secondary: Color::Indexed(248),
                text_muted: Color::Indexed(243),
                accent_primary: Color::Indexed(75),
                info: Color::Indexed(75),
                success: Color::Indexed(108),
                warning: Color::Indexed(179),
                error: Color::Indexed(167),
                selection_bg: Color::Indexed(238),
                selection_fg: Color::Indexed(255),
                focus: Color::Indexed(111),
                modal_bg: Color::Indexed(232),
            },
        }
    }
}

impl Theme for Ansi256Theme {
    fn roles(&self) -> &ThemeRoles {
        &self.roles
    }
}
