//! Titled card panel with subtitle and optional header action button.
//!
//! The admin screens are stacks of these: a header (title, subtitle, button
//! on the right) above a free-form body area the caller renders into.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::ui::theme::{Theme, theme_helpers as th};

/// Rows consumed by the card header and padding, excluding the body.
const HEADER_HEIGHT: u16 = 3;

#[derive(Debug, Default, Clone)]
pub struct Card {
    title: String,
    subtitle: String,
    button: Option<String>,
}

/// Areas produced by rendering a card frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardAreas {
    pub body: Rect,
    pub button: Option<Rect>,
}

impl Card {
    pub fn new(title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
            button: None,
        }
    }

    pub fn with_button(mut self, label: impl Into<String>) -> Self {
        self.button = Some(label.into());
        self
    }

    /// Total height needed for a body of the given height.
    pub fn height_for_body(body_height: u16) -> u16 {
        // Border rows plus the header.
        HEADER_HEIGHT + body_height + 2
    }

    /// Renders the card chrome and returns the body area and, when a header
    /// button is configured, the button's hit-test area.
    pub fn render_frame(&self, frame: &mut Frame, rect: Rect, theme: &dyn Theme, button_focused: bool) -> CardAreas {
        let block = th::block(theme, None, false);
        let inner = block.inner(rect);
        frame.render_widget(block, rect);

        if inner.height < HEADER_HEIGHT {
            return CardAreas {
                body: Rect::new(inner.x, inner.y, inner.width, 0),
                button: None,
            };
        }

        let title_line = Line::from(Span::styled(
            self.title.clone(),
            theme.text_primary_style().add_modifier(Modifier::BOLD),
        ));
        let subtitle_line = Line::from(Span::styled(self.subtitle.clone(), theme.text_secondary_style()));

        let mut button_area = None;
        let mut header_width = inner.width;
        if let Some(label) = &self.button {
            let width = (label.width() as u16).saturating_add(4).min(inner.width);
            let area = Rect::new(inner.x + inner.width - width, inner.y, width, 3.min(inner.height));
            th::render_button(
                frame,
                area,
                label,
                true,
                button_focused,
                theme,
                ratatui::widgets::Borders::ALL,
            );
            header_width = inner.width.saturating_sub(width + 1);
            button_area = Some(area);
        }

        let header = Rect::new(inner.x, inner.y, header_width, 2.min(inner.height));
        frame.render_widget(Paragraph::new(vec![title_line, subtitle_line]), header);

        let body_y = inner.y + HEADER_HEIGHT;
        let body_height = inner.height.saturating_sub(HEADER_HEIGHT);
        CardAreas {
            body: Rect::new(inner.x, body_y, inner.width, body_height),
            button: button_area,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn height_for_body_adds_header_and_borders() {
        assert_eq!(Card::height_for_body(0), 5);
        assert_eq!(Card::height_for_body(4), 9);
    }
}
