//! Small popup menu for per-row actions (Edit / Delete).

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Paragraph};

use crate::ui::theme::{Theme, theme_helpers as th};

/// Outcome of feeding a key event to an open menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionMenuOutcome {
    /// The event moved the highlight or was ignored; menu stays open.
    Open,
    /// The menu was dismissed without choosing.
    Dismissed,
    /// An item was chosen (by index into `items`).
    Chosen(usize),
}

#[derive(Debug, Clone, Default)]
pub struct ActionMenuState {
    pub items: Vec<String>,
    pub selected: usize,
}

impl ActionMenuState {
    pub fn new(items: Vec<String>) -> Self {
        Self { items, selected: 0 }
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) -> ActionMenuOutcome {
        match key.code {
            KeyCode::Esc => ActionMenuOutcome::Dismissed,
            KeyCode::Enter => ActionMenuOutcome::Chosen(self.selected),
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                ActionMenuOutcome::Open
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if !self.items.is_empty() {
                    self.selected = (self.selected + 1).min(self.items.len() - 1);
                }
                ActionMenuOutcome::Open
            }
            _ => ActionMenuOutcome::Open,
        }
    }

    /// Renders the menu anchored at `anchor`, clamped to the frame area.
    pub fn render(&self, frame: &mut Frame, anchor: Rect, theme: &dyn Theme) {
        let width = self
            .items
            .iter()
            .map(|item| item.len() as u16)
            .max()
            .unwrap_or(0)
            .saturating_add(4);
        let height = self.items.len() as u16 + 2;
        let frame_area = frame.area();
        let x = anchor.x.min(frame_area.width.saturating_sub(width));
        let y = anchor.y.min(frame_area.height.saturating_sub(height));
        let area = Rect::new(x, y, width.min(frame_area.width), height.min(frame_area.height));

        frame.render_widget(Clear, area);
        let block = th::block(theme, None, true);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines: Vec<Line> = self
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let style = if index == self.selected {
                    th::table_selected_style(theme)
                } else {
                    theme.text_primary_style()
                };
                Line::from(Span::styled(format!(" {item} "), style))
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn navigation_clamps_and_enter_chooses() {
        let mut menu = ActionMenuState::new(vec!["Edit".into(), "Delete".into()]);
        assert_eq!(menu.handle_key_event(key(KeyCode::Up)), ActionMenuOutcome::Open);
        assert_eq!(menu.selected, 0);

        menu.handle_key_event(key(KeyCode::Down));
        menu.handle_key_event(key(KeyCode::Down));
        assert_eq!(menu.selected, 1);

        assert_eq!(menu.handle_key_event(key(KeyCode::Enter)), ActionMenuOutcome::Chosen(1));
        assert_eq!(menu.handle_key_event(key(KeyCode::Esc)), ActionMenuOutcome::Dismissed);
    }
}
