//! Rendering and event handling for the hybrid selector/free-text input.

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use rat_focus::Focus;
use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::ui::theme::Theme;

use super::state::{DisplayMode, DropdownInputState, SelectionOutcome};

/// Height of the bordered control row.
pub const CONTROL_HEIGHT: u16 = 3;

/// Events the control reports to its host screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropdownInputEvent {
    /// An option was committed from the popup menu.
    SelectionChanged {
        value: String,
        outcome: SelectionOutcome,
    },
    /// The text buffer changed while the text box was focused.
    TextChanged(String),
}

/// Stateless view over a [`DropdownInputState`]. Hit areas are recorded at
/// render time for mouse dispatch.
#[derive(Debug, Default)]
pub struct DropdownInput {
    control_area: Rect,
    text_area: Rect,
    select_area: Rect,
    menu_area: Rect,
}

impl DropdownInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, frame: &mut Frame, rect: Rect, state: &mut DropdownInputState, theme: &dyn Theme) {
        state.sync_focus_boundary();

        let width = state.config().width.min(rect.width);
        let layout = state.layout_at(width);
        let control = Rect::new(rect.x, rect.y, width, CONTROL_HEIGHT.min(rect.height));
        self.control_area = control;

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style(state.is_focused()));
        if state.legend_visible() {
            block = block.title(Span::styled(
                format!(" {} ", state.legend_text()),
                Style::default()
                    .fg(theme.roles().text_secondary)
                    .add_modifier(Modifier::BOLD),
            ));
        }
        let inner = block.inner(control);
        frame.render_widget(block, control);

        match state.display_mode() {
            DisplayMode::DropdownOnly => {
                self.text_area = Rect::default();
                self.select_area = control;
                self.render_select(frame, inner, state, theme);
            }
            DisplayMode::DropdownWithText => {
                let text_width = layout.text_width.min(inner.width);
                let text_inner = Rect::new(inner.x, inner.y, text_width.saturating_sub(1), inner.height);
                let select_inner = Rect::new(
                    inner.x + text_width,
                    inner.y,
                    inner.width.saturating_sub(text_width),
                    inner.height,
                );
                self.text_area = Rect::new(control.x, control.y, text_width, control.height);
                self.select_area = Rect::new(
                    control.x + text_width,
                    control.y,
                    control.width.saturating_sub(text_width),
                    control.height,
                );
                self.render_text(frame, text_inner, state, theme);
                frame.render_widget(
                    Paragraph::new("│").style(theme.border_style(state.is_focused())),
                    Rect::new(inner.x + text_width.saturating_sub(1), inner.y, 1, inner.height),
                );
                self.render_select(frame, select_inner, state, theme);
            }
        }

        if let Some(error) = state.error() {
            if rect.height > CONTROL_HEIGHT {
                let error_area = Rect::new(rect.x + 1, rect.y + CONTROL_HEIGHT, width.saturating_sub(2), 1);
                frame.render_widget(Paragraph::new(error).style(theme.status_error()), error_area);
            }
        }

        if state.menu_is_open() {
            self.render_menu(frame, state, theme, layout.menu_offset_x);
        } else {
            self.menu_area = Rect::default();
        }
    }

    fn render_text(&self, frame: &mut Frame, area: Rect, state: &DropdownInputState, theme: &dyn Theme) {
        let text_focused = state.f_text.get();
        let content = if state.text().is_empty() && !text_focused {
            Line::from(Span::styled(
                state.config().placeholder.clone(),
                Style::default().fg(theme.roles().text_muted),
            ))
        } else {
            Line::from(Span::styled(
                state.text().to_string(),
                theme.text_primary_style(),
            ))
        };
        frame.render_widget(Paragraph::new(content), area);

        if text_focused {
            let cursor_x = area.x + state.input().cursor_display_column().min(area.width.saturating_sub(1));
            frame.set_cursor_position(Position::new(cursor_x, area.y));
        }
    }

    fn render_select(&self, frame: &mut Frame, area: Rect, state: &DropdownInputState, theme: &dyn Theme) {
        let select_focused = state.f_select.get();
        let style = if select_focused {
            theme.selection_style()
        } else if state.selected_value().is_empty() {
            Style::default().fg(theme.roles().text_muted)
        } else {
            theme.text_primary_style()
        };
        let label = if state.selected_value().is_empty() && state.display_mode() == DisplayMode::DropdownOnly {
            state.config().placeholder.as_str()
        } else {
            state.selected_label()
        };
        let arrow = if state.menu_is_open() { "▴" } else { "▾" };
        let line = Line::from(vec![
            Span::raw(" "),
            Span::raw(label.to_string()),
            Span::raw(" "),
            Span::raw(arrow.to_string()),
        ]);
        frame.render_widget(Paragraph::new(line).style(style), area);
    }

    fn render_menu(&mut self, frame: &mut Frame, state: &DropdownInputState, theme: &dyn Theme, offset_x: i32) {
        let anchor = self.select_area;
        let menu_x = (i32::from(anchor.x) + offset_x).max(0) as u16;
        let menu_width = self.control_area.width;
        let menu_height = state.options().len() as u16 + 2;
        let menu_y = anchor.y + anchor.height;
        let frame_area = frame.area();
        if menu_y + menu_height > frame_area.height {
            self.menu_area = Rect::default();
            return;
        }
        let menu = Rect::new(menu_x, menu_y, menu_width.min(frame_area.width.saturating_sub(menu_x)), menu_height);
        self.menu_area = menu;

        frame.render_widget(Clear, menu);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style(true))
            .style(theme.modal_background_style());
        let inner = block.inner(menu);
        frame.render_widget(block, menu);

        for (index, option) in state.options().iter().enumerate() {
            if index as u16 >= inner.height {
                break;
            }
            let row = Rect::new(inner.x, inner.y + index as u16, inner.width, 1);
            let style = if index == state.menu_highlight() {
                theme.selection_style()
            } else {
                theme.text_primary_style()
            };
            let marker = if option.value == state.selected_value() { "● " } else { "  " };
            frame.render_widget(
                Paragraph::new(Line::from(vec![Span::raw(marker), Span::raw(option.label.clone())])).style(style),
                row,
            );
        }
    }

    /// Key handling for whichever sub-field holds focus. Returns the events
    /// the host should react to.
    pub fn handle_key_events(&mut self, key: KeyEvent, state: &mut DropdownInputState) -> Vec<DropdownInputEvent> {
        state.sync_focus_boundary();
        if state.f_select.get() {
            self.handle_select_key(key, state)
        } else if state.f_text.get() {
            if state.input_mut().handle_key_event(key) {
                vec![DropdownInputEvent::TextChanged(state.text().to_string())]
            } else {
                Vec::new()
            }
        } else {
            Vec::new()
        }
    }

    fn handle_select_key(&mut self, key: KeyEvent, state: &mut DropdownInputState) -> Vec<DropdownInputEvent> {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => {
                if state.menu_is_open() {
                    self.commit_highlight(state)
                } else {
                    state.open_menu();
                    Vec::new()
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if state.menu_is_open() {
                    state.highlight_next();
                } else {
                    state.open_menu();
                }
                Vec::new()
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if state.menu_is_open() {
                    state.highlight_previous();
                }
                Vec::new()
            }
            KeyCode::Esc => {
                state.close_menu();
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    /// Mouse handling against the areas recorded by the last render.
    pub fn handle_mouse_events(
        &mut self,
        mouse: MouseEvent,
        state: &mut DropdownInputState,
        focus: &Focus,
    ) -> Vec<DropdownInputEvent> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Vec::new();
        }
        let position = Position::new(mouse.column, mouse.row);

        if state.menu_is_open() && self.menu_area.contains(position) {
            let inner_top = self.menu_area.y + 1;
            if position.y >= inner_top {
                let index = (position.y - inner_top) as usize;
                if index < state.options().len() {
                    state.set_menu_highlight(index);
                    return self.commit_highlight(state);
                }
            }
            return Vec::new();
        }
        if self.select_area.contains(position) {
            focus.focus(&state.f_select);
            if state.menu_is_open() {
                state.close_menu();
            } else {
                state.open_menu();
            }
            return Vec::new();
        }
        if self.text_area.contains(position) && state.display_mode() == DisplayMode::DropdownWithText {
            focus.focus(&state.f_text);
            state.sync_focus_boundary();
            return Vec::new();
        }
        if state.menu_is_open() {
            state.close_menu();
        }
        Vec::new()
    }

    fn commit_highlight(&mut self, state: &mut DropdownInputState) -> Vec<DropdownInputEvent> {
        let Some(option) = state.highlighted_option() else {
            return Vec::new();
        };
        let value = option.value.clone();
        state.close_menu();
        let outcome = state.on_option_selected(&value);
        vec![DropdownInputEvent::SelectionChanged { value, outcome }]
    }
}
