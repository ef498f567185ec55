use crate::app::App;
use crate::ui::components::Component;
use crate::ui::theme::theme_helpers::{block, build_hint_spans, render_button};
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::prelude::Span;
use ratatui::text::Line;
use ratatui::widgets::{Borders, Paragraph};
use tenure_types::{Effect, Msg};

/// Modal for assigning teams or channels to a custom policy.
#[derive(Default, Debug, Clone)]
pub struct PickerComponent {
    list_area: Rect,
    apply_area: Rect,
    cancel_area: Rect,
    scroll_offset: usize,
}

impl PickerComponent {
    fn apply_effects(app: &App) -> Vec<Effect> {
        let Some(kind) = app.picker.kind() else {
            return vec![Effect::CloseModal];
        };
        vec![
            Effect::CloseModal,
            Effect::SendMsg(Msg::PickerApplied {
                kind,
                ids: app.picker.checked_ids(),
            }),
        ]
    }

    fn cancel_effects() -> Vec<Effect> {
        vec![Effect::CloseModal, Effect::SendMsg(Msg::PickerCancelled)]
    }
}

impl Component for PickerComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Tab => {
                app.focus.next();
                Vec::new()
            }
            KeyCode::BackTab => {
                app.focus.prev();
                Vec::new()
            }
            KeyCode::Esc => Self::cancel_effects(),
            KeyCode::Down | KeyCode::Char('j') if app.picker.f_list.get() => {
                app.picker.move_down();
                Vec::new()
            }
            KeyCode::Up | KeyCode::Char('k') if app.picker.f_list.get() => {
                app.picker.move_up();
                Vec::new()
            }
            KeyCode::Char(' ') if app.picker.f_list.get() => {
                app.picker.toggle_current();
                Vec::new()
            }
            KeyCode::Enter => {
                if app.picker.f_cancel.get() {
                    Self::cancel_effects()
                } else {
                    // The list and the apply button both commit.
                    Self::apply_effects(app)
                }
            }
            _ => Vec::new(),
        }
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        let MouseEvent { kind, column, row, .. } = mouse;
        if kind != MouseEventKind::Down(MouseButton::Left) {
            return Vec::new();
        }
        let position = Position::new(column, row);
        if self.apply_area.contains(position) {
            return Self::apply_effects(app);
        }
        if self.cancel_area.contains(position) {
            return Self::cancel_effects();
        }
        if self.list_area.contains(position) {
            app.focus.focus(&app.picker.f_list);
            let index = self.scroll_offset + (row - self.list_area.y) as usize;
            if index < app.picker.entries().len() {
                app.picker.set_cursor(index);
                app.picker.toggle_current();
            }
        }
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let theme = &*app.ctx.theme;
        let state = &app.picker;

        let title = format!(" {} ", state.title());
        let outer = block(theme, Some(title.as_str()), true);
        let inner = outer.inner(rect);
        frame.render_widget(outer, rect);

        let [list_rect, _, button_rect] = Layout::vertical([
            Constraint::Min(1),    // Entries
            Constraint::Length(1), // Spacer
            Constraint::Length(3), // Buttons
        ])
        .areas(inner);
        self.list_area = list_rect;

        // Keep the cursor row visible.
        let visible = list_rect.height as usize;
        if state.cursor() < self.scroll_offset {
            self.scroll_offset = state.cursor();
        } else if visible > 0 && state.cursor() >= self.scroll_offset + visible {
            self.scroll_offset = state.cursor() + 1 - visible;
        }

        let list_focused = state.f_list.get();
        for (row_index, entry) in state
            .entries()
            .iter()
            .enumerate()
            .skip(self.scroll_offset)
            .take(visible)
        {
            let area = Rect::new(
                list_rect.x,
                list_rect.y + (row_index - self.scroll_offset) as u16,
                list_rect.width,
                1,
            );
            let marker = if entry.checked { "[x] " } else { "[ ] " };
            let style = if list_focused && row_index == state.cursor() {
                theme.selection_style()
            } else {
                theme.text_primary_style()
            };
            frame.render_widget(
                Paragraph::new(Line::from(vec![Span::raw(marker), Span::raw(entry.label.clone())])).style(style),
                area,
            );
        }

        let apply_label = match state.checked_count() {
            1 => "Add (1 selected)".to_string(),
            n => format!("Add ({n} selected)"),
        };
        let width: u16 = 20;
        let spacer: u16 = 2;
        self.apply_area = Rect::new(button_rect.x, button_rect.y, width, button_rect.height);
        self.cancel_area = Rect::new(button_rect.x + width + spacer, button_rect.y, width, button_rect.height);
        render_button(
            frame,
            self.apply_area,
            apply_label.as_str(),
            true,
            state.f_apply.get(),
            theme,
            Borders::ALL,
        );
        render_button(frame, self.cancel_area, "Cancel", true, state.f_cancel.get(), theme, Borders::ALL);
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        build_hint_spans(
            &*app.ctx.theme,
            &[
                ("Space", " Toggle  "),
                ("Enter", " Add  "),
                ("Tab", " Focus  "),
                ("Esc", " Cancel "),
            ],
        )
    }
}
