use crate::app::App;
use crate::ui::components::Component;
use crate::ui::theme::theme_helpers::{block_with_severity, build_hint_spans, render_button};
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::prelude::Span;
use ratatui::text::Line;
use ratatui::widgets::{Borders, Paragraph, Wrap};
use tenure_types::{Effect, Msg};

#[derive(Default, Debug, Clone)]
pub struct ConfirmationModal {
    button_areas: Vec<Rect>,
}

impl Component for ConfirmationModal {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        let mut effects = Vec::new();
        match key.code {
            KeyCode::Tab => {
                app.focus.next();
            }
            KeyCode::BackTab => {
                app.focus.prev();
            }
            KeyCode::Enter => {
                if let Some(index) = app.confirmation_modal_state.focused_button() {
                    effects.extend([Effect::CloseModal, Effect::SendMsg(Msg::ConfirmationButton(index))]);
                }
            }
            KeyCode::Esc => effects.push(Effect::CloseModal),
            _ => {}
        }
        effects
    }

    fn handle_mouse_events(&mut self, _app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        let MouseEvent { kind, column, row, .. } = mouse;
        if kind == MouseEventKind::Down(MouseButton::Left) {
            let position = Position::new(column, row);
            if let Some(index) = self.button_areas.iter().position(|area| area.contains(position)) {
                return vec![Effect::CloseModal, Effect::SendMsg(Msg::ConfirmationButton(index))];
            }
        }
        vec![]
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let theme = &*app.ctx.theme;
        let state = &app.confirmation_modal_state;
        let block = block_with_severity(theme, state.severity(), state.title());
        let inner = block.inner(rect);
        frame.render_widget(&block, rect);

        let [message_rect, _, button_rect] = Layout::vertical([
            Constraint::Min(1),    // Message
            Constraint::Length(1), // Spacer
            Constraint::Length(3), // Buttons
        ])
        .areas(inner);

        let lines = state
            .message_lines()
            .iter()
            .map(|line| Line::from(Span::from(line.clone())))
            .collect::<Vec<Line>>();
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), message_rect);

        let width: u16 = 20;
        let spacer: u16 = 2;
        let mut button_areas = Vec::with_capacity(state.buttons().len());
        for (index, (label, _)) in state.buttons().iter().enumerate() {
            let mult = index as u16;
            let area = Rect::new(
                button_rect.x + mult * (width + spacer),
                button_rect.y,
                width,
                button_rect.height,
            );
            render_button(
                frame,
                area,
                label.as_str(),
                true,
                state.is_button_focused(index),
                theme,
                Borders::ALL,
            );
            button_areas.push(area);
        }
        self.button_areas = button_areas;
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        build_hint_spans(
            &*app.ctx.theme,
            &[("Tab/Shift+Tab", " Focus  "), ("Enter", " Confirm  "), ("Esc", " Cancel ")],
        )
    }
}
