use std::rc::Rc;

use crate::app::App;
use crate::ui::components::Component;
use crate::ui::components::common::{ActionMenuOutcome, ActionMenuState, Card};
use crate::ui::components::dropdown_input::{CONTROL_HEIGHT, DropdownInput, DropdownInputEvent, ModeTransition};
use crate::ui::theme::theme_helpers::{block, build_hint_spans};
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::prelude::Span;
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use tenure_types::{Effect, JobType, Modal, Msg};

use super::state::RetentionViewState;

/// Rows inside the global policy card: two retention controls and the job
/// start time field.
const GLOBAL_BODY_HEIGHT: u16 = CONTROL_HEIGHT * 3;

/// The data retention overview: global policy form, custom policy table, and
/// the policy log.
#[derive(Default, Debug)]
pub struct RetentionComponent {
    message_input: DropdownInput,
    file_input: DropdownInput,
    start_time_area: Rect,
    save_area: Rect,
    add_policy_area: Rect,
    run_job_area: Rect,
    table_area: Rect,
    menu_anchor: Rect,
}

impl RetentionComponent {
    fn absorb_dropdown_events(app: &mut App, is_message_control: bool, events: Vec<DropdownInputEvent>) {
        for event in events {
            match event {
                DropdownInputEvent::SelectionChanged { outcome, .. } => {
                    app.retention.status = None;
                    // Entering text mode seeds the buffer with the stored
                    // window so the refocused field is not empty.
                    if outcome.transition == Some(ModeTransition::EnteredTextMode) {
                        let stored = if is_message_control {
                            app.settings.message_retention_days
                        } else {
                            app.settings.file_retention_days
                        };
                        let control = if is_message_control {
                            &mut app.retention.message_retention
                        } else {
                            &mut app.retention.file_retention
                        };
                        if control.text().is_empty() {
                            control.on_text_changed(&stored.to_string());
                        }
                    }
                }
                DropdownInputEvent::TextChanged(_) => {
                    app.retention.status = None;
                }
            }
        }
    }

    fn open_action_menu(&mut self, state: &mut RetentionViewState) {
        if let Some(selected) = state.policies.selected() {
            let anchor_y = self.table_area.y + 1 + selected.saturating_sub(state.policies.table_state.offset()) as u16;
            self.menu_anchor = Rect::new(
                self.table_area.x + self.table_area.width.saturating_sub(16),
                anchor_y,
                1,
                1,
            );
            state.action_menu = Some(ActionMenuState::new(vec!["Edit".to_string(), "Delete".to_string()]));
        }
    }

    fn save_effects(app: &mut App) -> Vec<Effect> {
        let opts = app.retention.confirmation_opts();
        app.confirmation_modal_state.update_opts(opts);
        vec![Effect::ShowModal(Modal::Confirmation)]
    }

    fn handle_menu_key(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        let Some(menu) = app.retention.action_menu.as_mut() else {
            return Vec::new();
        };
        match menu.handle_key_event(key) {
            ActionMenuOutcome::Open => Vec::new(),
            ActionMenuOutcome::Dismissed => {
                app.retention.action_menu = None;
                Vec::new()
            }
            ActionMenuOutcome::Chosen(action) => {
                app.retention.action_menu = None;
                let Some(index) = app.retention.policies.selected() else {
                    return Vec::new();
                };
                match action {
                    0 => {
                        app.open_policy_for_edit(index);
                        vec![Effect::SwitchTo(tenure_types::Route::CustomPolicy)]
                    }
                    _ => {
                        app.delete_policy(index);
                        vec![Effect::SaveSettingsRequested]
                    }
                }
            }
        }
    }
}

impl Component for RetentionComponent {
    fn handle_message(&mut self, app: &mut App, msg: &Msg) -> Vec<Effect> {
        match msg {
            Msg::ConfirmationButton(0) => {
                app.commit_retention_form();
                vec![Effect::SaveSettingsRequested]
            }
            Msg::SettingsPersisted(Ok(())) => {
                app.retention.server_error = None;
                app.retention.status = Some("Settings saved.".to_string());
                let policies = app.settings.custom_policies.clone();
                app.retention.refresh_policy_rows(&policies);
                Vec::new()
            }
            Msg::SettingsPersisted(Err(error)) => {
                app.retention.status = None;
                app.retention.server_error = Some(error.clone());
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        if app.retention.action_menu.is_some() {
            return self.handle_menu_key(app, key);
        }

        match key.code {
            KeyCode::Tab => {
                app.focus.next();
                return Vec::new();
            }
            KeyCode::BackTab => {
                app.focus.prev();
                return Vec::new();
            }
            _ => {}
        }

        let message = &mut app.retention.message_retention;
        if message.f_select.get() || message.f_text.get() {
            // Esc with a closed menu falls through to quit.
            if !(key.code == KeyCode::Esc && !message.menu_is_open()) {
                let events = self.message_input.handle_key_events(key, message);
                Self::absorb_dropdown_events(app, true, events);
                return Vec::new();
            }
        }
        let file = &mut app.retention.file_retention;
        if file.f_select.get() || file.f_text.get() {
            if !(key.code == KeyCode::Esc && !file.menu_is_open()) {
                let events = self.file_input.handle_key_events(key, file);
                Self::absorb_dropdown_events(app, false, events);
                return Vec::new();
            }
        }

        if app.retention.f_start_time.get() && key.code != KeyCode::Esc {
            if app.retention.start_time.handle_key_event(key) {
                app.retention.status = None;
            }
            return Vec::new();
        }

        if app.retention.f_policies.get() {
            match key.code {
                KeyCode::Down | KeyCode::Char('j') => {
                    app.retention.policies.select_next();
                    return Vec::new();
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    app.retention.policies.select_previous();
                    return Vec::new();
                }
                KeyCode::Enter => {
                    let App { retention, .. } = app;
                    self.open_action_menu(retention);
                    return Vec::new();
                }
                _ => {}
            }
        }

        match key.code {
            KeyCode::Enter if app.retention.f_add_policy.get() => {
                app.begin_new_policy();
                vec![Effect::SwitchTo(tenure_types::Route::CustomPolicy)]
            }
            KeyCode::Enter if app.retention.f_save.get() => Self::save_effects(app),
            KeyCode::Enter if app.retention.f_run_job.get() => {
                vec![Effect::CreateJobRequested(JobType::DataRetention)]
            }
            KeyCode::Esc | KeyCode::Char('q') => vec![Effect::Quit],
            _ => Vec::new(),
        }
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        let focus = Rc::clone(&app.focus);
        let events = self
            .message_input
            .handle_mouse_events(mouse, &mut app.retention.message_retention, &focus);
        if !events.is_empty() {
            Self::absorb_dropdown_events(app, true, events);
            return Vec::new();
        }
        let events = self
            .file_input
            .handle_mouse_events(mouse, &mut app.retention.file_retention, &focus);
        if !events.is_empty() {
            Self::absorb_dropdown_events(app, false, events);
            return Vec::new();
        }

        let MouseEvent { kind, column, row, .. } = mouse;
        if kind != MouseEventKind::Down(MouseButton::Left) {
            return Vec::new();
        }
        let position = Position::new(column, row);

        if self.save_area.contains(position) {
            return Self::save_effects(app);
        }
        if self.add_policy_area.contains(position) {
            app.begin_new_policy();
            return vec![Effect::SwitchTo(tenure_types::Route::CustomPolicy)];
        }
        if self.run_job_area.contains(position) {
            return vec![Effect::CreateJobRequested(JobType::DataRetention)];
        }
        if self.start_time_area.contains(position) {
            focus.focus(&app.retention.f_start_time);
            return Vec::new();
        }
        if self.table_area.contains(position) {
            focus.focus(&app.retention.f_policies);
            let index = app.retention.policies.table_state.offset() + (row.saturating_sub(self.table_area.y + 1)) as usize;
            if row > self.table_area.y && index < app.retention.policies.rows.len() {
                app.retention.policies.table_state.select(Some(index));
                let App { retention, .. } = app;
                self.open_action_menu(retention);
            }
            return Vec::new();
        }
        if app.retention.action_menu.is_some() {
            app.retention.action_menu = None;
        }
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let App {
            ctx, retention, jobs, ..
        } = app;
        let theme = &*ctx.theme;

        let [global_rect, policies_rect, jobs_rect, status_rect] = Layout::vertical([
            Constraint::Length(Card::height_for_body(GLOBAL_BODY_HEIGHT)),
            Constraint::Length(Card::height_for_body(6)),
            Constraint::Min(Card::height_for_body(3)),
            Constraint::Length(1),
        ])
        .areas(rect);

        // Global policy card.
        let global_card = Card::new(
            "Global retention policy",
            "Applies to all messages and file uploads without a custom policy.",
        )
        .with_button("Save");
        let areas = global_card.render_frame(frame, global_rect, theme, retention.f_save.get());
        self.save_area = areas.button.unwrap_or_default();
        let body = areas.body;
        let message_rect = Rect::new(body.x, body.y, body.width, CONTROL_HEIGHT);
        let file_rect = Rect::new(body.x, body.y + CONTROL_HEIGHT, body.width, CONTROL_HEIGHT);
        let start_rect = Rect::new(
            body.x,
            body.y + CONTROL_HEIGHT * 2,
            body.width.min(24),
            CONTROL_HEIGHT,
        );
        self.message_input.render(frame, message_rect, &mut retention.message_retention, theme);
        self.file_input.render(frame, file_rect, &mut retention.file_retention, theme);

        // Deletion job start time, "HH:MM".
        self.start_time_area = start_rect;
        let start_focused = retention.f_start_time.get();
        let start_block = block(theme, Some(" Deletion job start time "), start_focused);
        let start_inner = start_block.inner(start_rect);
        frame.render_widget(start_block, start_rect);
        frame.render_widget(
            Paragraph::new(retention.start_time.input().to_string()).style(theme.text_primary_style()),
            start_inner,
        );
        if start_focused {
            let cursor_x = start_inner.x + retention.start_time.cursor_display_column().min(start_inner.width.saturating_sub(1));
            frame.set_cursor_position(Position::new(cursor_x, start_inner.y));
        }

        // Custom policies card.
        let policies_card = Card::new(
            "Custom retention policies",
            "Override the global policy for specific teams and channels.",
        )
        .with_button("Add policy");
        let areas = policies_card.render_frame(frame, policies_rect, theme, retention.f_add_policy.get());
        self.add_policy_area = areas.button.unwrap_or_default();
        self.table_area = areas.body;
        if retention.policies.rows.is_empty() {
            frame.render_widget(
                Paragraph::new("No custom retention policies yet.").style(theme.text_muted_style()),
                areas.body,
            );
        } else {
            retention.policies.render(frame, areas.body, theme, retention.f_policies.get());
        }

        // Policy log card.
        let jobs_card = Card::new("Policy log", "Nightly deletion job history.").with_button("Run deletion job now");
        let areas = jobs_card.render_frame(frame, jobs_rect, theme, retention.f_run_job.get());
        self.run_job_area = areas.button.unwrap_or_default();
        if jobs.jobs().is_empty() {
            frame.render_widget(
                Paragraph::new("No deletion jobs have run.").style(theme.text_muted_style()),
                areas.body,
            );
        } else {
            jobs.table.render(frame, areas.body, theme, false);
        }

        // Status line under the cards.
        if let Some(error) = retention.server_error.as_deref() {
            frame.render_widget(Paragraph::new(Line::from(error.to_string())).style(theme.status_error()), status_rect);
        } else if let Some(status) = retention.status.as_deref() {
            frame.render_widget(
                Paragraph::new(Line::from(status.to_string())).style(theme.status_success()),
                status_rect,
            );
        }

        if let Some(menu) = retention.action_menu.as_ref() {
            menu.render(frame, self.menu_anchor, theme);
        }
    }

    fn after_render(&mut self, app: &mut App) -> Vec<Effect> {
        // Focus follows the text box whenever a render made it appear.
        let App { retention, focus, .. } = app;
        for control in [&mut retention.message_retention, &mut retention.file_retention] {
            if control.mark_rendered() == Some(ModeTransition::EnteredTextMode) {
                focus.focus(&control.f_text);
            }
        }
        Vec::new()
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        build_hint_spans(
            &*app.ctx.theme,
            &[
                ("Tab/Shift+Tab", " Focus  "),
                ("Enter", " Activate  "),
                ("Esc", " Quit "),
            ],
        )
    }
}
