use std::rc::Rc;

use crate::app::App;
use crate::ui::components::Component;
use crate::ui::components::common::Card;
use crate::ui::components::dropdown_input::{CONTROL_HEIGHT, DropdownInput, DropdownInputEvent, ModeTransition};
use crate::ui::theme::theme_helpers::{block, build_hint_spans, render_button};
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::prelude::Span;
use ratatui::text::Line;
use ratatui::widgets::{Borders, Paragraph};
use tenure_types::{Effect, Modal, Msg, PickerKind, Route};

/// Create/edit form for a single custom retention policy.
#[derive(Default, Debug)]
pub struct CustomPolicyComponent {
    retention_input: DropdownInput,
    name_area: Rect,
    add_teams_area: Rect,
    add_channels_area: Rect,
    teams_area: Rect,
    channels_area: Rect,
    save_area: Rect,
}

impl CustomPolicyComponent {
    fn open_picker(app: &mut App, kind: PickerKind) -> Vec<Effect> {
        let App {
            picker,
            custom_policy,
            teams,
            channels,
            ..
        } = app;
        match kind {
            PickerKind::Teams => picker.open(
                kind,
                teams.iter().map(|team| (team.id.clone(), team.display_name.clone())),
                &custom_policy.team_ids,
            ),
            PickerKind::Channels => picker.open(
                kind,
                channels
                    .iter()
                    .map(|channel| (channel.id.clone(), channel.display_name.clone())),
                &custom_policy.channel_ids,
            ),
        }
        vec![Effect::ShowModal(Modal::Picker(kind))]
    }

    fn absorb_dropdown_events(app: &mut App, events: Vec<DropdownInputEvent>) {
        for event in events {
            match event {
                DropdownInputEvent::SelectionChanged { outcome, .. } => {
                    app.custom_policy.error = None;
                    // Re-entering text mode restores the loaded day count.
                    if outcome.transition == Some(ModeTransition::EnteredTextMode)
                        && let Some(days) = app.custom_policy.stored_days
                        && app.custom_policy.retention.text().is_empty()
                    {
                        app.custom_policy.retention.on_text_changed(&days.to_string());
                    }
                }
                DropdownInputEvent::TextChanged(_) => {
                    app.custom_policy.error = None;
                }
            }
        }
    }

    fn save_effects(app: &mut App) -> Vec<Effect> {
        let fallback_id = app.next_policy_id();
        match app.custom_policy.build_policy(fallback_id) {
            Ok(policy) => {
                app.custom_policy.error = None;
                app.upsert_policy(policy);
                vec![Effect::SavePolicyRequested]
            }
            Err(error) => {
                app.custom_policy.error = Some(error);
                Vec::new()
            }
        }
    }
}

impl Component for CustomPolicyComponent {
    fn handle_message(&mut self, app: &mut App, msg: &Msg) -> Vec<Effect> {
        match msg {
            Msg::PickerApplied { kind, ids } => {
                let App {
                    custom_policy,
                    teams,
                    channels,
                    ..
                } = app;
                match kind {
                    PickerKind::Teams => custom_policy.team_ids = ids.clone(),
                    PickerKind::Channels => custom_policy.channel_ids = ids.clone(),
                }
                custom_policy.refresh_assignment_rows(teams, channels);
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
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

        if app.custom_policy.f_name.get() && key.code != KeyCode::Esc && key.code != KeyCode::Enter {
            app.custom_policy.name.handle_key_event(key);
            return Vec::new();
        }

        let retention = &mut app.custom_policy.retention;
        if retention.f_select.get() || retention.f_text.get() {
            if !(key.code == KeyCode::Esc && !retention.menu_is_open()) {
                let events = self.retention_input.handle_key_events(key, retention);
                Self::absorb_dropdown_events(app, events);
                return Vec::new();
            }
        }

        if app.custom_policy.f_teams.get() {
            match key.code {
                KeyCode::Down | KeyCode::Char('j') => {
                    app.custom_policy.teams_table.select_next();
                    return Vec::new();
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    app.custom_policy.teams_table.select_previous();
                    return Vec::new();
                }
                KeyCode::Delete | KeyCode::Backspace => {
                    let App {
                        custom_policy,
                        teams,
                        channels,
                        ..
                    } = app;
                    custom_policy.remove_selected_team();
                    custom_policy.refresh_assignment_rows(teams, channels);
                    return Vec::new();
                }
                _ => {}
            }
        }
        if app.custom_policy.f_channels.get() {
            match key.code {
                KeyCode::Down | KeyCode::Char('j') => {
                    app.custom_policy.channels_table.select_next();
                    return Vec::new();
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    app.custom_policy.channels_table.select_previous();
                    return Vec::new();
                }
                KeyCode::Delete | KeyCode::Backspace => {
                    let App {
                        custom_policy,
                        teams,
                        channels,
                        ..
                    } = app;
                    custom_policy.remove_selected_channel();
                    custom_policy.refresh_assignment_rows(teams, channels);
                    return Vec::new();
                }
                _ => {}
            }
        }

        match key.code {
            KeyCode::Enter if app.custom_policy.f_add_teams.get() => Self::open_picker(app, PickerKind::Teams),
            KeyCode::Enter if app.custom_policy.f_add_channels.get() => Self::open_picker(app, PickerKind::Channels),
            KeyCode::Enter if app.custom_policy.f_save.get() => Self::save_effects(app),
            KeyCode::Esc => vec![Effect::SwitchTo(Route::Retention)],
            _ => Vec::new(),
        }
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        let focus = Rc::clone(&app.focus);
        let events = self
            .retention_input
            .handle_mouse_events(mouse, &mut app.custom_policy.retention, &focus);
        if !events.is_empty() {
            Self::absorb_dropdown_events(app, events);
            return Vec::new();
        }

        let MouseEvent { kind, column, row, .. } = mouse;
        if kind != MouseEventKind::Down(MouseButton::Left) {
            return Vec::new();
        }
        let position = Position::new(column, row);
        if self.name_area.contains(position) {
            focus.focus(&app.custom_policy.f_name);
        } else if self.add_teams_area.contains(position) {
            return Self::open_picker(app, PickerKind::Teams);
        } else if self.add_channels_area.contains(position) {
            return Self::open_picker(app, PickerKind::Channels);
        } else if self.save_area.contains(position) {
            return Self::save_effects(app);
        } else if self.teams_area.contains(position) {
            focus.focus(&app.custom_policy.f_teams);
        } else if self.channels_area.contains(position) {
            focus.focus(&app.custom_policy.f_channels);
        }
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let App { ctx, custom_policy, .. } = app;
        let theme = &*ctx.theme;

        let title = if custom_policy.is_new() {
            "New custom retention policy"
        } else {
            "Edit custom retention policy"
        };
        let [title_rect, name_rect, retention_rect, teams_rect, channels_rect, footer_rect, error_rect] =
            Layout::vertical([
                Constraint::Length(1),
                Constraint::Length(CONTROL_HEIGHT),
                Constraint::Length(CONTROL_HEIGHT),
                Constraint::Length(Card::height_for_body(4)),
                Constraint::Min(Card::height_for_body(4)),
                Constraint::Length(CONTROL_HEIGHT),
                Constraint::Length(1),
            ])
            .areas(rect);

        frame.render_widget(
            Paragraph::new(title).style(theme.text_primary_style().add_modifier(ratatui::style::Modifier::BOLD)),
            title_rect,
        );

        // Policy name field.
        let name_width = name_rect.width.min(48);
        self.name_area = Rect::new(name_rect.x, name_rect.y, name_width, CONTROL_HEIGHT);
        let name_focused = custom_policy.f_name.get();
        let name_block = block(theme, Some(" Policy name "), name_focused);
        let name_inner = name_block.inner(self.name_area);
        frame.render_widget(name_block, self.name_area);
        frame.render_widget(
            Paragraph::new(custom_policy.name.input().to_string()).style(theme.text_primary_style()),
            name_inner,
        );
        if name_focused {
            let cursor_x = name_inner.x + custom_policy.name.cursor_display_column().min(name_inner.width.saturating_sub(1));
            frame.set_cursor_position(Position::new(cursor_x, name_inner.y));
        }

        self.retention_input
            .render(frame, retention_rect, &mut custom_policy.retention, theme);

        // Assigned teams.
        let teams_card = Card::new("Assigned teams", "Channel messages in these teams follow this policy.")
            .with_button("Add teams");
        let areas = teams_card.render_frame(frame, teams_rect, theme, custom_policy.f_add_teams.get());
        self.add_teams_area = areas.button.unwrap_or_default();
        self.teams_area = areas.body;
        if custom_policy.teams_table.rows.is_empty() {
            frame.render_widget(Paragraph::new("No teams assigned.").style(theme.text_muted_style()), areas.body);
        } else {
            custom_policy
                .teams_table
                .render(frame, areas.body, theme, custom_policy.f_teams.get());
        }

        // Assigned channels.
        let channels_card = Card::new("Assigned channels", "These channels follow this policy regardless of team.")
            .with_button("Add channels");
        let areas = channels_card.render_frame(frame, channels_rect, theme, custom_policy.f_add_channels.get());
        self.add_channels_area = areas.button.unwrap_or_default();
        self.channels_area = areas.body;
        if custom_policy.channels_table.rows.is_empty() {
            frame.render_widget(
                Paragraph::new("No channels assigned.").style(theme.text_muted_style()),
                areas.body,
            );
        } else {
            custom_policy
                .channels_table
                .render(frame, areas.body, theme, custom_policy.f_channels.get());
        }

        self.save_area = Rect::new(footer_rect.x, footer_rect.y, 20.min(footer_rect.width), footer_rect.height);
        render_button(
            frame,
            self.save_area,
            "Save policy",
            true,
            custom_policy.f_save.get(),
            theme,
            Borders::ALL,
        );

        if let Some(error) = custom_policy.error.as_deref() {
            frame.render_widget(
                Paragraph::new(Line::from(error.to_string())).style(theme.status_error()),
                error_rect,
            );
        }
    }

    fn after_render(&mut self, app: &mut App) -> Vec<Effect> {
        let App {
            custom_policy, focus, ..
        } = app;
        if custom_policy.retention.mark_rendered() == Some(ModeTransition::EnteredTextMode) {
            focus.focus(&custom_policy.retention.f_text);
        }
        Vec::new()
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        build_hint_spans(
            &*app.ctx.theme,
            &[
                ("Tab/Shift+Tab", " Focus  "),
                ("Enter", " Activate  "),
                ("Del", " Unassign  "),
                ("Esc", " Back "),
            ],
        )
    }
}
