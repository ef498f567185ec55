//! Main view: routes the active screen and hosts modal overlays.

use crossterm::event::{KeyEvent, MouseEvent};
use rat_focus::{FocusBuilder, HasFocus};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Clear, Paragraph};
use std::rc::Rc;

use tenure_types::{Effect, Modal, Msg, Route};

use crate::app::App;
use crate::ui::components::common::ConfirmationModal;
use crate::ui::components::component::Component;
use crate::ui::components::{CustomPolicyComponent, PickerComponent, RetentionComponent};
use crate::ui::utils::centered_fixed;

pub struct ModalLayout(Box<dyn Fn(Rect) -> Rect>);

impl std::fmt::Debug for ModalLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ModalLayout")
    }
}

type ModalView = (Box<dyn Component>, ModalLayout);

#[derive(Default)]
pub struct MainView {
    /// Current main view component.
    pub content_view: Option<Box<dyn Component>>,
    /// Currently open modal component.
    pub modal_view: Option<ModalView>,

    /// Widget id of the focus just before a modal opened.
    transient_focus_id: Option<usize>,
}

impl MainView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switches the main view. Not intended to be called directly; route
    /// changes flow through `Effect::SwitchTo`.
    pub fn set_current_route(&mut self, app: &mut App, route: Route) {
        let (view, state): (Box<dyn Component>, Box<&dyn HasFocus>) = match route {
            Route::Retention => (Box::new(RetentionComponent::default()), Box::new(&app.retention)),
            Route::CustomPolicy => (Box::new(CustomPolicyComponent::default()), Box::new(&app.custom_policy)),
        };

        app.current_route = route;
        self.content_view = Some(view);

        app.focus = Rc::new(FocusBuilder::build_for(app));
        app.focus.focus(*state);
    }

    /// Update the open modal kind (use None to clear).
    pub fn set_open_modal_kind(&mut self, app: &mut App, modal: Option<Modal>) {
        if let Some(modal_kind) = modal.as_ref() {
            let modal_view: ModalView = match modal_kind {
                Modal::Confirmation => (
                    Box::new(ConfirmationModal::default()),
                    ModalLayout(Box::new(|rect| centered_fixed(64, 12, rect))),
                ),
                Modal::Picker(_) => (
                    Box::new(PickerComponent::default()),
                    ModalLayout(Box::new(|rect| centered_fixed(52, 16, rect))),
                ),
            };
            self.modal_view = Some(modal_view);
            // Save the current focus to restore when the modal closes.
            self.transient_focus_id = app.focus.focused().map(|focus| focus.widget_id());
        } else {
            self.modal_view = None;
        }
        app.open_modal_kind = modal;
    }

    pub fn restore_focus(&mut self, app: &mut App) {
        if let Some(id) = self.transient_focus_id
            && app.open_modal_kind.is_none()
        {
            app.focus.by_widget_id(id);
            self.transient_focus_id = None;
        } else {
            app.focus.first();
        }
    }
}

impl Component for MainView {
    fn handle_message(&mut self, app: &mut App, msg: &Msg) -> Vec<Effect> {
        let mut effects = app.update(msg);
        // Messages go to the topmost view only; effects emitted behind a
        // modal are queued as messages and arrive after it closes.
        if let Some((modal, _)) = self.modal_view.as_mut() {
            effects.extend(modal.handle_message(app, msg));
        } else if let Some(content) = self.content_view.as_mut() {
            effects.extend(content.handle_message(app, msg));
        }
        effects
    }

    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        if let Some((modal, _)) = self.modal_view.as_mut() {
            return modal.handle_key_events(app, key);
        }
        if let Some(content) = self.content_view.as_mut() {
            return content.handle_key_events(app, key);
        }
        Vec::new()
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        if let Some((modal, _)) = self.modal_view.as_mut() {
            return modal.handle_mouse_events(app, mouse);
        }
        if let Some(content) = self.content_view.as_mut() {
            return content.handle_mouse_events(app, mouse);
        }
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        // Fill the background so partial redraws never show terminal bleed.
        let bg_fill = Paragraph::new("").style(Style::default().bg(app.ctx.theme.roles().background));
        frame.render_widget(bg_fill, area);

        let [content_area, hints_area] = Layout::vertical([
            Constraint::Min(1),    // Active screen
            Constraint::Length(1), // Hints bar
        ])
        .areas(area);

        if let Some(content) = self.content_view.as_mut() {
            content.render(frame, content_area, app);
        }

        let hint_spans = self.get_hint_spans(app);
        let hints_widget = Paragraph::new(Line::from(hint_spans)).style(app.ctx.theme.text_muted_style());
        frame.render_widget(hints_widget, hints_area);

        if let Some((modal, position)) = self.modal_view.as_mut() {
            frame.render_widget(
                Block::default().style(app.ctx.theme.modal_background_style()).dim(),
                frame.area(),
            );
            let modal_area = position.0(area);
            frame.render_widget(Clear, modal_area);

            let modal_hints = modal.get_hint_spans(app);
            if modal_hints.is_empty() {
                modal.render(frame, modal_area, app);
            } else {
                let [body, hints] = Layout::vertical([
                    Constraint::Min(1),    // Modal body
                    Constraint::Length(1), // Modal hints bar
                ])
                .areas(modal_area);
                let hints_widget = Paragraph::new(Line::from(modal_hints))
                    .style(app.ctx.theme.text_muted_style())
                    .bg(app.ctx.theme.roles().background);
                frame.render_widget(hints_widget, hints);
                modal.render(frame, body, app);
            }
        }
    }

    fn after_render(&mut self, app: &mut App) -> Vec<Effect> {
        let mut effects = Vec::new();
        if let Some(content) = self.content_view.as_mut() {
            effects.extend(content.after_render(app));
        }
        if let Some((modal, _)) = self.modal_view.as_mut() {
            effects.extend(modal.after_render(app));
        }
        effects
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        let mut hint_spans: Vec<Span> = vec![Span::styled("Hints: ", app.ctx.theme.text_muted_style())];
        if let Some(content) = self.content_view.as_ref() {
            hint_spans.extend(content.get_hint_spans(app));
        }
        hint_spans
    }
}
