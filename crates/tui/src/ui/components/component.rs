//! Component trait for the admin console UI.
//!
//! Components are self-contained UI elements that handle their own events
//! and rendering while integrating with the runtime through a consistent
//! interface. They own only local UI behavior; cross-cutting changes are
//! reported back as `Effect`s for the runtime to execute.

use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;

use crate::app::App;
use tenure_types::{Effect, Msg};

/// A UI component with its own state and behavior.
///
/// Lifecycle per event-loop iteration: input is routed to the active
/// component's `handle_key_events`/`handle_mouse_events`, application
/// messages flow through `handle_message`, the frame is drawn via `render`,
/// and `after_render` runs once the new frame has been committed. That is
/// the place for reactions that must observe the rendered state, such as
/// moving focus into a widget that only just became visible.
pub(crate) trait Component {
    /// Handle an application-level message the component cares about.
    fn handle_message(&mut self, _app: &mut App, _msg: &Msg) -> Vec<Effect> {
        Vec::new()
    }

    /// Handle key events while this component is active.
    fn handle_key_events(&mut self, _app: &mut App, _key: KeyEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Handle mouse events while this component is active.
    fn handle_mouse_events(&mut self, _app: &mut App, _mouse: MouseEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Draw the component into the given area.
    ///
    /// Implementations should be side-effect free except for frame drawing,
    /// cursor placement, and recording hit-test areas for mouse handling.
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App);

    /// Runs after the frame containing this component has been committed.
    fn after_render(&mut self, _app: &mut App) -> Vec<Effect> {
        Vec::new()
    }

    /// Key hints for the bottom hint bar.
    fn get_hint_spans(&self, _app: &App) -> Vec<Span<'_>> {
        Vec::new()
    }
}
