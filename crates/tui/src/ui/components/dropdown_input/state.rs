//! State machine for the hybrid selector/free-text input.
//!
//! The control is a closed-option dropdown for most values. Selecting a
//! value that is not in the configured exception list opens a parallel text
//! box for free-form refinement (e.g. a custom number of retention days).
//! The mode is a pure function of the selected value:
//!
//!   `DropdownWithText` iff the value is non-empty and not an exception.
//!
//! It is recomputed on every selection and never derived from the text
//! buffer. Entry into text mode is detected by comparing the mode committed
//! by the previous render against the current one, so focus follows the mode
//! no matter what triggered the change (a key press or a host reset).

use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;

use crate::ui::components::common::TextInputState;

/// A selectable option: display label plus the value it stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

impl SelectOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Which sub-fields are visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    /// The dropdown occupies the full control width.
    #[default]
    DropdownOnly,
    /// A text box occupies most of the width; the dropdown is narrowed.
    DropdownWithText,
}

/// Observable mode changes, keyed by the (old, new) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeTransition {
    /// The text box just became visible; input focus should move into it.
    EnteredTextMode,
    /// The text box was hidden; its buffer has been reset.
    LeftTextMode,
}

/// Transition table over display modes. Same-mode pairs produce no effect.
pub fn mode_transition(old: DisplayMode, new: DisplayMode) -> Option<ModeTransition> {
    match (old, new) {
        (DisplayMode::DropdownOnly, DisplayMode::DropdownWithText) => Some(ModeTransition::EnteredTextMode),
        (DisplayMode::DropdownWithText, DisplayMode::DropdownOnly) => Some(ModeTransition::LeftTextMode),
        _ => None,
    }
}

/// Horizontal split of the control for the current mode.
///
/// In `DropdownWithText` mode the text box takes `width - width/4` cells and
/// the dropdown the remaining `width/4`; the dropdown's popup menu is shifted
/// left by the text box width so it aligns under the combined control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropdownLayout {
    pub total_width: u16,
    pub text_width: u16,
    pub select_width: u16,
    /// Offset of the popup menu relative to the dropdown sub-field.
    pub menu_offset_x: i32,
}

/// Result of a selection event, reported to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionOutcome {
    /// Whether the display mode changed.
    pub mode_changed: bool,
    /// The transition that occurred, if any.
    pub transition: Option<ModeTransition>,
}

/// Immutable configuration supplied by the host screen.
#[derive(Debug, Clone, Default)]
pub struct DropdownInputConfig {
    pub options: Vec<SelectOption>,
    /// Values that must NOT open text mode. Missing means empty: every
    /// non-empty selection opens the text box.
    pub exception_values: Vec<String>,
    pub placeholder: String,
    pub legend: Option<String>,
    pub width: u16,
}

impl DropdownInputConfig {
    pub fn new(options: Vec<SelectOption>) -> Self {
        Self {
            options,
            width: 40,
            ..Self::default()
        }
    }

    pub fn exception_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exception_values = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn legend(mut self, legend: impl Into<String>) -> Self {
        self.legend = Some(legend.into());
        self
    }

    pub fn width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }
}

/// Mutable state owned by one control instance.
#[derive(Debug)]
pub struct DropdownInputState {
    config: DropdownInputConfig,
    selected_value: String,
    input: TextInputState,
    display_mode: DisplayMode,
    focused: bool,
    /// Mode committed by the previous render; drives the focus-follows-mode
    /// effect.
    last_rendered_mode: Option<DisplayMode>,
    menu_open: bool,
    menu_highlight: usize,
    /// Externally supplied error string, rendered verbatim under the field.
    error: Option<String>,

    container_focus: FocusFlag,
    pub f_select: FocusFlag,
    pub f_text: FocusFlag,
}

impl DropdownInputState {
    pub fn new(name: &str, config: DropdownInputConfig) -> Self {
        Self {
            config,
            selected_value: String::new(),
            input: TextInputState::new(),
            display_mode: DisplayMode::DropdownOnly,
            focused: false,
            last_rendered_mode: None,
            menu_open: false,
            menu_highlight: 0,
            error: None,
            container_focus: FocusFlag::new().with_name(name),
            f_select: FocusFlag::new().with_name(&format!("{name}.select")),
            f_text: FocusFlag::new().with_name(&format!("{name}.text")),
        }
    }

    // ----- Accessors -----

    pub fn config(&self) -> &DropdownInputConfig {
        &self.config
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.config.options
    }

    pub fn selected_value(&self) -> &str {
        &self.selected_value
    }

    /// Label of the selected option; falls back to the raw value for
    /// selections that are not in the option set.
    pub fn selected_label(&self) -> &str {
        self.config
            .options
            .iter()
            .find(|option| option.value == self.selected_value)
            .map(|option| option.label.as_str())
            .unwrap_or(&self.selected_value)
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn text(&self) -> &str {
        self.input.input()
    }

    pub fn input(&self) -> &TextInputState {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut TextInputState {
        &mut self.input
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    // ----- Operations -----

    /// Handles a selection event: stores the value, re-evaluates the mode
    /// invariant, and clears the text buffer when the text box is hidden.
    ///
    /// Synchronous and idempotent: selecting the already-selected value
    /// changes neither mode nor buffer.
    pub fn on_option_selected(&mut self, value: &str) -> SelectionOutcome {
        let old = self.display_mode;
        self.selected_value = value.to_string();
        let new = self.mode_for(value);
        self.display_mode = new;

        let transition = mode_transition(old, new);
        if transition == Some(ModeTransition::LeftTextMode) {
            self.input.clear();
        }
        SelectionOutcome {
            mode_changed: old != new,
            transition,
        }
    }

    /// Stores the text buffer. Meaningful while the text box is visible; in
    /// `DropdownOnly` mode the text is kept but not rendered, and it never
    /// influences the display mode.
    pub fn on_text_changed(&mut self, text: &str) {
        self.input.set_input(text);
    }

    /// Updates the focus boundary of the composite widget.
    pub fn on_focus_boundary(&mut self, focused: bool) {
        self.focused = focused;
        if !focused {
            self.menu_open = false;
        }
    }

    /// Re-derives the focus boundary from the sub-field focus flags.
    pub fn sync_focus_boundary(&mut self) {
        self.on_focus_boundary(self.f_select.get() || self.f_text.get());
    }

    /// The legend (floating label) is visible iff the control is focused or
    /// holds a value. Derived on demand, never cached.
    pub fn legend_visible(&self) -> bool {
        self.focused || !self.selected_value.is_empty()
    }

    /// Text shown in the legend position; the placeholder doubles as the
    /// legend when none was configured.
    pub fn legend_text(&self) -> &str {
        self.config.legend.as_deref().unwrap_or(&self.config.placeholder)
    }

    /// Split layout at the configured width.
    pub fn layout(&self) -> DropdownLayout {
        self.layout_at(self.config.width)
    }

    /// Split layout at an explicit width (rendering clamps to the area the
    /// screen hands the control).
    pub fn layout_at(&self, width: u16) -> DropdownLayout {
        match self.display_mode {
            DisplayMode::DropdownOnly => DropdownLayout {
                total_width: width,
                text_width: 0,
                select_width: width,
                menu_offset_x: 0,
            },
            DisplayMode::DropdownWithText => {
                let select_width = width / 4;
                let text_width = width - select_width;
                DropdownLayout {
                    total_width: width,
                    text_width,
                    select_width,
                    menu_offset_x: -i32::from(text_width),
                }
            }
        }
    }

    /// Records the mode committed by the render that just finished and
    /// reports the transition relative to the previously committed mode.
    ///
    /// Called by the owning component from `after_render`; an
    /// `EnteredTextMode` result is its cue to move focus into the text box.
    pub fn mark_rendered(&mut self) -> Option<ModeTransition> {
        let current = self.display_mode;
        let previous = self.last_rendered_mode.replace(current).unwrap_or_default();
        mode_transition(previous, current)
    }

    // ----- Popup menu -----

    pub fn menu_is_open(&self) -> bool {
        self.menu_open
    }

    pub fn open_menu(&mut self) {
        self.menu_open = true;
        self.menu_highlight = self
            .config
            .options
            .iter()
            .position(|option| option.value == self.selected_value)
            .unwrap_or(0);
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }

    pub fn menu_highlight(&self) -> usize {
        self.menu_highlight
    }

    pub fn highlight_next(&mut self) {
        if !self.config.options.is_empty() {
            self.menu_highlight = (self.menu_highlight + 1).min(self.config.options.len() - 1);
        }
    }

    pub fn highlight_previous(&mut self) {
        self.menu_highlight = self.menu_highlight.saturating_sub(1);
    }

    pub fn set_menu_highlight(&mut self, index: usize) {
        if index < self.config.options.len() {
            self.menu_highlight = index;
        }
    }

    pub fn highlighted_option(&self) -> Option<&SelectOption> {
        self.config.options.get(self.menu_highlight)
    }

    /// The mode invariant: text mode iff the value is non-empty and not an
    /// exception. Exact string equality on the exception list.
    fn mode_for(&self, value: &str) -> DisplayMode {
        if value.is_empty() || self.config.exception_values.iter().any(|exception| exception == value) {
            DisplayMode::DropdownOnly
        } else {
            DisplayMode::DropdownWithText
        }
    }
}

impl HasFocus for DropdownInputState {
    fn build(&self, builder: &mut FocusBuilder) {
        let start = builder.start(self);
        // The text box is only traversable while visible.
        if self.display_mode == DisplayMode::DropdownWithText {
            builder.leaf_widget(&self.f_text);
        }
        builder.leaf_widget(&self.f_select);
        builder.end(start);
    }

    fn focus(&self) -> FocusFlag {
        self.container_focus.clone()
    }

    fn area(&self) -> Rect {
        Rect::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn days_config() -> DropdownInputConfig {
        DropdownInputConfig::new(vec![
            SelectOption::new("dropdown", ""),
            SelectOption::new("days", "days"),
        ])
        .exception_values([""])
        .placeholder("Channel messages")
        .width(200)
    }

    fn days_state() -> DropdownInputState {
        DropdownInputState::new("test.retention", days_config())
    }

    #[test]
    fn initial_state_is_dropdown_only_and_unfocused() {
        let state = days_state();
        assert_eq!(state.display_mode(), DisplayMode::DropdownOnly);
        assert!(!state.is_focused());
        assert_eq!(state.text(), "");
        assert!(!state.legend_visible());
    }

    #[test]
    fn transition_table_covers_all_pairs() {
        use DisplayMode::*;
        assert_eq!(mode_transition(DropdownOnly, DropdownWithText), Some(ModeTransition::EnteredTextMode));
        assert_eq!(mode_transition(DropdownWithText, DropdownOnly), Some(ModeTransition::LeftTextMode));
        assert_eq!(mode_transition(DropdownOnly, DropdownOnly), None);
        assert_eq!(mode_transition(DropdownWithText, DropdownWithText), None);
    }

    #[test]
    fn selecting_days_opens_text_mode_with_split_layout() {
        // Scenario A from the control's contract.
        let mut state = days_state();
        assert_eq!(state.mark_rendered(), None);

        let outcome = state.on_option_selected("days");
        assert!(outcome.mode_changed);
        assert_eq!(outcome.transition, Some(ModeTransition::EnteredTextMode));
        assert_eq!(state.display_mode(), DisplayMode::DropdownWithText);

        let layout = state.layout();
        assert_eq!(layout.text_width, 150);
        assert_eq!(layout.select_width, 50);
        assert_eq!(layout.menu_offset_x, -150);

        // The render that commits the new mode reports the entry transition.
        assert_eq!(state.mark_rendered(), Some(ModeTransition::EnteredTextMode));
        // The next render reports nothing.
        assert_eq!(state.mark_rendered(), None);
    }

    #[test]
    fn clearing_resets_text_and_restores_full_width() {
        // Scenario B: exception selection leaves text mode and wipes the buffer.
        let mut state = days_state();
        state.on_option_selected("days");
        state.on_text_changed("60");
        assert_eq!(state.text(), "60");

        let outcome = state.on_option_selected("");
        assert!(outcome.mode_changed);
        assert_eq!(outcome.transition, Some(ModeTransition::LeftTextMode));
        assert_eq!(state.display_mode(), DisplayMode::DropdownOnly);
        assert_eq!(state.text(), "");
        assert_eq!(state.layout().select_width, 200);
        assert_eq!(state.layout().menu_offset_x, 0);
    }

    #[test]
    fn legend_follows_focus_when_value_is_empty() {
        // Scenario C: focus alone shows the legend, blur hides it again.
        let mut state = days_state();
        assert!(!state.legend_visible());
        state.on_focus_boundary(true);
        assert!(state.legend_visible());
        state.on_focus_boundary(false);
        assert!(!state.legend_visible());
    }

    #[test]
    fn without_exceptions_every_selection_opens_text_mode() {
        // Scenario D: no exception list means any non-empty value opens text.
        let config = DropdownInputConfig::new(vec![
            SelectOption::new("One", "one"),
            SelectOption::new("Two", "two"),
        ])
        .width(200);
        let mut state = DropdownInputState::new("test.noexc", config);

        for value in ["one", "two"] {
            state.on_option_selected(value);
            assert_eq!(state.display_mode(), DisplayMode::DropdownWithText, "value {value}");
        }
    }

    #[test]
    fn mode_invariant_holds_for_all_reachable_states() {
        let mut state = days_state();
        for value in ["days", "", "days", "days", ""] {
            state.on_option_selected(value);
            let expected_text_mode =
                !state.selected_value().is_empty() && !["".to_string()].contains(&state.selected_value().to_string());
            assert_eq!(
                state.display_mode() == DisplayMode::DropdownWithText,
                expected_text_mode,
                "after selecting {value:?}"
            );
        }
    }

    #[test]
    fn reselecting_the_same_value_is_idempotent() {
        let mut state = days_state();
        state.on_option_selected("days");
        state.on_text_changed("60");
        state.mark_rendered();

        let outcome = state.on_option_selected("days");
        assert!(!outcome.mode_changed);
        assert_eq!(outcome.transition, None);
        assert_eq!(state.text(), "60");
        assert_eq!(state.display_mode(), DisplayMode::DropdownWithText);
        // No render transition either, so no refocus.
        assert_eq!(state.mark_rendered(), None);
    }

    #[test]
    fn legend_visibility_is_independent_of_display_mode() {
        let mut state = days_state();
        // Value present, unfocused, text mode: visible.
        state.on_option_selected("days");
        assert!(state.legend_visible());
        // Stable across the programmatic refocus that follows mode entry.
        state.on_focus_boundary(true);
        assert!(state.legend_visible());
        state.on_focus_boundary(false);
        assert!(state.legend_visible());
        // Dropdown-only with a (exception) selection... empty clears it.
        state.on_option_selected("");
        assert!(!state.legend_visible());
    }

    #[test]
    fn text_is_stored_but_inert_while_dropdown_only() {
        let mut state = days_state();
        state.on_text_changed("90");
        assert_eq!(state.display_mode(), DisplayMode::DropdownOnly);
        assert_eq!(state.text(), "90");
        // Becomes observable once a selection opens text mode.
        state.on_option_selected("days");
        assert_eq!(state.text(), "90");
    }

    #[test]
    fn host_reset_also_triggers_the_render_transition() {
        // Mode can become text-capable without a user selection; the render
        // memo still reports the entry so focus follows uniformly.
        let mut state = days_state();
        state.mark_rendered();
        state.on_option_selected("days");
        assert_eq!(state.mark_rendered(), Some(ModeTransition::EnteredTextMode));
    }

    #[test]
    fn layout_widths_always_sum_to_total() {
        let mut state = days_state();
        state.on_option_selected("days");
        for width in [7u16, 40, 99, 200] {
            let layout = state.layout_at(width);
            assert_eq!(layout.text_width + layout.select_width, width);
            assert_eq!(layout.menu_offset_x, -i32::from(layout.text_width));
        }
    }

    #[test]
    fn legend_text_falls_back_to_placeholder() {
        let state = days_state();
        assert_eq!(state.legend_text(), "Channel messages");

        let with_legend =
            DropdownInputState::new("test.legend", days_config().legend("Message retention"));
        assert_eq!(with_legend.legend_text(), "Message retention");
    }

    #[test]
    fn menu_opens_on_current_selection() {
        let mut state = days_state();
        state.on_option_selected("days");
        state.open_menu();
        assert_eq!(state.menu_highlight(), 1);
        state.highlight_previous();
        assert_eq!(state.highlighted_option().map(|o| o.value.as_str()), Some(""));
        state.highlight_next();
        state.highlight_next();
        assert_eq!(state.menu_highlight(), 1);
    }
}
