use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;

use tenure_types::Severity;

/// Options used to (re)configure the confirmation modal before showing it.
#[derive(Default, Clone)]
pub struct ConfirmationModalOpts {
    pub title: Option<String>,
    pub message_lines: Vec<String>,
    pub buttons: Vec<String>,
    pub severity: Severity,
}

/// State backing the confirmation modal. Buttons are focus leaves so
/// Tab/Shift+Tab traverse them through the normal focus cycle.
#[derive(Default, Clone)]
pub struct ConfirmationModalState {
    title: Option<String>,
    message_lines: Vec<String>,
    buttons: Vec<(String, FocusFlag)>,
    severity: Severity,

    container_focus: FocusFlag,
}

impl ConfirmationModalState {
    pub fn update_opts(&mut self, opts: ConfirmationModalOpts) {
        self.title = opts.title;
        self.message_lines = opts.message_lines;
        self.severity = opts.severity;
        self.buttons = opts
            .buttons
            .into_iter()
            .enumerate()
            .map(|(index, label)| (label, FocusFlag::new().with_name(&format!("confirm.button.{index}"))))
            .collect();
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn message_lines(&self) -> &[String] {
        &self.message_lines
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn buttons(&self) -> &[(String, FocusFlag)] {
        &self.buttons
    }

    pub fn is_button_focused(&self, index: usize) -> bool {
        self.buttons.get(index).is_some_and(|(_, flag)| flag.get())
    }

    /// Index of the currently focused button, if any.
    pub fn focused_button(&self) -> Option<usize> {
        self.buttons.iter().position(|(_, flag)| flag.get())
    }
}

impl HasFocus for ConfirmationModalState {
    fn build(&self, builder: &mut FocusBuilder) {
        let start = builder.start(self);
        for (_, flag) in &self.buttons {
            builder.leaf_widget(flag);
        }
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

    #[test]
    fn update_opts_rebuilds_buttons() {
        let mut state = ConfirmationModalState::default();
        state.update_opts(ConfirmationModalOpts {
            title: Some("Confirm data retention policy".into()),
            message_lines: vec!["Are you sure?".into()],
            buttons: vec!["Confirm Settings".into(), "Cancel".into()],
            severity: Severity::Warning,
        });

        assert_eq!(state.buttons().len(), 2);
        assert_eq!(state.buttons()[0].0, "Confirm Settings");
        assert_eq!(state.focused_button(), None);
        assert_eq!(state.severity(), Severity::Warning);
    }
}
