//! Form state for the global data retention policy screen.

use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::{Constraint, Rect};

use tenure_types::{CustomPolicy, RetentionSettings, Severity};

use crate::ui::components::common::{
    ActionMenuState, Column, ConfirmationModalOpts, DataTableState, Row, TextInputState,
};
use crate::ui::components::dropdown_input::{DisplayMode, DropdownInputConfig, DropdownInputState, SelectOption};

/// Dropdown value meaning "never delete".
pub const VALUE_FOREVER: &str = "forever";
/// Dropdown value meaning "delete after N days"; opens the day text box.
pub const VALUE_DAYS: &str = "days";

#[derive(Debug)]
pub struct RetentionViewState {
    /// Message retention policy control.
    pub message_retention: DropdownInputState,
    /// File upload retention policy control.
    pub file_retention: DropdownInputState,
    /// "HH:MM" start time for the nightly deletion job.
    pub start_time: TextInputState,
    /// Custom policies table.
    pub policies: DataTableState,
    /// Per-row Edit/Delete menu; open while `Some`.
    pub action_menu: Option<ActionMenuState>,
    /// Last persistence failure, shown under the save button.
    pub server_error: Option<String>,
    /// Last successful save notice.
    pub status: Option<String>,

    container_focus: FocusFlag,
    pub f_start_time: FocusFlag,
    pub f_policies: FocusFlag,
    pub f_add_policy: FocusFlag,
    pub f_save: FocusFlag,
    pub f_run_job: FocusFlag,
}

fn retention_control(name: &str, legend: &str, indefinite_label: &str, window_label: &str) -> DropdownInputState {
    DropdownInputState::new(
        name,
        DropdownInputConfig::new(vec![
            SelectOption::new(indefinite_label, VALUE_FOREVER),
            SelectOption::new(window_label, VALUE_DAYS),
        ])
        .exception_values([VALUE_FOREVER])
        .placeholder("Days")
        .legend(legend)
        .width(64),
    )
}

impl Default for RetentionViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl RetentionViewState {
    pub fn new() -> Self {
        Self {
            message_retention: retention_control(
                "retention.messages",
                "Message retention",
                "Keep all messages indefinitely",
                "Keep messages for a set amount of time",
            ),
            file_retention: retention_control(
                "retention.files",
                "File retention",
                "Keep all files indefinitely",
                "Keep files for a set amount of time",
            ),
            start_time: TextInputState::new(),
            policies: DataTableState::new(vec![
                Column::new("Description", "description", Constraint::Min(20)),
                Column::new("Channel messages", "channel_messages", Constraint::Length(18)),
                Column::new("Applied to", "applied_to", Constraint::Length(24)),
            ]),
            action_menu: None,
            server_error: None,
            status: None,
            container_focus: FocusFlag::new().with_name("retention"),
            f_start_time: FocusFlag::new().with_name("retention.start_time"),
            f_policies: FocusFlag::new().with_name("retention.policies"),
            f_add_policy: FocusFlag::new().with_name("retention.add_policy"),
            f_save: FocusFlag::new().with_name("retention.save"),
            f_run_job: FocusFlag::new().with_name("retention.run_job"),
        }
    }

    /// Seeds the form from persisted settings.
    pub fn load(&mut self, settings: &RetentionSettings) {
        if settings.enable_message_deletion {
            self.message_retention.on_option_selected(VALUE_DAYS);
            self.message_retention
                .on_text_changed(&settings.message_retention_days.to_string());
        } else {
            self.message_retention.on_option_selected(VALUE_FOREVER);
        }
        if settings.enable_file_deletion {
            self.file_retention.on_option_selected(VALUE_DAYS);
            self.file_retention
                .on_text_changed(&settings.file_retention_days.to_string());
        } else {
            self.file_retention.on_option_selected(VALUE_FOREVER);
        }
        self.start_time.set_input(settings.deletion_job_start_time.clone());
        self.refresh_policy_rows(&settings.custom_policies);
        self.server_error = None;
        self.status = None;
    }

    /// Writes the form back into `settings`. An unparsable day count keeps
    /// the previously stored value.
    pub fn apply_to(&self, settings: &mut RetentionSettings) {
        settings.enable_message_deletion = self.message_retention.selected_value() == VALUE_DAYS;
        if settings.enable_message_deletion {
            if let Some(days) = parse_days(self.message_retention.text()) {
                settings.message_retention_days = days;
            }
        }
        settings.enable_file_deletion = self.file_retention.selected_value() == VALUE_DAYS;
        if settings.enable_file_deletion {
            if let Some(days) = parse_days(self.file_retention.text()) {
                settings.file_retention_days = days;
            }
        }
        if !self.start_time.is_empty() {
            settings.deletion_job_start_time = self.start_time.input().trim().to_string();
        }
    }

    pub fn refresh_policy_rows(&mut self, policies: &[CustomPolicy]) {
        let rows = policies
            .iter()
            .map(|policy| {
                Row::default()
                    .cell("description", policy.name.clone())
                    .cell("channel_messages", policy.channel_message_retention.describe())
                    .cell("applied_to", policy.applied_to())
            })
            .collect();
        self.policies.set_rows(rows);
    }

    /// Confirmation prompt describing what the save will do, built from the
    /// form as it stands.
    pub fn confirmation_opts(&self) -> ConfirmationModalOpts {
        let mut lines = Vec::with_capacity(3);
        lines.push(describe_window(
            "messages",
            self.message_retention.display_mode() == DisplayMode::DropdownWithText,
            self.message_retention.text(),
        ));
        lines.push(describe_window(
            "file uploads",
            self.file_retention.display_mode() == DisplayMode::DropdownWithText,
            self.file_retention.text(),
        ));
        let deleting = self.message_retention.display_mode() == DisplayMode::DropdownWithText
            || self.file_retention.display_mode() == DisplayMode::DropdownWithText;
        if deleting {
            lines.push("Deleted data is not recoverable.".to_string());
        }
        ConfirmationModalOpts {
            title: Some("Confirm data retention policy".to_string()),
            message_lines: lines,
            buttons: vec!["Confirm Settings".to_string(), "Cancel".to_string()],
            severity: if deleting { Severity::Danger } else { Severity::Info },
        }
    }
}

/// Parses a day-count field: positive integer, at least one day.
pub fn parse_days(text: &str) -> Option<u32> {
    match text.trim().parse::<u32>() {
        Ok(days) if days >= 1 => Some(days),
        _ => None,
    }
}

fn describe_window(noun: &str, limited: bool, days_text: &str) -> String {
    if !limited {
        return format!("All {noun} will be retained indefinitely.");
    }
    match parse_days(days_text) {
        Some(1) => format!("All {noun} will be permanently deleted after 1 day."),
        Some(days) => format!("All {noun} will be permanently deleted after {days} days."),
        None => format!("All {noun} will be permanently deleted after the configured number of days."),
    }
}

impl HasFocus for RetentionViewState {
    fn build(&self, builder: &mut FocusBuilder) {
        let start = builder.start(self);
        self.message_retention.build(builder);
        self.file_retention.build(builder);
        builder.leaf_widget(&self.f_start_time);
        builder.leaf_widget(&self.f_save);
        builder.leaf_widget(&self.f_policies);
        builder.leaf_widget(&self.f_add_policy);
        builder.leaf_widget(&self.f_run_job);
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
    use tenure_types::RetentionDuration;

    fn settings_with_message_window(days: u32) -> RetentionSettings {
        RetentionSettings {
            enable_message_deletion: true,
            message_retention_days: days,
            ..RetentionSettings::default()
        }
    }

    #[test]
    fn load_selects_days_and_seeds_the_text_box() {
        let mut state = RetentionViewState::new();
        state.load(&settings_with_message_window(60));
        assert_eq!(state.message_retention.selected_value(), VALUE_DAYS);
        assert_eq!(state.message_retention.display_mode(), DisplayMode::DropdownWithText);
        assert_eq!(state.message_retention.text(), "60");
        assert_eq!(state.file_retention.selected_value(), VALUE_FOREVER);
        assert_eq!(state.file_retention.display_mode(), DisplayMode::DropdownOnly);
    }

    #[test]
    fn apply_round_trips_the_form() {
        let mut state = RetentionViewState::new();
        state.load(&settings_with_message_window(60));
        state.message_retention.on_text_changed("90");

        let mut settings = settings_with_message_window(60);
        state.apply_to(&mut settings);
        assert!(settings.enable_message_deletion);
        assert_eq!(settings.message_retention_days, 90);
        assert!(!settings.enable_file_deletion);
    }

    #[test]
    fn unparsable_days_keep_the_stored_value() {
        let mut state = RetentionViewState::new();
        state.load(&settings_with_message_window(60));
        state.message_retention.on_text_changed("ninety");

        let mut settings = settings_with_message_window(60);
        state.apply_to(&mut settings);
        assert!(settings.enable_message_deletion);
        assert_eq!(settings.message_retention_days, 60);
    }

    #[test]
    fn switching_to_forever_disables_deletion() {
        let mut state = RetentionViewState::new();
        state.load(&settings_with_message_window(60));
        state.message_retention.on_option_selected(VALUE_FOREVER);

        let mut settings = settings_with_message_window(60);
        state.apply_to(&mut settings);
        assert!(!settings.enable_message_deletion);
        // Stored window is preserved for the next time deletion is enabled.
        assert_eq!(settings.message_retention_days, 60);
    }

    #[test]
    fn parse_days_rejects_zero_and_garbage() {
        assert_eq!(parse_days("60"), Some(60));
        assert_eq!(parse_days(" 1 "), Some(1));
        assert_eq!(parse_days("0"), None);
        assert_eq!(parse_days(""), None);
        assert_eq!(parse_days("-3"), None);
        assert_eq!(parse_days("1e3"), None);
    }

    #[test]
    fn confirmation_message_reflects_both_windows() {
        let mut state = RetentionViewState::new();
        state.load(&settings_with_message_window(60));
        let opts = state.confirmation_opts();
        assert_eq!(opts.message_lines[0], "All messages will be permanently deleted after 60 days.");
        assert_eq!(opts.message_lines[1], "All file uploads will be retained indefinitely.");
        assert_eq!(opts.severity, Severity::Danger);
        assert_eq!(opts.buttons, vec!["Confirm Settings".to_string(), "Cancel".to_string()]);
    }

    #[test]
    fn confirmation_is_informational_when_nothing_is_deleted() {
        let mut state = RetentionViewState::new();
        state.load(&RetentionSettings::default());
        let opts = state.confirmation_opts();
        assert_eq!(opts.message_lines.len(), 2);
        assert_eq!(opts.severity, Severity::Info);
    }

    #[test]
    fn policy_rows_mirror_the_policy_list() {
        let mut state = RetentionViewState::new();
        state.refresh_policy_rows(&[CustomPolicy {
            id: "p1".into(),
            name: "60 day policy".into(),
            channel_message_retention: RetentionDuration::Days(60),
            team_ids: vec!["t1".into()],
            channel_ids: Vec::new(),
        }]);
        assert_eq!(state.policies.rows.len(), 1);
        let row = &state.policies.rows[0];
        assert_eq!(row.cells.get("channel_messages").map(String::as_str), Some("60 days"));
        assert_eq!(row.cells.get("applied_to").map(String::as_str), Some("1 team"));
    }
}
