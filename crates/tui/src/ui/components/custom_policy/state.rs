//! Form state for creating and editing a custom retention policy.

use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::{Constraint, Rect};

use tenure_types::{ChannelSummary, CustomPolicy, RetentionDuration, TeamSummary};

use crate::ui::components::common::{Column, DataTableState, Row, TextInputState};
use crate::ui::components::dropdown_input::{DisplayMode, DropdownInputConfig, DropdownInputState, SelectOption};
use crate::ui::components::retention::parse_days;

/// Dropdown value meaning "delete after N days" for the policy control. The
/// forever option carries the empty value, so the empty value is the one
/// exception that keeps the text box closed.
pub const POLICY_VALUE_DAYS: &str = "days";

#[derive(Debug)]
pub struct CustomPolicyState {
    /// Id of the policy being edited; `None` while creating a new one.
    editing_id: Option<String>,
    pub name: TextInputState,
    /// Channel message retention control.
    pub retention: DropdownInputState,
    /// Day count carried by the loaded policy, used to reseed the text box
    /// when the Days option is re-selected.
    pub stored_days: Option<u32>,
    pub team_ids: Vec<String>,
    pub channel_ids: Vec<String>,
    pub teams_table: DataTableState,
    pub channels_table: DataTableState,
    /// Validation failure shown under the form.
    pub error: Option<String>,

    container_focus: FocusFlag,
    pub f_name: FocusFlag,
    pub f_teams: FocusFlag,
    pub f_add_teams: FocusFlag,
    pub f_channels: FocusFlag,
    pub f_add_channels: FocusFlag,
    pub f_save: FocusFlag,
}

fn retention_control() -> DropdownInputState {
    DropdownInputState::new(
        "policy.retention",
        DropdownInputConfig::new(vec![
            SelectOption::new("Keep forever", ""),
            SelectOption::new("Days", POLICY_VALUE_DAYS),
        ])
        .exception_values([""])
        .placeholder("Days")
        .legend("Channel message retention")
        .width(48),
    )
}

fn name_table(header: &str) -> DataTableState {
    DataTableState::new(vec![Column::new(header, "name", Constraint::Min(10))])
}

impl Default for CustomPolicyState {
    fn default() -> Self {
        Self::new()
    }
}

impl CustomPolicyState {
    pub fn new() -> Self {
        Self {
            editing_id: None,
            name: TextInputState::new(),
            retention: retention_control(),
            stored_days: None,
            team_ids: Vec::new(),
            channel_ids: Vec::new(),
            teams_table: name_table("Team"),
            channels_table: name_table("Channel"),
            error: None,
            container_focus: FocusFlag::new().with_name("policy"),
            f_name: FocusFlag::new().with_name("policy.name"),
            f_teams: FocusFlag::new().with_name("policy.teams"),
            f_add_teams: FocusFlag::new().with_name("policy.add_teams"),
            f_channels: FocusFlag::new().with_name("policy.channels"),
            f_add_channels: FocusFlag::new().with_name("policy.add_channels"),
            f_save: FocusFlag::new().with_name("policy.save"),
        }
    }

    /// Resets the form for a brand new policy.
    pub fn load_new(&mut self, teams: &[TeamSummary], channels: &[ChannelSummary]) {
        self.editing_id = None;
        self.name.clear();
        self.retention = retention_control();
        self.stored_days = None;
        self.team_ids.clear();
        self.channel_ids.clear();
        self.error = None;
        self.refresh_assignment_rows(teams, channels);
    }

    /// Seeds the form from an existing policy.
    pub fn load(&mut self, policy: &CustomPolicy, teams: &[TeamSummary], channels: &[ChannelSummary]) {
        self.editing_id = Some(policy.id.clone());
        self.name.set_input(policy.name.clone());
        self.retention = retention_control();
        match policy.channel_message_retention {
            RetentionDuration::Forever => {
                self.stored_days = None;
                self.retention.on_option_selected("");
            }
            RetentionDuration::Days(days) => {
                self.stored_days = Some(days);
                self.retention.on_option_selected(POLICY_VALUE_DAYS);
                self.retention.on_text_changed(&days.to_string());
            }
        }
        self.team_ids = policy.team_ids.clone();
        self.channel_ids = policy.channel_ids.clone();
        self.error = None;
        self.refresh_assignment_rows(teams, channels);
    }

    pub fn editing_id(&self) -> Option<&str> {
        self.editing_id.as_deref()
    }

    pub fn is_new(&self) -> bool {
        self.editing_id.is_none()
    }

    /// Rebuilds the assigned team/channel rows from the directories.
    pub fn refresh_assignment_rows(&mut self, teams: &[TeamSummary], channels: &[ChannelSummary]) {
        let team_rows = self
            .team_ids
            .iter()
            .map(|id| {
                let name = teams
                    .iter()
                    .find(|team| &team.id == id)
                    .map(|team| team.display_name.clone())
                    .unwrap_or_else(|| id.clone());
                Row::default().cell("name", name)
            })
            .collect();
        self.teams_table.set_rows(team_rows);

        let channel_rows = self
            .channel_ids
            .iter()
            .map(|id| {
                let name = channels
                    .iter()
                    .find(|channel| &channel.id == id)
                    .map(|channel| channel.display_name.clone())
                    .unwrap_or_else(|| id.clone());
                Row::default().cell("name", name)
            })
            .collect();
        self.channels_table.set_rows(channel_rows);
    }

    pub fn remove_selected_team(&mut self) {
        if let Some(index) = self.teams_table.selected() {
            if index < self.team_ids.len() {
                self.team_ids.remove(index);
            }
        }
    }

    pub fn remove_selected_channel(&mut self) {
        if let Some(index) = self.channels_table.selected() {
            if index < self.channel_ids.len() {
                self.channel_ids.remove(index);
            }
        }
    }

    /// Validates the form and produces the policy record to persist.
    pub fn build_policy(&self, id: String) -> Result<CustomPolicy, String> {
        let name = self.name.input().trim().to_string();
        if name.is_empty() {
            return Err("Policy name is required.".to_string());
        }
        let channel_message_retention = if self.retention.display_mode() == DisplayMode::DropdownWithText {
            match parse_days(self.retention.text()) {
                Some(days) => RetentionDuration::Days(days),
                None => return Err("Enter a number of days of at least 1.".to_string()),
            }
        } else {
            RetentionDuration::Forever
        };
        Ok(CustomPolicy {
            id: self.editing_id.clone().unwrap_or(id),
            name,
            channel_message_retention,
            team_ids: self.team_ids.clone(),
            channel_ids: self.channel_ids.clone(),
        })
    }
}

impl HasFocus for CustomPolicyState {
    fn build(&self, builder: &mut FocusBuilder) {
        let start = builder.start(self);
        builder.leaf_widget(&self.f_name);
        self.retention.build(builder);
        builder.leaf_widget(&self.f_teams);
        builder.leaf_widget(&self.f_add_teams);
        builder.leaf_widget(&self.f_channels);
        builder.leaf_widget(&self.f_add_channels);
        builder.leaf_widget(&self.f_save);
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

    fn directory() -> (Vec<TeamSummary>, Vec<ChannelSummary>) {
        (
            vec![TeamSummary {
                id: "t1".into(),
                display_name: "Engineering".into(),
            }],
            vec![ChannelSummary {
                id: "c1".into(),
                display_name: "announcements".into(),
                team_id: "t1".into(),
            }],
        )
    }

    #[test]
    fn new_form_starts_with_the_dropdown_closed() {
        let (teams, channels) = directory();
        let mut state = CustomPolicyState::new();
        state.load_new(&teams, &channels);
        assert!(state.is_new());
        assert_eq!(state.retention.display_mode(), DisplayMode::DropdownOnly);
        assert_eq!(state.retention.selected_value(), "");
        assert!(!state.retention.legend_visible());
    }

    #[test]
    fn loading_a_days_policy_opens_the_text_box() {
        let (teams, channels) = directory();
        let mut state = CustomPolicyState::new();
        state.load(
            &CustomPolicy {
                id: "p1".into(),
                name: "60 day policy".into(),
                channel_message_retention: RetentionDuration::Days(60),
                team_ids: vec!["t1".into()],
                channel_ids: vec!["c1".into()],
            },
            &teams,
            &channels,
        );
        assert_eq!(state.retention.display_mode(), DisplayMode::DropdownWithText);
        assert_eq!(state.retention.text(), "60");
        assert_eq!(state.stored_days, Some(60));
        assert_eq!(state.teams_table.rows[0].cells.get("name").map(String::as_str), Some("Engineering"));
        assert_eq!(
            state.channels_table.rows[0].cells.get("name").map(String::as_str),
            Some("announcements")
        );
    }

    #[test]
    fn build_policy_requires_a_name() {
        let (teams, channels) = directory();
        let mut state = CustomPolicyState::new();
        state.load_new(&teams, &channels);
        assert!(state.build_policy("p9".into()).is_err());

        state.name.set_input("Sales retention");
        let policy = state.build_policy("p9".into()).expect("valid policy");
        assert_eq!(policy.id, "p9");
        assert_eq!(policy.channel_message_retention, RetentionDuration::Forever);
    }

    #[test]
    fn build_policy_rejects_unparsable_days() {
        let (teams, channels) = directory();
        let mut state = CustomPolicyState::new();
        state.load_new(&teams, &channels);
        state.name.set_input("Short-lived");
        state.retention.on_option_selected(POLICY_VALUE_DAYS);
        state.retention.on_text_changed("soon");
        assert!(state.build_policy("p9".into()).is_err());

        state.retention.on_text_changed("14");
        let policy = state.build_policy("p9".into()).expect("valid policy");
        assert_eq!(policy.channel_message_retention, RetentionDuration::Days(14));
    }

    #[test]
    fn editing_keeps_the_original_id() {
        let (teams, channels) = directory();
        let mut state = CustomPolicyState::new();
        state.load(
            &CustomPolicy {
                id: "p1".into(),
                name: "60 day policy".into(),
                channel_message_retention: RetentionDuration::Days(60),
                team_ids: Vec::new(),
                channel_ids: Vec::new(),
            },
            &teams,
            &channels,
        );
        let policy = state.build_policy("ignored".into()).expect("valid policy");
        assert_eq!(policy.id, "p1");
    }

    #[test]
    fn removing_assignments_updates_the_id_lists() {
        let (teams, channels) = directory();
        let mut state = CustomPolicyState::new();
        state.load_new(&teams, &channels);
        state.team_ids = vec!["t1".into()];
        state.refresh_assignment_rows(&teams, &channels);
        state.teams_table.select_next();
        state.remove_selected_team();
        assert!(state.team_ids.is_empty());
    }
}
