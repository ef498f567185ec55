//! Application state for the admin console.
//!
//! `App` is the central state container: the persisted settings record, the
//! per-screen view states, the modal states, and the focus cycle. Components
//! receive `&mut App` and report cross-cutting changes back as `Effect`s.

use std::rc::Rc;

use rat_focus::{Focus, FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;

use tenure_types::{ChannelSummary, CustomPolicy, Modal, Msg, RetentionSettings, Route, TeamSummary};

use crate::store::SettingsStore;
use crate::ui::components::common::ConfirmationModalState;
use crate::ui::components::custom_policy::CustomPolicyState;
use crate::ui::components::jobs::JobsState;
use crate::ui::components::picker::PickerState;
use crate::ui::components::retention::RetentionViewState;
use crate::ui::theme::Theme;

/// Cross-cutting shared context owned by the App.
pub struct SharedCtx {
    pub theme: Box<dyn Theme>,
}

pub struct App {
    pub ctx: SharedCtx,
    /// Screen currently shown by the main view.
    pub current_route: Route,
    /// Modal currently layered over the screen, if any.
    pub open_modal_kind: Option<Modal>,
    /// Focus cycle, rebuilt before every render.
    pub focus: Rc<Focus>,
    /// Runtime exit flag, set by `Effect::Quit`.
    pub should_quit: bool,

    pub store: SettingsStore,
    pub settings: RetentionSettings,
    /// Team directory used by the assignment picker.
    pub teams: Vec<TeamSummary>,
    /// Channel directory used by the assignment picker.
    pub channels: Vec<ChannelSummary>,

    pub retention: RetentionViewState,
    pub custom_policy: CustomPolicyState,
    pub jobs: JobsState,
    pub confirmation_modal_state: ConfirmationModalState,
    pub picker: PickerState,

    container_focus: FocusFlag,
    next_policy_seq: u64,
}

impl App {
    pub fn new(store: SettingsStore, settings: RetentionSettings, theme: Box<dyn Theme>) -> Self {
        let (teams, channels) = sample_directory();
        let mut retention = RetentionViewState::new();
        retention.load(&settings);
        Self {
            ctx: SharedCtx { theme },
            current_route: Route::default(),
            open_modal_kind: None,
            focus: Rc::new(Focus::default()),
            should_quit: false,
            store,
            settings,
            teams,
            channels,
            retention,
            custom_policy: CustomPolicyState::new(),
            jobs: JobsState::new(),
            confirmation_modal_state: ConfirmationModalState::default(),
            picker: PickerState::new(),
            container_focus: FocusFlag::new().with_name("app"),
            next_policy_seq: 1,
        }
    }

    /// App-level message handling that runs before the active component sees
    /// the message.
    pub fn update(&mut self, msg: &Msg) -> Vec<tenure_types::Effect> {
        if matches!(msg, Msg::Tick) {
            self.jobs.tick();
        }
        Vec::new()
    }

    /// A policy id that is not yet taken by any stored policy.
    pub fn next_policy_id(&mut self) -> String {
        loop {
            let candidate = format!("policy-{}", self.next_policy_seq);
            self.next_policy_seq += 1;
            if !self.settings.custom_policies.iter().any(|policy| policy.id == candidate) {
                return candidate;
            }
        }
    }

    /// Resets the policy form for a brand new policy.
    pub fn begin_new_policy(&mut self) {
        let Self {
            custom_policy,
            teams,
            channels,
            ..
        } = self;
        custom_policy.load_new(teams, channels);
    }

    /// Seeds the policy form from the policy at `index` in the table.
    pub fn open_policy_for_edit(&mut self, index: usize) {
        let Self {
            custom_policy,
            settings,
            teams,
            channels,
            ..
        } = self;
        if let Some(policy) = settings.custom_policies.get(index) {
            custom_policy.load(policy, teams, channels);
        }
    }

    pub fn delete_policy(&mut self, index: usize) {
        if index < self.settings.custom_policies.len() {
            let removed = self.settings.custom_policies.remove(index);
            tracing::info!(id = %removed.id, name = %removed.name, "deleted custom policy");
            self.retention.refresh_policy_rows(&self.settings.custom_policies);
        }
    }

    /// Inserts or replaces a policy by id.
    pub fn upsert_policy(&mut self, policy: CustomPolicy) {
        match self
            .settings
            .custom_policies
            .iter_mut()
            .find(|existing| existing.id == policy.id)
        {
            Some(existing) => *existing = policy,
            None => self.settings.custom_policies.push(policy),
        }
        self.retention.refresh_policy_rows(&self.settings.custom_policies);
    }

    /// Writes the retention form into the settings record.
    pub fn commit_retention_form(&mut self) {
        let Self { retention, settings, .. } = self;
        retention.apply_to(settings);
    }

    /// Persists the settings record; the error string is what the UI shows.
    pub fn save_settings(&mut self) -> Result<(), String> {
        match self.store.save(&self.settings) {
            Ok(()) => {
                tracing::info!(path = %self.store.path().display(), "saved retention settings");
                Ok(())
            }
            Err(error) => {
                tracing::error!(%error, "failed to save retention settings");
                Err(error.to_string())
            }
        }
    }
}

impl HasFocus for App {
    fn build(&self, builder: &mut FocusBuilder) {
        let start = builder.start(self);
        // An open modal traps the focus cycle.
        match &self.open_modal_kind {
            Some(Modal::Confirmation) => self.confirmation_modal_state.build(builder),
            Some(Modal::Picker(_)) => self.picker.build(builder),
            None => match self.current_route {
                Route::Retention => self.retention.build(builder),
                Route::CustomPolicy => self.custom_policy.build(builder),
            },
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

/// Built-in directory the picker offers. A deployment would fetch these from
/// the server; the console ships with a small sample so assignment flows are
/// usable out of the box.
fn sample_directory() -> (Vec<TeamSummary>, Vec<ChannelSummary>) {
    let teams = vec![
        TeamSummary {
            id: "team-eng".to_string(),
            display_name: "Engineering".to_string(),
        },
        TeamSummary {
            id: "team-design".to_string(),
            display_name: "Design".to_string(),
        },
        TeamSummary {
            id: "team-sales".to_string(),
            display_name: "Sales".to_string(),
        },
    ];
    let channels = vec![
        ChannelSummary {
            id: "chan-announce".to_string(),
            display_name: "announcements".to_string(),
            team_id: "team-eng".to_string(),
        },
        ChannelSummary {
            id: "chan-incidents".to_string(),
            display_name: "incidents".to_string(),
            team_id: "team-eng".to_string(),
        },
        ChannelSummary {
            id: "chan-launch".to_string(),
            display_name: "launch-planning".to_string(),
            team_id: "team-design".to_string(),
        },
        ChannelSummary {
            id: "chan-deals".to_string(),
            display_name: "deals".to_string(),
            team_id: "team-sales".to_string(),
        },
    ];
    (teams, channels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::slate::SlateTheme;
    use tenure_types::RetentionDuration;

    fn test_app() -> App {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = SettingsStore::at(dir.path().join("settings.json"));
        // Leak the tempdir so the path stays valid for the App's lifetime.
        std::mem::forget(dir);
        App::new(store, RetentionSettings::default(), Box::new(SlateTheme::default()))
    }

    fn sample_policy(id: &str) -> CustomPolicy {
        CustomPolicy {
            id: id.to_string(),
            name: format!("{id} policy"),
            channel_message_retention: RetentionDuration::Days(30),
            team_ids: Vec::new(),
            channel_ids: Vec::new(),
        }
    }

    #[test]
    fn next_policy_id_skips_taken_ids() {
        let mut app = test_app();
        app.settings.custom_policies.push(sample_policy("policy-1"));
        assert_eq!(app.next_policy_id(), "policy-2");
    }

    #[test]
    fn upsert_replaces_by_id_and_refreshes_rows() {
        let mut app = test_app();
        app.upsert_policy(sample_policy("p1"));
        assert_eq!(app.retention.policies.rows.len(), 1);

        let mut changed = sample_policy("p1");
        changed.name = "renamed".to_string();
        app.upsert_policy(changed);
        assert_eq!(app.settings.custom_policies.len(), 1);
        assert_eq!(app.settings.custom_policies[0].name, "renamed");
    }

    #[test]
    fn delete_policy_removes_row() {
        let mut app = test_app();
        app.upsert_policy(sample_policy("p1"));
        app.upsert_policy(sample_policy("p2"));
        app.delete_policy(0);
        assert_eq!(app.settings.custom_policies.len(), 1);
        assert_eq!(app.settings.custom_policies[0].id, "p2");
        assert_eq!(app.retention.policies.rows.len(), 1);
    }

    #[test]
    fn save_settings_round_trips_through_the_store() {
        let mut app = test_app();
        app.upsert_policy(sample_policy("p1"));
        app.save_settings().expect("save settings");
        let loaded = app.store.load().expect("reload settings");
        assert_eq!(loaded, app.settings);
    }
}
