//! Shared type definitions for the Tenure admin console.
//!
//! This crate holds the data model exchanged between the UI crate and the
//! binary: retention settings records, job records, and the message/effect
//! enums that drive the component event loop.

mod retention;

pub use retention::{
    ChannelSummary, CustomPolicy, Job, JobStatus, JobType, RetentionDuration, RetentionSettings, TeamSummary,
};

/// Top-level screens the console can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    /// The data retention policy overview (global policy, custom policies, policy log).
    #[default]
    Retention,
    /// The custom policy form (name, retention, assigned teams/channels).
    CustomPolicy,
}

/// Modal overlays that can appear on top of any route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    /// Confirm-before-save dialog for the retention settings form.
    Confirmation,
    /// Team/channel picker used by the custom policy form.
    Picker(PickerKind),
}

/// Which directory the picker modal lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerKind {
    Teams,
    Channels,
}

/// Visual severity for modal chrome and status lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Info,
    Warning,
    Danger,
}

/// Messages that can be sent to update application state.
///
/// These are routed through the active view's `handle_message`, so every
/// component sees the events it cares about without holding references to
/// its siblings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Periodic UI tick (job progression, throbbers).
    Tick,
    /// Terminal resized.
    Resize(u16, u16),
    /// A confirmation modal button was activated (by index, left to right).
    ConfirmationButton(usize),
    /// The picker modal applied a selection.
    PickerApplied { kind: PickerKind, ids: Vec<String> },
    /// The picker modal was dismissed without applying.
    PickerCancelled,
    /// Settings were written to disk (or failed with the given message).
    SettingsPersisted(Result<(), String>),
}

/// Side effects reported by components for the runtime to execute.
///
/// Components never mutate global state directly; they return effects and the
/// runtime routes navigation first, then processes the rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Change the main view.
    SwitchTo(Route),
    /// Display a modal overlay.
    ShowModal(Modal),
    /// Hide any open modal.
    CloseModal,
    /// Re-enter the update cycle with a message.
    SendMsg(Msg),
    /// Persist the retention settings record to disk.
    SaveSettingsRequested,
    /// Persist the custom policy being edited and return to the overview.
    SavePolicyRequested,
    /// Enqueue a deletion job of the given type.
    CreateJobRequested(JobType),
    /// Leave the application.
    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_defaults_to_retention_overview() {
        assert_eq!(Route::default(), Route::Retention);
    }

    #[test]
    fn picker_modal_carries_its_kind() {
        let modal = Modal::Picker(PickerKind::Channels);
        assert_eq!(modal, Modal::Picker(PickerKind::Channels));
        assert_ne!(modal, Modal::Picker(PickerKind::Teams));
    }
}
