//! Retention settings records and deletion job bookkeeping.
//!
//! `RetentionSettings` is the on-disk record the console edits; it mirrors
//! the server's `DataRetentionSettings` configuration block. Custom policies
//! narrow the global policy to specific teams and channels.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Global data retention configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RetentionSettings {
    /// Whether messages older than the retention window are deleted nightly.
    pub enable_message_deletion: bool,
    /// Whether file uploads older than the retention window are deleted nightly.
    pub enable_file_deletion: bool,
    /// How many days messages are kept. Minimum one day.
    pub message_retention_days: u32,
    /// How many days file uploads are kept. Minimum one day.
    pub file_retention_days: u32,
    /// Local time of day the nightly deletion job starts, "HH:MM".
    pub deletion_job_start_time: String,
    /// Custom policies that override the global policy for their targets.
    #[serde(default)]
    pub custom_policies: Vec<CustomPolicy>,
}

impl Default for RetentionSettings {
    fn default() -> Self {
        Self {
            enable_message_deletion: false,
            enable_file_deletion: false,
            message_retention_days: 365,
            file_retention_days: 365,
            deletion_job_start_time: "02:00".to_string(),
            custom_policies: Vec::new(),
        }
    }
}

impl RetentionSettings {
    /// A deletion job only makes sense while at least one deletion toggle is on.
    pub fn deletion_enabled(&self) -> bool {
        self.enable_message_deletion || self.enable_file_deletion
    }
}

/// Retention window for a custom policy's channel messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", content = "days", rename_all = "snake_case")]
pub enum RetentionDuration {
    /// Messages are never deleted.
    #[default]
    Forever,
    /// Messages are deleted after the given number of days.
    Days(u32),
}

impl RetentionDuration {
    pub fn describe(&self) -> String {
        match self {
            RetentionDuration::Forever => "Keep forever".to_string(),
            RetentionDuration::Days(1) => "1 day".to_string(),
            RetentionDuration::Days(days) => format!("{days} days"),
        }
    }
}

/// A retention policy scoped to specific teams and channels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CustomPolicy {
    pub id: String,
    pub name: String,
    pub channel_message_retention: RetentionDuration,
    #[serde(default)]
    pub team_ids: Vec<String>,
    #[serde(default)]
    pub channel_ids: Vec<String>,
}

impl CustomPolicy {
    /// Summary used in the custom policies table, e.g. "2 teams, 4 channels".
    pub fn applied_to(&self) -> String {
        let mut parts = Vec::with_capacity(2);
        match self.team_ids.len() {
            0 => {}
            1 => parts.push("1 team".to_string()),
            n => parts.push(format!("{n} teams")),
        }
        match self.channel_ids.len() {
            0 => {}
            1 => parts.push("1 channel".to_string()),
            n => parts.push(format!("{n} channels")),
        }
        if parts.is_empty() {
            "Nothing assigned".to_string()
        } else {
            parts.join(", ")
        }
    }
}

/// Kind of background job the console can enqueue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobType {
    DataRetention,
}

impl JobType {
    pub fn label(&self) -> &'static str {
        match self {
            JobType::DataRetention => "Data retention",
        }
    }
}

/// Lifecycle of a deletion job shown in the policy log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    InProgress,
    Success,
    Error,
}

impl JobStatus {
    pub fn label(&self) -> &'static str {
        match self {
            JobStatus::Pending => "Pending",
            JobStatus::InProgress => "In progress",
            JobStatus::Success => "Success",
            JobStatus::Error => "Error",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Success | JobStatus::Error)
    }
}

/// A single entry in the policy log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub job_type: JobType,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl Job {
    pub fn new(id: impl Into<String>, job_type: JobType, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            job_type,
            status: JobStatus::Pending,
            created_at,
            finished_at: None,
        }
    }
}

/// Directory entry for a team, used by the assignment picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSummary {
    pub id: String,
    pub display_name: String,
}

/// Directory entry for a channel, used by the assignment picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelSummary {
    pub id: String,
    pub display_name: String,
    pub team_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_round_trip_preserves_policies() {
        let settings = RetentionSettings {
            enable_message_deletion: true,
            message_retention_days: 60,
            custom_policies: vec![CustomPolicy {
                id: "p1".into(),
                name: "60 day policy".into(),
                channel_message_retention: RetentionDuration::Days(60),
                team_ids: vec!["t1".into(), "t2".into()],
                channel_ids: vec!["c1".into()],
            }],
            ..RetentionSettings::default()
        };

        let json = serde_json::to_string(&settings).expect("serialize settings");
        let back: RetentionSettings = serde_json::from_str(&json).expect("deserialize settings");
        assert_eq!(back, settings);
    }

    #[test]
    fn settings_deserialize_without_custom_policies_field() {
        let json = r#"{
            "EnableMessageDeletion": true,
            "EnableFileDeletion": false,
            "MessageRetentionDays": 30,
            "FileRetentionDays": 365,
            "DeletionJobStartTime": "02:00"
        }"#;
        let settings: RetentionSettings = serde_json::from_str(json).expect("deserialize settings");
        assert!(settings.enable_message_deletion);
        assert_eq!(settings.message_retention_days, 30);
        assert!(settings.custom_policies.is_empty());
    }

    #[test]
    fn applied_to_counts_teams_and_channels() {
        let mut policy = CustomPolicy {
            team_ids: vec!["t1".into(), "t2".into()],
            channel_ids: vec!["c1".into(), "c2".into(), "c3".into(), "c4".into()],
            ..CustomPolicy::default()
        };
        assert_eq!(policy.applied_to(), "2 teams, 4 channels");

        policy.channel_ids.clear();
        policy.team_ids.truncate(1);
        assert_eq!(policy.applied_to(), "1 team");

        policy.team_ids.clear();
        assert_eq!(policy.applied_to(), "Nothing assigned");
    }

    #[test]
    fn retention_duration_describes_singular_day() {
        assert_eq!(RetentionDuration::Days(1).describe(), "1 day");
        assert_eq!(RetentionDuration::Days(60).describe(), "60 days");
        assert_eq!(RetentionDuration::Forever.describe(), "Keep forever");
    }

    #[test]
    fn deletion_enabled_tracks_either_toggle() {
        let mut settings = RetentionSettings::default();
        assert!(!settings.deletion_enabled());
        settings.enable_file_deletion = true;
        assert!(settings.deletion_enabled());
    }
}
