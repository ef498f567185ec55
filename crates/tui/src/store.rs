//! JSON settings store for the retention record.
//!
//! The console edits a local settings file rather than talking to a remote
//! configuration service. Missing files are treated as "first run" and yield
//! the default record; malformed files are surfaced as errors instead of
//! being silently overwritten.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tenure_types::RetentionSettings;
use thiserror::Error;

/// Errors produced while reading or writing the settings file.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read settings from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("settings file {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write settings to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no configuration directory available on this platform")]
    NoConfigDir,
}

/// Loads and persists the `RetentionSettings` record.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Store backed by an explicit file path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the platform default location, e.g.
    /// `~/.config/tenure/settings.json` on Linux.
    pub fn default_location() -> Result<Self, StoreError> {
        let base = dirs_next::config_dir().ok_or(StoreError::NoConfigDir)?;
        Ok(Self::at(base.join("tenure").join("settings.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the settings record. A missing file yields the defaults.
    pub fn load(&self) -> Result<RetentionSettings, StoreError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "settings file missing; using defaults");
                return Ok(RetentionSettings::default());
            }
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        serde_json::from_str(&raw).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Writes the settings record as pretty-printed JSON, creating parent
    /// directories as needed.
    pub fn save(&self, settings: &RetentionSettings) -> Result<(), StoreError> {
        let write_err = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        let raw = serde_json::to_string_pretty(settings).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })?;
        std::fs::write(&self.path, raw).map_err(write_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tenure_types::{CustomPolicy, RetentionDuration};

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = SettingsStore::at(dir.path().join("settings.json"));
        let settings = store.load().expect("load defaults");
        assert_eq!(settings, RetentionSettings::default());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = SettingsStore::at(dir.path().join("nested").join("settings.json"));

        let mut settings = RetentionSettings::default();
        settings.enable_message_deletion = true;
        settings.message_retention_days = 60;
        settings.custom_policies.push(CustomPolicy {
            id: "p1".into(),
            name: "60 day policy".into(),
            channel_message_retention: RetentionDuration::Days(60),
            ..CustomPolicy::default()
        });

        store.save(&settings).expect("save settings");
        let back = store.load().expect("reload settings");
        assert_eq!(back, settings);
    }

    #[test]
    fn malformed_file_reports_parse_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").expect("write garbage");

        let store = SettingsStore::at(&path);
        match store.load() {
            Err(StoreError::Parse { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}
