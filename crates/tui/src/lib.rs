//! # Tenure admin console
//!
//! Terminal user interface for administering a collaboration platform's data
//! retention policies. Built on Ratatui with a component-based architecture:
//! each screen or modal is a component that handles events, updates its own
//! state, and renders itself, reporting side effects back to the runtime as
//! `Effect`s.
//!
//! ## Layout
//!
//! - `app`: the central `App` state container and shared context.
//! - `store`: the JSON settings store (load/save of the retention record).
//! - `ui`: runtime event loop, main view routing, theme layer, components.

mod app;
mod store;
mod ui;

pub use store::{SettingsStore, StoreError};

use anyhow::Result;
use std::path::PathBuf;

/// Startup options collected by the CLI.
#[derive(Debug, Default, Clone)]
pub struct RunOptions {
    /// Override for the settings file location.
    pub settings_path: Option<PathBuf>,
    /// Preferred theme id ("slate" or "ansi").
    pub theme: Option<String>,
}

/// Runs the admin console until the user exits.
///
/// Loads the retention settings record (falling back to defaults when the
/// file does not exist yet), sets up the terminal, and drives the event loop.
pub async fn run(options: RunOptions) -> Result<()> {
    let store = match options.settings_path {
        Some(path) => SettingsStore::at(path),
        None => SettingsStore::default_location()?,
    };
    let settings = store.load()?;
    tracing::info!(path = %store.path().display(), "loaded retention settings");

    let theme = ui::theme::load(options.theme.as_deref());
    let app = app::App::new(store, settings, theme);
    ui::runtime::run_app(app).await
}
