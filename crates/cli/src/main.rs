use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::Level;

use tenure_tui::RunOptions;

/// Terminal admin console for data retention policies.
#[derive(Debug, Parser)]
#[command(name = "tenure", version, about)]
struct Cli {
    /// Path to the settings file (defaults to the platform config directory).
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Theme id: "slate" (truecolor) or "ansi" (256-color fallback).
    #[arg(long, value_name = "THEME")]
    theme: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    tenure_tui::run(RunOptions {
        settings_path: cli.config,
        theme: cli.theme,
    })
    .await
}

fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::INFO)
        .try_init();
}
