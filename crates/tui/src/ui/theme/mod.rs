//! Theme styling module for the UI layer.
//!
//! Defines semantic theme roles, a truecolor palette with an ANSI 256-color
//! fallback, and helper builders for Ratatui widgets and styles. Prefer these
//! helpers over hard-coding colors to keep the UI consistent.

use std::env;

pub mod ansi256;
pub mod roles;
pub mod slate;
pub mod theme_helpers;

pub use roles::Theme;

use ansi256::Ansi256Theme;
use slate::SlateTheme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColorCapability {
    Truecolor,
    Ansi256,
}

/// Selects a theme from an explicit preference or terminal capabilities.
pub fn load(preferred: Option<&str>) -> Box<dyn Theme> {
    let choice = preferred
        .map(str::to_ascii_lowercase)
        .or_else(|| env::var("TENURE_THEME").ok().map(|v| v.to_ascii_lowercase()));

    match choice.as_deref() {
        Some("ansi") | Some("ansi256") => return Box::new(Ansi256Theme::default()),
        Some("slate") => return Box::new(SlateTheme::default()),
        Some(other) => {
            tracing::debug!(theme = other, "unknown theme id; falling back to capability detection");
        }
        None => {}
    }

    match detect_color_capability() {
        ColorCapability::Truecolor => Box::new(SlateTheme::default()),
        ColorCapability::Ansi256 => Box::new(Ansi256Theme::default()),
    }
}

fn detect_color_capability() -> ColorCapability {
    let colorterm = env::var("COLORTERM").unwrap_or_default().to_ascii_lowercase();
    if colorterm.contains("truecolor") || colorterm.contains("24bit") {
        return ColorCapability::Truecolor;
    }
    let term = env::var("TERM").unwrap_or_default().to_ascii_lowercase();
    if term.contains("truecolor") || term.contains("direct") {
        return ColorCapability::Truecolor;
    }
    ColorCapability::Ansi256
}
