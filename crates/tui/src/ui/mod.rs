//! UI layer: components, main view routing, runtime loop, themes.

pub mod components;
pub mod main_component;
pub mod runtime;
pub mod theme;
pub mod utils;
