//! Data retention overview screen.

pub mod retention_component;
pub mod state;

pub use retention_component::RetentionComponent;
pub use state::{RetentionViewState, VALUE_DAYS, VALUE_FOREVER, parse_days};
