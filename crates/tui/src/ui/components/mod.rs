//! UI components: retention overview, custom policy form, shared widgets.

pub mod common;
pub mod component;
pub mod custom_policy;
pub mod dropdown_input;
pub mod jobs;
pub mod picker;
pub mod retention;

pub use component::*;
pub use custom_policy::CustomPolicyComponent;
pub use picker::PickerComponent;
pub use retention::RetentionComponent;
