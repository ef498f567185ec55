//! Team/channel assignment picker modal.

pub mod picker_component;
pub mod state;

pub use picker_component::PickerComponent;
pub use state::{PickerEntry, PickerState};
