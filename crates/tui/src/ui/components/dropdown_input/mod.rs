//! Hybrid selector/free-text input control.

pub mod state;
pub mod view;

pub use state::{
    DisplayMode, DropdownInputConfig, DropdownInputState, DropdownLayout, ModeTransition, SelectOption,
    SelectionOutcome, mode_transition,
};
pub use view::{CONTROL_HEIGHT, DropdownInput, DropdownInputEvent};
