//! Shared widgets: cards, tables, text input, modals.

pub mod action_menu;
pub mod card;
pub mod confirmation_modal;
pub mod data_table;
pub mod text_input;

pub use action_menu::{ActionMenuOutcome, ActionMenuState};
pub use card::{Card, CardAreas};
pub use confirmation_modal::{ConfirmationModal, ConfirmationModalOpts, ConfirmationModalState};
pub use data_table::{Column, DataTableState, Row};
pub use text_input::TextInputState;
