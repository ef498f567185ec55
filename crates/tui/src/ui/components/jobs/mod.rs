//! Policy log: deletion job bookkeeping rendered as a card on the retention
//! screen.

pub mod state;

pub use state::JobsState;
