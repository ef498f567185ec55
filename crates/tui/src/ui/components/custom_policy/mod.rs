//! Custom retention policy editor screen.

pub mod custom_policy_component;
pub mod state;

pub use custom_policy_component::CustomPolicyComponent;
pub use state::CustomPolicyState;
