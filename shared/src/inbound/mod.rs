//! Inbound adapters driving the user use case.
//!
//! The view-model is the only driving adapter: platform front-ends bind to
//! its observable slots and forward UI events to it.

pub mod view_model;

pub use view_model::{StateSlot, UiState, UserViewModel, UsersScreenModel};
