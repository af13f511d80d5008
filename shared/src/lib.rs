//! Shared core of the users sample application.
//!
//! Platform front-ends bind to [`inbound::UserViewModel`] through the
//! [`inbound::UsersScreenModel`] capability trait. The view-model drives the
//! validating [`domain::UserService`], which talks to a repository adapter
//! from [`outbound`].
//!
//! ```
//! use std::sync::Arc;
//!
//! use shared::inbound::UserViewModel;
//! use shared::outbound::FixtureUserRepository;
//!
//! # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
//! let view_model = UserViewModel::with_repository(Arc::new(FixtureUserRepository::new()));
//! view_model.find_user(1).await;
//! assert_eq!(view_model.current_selected_user().map(|u| u.id().get()), Some(1));
//! # });
//! ```

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod telemetry;
