//! Capability interface every platform adapter codes against.
//!
//! Adapters translate these receivers into their native reactive primitives
//! and forward UI events to the imperative entry points. They hold an
//! `Arc<dyn UsersScreenModel>` and never see the use case or repository.

use async_trait::async_trait;
use tokio::sync::watch;

use super::UiState;
use crate::domain::User;

/// Users screen surface shared by all front-ends.
#[async_trait]
pub trait UsersScreenModel: Send + Sync {
    /// Reload the user list.
    async fn load_users(&self);

    /// Select the user with `id`.
    async fn find_user(&self, id: i64);

    /// Create a user from form input and append it to the list.
    async fn create_user(&self, name: &str, email: &str);

    /// Dismiss both status banners.
    fn clear_messages(&self);

    /// Observe the status banner state.
    fn ui_state(&self) -> watch::Receiver<UiState>;

    /// Observe the user list.
    fn users(&self) -> watch::Receiver<Vec<User>>;

    /// Observe the selected user.
    fn selected_user(&self) -> watch::Receiver<Option<User>>;
}
