//! Shared view-model for the users screen.
//!
//! Holds three observable slots (status banners, user list, selection) and
//! applies use case outcomes to them. Failures never leave this type as
//! errors; they land in [`UiState::error`].
//!
//! Load, find and create take a single operation turn for their whole run, so
//! concurrent invocations apply their state transitions one at a time in the
//! order they were invoked. Dropping an in-flight operation releases the turn
//! but does not roll back writes it already made.

mod contract;
mod state;

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, watch};
use tokio_stream::wrappers::WatchStream;
use tracing::{debug, warn};

use crate::domain::ports::{UserRepository, UserUseCase};
use crate::domain::{Error, User, UserService};

pub use contract::UsersScreenModel;
pub use state::{StateSlot, UiState};

/// View-model shared by every platform adapter.
pub struct UserViewModel {
    use_case: Arc<dyn UserUseCase>,
    ui_state: StateSlot<UiState>,
    users: StateSlot<Vec<User>>,
    selected_user: StateSlot<Option<User>>,
    turn: Mutex<()>,
}

impl UserViewModel {
    /// Create a view-model with default state over `use_case`.
    pub fn new(use_case: Arc<dyn UserUseCase>) -> Self {
        Self {
            use_case,
            ui_state: StateSlot::default(),
            users: StateSlot::default(),
            selected_user: StateSlot::default(),
            turn: Mutex::new(()),
        }
    }

    /// Create a view-model whose use case is a [`UserService`] over
    /// `repository`.
    pub fn with_repository<R>(repository: Arc<R>) -> Self
    where
        R: UserRepository + ?Sized + 'static,
    {
        Self::new(Arc::new(UserService::new(repository)))
    }

    /// Replace the user list with the validated listing.
    pub async fn load_users(&self) {
        let _turn = self.turn.lock().await;
        self.begin("load_users");
        match self.use_case.get_validated_users().await {
            Ok(users) => {
                let message = format!("Usuarios cargados: {}", users.len());
                self.users.set(users);
                self.succeed("load_users", message);
            }
            Err(error) => self.fail("load_users", &error),
        }
    }

    /// Select the user with `id`; clears the selection on failure.
    pub async fn find_user(&self, id: i64) {
        let _turn = self.turn.lock().await;
        self.begin("find_user");
        match self.use_case.find_user_by_id(id).await {
            Ok(user) => {
                let message = format!("Usuario encontrado: {}", user.name());
                self.selected_user.set(Some(user));
                self.succeed("find_user", message);
            }
            Err(error) => {
                self.selected_user.set(None);
                self.fail("find_user", &error);
            }
        }
    }

    /// Create a user and append it to the list without re-fetching.
    pub async fn create_user(&self, name: &str, email: &str) {
        let _turn = self.turn.lock().await;
        self.begin("create_user");
        match self.use_case.create_validated_user(name, email).await {
            Ok(user) => {
                let message = format!("Usuario creado: {}", user.name());
                self.users.update(|users| users.push(user));
                self.succeed("create_user", message);
            }
            Err(error) => self.fail("create_user", &error),
        }
    }

    /// Reset both banners. Leaves the loading flag and data slots untouched.
    pub fn clear_messages(&self) {
        self.ui_state.update(|state| {
            state.message = None;
            state.error = None;
        });
    }

    /// Observe the status banner state.
    #[must_use]
    pub fn ui_state(&self) -> watch::Receiver<UiState> {
        self.ui_state.subscribe()
    }

    /// Observe the user list.
    #[must_use]
    pub fn users(&self) -> watch::Receiver<Vec<User>> {
        self.users.subscribe()
    }

    /// Observe the selected user.
    #[must_use]
    pub fn selected_user(&self) -> watch::Receiver<Option<User>> {
        self.selected_user.subscribe()
    }

    /// Stream of status banner states, starting with the current one.
    #[must_use]
    pub fn ui_state_stream(&self) -> WatchStream<UiState> {
        self.ui_state.stream()
    }

    /// Stream of user lists, starting with the current one.
    #[must_use]
    pub fn users_stream(&self) -> WatchStream<Vec<User>> {
        self.users.stream()
    }

    /// Stream of selections, starting with the current one.
    #[must_use]
    pub fn selected_user_stream(&self) -> WatchStream<Option<User>> {
        self.selected_user.stream()
    }

    /// Snapshot of the status banner state.
    #[must_use]
    pub fn current_ui_state(&self) -> UiState {
        self.ui_state.get()
    }

    /// Snapshot of the user list.
    #[must_use]
    pub fn current_users(&self) -> Vec<User> {
        self.users.get()
    }

    /// Snapshot of the selected user.
    #[must_use]
    pub fn current_selected_user(&self) -> Option<User> {
        self.selected_user.get()
    }

    fn begin(&self, operation: &'static str) {
        debug!(operation, "view-model operation started");
        self.ui_state.update(|state| {
            state.is_loading = true;
            state.error = None;
        });
    }

    fn succeed(&self, operation: &'static str, message: String) {
        debug!(operation, banner = %message, "view-model operation succeeded");
        self.ui_state.update(|state| {
            state.is_loading = false;
            state.message = Some(message);
        });
    }

    fn fail(&self, operation: &'static str, error: &Error) {
        warn!(operation, code = ?error.code(), error = %error, "view-model operation failed");
        let text = error.message().to_owned();
        self.ui_state.update(|state| {
            state.is_loading = false;
            state.error = Some(text);
        });
    }
}

#[async_trait]
impl UsersScreenModel for UserViewModel {
    async fn load_users(&self) {
        UserViewModel::load_users(self).await;
    }

    async fn find_user(&self, id: i64) {
        UserViewModel::find_user(self, id).await;
    }

    async fn create_user(&self, name: &str, email: &str) {
        UserViewModel::create_user(self, name, email).await;
    }

    fn clear_messages(&self) {
        UserViewModel::clear_messages(self);
    }

    fn ui_state(&self) -> watch::Receiver<UiState> {
        UserViewModel::ui_state(self)
    }

    fn users(&self) -> watch::Receiver<Vec<User>> {
        UserViewModel::users(self)
    }

    fn selected_user(&self) -> watch::Receiver<Option<User>> {
        UserViewModel::selected_user(self)
    }
}
