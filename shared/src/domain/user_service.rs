//! User directory domain service.
//!
//! Implements the [`UserUseCase`] driving port on top of any
//! [`UserRepository`]. Validation happens before the repository is touched;
//! repository errors and panics are folded into [`Outcome`] failures so
//! nothing escapes to the caller.

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::FutureExt;
use tracing::{debug, error, warn};

use crate::domain::ports::{UserRepository, UserRepositoryError, UserUseCase};
use crate::domain::{Error, NewUser, Outcome, User, UserId};

/// Fallback when a listing fails without a diagnostic.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Error desconocido";
/// Fallback when a lookup fails without a diagnostic.
pub const USER_NOT_FOUND_MESSAGE: &str = "Usuario no encontrado";
/// Fallback when a creation fails without a diagnostic.
pub const CREATE_FAILED_MESSAGE: &str = "Error al crear usuario";

/// User directory service implementing [`UserUseCase`].
pub struct UserService<R: ?Sized> {
    repository: Arc<R>,
}

impl<R: ?Sized> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: ?Sized> UserService<R> {
    /// Create a new service over the given repository.
    pub const fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

impl<R> UserService<R>
where
    R: UserRepository + ?Sized,
{
    fn map_repository_error(error: UserRepositoryError, fallback: fn() -> Error) -> Error {
        match error {
            UserRepositoryError::Rejected { message } => Error::internal(message),
            UserRepositoryError::Unspecified | UserRepositoryError::MissingPayload => fallback(),
            UserRepositoryError::NotFound { .. } => Error::not_found(USER_NOT_FOUND_MESSAGE),
            UserRepositoryError::Connection { .. } => Error::unavailable(error.to_string()),
            UserRepositoryError::Query { .. } => Error::internal(error.to_string()),
        }
    }

    async fn list_users(&self) -> Outcome<Vec<User>> {
        let users = self.repository.get_users().await.map_err(|err| {
            warn!(kind = err.kind(), error = %err, "user listing failed");
            Self::map_repository_error(err, || Error::internal(UNKNOWN_ERROR_MESSAGE))
        })?;

        let received = users.len();
        let valid: Vec<User> = users.into_iter().filter(User::is_well_formed).collect();
        let dropped = received - valid.len();
        if dropped > 0 {
            // Callers only see the filtered list; keep the discrepancy visible.
            warn!(received, dropped, "dropped malformed users from listing");
        }
        Ok(valid)
    }

    async fn lookup_user(&self, id: i64) -> Outcome<User> {
        let id = UserId::for_lookup(id)?;
        self.repository.get_user_by_id(id).await.map_err(|err| {
            warn!(user_id = %id, kind = err.kind(), error = %err, "user lookup failed");
            Self::map_repository_error(err, || Error::not_found(USER_NOT_FOUND_MESSAGE))
        })
    }

    async fn register_user(&self, name: &str, email: &str) -> Outcome<User> {
        let draft = NewUser::try_new(name, email)?;
        let user = draft.into_user();
        self.repository.create_user(&user).await.map_err(|err| {
            warn!(kind = err.kind(), error = %err, "user creation failed");
            Self::map_repository_error(err, || Error::internal(CREATE_FAILED_MESSAGE))
        })
    }

    /// Run `future`, converting a panic into an internal failure.
    async fn shielded<T>(operation: &'static str, future: impl Future<Output = Outcome<T>>) -> Outcome<T> {
        debug!(operation, "use case started");
        let outcome = match AssertUnwindSafe(future).catch_unwind().await {
            Ok(outcome) => outcome,
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                error!(operation, panic_message = %message, "use case panicked");
                // Blank payloads fall back to the internal error default.
                Err(Error::internal(message))
            }
        };
        debug!(operation, ok = outcome.is_ok(), "use case finished");
        outcome
    }
}

/// Text carried by a panic payload; empty when it is not a string.
fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|text| (*text).to_owned())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_default()
}

#[async_trait]
impl<R> UserUseCase for UserService<R>
where
    R: UserRepository + ?Sized,
{
    async fn get_validated_users(&self) -> Outcome<Vec<User>> {
        Self::shielded("get_validated_users", self.list_users()).await
    }

    async fn find_user_by_id(&self, id: i64) -> Outcome<User> {
        Self::shielded("find_user_by_id", self.lookup_user(id)).await
    }

    async fn create_validated_user(&self, name: &str, email: &str) -> Outcome<User> {
        Self::shielded("create_validated_user", self.register_user(name, email)).await
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
