//! Driven port for user storage backends and their errors.
//!
//! Adapters report failure through [`UserRepositoryError`] rather than by
//! panicking. Backends that speak the loose `ApiResponse` envelope convert it
//! with [`crate::domain::ApiResponse::into_result`] before returning.

use async_trait::async_trait;

use crate::domain::{User, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Backend could not be reached.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Request reached the backend but could not be completed or decoded.
        Query { message: String } => "user repository query failed: {message}",
        /// No user exists with the requested identifier.
        NotFound { id: i64 } => "user {id} not found",
        /// Backend reported failure with a diagnostic.
        Rejected { message: String } => "{message}",
        /// Backend reported failure without a diagnostic.
        Unspecified => "user repository reported an unspecified failure",
        /// Backend reported success but returned no payload.
        MissingPayload => "user repository returned no data",
    }
}

/// Port for listing, fetching and creating users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch every user in backend order.
    async fn get_users(&self) -> Result<Vec<User>, UserRepositoryError>;

    /// Fetch a single user.
    async fn get_user_by_id(&self, id: UserId) -> Result<User, UserRepositoryError>;

    /// Store a new user.
    ///
    /// The returned user carries the identifier assigned by the backend; the
    /// input identifier is ignored.
    async fn create_user(&self, user: &User) -> Result<User, UserRepositoryError>;
}
