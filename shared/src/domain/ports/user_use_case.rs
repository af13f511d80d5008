//! Driving port for the validated user use cases.
//!
//! The view-model depends on this port only, so it never sees repository
//! errors or the backend envelope. Every method resolves to an
//! [`Outcome`](crate::domain::Outcome); failures are data, never panics.

use async_trait::async_trait;

use crate::domain::{Outcome, User};

/// Domain use-case port for the user directory.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserUseCase: Send + Sync {
    /// List users, keeping only well-formed entries.
    async fn get_validated_users(&self) -> Outcome<Vec<User>>;

    /// Look a user up by raw identifier.
    async fn find_user_by_id(&self, id: i64) -> Outcome<User>;

    /// Validate form input and create a user.
    async fn create_validated_user(&self, name: &str, email: &str) -> Outcome<User>;
}
