//! In-process user repository backed by mock data.
//!
//! Stands in for a real backend: every call optionally sleeps for a simulated
//! latency, builds the envelope a backend would send, and converts it through
//! the same guard the HTTP adapter uses.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{ApiResponse, User, UserId};

/// Identifier the fixture assigns to every created user.
pub const CREATED_USER_ID: UserId = UserId::new(999);
/// Confirmation message attached to creation envelopes.
pub const CREATE_CONFIRMATION_MESSAGE: &str = "Usuario creado exitosamente";

/// Fixed sample set returned by [`FixtureUserRepository::get_users`].
#[must_use]
pub fn sample_users() -> Vec<User> {
    vec![
        User::new(1, "Juan Pérez", "juan@example.com"),
        User::new(2, "María García", "maria@example.com"),
        User::new(3, "Carlos López", "carlos@example.com"),
    ]
}

/// Mock repository used until a real backend is wired.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserRepository {
    latency: Duration,
}

impl FixtureUserRepository {
    /// Repository that answers immediately.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            latency: Duration::ZERO,
        }
    }

    /// Repository that sleeps for `latency` before every answer.
    #[must_use]
    pub const fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }

    /// Configured simulated latency.
    #[must_use]
    pub const fn latency(&self) -> Duration {
        self.latency
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[async_trait]
impl UserRepository for FixtureUserRepository {
    async fn get_users(&self) -> Result<Vec<User>, UserRepositoryError> {
        self.simulate_latency().await;
        ApiResponse::ok(sample_users()).into_result()
    }

    async fn get_user_by_id(&self, id: UserId) -> Result<User, UserRepositoryError> {
        self.simulate_latency().await;
        debug!(user_id = %id, "synthesising fixture user");
        let user = User::new(
            id.get(),
            format!("Usuario {id}"),
            format!("usuario{id}@example.com"),
        );
        ApiResponse::ok(user).into_result()
    }

    async fn create_user(&self, user: &User) -> Result<User, UserRepositoryError> {
        self.simulate_latency().await;
        let envelope = ApiResponse::ok(user.clone().with_id(CREATED_USER_ID))
            .with_message(CREATE_CONFIRMATION_MESSAGE);
        if let Some(message) = envelope.message.as_deref() {
            info!(user_id = %CREATED_USER_ID, confirmation = message, "fixture user created");
        }
        envelope.into_result()
    }
}
