//! Loose success/failure envelope spoken by user repository backends.
//!
//! Backends wrap every payload as `{"success", "data", "message"}`. The
//! envelope does not guarantee `data` on success, so adapters convert it into
//! a strict result with [`ApiResponse::into_result`] before anything past the
//! repository port sees it.

use serde::{Deserialize, Serialize};

use crate::domain::ports::UserRepositoryError;

/// Repository envelope.
///
/// ## Invariants
/// - None. `success == true` with `data == None` is representable and is
///   rejected by [`ApiResponse::into_result`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    /// Whether the backend considers the call successful.
    pub success: bool,
    /// Payload, expected when `success` is true.
    pub data: Option<T>,
    /// Human-readable diagnostic or confirmation.
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Successful envelope carrying `data`.
    pub const fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    /// Attach a message to the envelope.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Convert into a strict result.
    ///
    /// # Errors
    ///
    /// - [`UserRepositoryError::Rejected`] when `success` is false and a
    ///   message is present.
    /// - [`UserRepositoryError::Unspecified`] when `success` is false without
    ///   a usable message.
    /// - [`UserRepositoryError::MissingPayload`] when `success` is true but
    ///   `data` is absent.
    pub fn into_result(self) -> Result<T, UserRepositoryError> {
        let Self {
            success,
            data,
            message,
        } = self;
        if !success {
            return Err(match message.filter(|text| !text.trim().is_empty()) {
                Some(text) => UserRepositoryError::rejected(text),
                None => UserRepositoryError::unspecified(),
            });
        }
        data.ok_or_else(UserRepositoryError::missing_payload)
    }
}
