//! Domain-level error types.
//!
//! These errors are transport agnostic. The view-model renders them into the
//! `error` slot of its UI state; other adapters may map them to their own
//! envelopes.

use serde::{Deserialize, Serialize};

use crate::domain::UserValidationError;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The input is malformed or fails validation.
    InvalidRequest,
    /// The requested user does not exist.
    NotFound,
    /// The repository could not be reached.
    Unavailable,
    /// An unexpected error occurred inside the core.
    InternalError,
}

impl ErrorCode {
    /// Message used when a failure of this category carries no text.
    #[must_use]
    pub const fn fallback_message(self) -> &'static str {
        match self {
            Self::InvalidRequest => "Solicitud inválida",
            Self::NotFound => "Usuario no encontrado",
            Self::Unavailable => "Servicio no disponible",
            Self::InternalError => "Error inesperado",
        }
    }
}

/// Failure returned by the user use case.
///
/// `message` is never blank: [`Error::new`] substitutes the code's
/// [`ErrorCode::fallback_message`], while [`Error::try_new`] and
/// deserialisation reject blank text.
///
/// # Examples
/// ```
/// use shared::domain::{Error, ErrorCode};
///
/// let err = Error::new(ErrorCode::NotFound, "Usuario no encontrado");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert_eq!(err.to_string(), "Usuario no encontrado");
///
/// assert_eq!(Error::internal("  ").message(), "Error inesperado");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(try_from = "WireError", into = "WireError")]
#[error("{message}")]
pub struct Error {
    code: ErrorCode,
    message: String,
}

/// Rejections raised by [`Error::try_new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorValidationError {
    /// Message was empty once trimmed.
    #[error("error message must not be empty")]
    EmptyMessage,
}

impl Error {
    /// Build an error, falling back to the code's default text when
    /// `message` is blank.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::try_new(code, message).unwrap_or_else(|ErrorValidationError::EmptyMessage| Self {
            code,
            message: code.fallback_message().to_owned(),
        })
    }

    /// Build an error, rejecting blank messages.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorValidationError::EmptyMessage`] when `message` is blank.
    pub fn try_new(code: ErrorCode, message: impl Into<String>) -> Result<Self, ErrorValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            Err(ErrorValidationError::EmptyMessage)
        } else {
            Ok(Self { code, message })
        }
    }

    /// Failure category.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// Text shown in the view-model error banner.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// [`ErrorCode::InvalidRequest`] with `message`.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// [`ErrorCode::NotFound`] with `message`.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// [`ErrorCode::Unavailable`] with `message`.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unavailable, message)
    }

    /// [`ErrorCode::InternalError`] with `message`.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl From<UserValidationError> for Error {
    fn from(rejection: UserValidationError) -> Self {
        Self::invalid_request(rejection.to_string())
    }
}

/// Serialised form; decoding re-validates through [`Error::try_new`].
#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct WireError {
    code: ErrorCode,
    message: String,
}

impl From<Error> for WireError {
    fn from(Error { code, message }: Error) -> Self {
        Self { code, message }
    }
}

impl TryFrom<WireError> for Error {
    type Error = ErrorValidationError;

    fn try_from(WireError { code, message }: WireError) -> Result<Self, Self::Error> {
        Self::try_new(code, message)
    }
}
