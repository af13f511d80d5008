//! Domain primitives, ports and the user directory service.
//!
//! Purpose: define the user value types, the validation rules applied before
//! any repository call, and the strict outcome returned to the view-model.
//! Types are immutable; invariants are documented on each type.
//!
//! Public surface:
//! - `User`, `UserId`, `NewUser`, `UserValidationError`: user model.
//! - `Error`, `ErrorCode`: transport-agnostic failure payload.
//! - `ApiResponse`: loose backend envelope and its strict conversion.
//! - `UserService`: implementation of the `UserUseCase` driving port.

pub mod api_response;
pub mod error;
pub mod ports;
pub mod user;
pub mod user_service;

pub use self::api_response::ApiResponse;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::user::{NewUser, User, UserId, UserValidationError};
pub use self::user_service::{
    CREATE_FAILED_MESSAGE, UNKNOWN_ERROR_MESSAGE, USER_NOT_FOUND_MESSAGE, UserService,
};

/// Strict success-or-failure result returned by the use case.
///
/// # Examples
/// ```
/// use shared::domain::{Error, Outcome, User};
///
/// fn lookup() -> Outcome<User> {
///     Err(Error::not_found("Usuario no encontrado"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type Outcome<T> = Result<T, Error>;
