//! User data model.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors returned by [`NewUser::try_new`] and
/// [`UserId::for_lookup`].
///
/// The display text is the user-facing message surfaced by the view-model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// Name is empty once trimmed of whitespace.
    #[error("El nombre es obligatorio")]
    EmptyName,
    /// Email is empty once trimmed of whitespace.
    #[error("El email es obligatorio")]
    EmptyEmail,
    /// Email has no `@` separator.
    #[error("Email inválido")]
    InvalidEmail,
    /// Lookup identifier is zero or negative.
    #[error("ID debe ser mayor a 0")]
    NonPositiveId,
}

/// Numeric user identifier assigned by the repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Placeholder carried by users that the repository has not created yet.
    pub const UNASSIGNED: Self = Self(0);

    /// Wrap a raw identifier without validation.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Validate an identifier used to look a user up.
    ///
    /// # Errors
    ///
    /// Returns [`UserValidationError::NonPositiveId`] when `id <= 0`.
    pub const fn for_lookup(id: i64) -> Result<Self, UserValidationError> {
        if id <= 0 {
            return Err(UserValidationError::NonPositiveId);
        }
        Ok(Self(id))
    }

    /// Raw integer value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Whether the repository has assigned this identifier.
    ///
    /// Only positive ids count, matching [`UserId::for_lookup`].
    #[must_use]
    pub const fn is_assigned(self) -> bool {
        self.0 > Self::UNASSIGNED.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Application user.
///
/// Immutable value with structural equality: two users with identical fields
/// are interchangeable.
///
/// ## Invariants
/// - None at construction. Repository data is accepted as-is and
///   [`User::is_well_formed`] decides whether it is fit to show.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: UserId,
    name: String,
    email: String,
}

impl User {
    /// Build a user from its raw parts.
    pub fn new(id: i64, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: UserId(id),
            name: name.into(),
            email: email.into(),
        }
    }

    /// Repository identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Contact email.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Return a copy carrying a different identifier.
    #[must_use]
    pub fn with_id(self, id: UserId) -> Self {
        Self {
            id,
            ..self
        }
    }

    /// A user is shown only when its name is non-blank and its email
    /// contains `@`.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        !self.name.trim().is_empty() && self.email.contains('@')
    }
}

/// Validated creation request for a user not yet stored.
///
/// ## Invariants
/// - `name` and `email` are trimmed and non-empty.
/// - `email` contains `@`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    name: String,
    email: String,
}

impl NewUser {
    /// Validate raw form input.
    ///
    /// Checks run in order (name, email presence, email shape) and stop at
    /// the first violation.
    ///
    /// # Errors
    ///
    /// Returns the first [`UserValidationError`] the input violates.
    pub fn try_new(name: &str, email: &str) -> Result<Self, UserValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        let email = email.trim();
        if email.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if !email.contains('@') {
            return Err(UserValidationError::InvalidEmail);
        }

        Ok(Self {
            name: name.to_owned(),
            email: email.to_owned(),
        })
    }

    /// Trimmed name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Trimmed email.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Convert into a [`User`] carrying [`UserId::UNASSIGNED`].
    #[must_use]
    pub fn into_user(self) -> User {
        let Self { name, email } = self;
        User {
            id: UserId::UNASSIGNED,
            name,
            email,
        }
    }
}
