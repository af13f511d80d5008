//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod user_repository;
mod user_use_case;

#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
#[cfg(test)]
pub use user_use_case::MockUserUseCase;
pub use user_use_case::UserUseCase;
