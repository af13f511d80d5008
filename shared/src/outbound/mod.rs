//! Outbound adapters implementing the user repository port.
//!
//! - **fixture**: in-process mock data with simulated latency
//! - **http**: reqwest client speaking the `ApiResponse` envelope
//!
//! Adapters are thin translators between backend representations and domain
//! types. They contain no business logic.

pub mod fixture;
pub mod http;

pub use fixture::{CREATE_CONFIRMATION_MESSAGE, CREATED_USER_ID, FixtureUserRepository, sample_users};
pub use http::HttpUserRepository;
