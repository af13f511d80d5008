//! Reqwest-backed user repository adapter.
//!
//! This adapter owns transport details only: URL construction, timeouts,
//! HTTP status mapping, and decoding the backend envelope into domain users.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{ApiResponse, User, UserId};

const USERS_SEGMENT: &str = "users";

/// User repository that calls a JSON backend over HTTP.
///
/// Endpoints, relative to the base URL:
/// - `GET users` lists users.
/// - `GET users/{id}` fetches one user.
/// - `POST users` creates a user from a JSON body.
///
/// Every response body is an [`ApiResponse`] envelope.
#[derive(Debug, Clone)]
pub struct HttpUserRepository {
    client: Client,
    base_url: Url,
}

impl HttpUserRepository {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    /// Base URL requests are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, UserRepositoryError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                UserRepositoryError::query(format!("base URL {} cannot carry a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn exchange<T>(
        &self,
        request: RequestBuilder,
        lookup: Option<UserId>,
    ) -> Result<T, UserRepositoryError>
    where
        T: DeserializeOwned,
    {
        let response = request
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref(), lookup));
        }
        decode_envelope(body.as_ref())
    }
}

#[async_trait]
impl UserRepository for HttpUserRepository {
    async fn get_users(&self) -> Result<Vec<User>, UserRepositoryError> {
        let url = self.endpoint(&[USERS_SEGMENT])?;
        self.exchange(self.client.get(url), None).await
    }

    async fn get_user_by_id(&self, id: UserId) -> Result<User, UserRepositoryError> {
        let raw_id = id.to_string();
        let url = self.endpoint(&[USERS_SEGMENT, raw_id.as_str()])?;
        self.exchange(self.client.get(url), Some(id)).await
    }

    async fn create_user(&self, user: &User) -> Result<User, UserRepositoryError> {
        let url = self.endpoint(&[USERS_SEGMENT])?;
        let created: User = self.exchange(self.client.post(url).json(user), None).await?;
        if !created.id().is_assigned() {
            return Err(UserRepositoryError::query(
                "created user came back without an assigned id",
            ));
        }
        Ok(created)
    }
}

fn decode_envelope<T>(body: &[u8]) -> Result<T, UserRepositoryError>
where
    T: DeserializeOwned,
{
    let envelope: ApiResponse<T> = serde_json::from_slice(body).map_err(|error| {
        UserRepositoryError::query(format!("invalid envelope JSON: {error}"))
    })?;
    if let Some(message) = envelope.message.as_deref() {
        debug!(success = envelope.success, backend_message = message, "backend replied");
    }
    envelope.into_result()
}

fn map_transport_error(error: reqwest::Error) -> UserRepositoryError {
    if error.is_connect() || error.is_timeout() {
        UserRepositoryError::connection(error.to_string())
    } else {
        UserRepositoryError::query(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8], lookup: Option<UserId>) -> UserRepositoryError {
    if let (StatusCode::NOT_FOUND, Some(id)) = (status, lookup) {
        return UserRepositoryError::not_found(id.get());
    }
    // Backends may still describe the failure in an envelope.
    if let Ok(envelope) = serde_json::from_slice::<ApiResponse<serde_json::Value>>(body) {
        if let Some(message) = envelope.message.filter(|text| !text.trim().is_empty()) {
            return UserRepositoryError::rejected(message);
        }
    }

    let preview = body_preview(body);
    let message = if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), preview)
    };
    if status.is_server_error() && status != StatusCode::INTERNAL_SERVER_ERROR {
        UserRepositoryError::connection(message)
    } else {
        UserRepositoryError::query(message)
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn repository() -> HttpUserRepository {
        let base = Url::parse("http://localhost:8080/api/").expect("valid base URL");
        HttpUserRepository::new(base, Duration::from_secs(1)).expect("client builds")
    }

    #[rstest]
    #[case(&["users"], "http://localhost:8080/api/users")]
    #[case(&["users", "7"], "http://localhost:8080/api/users/7")]
    fn endpoint_appends_segments(
        repository: HttpUserRepository,
        #[case] segments: &[&str],
        #[case] expected: &str,
    ) {
        let url = repository.endpoint(segments).expect("endpoint builds");
        assert_eq!(url.as_str(), expected);
    }

    #[rstest]
    fn endpoint_works_without_trailing_slash() {
        let base = Url::parse("http://localhost:8080/api").expect("valid base URL");
        let repository =
            HttpUserRepository::new(base, Duration::from_secs(1)).expect("client builds");
        let url = repository.endpoint(&["users"]).expect("endpoint builds");
        assert_eq!(url.as_str(), "http://localhost:8080/api/users");
    }

    #[rstest]
    fn decode_envelope_yields_users() {
        let body = br#"{"success":true,"data":[{"id":1,"name":"Juan","email":"juan@example.com"}]}"#;
        let users: Vec<User> = decode_envelope(body).expect("decodes");
        assert_eq!(users, vec![User::new(1, "Juan", "juan@example.com")]);
    }

    #[rstest]
    fn decode_envelope_rejects_malformed_json() {
        let result = decode_envelope::<Vec<User>>(b"<html>");
        assert!(matches!(result, Err(UserRepositoryError::Query { .. })));
    }

    #[rstest]
    fn not_found_status_maps_to_lookup_error() {
        let error = map_status_error(StatusCode::NOT_FOUND, b"", Some(UserId::new(5)));
        assert_eq!(error, UserRepositoryError::not_found(5_i64));
    }

    #[rstest]
    fn error_status_prefers_envelope_message() {
        let body = br#"{"success":false,"message":"email duplicado"}"#;
        let error = map_status_error(StatusCode::CONFLICT, body, None);
        assert_eq!(error, UserRepositoryError::rejected("email duplicado"));
    }

    #[rstest]
    #[case(StatusCode::SERVICE_UNAVAILABLE, true)]
    #[case(StatusCode::INTERNAL_SERVER_ERROR, false)]
    #[case(StatusCode::BAD_REQUEST, false)]
    fn status_errors_split_connection_and_query(#[case] status: StatusCode, #[case] connection: bool) {
        let error = map_status_error(status, b"  oops \n", None);
        assert_eq!(
            matches!(error, UserRepositoryError::Connection { .. }),
            connection
        );
        assert!(error.to_string().contains(&format!("status {}: oops", status.as_u16())));
    }

    #[rstest]
    fn body_preview_truncates_long_bodies() {
        let body = "x".repeat(200);
        let preview = body_preview(body.as_bytes());
        assert_eq!(preview.chars().count(), 163);
        assert!(preview.ends_with("..."));
    }
}
