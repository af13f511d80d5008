//! Runtime settings loaded via OrthoConfig.
//!
//! Values come from `USERS_*` environment variables (and any configuration
//! file OrthoConfig discovers). Accessors resolve defaults and validate, so
//! callers never interpret raw strings themselves.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use ortho_config::OrthoConfig;
use reqwest::Url;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::ports::UserRepository;
use crate::outbound::{FixtureUserRepository, HttpUserRepository};

const DEFAULT_LATENCY_MS: u64 = 1_000;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Errors raised while resolving [`SharedSettings`].
#[derive(Debug, Error)]
pub enum SettingsError {
    /// `repository` names no known backend.
    #[error("unknown repository backend `{value}` (expected `fixture` or `http`)")]
    UnknownRepository {
        /// Backend name as configured.
        value: String,
    },
    /// The HTTP backend was selected without a base URL.
    #[error("USERS_BASE_URL is required when the repository is `http`")]
    MissingBaseUrl,
    /// The base URL could not be parsed.
    #[error("invalid base URL `{value}`: {message}")]
    InvalidBaseUrl {
        /// Raw URL as configured.
        value: String,
        /// Parser diagnostic.
        message: String,
    },
    /// The timeout was configured as zero.
    #[error("timeout_secs must be greater than zero")]
    ZeroTimeout,
    /// The reqwest client could not be built.
    #[error("failed to build HTTP client: {source}")]
    HttpClient {
        /// Builder failure reported by reqwest.
        #[source]
        source: reqwest::Error,
    },
}

/// Repository backend selected at start-up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RepositoryBackend {
    /// In-process mock data.
    #[default]
    Fixture,
    /// JSON backend reached over HTTP.
    Http,
}

impl FromStr for RepositoryBackend {
    type Err = SettingsError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "fixture" | "mock" => Ok(Self::Fixture),
            "http" => Ok(Self::Http),
            _ => Err(SettingsError::UnknownRepository {
                value: value.to_owned(),
            }),
        }
    }
}

impl fmt::Display for RepositoryBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Fixture => "fixture",
            Self::Http => "http",
        })
    }
}

/// Settings shared by every host of the users core.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USERS")]
pub struct SharedSettings {
    /// Repository backend: `fixture` or `http`.
    pub repository: Option<String>,
    /// Base URL of the JSON backend.
    pub base_url: Option<String>,
    /// Simulated fixture latency in milliseconds.
    pub latency_ms: Option<u64>,
    /// HTTP request timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// Emit logs as JSON lines.
    #[ortho_config(default = false)]
    pub log_json: bool,
}

impl SharedSettings {
    /// Resolved repository backend, defaulting to the fixture.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::UnknownRepository`] for unrecognised names.
    pub fn repository_backend(&self) -> Result<RepositoryBackend, SettingsError> {
        self.repository
            .as_deref()
            .map_or(Ok(RepositoryBackend::default()), str::parse::<RepositoryBackend>)
    }

    /// Simulated fixture latency.
    #[must_use]
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms.unwrap_or(DEFAULT_LATENCY_MS))
    }

    /// HTTP request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::ZeroTimeout`] when configured as zero.
    pub fn timeout(&self) -> Result<Duration, SettingsError> {
        match self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS) {
            0 => Err(SettingsError::ZeroTimeout),
            secs => Ok(Duration::from_secs(secs)),
        }
    }

    /// Parsed base URL of the JSON backend.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::MissingBaseUrl`] when unset and
    /// [`SettingsError::InvalidBaseUrl`] when it does not parse.
    pub fn base_url(&self) -> Result<Url, SettingsError> {
        let value = self
            .base_url
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(SettingsError::MissingBaseUrl)?;
        Url::parse(value).map_err(|err| SettingsError::InvalidBaseUrl {
            value: value.to_owned(),
            message: err.to_string(),
        })
    }

    /// Build the configured repository adapter.
    ///
    /// # Errors
    ///
    /// Propagates any validation failure of the settings the selected
    /// backend needs.
    pub fn build_repository(&self) -> Result<Arc<dyn UserRepository>, SettingsError> {
        match self.repository_backend()? {
            RepositoryBackend::Fixture => {
                Ok(Arc::new(FixtureUserRepository::with_latency(self.latency())))
            }
            RepositoryBackend::Http => {
                let repository = HttpUserRepository::new(self.base_url()?, self.timeout()?)
                    .map_err(|source| SettingsError::HttpClient { source })?;
                Ok(Arc::new(repository))
            }
        }
    }
}
