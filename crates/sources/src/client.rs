//! Shared HTTP client for management endpoints

use std::time::Duration;

use reqwest::header;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::SourceError;

/// HTTP basic-auth credentials for the management API
#[derive(Debug, Clone)]
pub struct Credentials {
    pub user: String,
    pub password: String,
}

impl Credentials {
    /// Environment variable holding the management user
    pub const USER_ENV: &'static str = "JMX_USER";
    /// Environment variable holding the management password
    pub const PASSWORD_ENV: &'static str = "JMX_PASSWORD";

    /// Read credentials from the environment.
    ///
    /// Falls back to the historical defaults (`jmxadmin`/`password`) when
    /// the variables are unset. The fallback is kept for compatibility
    /// with existing deployments and is documented in the CLI help.
    pub fn from_env() -> Self {
        Self::resolve(
            std::env::var(Self::USER_ENV).ok(),
            std::env::var(Self::PASSWORD_ENV).ok(),
        )
    }

    fn resolve(user: Option<String>, password: Option<String>) -> Self {
        if user.is_none() && password.is_none() {
            debug!(
                user_env = Self::USER_ENV,
                password_env = Self::PASSWORD_ENV,
                "credentials not set, using built-in defaults"
            );
        }
        Self {
            user: user.unwrap_or_else(|| "jmxadmin".to_string()),
            password: password.unwrap_or_else(|| "password".to_string()),
        }
    }
}

/// Settings for building a [`MgmtClient`]
#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Per-request timeout
    pub timeout: Duration,
    /// Skip certificate verification (TLS is still negotiated)
    pub insecure_tls: bool,
    /// Basic-auth credentials, when the backend requires them
    pub credentials: Option<Credentials>,
}

/// Thin wrapper around [`reqwest::Client`] that issues JSON GETs against
/// a management endpoint.
pub struct MgmtClient {
    client: reqwest::Client,
    credentials: Option<Credentials>,
}

impl MgmtClient {
    /// Build the client.
    ///
    /// When certificate verification is disabled this logs a single
    /// warning here, at startup, rather than once per request.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Init`] if the underlying client cannot be
    /// constructed (TLS backend or proxy misconfiguration).
    pub fn new(settings: ClientSettings) -> Result<Self, SourceError> {
        if settings.insecure_tls {
            warn!("TLS certificate verification disabled; connections remain encrypted");
        }

        let client = reqwest::Client::builder()
            .user_agent(concat!("appmon/", env!("CARGO_PKG_VERSION")))
            .timeout(settings.timeout)
            .danger_accept_invalid_certs(settings.insecure_tls)
            .build()
            .map_err(|e| SourceError::Init(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            credentials: settings.credentials,
        })
    }

    /// GET `url` and parse the body as JSON.
    ///
    /// # Errors
    ///
    /// [`SourceError::Http`] on transport failure, [`SourceError::Status`]
    /// on a non-2xx answer, [`SourceError::Malformed`] when the body is
    /// not valid JSON.
    pub async fn get_json(&self, url: &str) -> Result<Value, SourceError> {
        debug!(url, "GET");

        let mut request = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/json");
        if let Some(creds) = &self.credentials {
            request = request.basic_auth(&creds.user, Some(&creds.password));
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
            });
        }

        response
            .json()
            .await
            .map_err(|e| SourceError::Malformed(e.to_string()))
    }
}
