use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use time::OffsetDateTime;
use tracing::debug;

use crate::config::ConsoleConfig;
use crate::error::{Error, Result};
use crate::role::Role;
use crate::session::{Credentials, Session, SessionToken, User};

/// Exchanges credentials for a session.
///
/// [`SessionManager`](super::SessionManager) validates that email and password
/// are non-empty before calling an implementation.
#[async_trait]
pub trait AuthClient: Send + Sync {
    async fn authenticate(&self, credentials: &Credentials) -> Result<Session>;
}

/// Accepts any non-empty credentials and hands out a fixture user.
///
/// The user id and name depend on the requested role (`admin-001` /
/// `Admin User`, `advisor-001` / `Advisor User`); email and role are echoed
/// back. Tokens look like `mock-jwt-token-<unix millis>`.
#[derive(Debug, Clone, Default)]
pub struct MockAuthClient {
    latency: Duration,
}

impl MockAuthClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every answer by `latency`, to exercise loading states.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

#[async_trait]
impl AuthClient for MockAuthClient {
    async fn authenticate(&self, credentials: &Credentials) -> Result<Session> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if !credentials.is_complete() {
            return Err(Error::InvalidCredentials);
        }

        let (id, name) = match credentials.role {
            Role::Admin => ("admin-001", "Admin User"),
            Role::Advisor => ("advisor-001", "Advisor User"),
        };
        let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;

        Ok(Session::new(
            SessionToken::new(format!("mock-jwt-token-{millis}")),
            User {
                id: id.to_string(),
                name: name.to_string(),
                email: credentials.email.clone(),
                role: credentials.role,
                avatar: None,
            },
        ))
    }
}

/// Authenticates against `{api_base_url}/auth/login`.
///
/// The endpoint receives the credentials as JSON and answers
/// `{ "token": "...", "user": { ... } }`. 400 and 401 are treated as rejected
/// credentials.
#[derive(Debug, Clone)]
pub struct HttpAuthClient {
    http: reqwest::Client,
    login_url: String,
}

impl HttpAuthClient {
    pub fn new(config: &ConsoleConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            http,
            login_url: format!("{}/auth/login", config.api_base_url.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl AuthClient for HttpAuthClient {
    async fn authenticate(&self, credentials: &Credentials) -> Result<Session> {
        debug!(email = %credentials.email, role = %credentials.role, "authenticating");
        let response = self
            .http
            .post(&self.login_url)
            .json(credentials)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => Ok(response.json::<Session>().await?),
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED => Err(Error::InvalidCredentials),
            status => Err(Error::Api {
                status,
                message: response.text().await.unwrap_or_default(),
            }),
        }
    }
}
