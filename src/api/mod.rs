//! Client for the CRM REST API.
//!
//! [`ApiClient`] attaches the persisted bearer token to every request and
//! enforces the console's response policy:
//!
//! - 401 clears the persisted session and notifies the [`SessionExpiry`]
//!   handler, then fails with [`Error::Unauthorized`];
//! - 403 is logged and fails with [`Error::Forbidden`];
//! - any other non-success status fails with [`Error::Api`].
//!
//! The [`admin`] and [`advisor`] modules wrap the endpoint paths in typed
//! calls over any [`ResourceClient`].

pub mod admin;
pub mod advisor;

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::config::ConsoleConfig;
use crate::credentials::CredentialStore;
use crate::error::{Error, Result};

/// Notified when the API rejects the current session.
#[async_trait]
pub trait SessionExpiry: Send + Sync {
    async fn session_expired(&self);
}

/// Sends one JSON request to the API and returns the decoded JSON body
/// (`Value::Null` for an empty body).
#[async_trait]
pub trait ResourceClient: Send + Sync {
    async fn request(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value>;
}

/// HTTP implementation of [`ResourceClient`].
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    credentials: CredentialStore,
    on_expired: Option<Arc<dyn SessionExpiry>>,
}

impl ApiClient {
    pub fn new(config: &ConsoleConfig, credentials: CredentialStore) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            credentials,
            on_expired: None,
        })
    }

    /// Registers the handler fired after a 401, typically the
    /// [`SessionManager`](crate::auth::SessionManager).
    pub fn with_expiry_handler(mut self, handler: Arc<dyn SessionExpiry>) -> Self {
        self.on_expired = Some(handler);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn unauthorized(&self) -> Error {
        if let Err(e) = self.credentials.clear().await {
            warn!(error = %e, "failed to clear credentials after 401");
        }
        if let Some(handler) = &self.on_expired {
            handler.session_expired().await;
        }
        Error::Unauthorized
    }
}

#[async_trait]
impl ResourceClient for ApiClient {
    async fn request(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, "api request");

        let mut request = self.http.request(method, &url);
        if let Some(token) = self.credentials.token().await? {
            request = request.bearer_auth(token);
        }
        request = match body {
            Some(body) => request.json(&body),
            None => request.header(reqwest::header::CONTENT_TYPE, "application/json"),
        };

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            return Err(self.unauthorized().await);
        }
        if status == StatusCode::FORBIDDEN {
            error!(%url, "Access forbidden");
            return Err(Error::Forbidden);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(Error::Api { status, message });
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&bytes).map_err(|e| Error::Decode(e.to_string()))
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("credentials", &self.credentials)
            .field("on_expired", &self.on_expired.is_some())
            .finish()
    }
}

pub(crate) async fn call<T: DeserializeOwned>(
    client: &dyn ResourceClient,
    method: Method,
    path: &str,
    body: Option<Value>,
) -> Result<T> {
    let value = client.request(method, path, body).await?;
    serde_json::from_value(value).map_err(|e| Error::Decode(e.to_string()))
}

pub(crate) fn to_body<T: Serialize + ?Sized>(data: &T) -> Result<Value> {
    serde_json::to_value(data).map_err(|e| Error::Encode(e.to_string()))
}
