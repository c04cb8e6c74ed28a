//! Console configuration.

use std::env;
use std::time::Duration;

use crate::error::{Error, Result};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3001/api";
pub const DEFAULT_TOKEN_KEY: &str = "squarefeet_auth_token";
pub const DEFAULT_USER_KEY: &str = "squarefeet_auth_user";
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Runtime settings for the console core.
///
/// `Default` gives the values the console ships with; [`ConsoleConfig::from_env`]
/// overrides them from the process environment (and a `.env` file if present).
#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleConfig {
    /// Base URL every API path is appended to.
    pub api_base_url: String,
    /// Per-request timeout of the API client.
    pub request_timeout: Duration,
    /// Storage key of the bearer token.
    pub token_key: String,
    /// Storage key of the JSON-encoded user.
    pub user_key: String,
    /// Rows per data-table page.
    pub page_size: usize,
    /// How long a tower-sessions record holding credentials stays valid after
    /// its last write.
    pub record_ttl: time::Duration,
    /// Connection string for [`SeaOrmStorage`](crate::storage::SeaOrmStorage).
    pub database_url: Option<String>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(15),
            token_key: DEFAULT_TOKEN_KEY.to_string(),
            user_key: DEFAULT_USER_KEY.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            record_ttl: time::Duration::days(30),
            database_url: None,
        }
    }
}

impl ConsoleConfig {
    /// Reads `API_BASE_URL`, `API_TIMEOUT_SECS`, `TABLE_PAGE_SIZE` and
    /// `DATABASE_URL`, after loading `.env` when one exists.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("API_BASE_URL").filter(|v| !v.trim().is_empty()) {
            config.api_base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(raw) = lookup("API_TIMEOUT_SECS") {
            let secs = parse_positive("API_TIMEOUT_SECS", &raw)?;
            config.request_timeout = Duration::from_secs(secs as u64);
        }
        if let Some(raw) = lookup("TABLE_PAGE_SIZE") {
            config.page_size = parse_positive("TABLE_PAGE_SIZE", &raw)?;
        }
        config.database_url = lookup("DATABASE_URL").filter(|v| !v.is_empty());

        Ok(config)
    }
}

fn parse_positive(key: &'static str, raw: &str) -> Result<usize> {
    match raw.trim().parse::<usize>() {
        Ok(0) => Err(Error::Config {
            key,
            reason: "must be greater than zero".to_string(),
        }),
        Ok(n) => Ok(n),
        Err(e) => Err(Error::Config {
            key,
            reason: e.to_string(),
        }),
    }
}
