//! The persisted half of an authenticated session.

use std::sync::Arc;

use tracing::warn;

use crate::config::ConsoleConfig;
use crate::error::{Error, Result};
use crate::session::{Session, SessionToken, User};
use crate::storage::KeyValueStorage;

/// Reads and writes a [`Session`] as two storage entries: the bearer token and
/// the JSON-encoded user.
///
/// Both entries present, or both absent, are the only states `load` accepts.
/// Anything else (a lone entry, an unparseable user) is wiped and reported as
/// "no session".
#[derive(Clone)]
pub struct CredentialStore {
    storage: Arc<dyn KeyValueStorage>,
    token_key: String,
    user_key: String,
}

impl CredentialStore {
    /// Uses the default keys, `squarefeet_auth_token` and `squarefeet_auth_user`.
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self::with_config(storage, &ConsoleConfig::default())
    }

    pub fn with_config(storage: Arc<dyn KeyValueStorage>, config: &ConsoleConfig) -> Self {
        Self {
            storage,
            token_key: config.token_key.clone(),
            user_key: config.user_key.clone(),
        }
    }

    pub fn token_key(&self) -> &str {
        &self.token_key
    }

    pub fn user_key(&self) -> &str {
        &self.user_key
    }

    /// Restores the persisted session, if a valid one exists.
    pub async fn load(&self) -> Result<Option<Session>> {
        let token = self.storage.get(&self.token_key).await?;
        let user = self.storage.get(&self.user_key).await?;

        match (token, user) {
            (None, None) => Ok(None),
            (Some(token), Some(raw_user)) if !token.is_empty() => {
                match serde_json::from_str::<User>(&raw_user) {
                    Ok(user) => Ok(Some(Session::new(SessionToken::new(token), user))),
                    Err(e) => {
                        warn!(error = %e, "discarding unreadable persisted user");
                        self.clear().await?;
                        Ok(None)
                    }
                }
            }
            (token, _) => {
                warn!(
                    has_token = token.is_some_and(|t| !t.is_empty()),
                    "discarding half-persisted session"
                );
                self.clear().await?;
                Ok(None)
            }
        }
    }

    /// Writes both entries.
    pub async fn persist(&self, session: &Session) -> Result<()> {
        let user = serde_json::to_string(&session.user).map_err(|e| Error::Encode(e.to_string()))?;

        self.storage.set(&self.user_key, &user).await?;
        if let Err(e) = self.storage.set(&self.token_key, session.token.as_str()).await {
            // never leave the user entry behind on its own
            self.storage.remove(&self.user_key).await.ok();
            return Err(e);
        }
        Ok(())
    }

    /// Removes both entries. Safe to call when nothing is stored.
    pub async fn clear(&self) -> Result<()> {
        let token = self.storage.remove(&self.token_key).await;
        let user = self.storage.remove(&self.user_key).await;
        token.and(user)
    }

    /// The stored bearer token alone, as the API client needs it. An empty
    /// entry reads as no token.
    pub async fn token(&self) -> Result<Option<String>> {
        Ok(self
            .storage
            .get(&self.token_key)
            .await?
            .filter(|token| !token.is_empty()))
    }
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("token_key", &self.token_key)
            .field("user_key", &self.user_key)
            .finish_non_exhaustive()
    }
}
