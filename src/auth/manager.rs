use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::{info, warn};

use super::client::AuthClient;
use crate::api::SessionExpiry;
use crate::credentials::CredentialStore;
use crate::error::{Error, Result};
use crate::role::RoleSet;
use crate::session::{Credentials, Session, SessionToken, User};

#[derive(Debug, Clone)]
enum SessionState {
    Resolving,
    Resolved(Option<Session>),
}

/// Point-in-time view of the authentication state, as the route guard sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSnapshot {
    pub loading: bool,
    pub user: Option<User>,
}

impl AuthSnapshot {
    /// Persisted session not resolved yet.
    pub fn loading() -> Self {
        Self {
            loading: true,
            user: None,
        }
    }

    pub fn anonymous() -> Self {
        Self {
            loading: false,
            user: None,
        }
    }

    pub fn signed_in(user: User) -> Self {
        Self {
            loading: false,
            user: Some(user),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        !self.loading && self.user.is_some()
    }

    pub fn has_role(&self, roles: impl Into<RoleSet>) -> bool {
        self.user.as_ref().is_some_and(|u| u.has_role(roles))
    }
}

/// Owns login, logout and the current session.
///
/// One instance is created per console and shared (`Arc`) with whatever needs
/// to ask "who is signed in". The in-memory session always mirrors what
/// [`CredentialStore`] holds.
///
/// ```
/// use std::sync::Arc;
/// use squarefeet_console::{Credentials, Role, SessionManager};
/// use squarefeet_console::auth::MockAuthClient;
/// use squarefeet_console::credentials::CredentialStore;
/// use squarefeet_console::storage::MemoryStorage;
///
/// # async fn example() -> squarefeet_console::Result<()> {
/// let store = CredentialStore::new(Arc::new(MemoryStorage::new()));
/// let manager = SessionManager::new(store, Arc::new(MockAuthClient::new()));
/// manager.init().await?;
///
/// let user = manager
///     .login(Credentials::new("advisor@squarefeet.com", "secret", Role::Advisor))
///     .await?;
/// assert!(manager.has_role(Role::Advisor));
/// assert_eq!(user.id, "advisor-001");
/// # Ok(())
/// # }
/// ```
pub struct SessionManager {
    credentials: CredentialStore,
    client: Arc<dyn AuthClient>,
    state: RwLock<SessionState>,
}

impl SessionManager {
    pub fn new(credentials: CredentialStore, client: Arc<dyn AuthClient>) -> Self {
        Self {
            credentials,
            client,
            state: RwLock::new(SessionState::Resolving),
        }
    }

    /// Restores the persisted session. Until this completes the manager
    /// reports [`is_loading`](Self::is_loading).
    ///
    /// A storage failure still resolves the manager, as signed out, and is
    /// returned to the caller.
    pub async fn init(&self) -> Result<()> {
        let loaded = self.credentials.load().await;
        let mut state = self.state.write();
        if let SessionState::Resolved(_) = *state {
            // a login finished first; it wins
            return loaded.map(|_| ());
        }
        match loaded {
            Ok(session) => {
                if let Some(session) = &session {
                    info!(user = %session.user.id, role = %session.user.role, "restored session");
                }
                *state = SessionState::Resolved(session);
                Ok(())
            }
            Err(e) => {
                *state = SessionState::Resolved(None);
                Err(e)
            }
        }
    }

    /// Signs in. Empty email or password fails with
    /// [`Error::InvalidCredentials`] without contacting the auth backend.
    pub async fn login(&self, credentials: Credentials) -> Result<User> {
        if !credentials.is_complete() {
            return Err(Error::InvalidCredentials);
        }

        let session = self.client.authenticate(&credentials).await?;
        if session.token.is_empty() {
            warn!(user = %session.user.id, "auth backend returned an empty token");
            return Err(Error::Decode("empty session token".to_string()));
        }
        self.credentials.persist(&session).await?;

        let user = session.user.clone();
        info!(user = %user.id, role = %user.role, "signed in");
        *self.state.write() = SessionState::Resolved(Some(session));
        Ok(user)
    }

    /// Signs out. Always drops the in-memory session, then clears storage.
    pub async fn logout(&self) -> Result<()> {
        if let Some(user) = self.take_session() {
            info!(user = %user.id, "signed out");
        }
        self.credentials.clear().await
    }

    /// Forced sign-out after the API rejected the session.
    pub async fn expire(&self) -> Result<()> {
        if let Some(user) = self.take_session() {
            warn!(user = %user.id, "session rejected by api, signing out");
        }
        self.credentials.clear().await
    }

    fn take_session(&self) -> Option<User> {
        let previous = std::mem::replace(&mut *self.state.write(), SessionState::Resolved(None));
        match previous {
            SessionState::Resolved(Some(session)) => Some(session.user),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(*self.state.read(), SessionState::Resolving)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(*self.state.read(), SessionState::Resolved(Some(_)))
    }

    /// True iff a user is signed in and their role is one of `roles`.
    pub fn has_role(&self, roles: impl Into<RoleSet>) -> bool {
        let roles = roles.into();
        match &*self.state.read() {
            SessionState::Resolved(Some(session)) => roles.contains(session.user.role),
            _ => false,
        }
    }

    pub fn current_user(&self) -> Option<User> {
        self.session().map(|s| s.user)
    }

    pub fn token(&self) -> Option<SessionToken> {
        self.session().map(|s| s.token)
    }

    pub fn session(&self) -> Option<Session> {
        match &*self.state.read() {
            SessionState::Resolved(session) => session.clone(),
            SessionState::Resolving => None,
        }
    }

    pub fn snapshot(&self) -> AuthSnapshot {
        match &*self.state.read() {
            SessionState::Resolving => AuthSnapshot::loading(),
            SessionState::Resolved(None) => AuthSnapshot::anonymous(),
            SessionState::Resolved(Some(session)) => AuthSnapshot::signed_in(session.user.clone()),
        }
    }

    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }
}

#[async_trait]
impl SessionExpiry for SessionManager {
    async fn session_expired(&self) {
        if let Err(e) = self.expire().await {
            warn!(error = %e, "failed to clear expired session");
        }
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("credentials", &self.credentials)
            .field("state", &*self.state.read())
            .finish_non_exhaustive()
    }
}
