//! Error type shared by every module of the console core.

use reqwest::StatusCode;

/// Errors produced by the console core.
///
/// Storage backends map their failures the same way regardless of what sits
/// underneath them:
///
/// - database / session-store errors → [`Error::Storage`]
/// - serialization errors → [`Error::Encode`]
/// - deserialization errors → [`Error::Decode`]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Login was attempted with an empty email or password, or the auth
    /// backend rejected the credentials.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// A role string that is neither `ADMIN` nor `ADVISOR`.
    #[error("unknown role: {0}")]
    UnknownRole(String),

    /// The key-value backend failed.
    #[error("storage error: {0}")]
    Storage(String),

    /// A value could not be serialized for storage or transport.
    #[error("encode error: {0}")]
    Encode(String),

    /// A stored or received value could not be deserialized.
    #[error("decode error: {0}")]
    Decode(String),

    /// The API answered 401. The persisted session has already been cleared.
    #[error("unauthorized")]
    Unauthorized,

    /// The API answered 403.
    #[error("access forbidden")]
    Forbidden,

    /// Any other non-success API response.
    #[error("api error ({status}): {message}")]
    Api { status: StatusCode, message: String },

    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(String),

    /// A status change the record's current state does not allow.
    #[error("cannot {action} while {state}")]
    InvalidTransition {
        action: &'static str,
        state: String,
    },

    /// Malformed configuration value.
    #[error("invalid configuration for {key}: {reason}")]
    Config { key: &'static str, reason: String },
}

impl Error {
    /// True for failures a login form should show inline and let the user retry.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::InvalidCredentials)
    }
}

impl From<tower_sessions::session_store::Error> for Error {
    fn from(e: tower_sessions::session_store::Error) -> Self {
        use tower_sessions::session_store::Error as StoreError;
        match e {
            StoreError::Encode(msg) => Error::Encode(msg),
            StoreError::Decode(msg) => Error::Decode(msg),
            StoreError::Backend(msg) => Error::Storage(msg),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Error::Decode(e.to_string())
        } else {
            Error::Transport(e.to_string())
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
