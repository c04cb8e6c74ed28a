//! Durable key-value storage for the console's credentials.
//!
//! The console keeps exactly two entries, the bearer token and the
//! JSON-encoded user, but backends only see opaque string keys and values.
//! [`CredentialStore`](crate::credentials::CredentialStore) layers the
//! session semantics on top.

use async_trait::async_trait;

use crate::error::Result;

mod memory;
mod record_store;
mod seaorm_store;

pub use memory::MemoryStorage;
pub use record_store::SessionRecordStorage;
pub use seaorm_store::SeaOrmStorage;

/// A string-keyed, string-valued persistent map.
///
/// Implementations must make `remove` of an absent key a no-op.
#[async_trait]
pub trait KeyValueStorage: Send + Sync {
    /// Returns the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Deletes `key`.
    async fn remove(&self, key: &str) -> Result<()>;
}
