use std::collections::HashMap;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tower_sessions::session::{Id, Record};
use tower_sessions::SessionStore;

use super::KeyValueStorage;
use crate::config::ConsoleConfig;
use crate::error::{Error, Result};

/// Keeps every entry inside a single tower-sessions [`Record`].
///
/// Any `tower_sessions::SessionStore` (Postgres, Redis, in-memory…) can then
/// hold the console's credentials. Entries live in the record's data map as
/// JSON strings; the record id is fixed so the same store finds them again
/// after a restart.
///
/// Each write pushes the record's expiry to `now + ttl`. Once the record has
/// expired the backend stops returning it and every key reads as absent.
///
/// ```
/// use squarefeet_console::storage::{KeyValueStorage, SessionRecordStorage};
/// use tower_sessions::{session::Id, MemoryStore};
///
/// # async fn example() -> squarefeet_console::Result<()> {
/// let storage = SessionRecordStorage::new(MemoryStore::default(), Id(7));
/// storage.set("squarefeet_auth_token", "t").await?;
/// assert_eq!(storage.get("squarefeet_auth_token").await?.as_deref(), Some("t"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct SessionRecordStorage<S> {
    store: S,
    id: Id,
    ttl: time::Duration,
    // serializes read-modify-write cycles on the record
    write_lock: Mutex<()>,
}

impl<S: SessionStore> SessionRecordStorage<S> {
    pub fn new(store: S, id: Id) -> Self {
        Self::with_config(store, id, &ConsoleConfig::default())
    }

    /// Takes the record lifetime from `config.record_ttl`.
    pub fn with_config(store: S, id: Id, config: &ConsoleConfig) -> Self {
        Self {
            store,
            id,
            ttl: config.record_ttl,
            write_lock: Mutex::new(()),
        }
    }

    /// Overrides the record lifetime applied on every write.
    pub fn with_ttl(mut self, ttl: time::Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn record_id(&self) -> Id {
        self.id
    }

    async fn load_data(&self) -> Result<HashMap<String, serde_json::Value>> {
        Ok(self
            .store
            .load(&self.id)
            .await?
            .map(|record| record.data)
            .unwrap_or_default())
    }

    async fn store_data(&self, data: HashMap<String, serde_json::Value>) -> Result<()> {
        if data.is_empty() {
            self.store.delete(&self.id).await?;
            return Ok(());
        }

        let record = Record {
            id: self.id,
            data,
            expiry_date: OffsetDateTime::now_utc() + self.ttl,
        };
        self.store.save(&record).await?;
        Ok(())
    }
}

#[async_trait]
impl<S: SessionStore> KeyValueStorage for SessionRecordStorage<S> {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        match self.load_data().await?.remove(key) {
            None => Ok(None),
            Some(serde_json::Value::String(value)) => Ok(Some(value)),
            Some(other) => Err(Error::Decode(format!(
                "expected string under {key}, found {other}"
            ))),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut data = self.load_data().await?;
        data.insert(key.to_string(), serde_json::Value::String(value.to_string()));
        self.store_data(data).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut data = self.load_data().await?;
        if data.remove(key).is_none() {
            return Ok(());
        }
        self.store_data(data).await
    }
}
