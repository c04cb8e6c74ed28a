//! Database entity models for squarefeet-console.
//!
//! This module contains the Sea-ORM entity definitions used by the
//! [`SeaOrmStorage`](crate::storage::SeaOrmStorage) backend. These entities
//! define the database schema that holds the console's persisted credentials.
//!
//! The primary entity in this module is the `credential_entry` entity, a
//! plain key/value table.

/// Credential entry entity model for Sea-ORM database interaction.
///
/// Contains the database schema representation and entity model for storing
/// the console's key/value credential entries.
pub mod credential;
